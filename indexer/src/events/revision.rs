//! Stream lifecycle transitions.
//!
//! A stream relationship moves through `NoRevision → Active → Closed →
//! Active → …`. The revision counters advance so that every reopened
//! lifecycle gets a disjoint identity: the revision index bumps at close (the
//! next open reads a fresh index), and the period index bumps on every rate
//! change within a lifecycle.

use flowgraph_sdk::{FlowRate, StreamRevision};

/// Lifecycle transition implied by a flow update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamTransition {
    /// No stream was flowing and one starts.
    Open,
    /// The stream keeps flowing at a different rate.
    RateChange,
    /// The stream stops flowing.
    Close,
    /// No lifecycle change (zero to zero, or an unchanged rate).
    Unchanged,
}

/// Classifies a flow update against the previous rate.
#[must_use]
pub const fn classify_transition(previous_rate: FlowRate, new_rate: FlowRate) -> StreamTransition {
    match (previous_rate.is_zero(), new_rate.is_zero()) {
        (true, false) => StreamTransition::Open,
        (false, true) => StreamTransition::Close,
        (false, false) => {
            if previous_rate.value() == new_rate.value() {
                StreamTransition::Unchanged
            } else {
                StreamTransition::RateChange
            }
        }
        (true, true) => StreamTransition::Unchanged,
    }
}

/// Advances the revision counters for a transition.
///
/// The revision index only ever increases; the period index resets to zero
/// when a lifecycle ends.
pub fn apply_transition(revision: &mut StreamRevision, transition: StreamTransition) {
    match transition {
        StreamTransition::Open | StreamTransition::Unchanged => {}
        StreamTransition::RateChange => {
            revision.period_revision_index = revision.period_revision_index.saturating_add(1);
        }
        StreamTransition::Close => {
            revision.revision_index = revision.revision_index.saturating_add(1);
            revision.period_revision_index = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_open() {
        assert_eq!(
            classify_transition(FlowRate::zero(), FlowRate::new(10)),
            StreamTransition::Open
        );
    }

    #[test]
    fn test_classify_close() {
        assert_eq!(
            classify_transition(FlowRate::new(10), FlowRate::zero()),
            StreamTransition::Close
        );
    }

    #[test]
    fn test_classify_rate_change() {
        assert_eq!(
            classify_transition(FlowRate::new(10), FlowRate::new(20)),
            StreamTransition::RateChange
        );
    }

    #[test]
    fn test_classify_unchanged() {
        assert_eq!(
            classify_transition(FlowRate::zero(), FlowRate::zero()),
            StreamTransition::Unchanged
        );
        assert_eq!(
            classify_transition(FlowRate::new(10), FlowRate::new(10)),
            StreamTransition::Unchanged
        );
    }

    #[test]
    fn test_apply_open_keeps_counters() {
        let mut revision = StreamRevision::new();
        apply_transition(&mut revision, StreamTransition::Open);

        assert_eq!(revision.revision_index, 0);
        assert_eq!(revision.period_revision_index, 0);
    }

    #[test]
    fn test_apply_rate_change_bumps_period_only() {
        let mut revision = StreamRevision::new();

        apply_transition(&mut revision, StreamTransition::RateChange);
        apply_transition(&mut revision, StreamTransition::RateChange);

        assert_eq!(revision.revision_index, 0);
        assert_eq!(revision.period_revision_index, 2);
    }

    #[test]
    fn test_apply_close_bumps_revision_resets_period() {
        let mut revision = StreamRevision::new();
        apply_transition(&mut revision, StreamTransition::RateChange);
        apply_transition(&mut revision, StreamTransition::Close);

        assert_eq!(revision.revision_index, 1);
        assert_eq!(revision.period_revision_index, 0);
    }

    #[test]
    fn test_full_lifecycle_never_decreases_revision() {
        let mut revision = StreamRevision::new();
        let mut last = revision.revision_index;

        for transition in [
            StreamTransition::Open,
            StreamTransition::RateChange,
            StreamTransition::Close,
            StreamTransition::Open,
            StreamTransition::Close,
            StreamTransition::Open,
        ] {
            apply_transition(&mut revision, transition);
            assert!(revision.revision_index >= last);
            last = revision.revision_index;
        }

        assert_eq!(revision.revision_index, 2);
        assert_eq!(revision.period_revision_index, 0);
    }
}
