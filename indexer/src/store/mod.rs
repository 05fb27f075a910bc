//! Entity store contract.
//!
//! Persistence is an external collaborator: this module specifies only the
//! load/save contract the processor depends on, plus the existence
//! predicates that give storage presence its domain meaning. Every lookup is
//! an explicit load-or-absent; predicates are named functions, never bare
//! null-checks at call sites.

pub mod memory;

pub use memory::MemoryStore;

use flowgraph_sdk::{
    AccountTokenSnapshot, EventRecord, FlowOperator, Index, IndexSubscription, Stream,
    StreamPeriod, StreamRevision, Token, TokenStatistic,
};

/// Errors from the entity store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The storage backend failed.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Load/save contract for derived entities.
///
/// Each getter returns `Ok(None)` for an absent record; the processor is the
/// only writer, so reads-then-writes need no further coordination.
pub trait EntityStore {
    /// Loads a token by identity.
    fn get_token(&self, id: &str) -> Result<Option<Token>, StoreError>;

    /// Saves a token.
    fn put_token(&mut self, id: &str, token: Token) -> Result<(), StoreError>;

    /// Loads a token statistic by identity.
    fn get_token_statistic(&self, id: &str) -> Result<Option<TokenStatistic>, StoreError>;

    /// Saves a token statistic.
    fn put_token_statistic(&mut self, id: &str, stats: TokenStatistic) -> Result<(), StoreError>;

    /// Loads a stream revision by identity.
    fn get_stream_revision(&self, id: &str) -> Result<Option<StreamRevision>, StoreError>;

    /// Saves a stream revision.
    fn put_stream_revision(&mut self, id: &str, revision: StreamRevision)
        -> Result<(), StoreError>;

    /// Loads a stream by identity.
    fn get_stream(&self, id: &str) -> Result<Option<Stream>, StoreError>;

    /// Saves a stream.
    fn put_stream(&mut self, id: &str, stream: Stream) -> Result<(), StoreError>;

    /// Loads a stream period by identity.
    fn get_stream_period(&self, id: &str) -> Result<Option<StreamPeriod>, StoreError>;

    /// Saves a stream period.
    fn put_stream_period(&mut self, id: &str, period: StreamPeriod) -> Result<(), StoreError>;

    /// Loads a distribution index by identity.
    fn get_index(&self, id: &str) -> Result<Option<Index>, StoreError>;

    /// Saves a distribution index.
    fn put_index(&mut self, id: &str, index: Index) -> Result<(), StoreError>;

    /// Loads an index subscription by identity.
    fn get_subscription(&self, id: &str) -> Result<Option<IndexSubscription>, StoreError>;

    /// Saves an index subscription.
    fn put_subscription(
        &mut self,
        id: &str,
        subscription: IndexSubscription,
    ) -> Result<(), StoreError>;

    /// Loads an account-token snapshot by identity.
    fn get_account_snapshot(&self, id: &str)
        -> Result<Option<AccountTokenSnapshot>, StoreError>;

    /// Saves an account-token snapshot.
    fn put_account_snapshot(
        &mut self,
        id: &str,
        snapshot: AccountTokenSnapshot,
    ) -> Result<(), StoreError>;

    /// Loads a flow operator by identity.
    fn get_flow_operator(&self, id: &str) -> Result<Option<FlowOperator>, StoreError>;

    /// Saves a flow operator.
    fn put_flow_operator(&mut self, id: &str, operator: FlowOperator) -> Result<(), StoreError>;

    /// Loads an event audit record by identity.
    fn get_event_record(&self, id: &str) -> Result<Option<EventRecord>, StoreError>;

    /// Saves an event audit record.
    fn put_event_record(&mut self, id: &str, record: EventRecord) -> Result<(), StoreError>;
}

/// Existence predicates over the entity store.
///
/// These carry the domain meaning of "exists", which is not the same as a
/// record being present.
pub trait EntityStoreExt: EntityStore {
    /// Returns true if a revision record exists for the relationship.
    ///
    /// Presence only: this does **not** say whether a stream is currently
    /// flowing. Activity lives on the stream's own flow rate.
    fn stream_revision_exists(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.get_stream_revision(id)?.is_some())
    }

    /// Returns true if a subscription exists in the domain sense: a record is
    /// present AND carries strictly positive units.
    ///
    /// A subscriber can be approved, or have had its units zeroed, while the
    /// record persists; such a subscription no longer exists economically.
    fn subscription_exists(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self
            .get_subscription(id)?
            .is_some_and(|subscription| subscription.has_units()))
    }
}

impl<T: EntityStore + ?Sized> EntityStoreExt for T {}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};
    use flowgraph_sdk::{ids, Timestamp};

    use super::*;

    fn subscription(units: u64) -> IndexSubscription {
        let mut sub = IndexSubscription::new(
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            Address::repeat_byte(3),
            0,
            Timestamp::new(100),
            1_000_000,
        );
        sub.units = U256::from(units);
        sub
    }

    #[test]
    fn test_stream_revision_exists_absent() {
        let store = MemoryStore::new();
        assert_eq!(store.stream_revision_exists("missing"), Ok(false));
    }

    #[test]
    fn test_stream_revision_exists_present() {
        let mut store = MemoryStore::new();
        let id = ids::stream_revision_id(
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            Address::repeat_byte(3),
        );

        store
            .put_stream_revision(&id, StreamRevision::new())
            .expect("put");

        assert_eq!(store.stream_revision_exists(&id), Ok(true));
    }

    #[test]
    fn test_subscription_exists_absent() {
        let store = MemoryStore::new();
        assert_eq!(store.subscription_exists("missing"), Ok(false));
    }

    #[test]
    fn test_subscription_exists_zero_units() {
        let mut store = MemoryStore::new();
        let sub = subscription(0);
        let id = sub.id();

        store.put_subscription(&id, sub).expect("put");

        // Record present, economically absent.
        assert_eq!(store.subscription_exists(&id), Ok(false));
    }

    #[test]
    fn test_subscription_exists_positive_units() {
        let mut store = MemoryStore::new();
        let sub = subscription(10);
        let id = sub.id();

        store.put_subscription(&id, sub).expect("put");

        assert_eq!(store.subscription_exists(&id), Ok(true));
    }
}
