//! Event processor implementation.
//!
//! Applies decoded protocol events to the entity store, one at a time, in
//! canonical chain order. Per event: the host gate decides whether the token
//! belongs to this deployment, the token is created and enriched on first
//! sight, the identity scheme and revision counters decide
//! create-vs-update-vs-new-revision, the accrual primitive settles numeric
//! state, and an audit record is written.

use std::sync::Arc;
use std::time::Instant;

use alloy_primitives::{Address, U256};
use chrono::Utc;
use flowgraph_sdk::{
    accrual, ids, AccountTokenSnapshot, EventRecord, FlowOperator, FlowRate, Index,
    IndexSubscription, Stream, StreamPeriod, Timestamp, Token, TokenStatistic,
};

use crate::chain::{ResolverRpc, TokenRpc};
use crate::config::IndexerConfig;
use crate::enrichment;
use crate::error::IndexerError;
use crate::store::{EntityStore, EntityStoreExt};

use super::metrics::EventMetrics;
use super::revision::{self, StreamTransition};
use super::types::{Event, EventKind};

/// Outcome of processing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The event's entity effects were applied.
    Applied,
    /// The event was dropped: its token is not bound to the expected host.
    InvalidHost,
}

impl ProcessOutcome {
    /// Returns true if the event was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Event processor deriving versioned entities from protocol events.
///
/// Invoked synchronously, once per event, on a single logical thread. The
/// store is read-then-written per event; the in-order delivery guarantee from
/// the event source is the only concurrency control.
///
/// # Example
///
/// ```rust,ignore
/// use flowgraph_indexer::config::IndexerConfig;
/// use flowgraph_indexer::events::EventProcessor;
/// use flowgraph_indexer::store::MemoryStore;
///
/// let mut processor = EventProcessor::new(
///     &IndexerConfig::default(),
///     MemoryStore::new(),
///     token_rpc,
///     resolver,
/// )?;
/// let outcome = processor.process_event(&event)?;
/// ```
pub struct EventProcessor<S, T, R> {
    /// Entity store.
    store: S,

    /// Token contract capability.
    token_rpc: T,

    /// Resolver registry capability.
    resolver: R,

    /// Expected protocol host.
    host_address: Address,

    /// Resolver deployment in use.
    resolver_address: Address,

    /// Metrics for monitoring.
    metrics: Arc<EventMetrics>,
}

impl<S, T, R> EventProcessor<S, T, R>
where
    S: EntityStore,
    T: TokenRpc,
    R: ResolverRpc,
{
    /// Creates a new event processor.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: &IndexerConfig,
        store: S,
        token_rpc: T,
        resolver: R,
    ) -> Result<Self, IndexerError> {
        let host_address = config.parse_host()?;
        let resolver_address = config.parse_resolver()?;

        Ok(Self {
            store,
            token_rpc,
            resolver,
            host_address,
            resolver_address,
            metrics: Arc::new(EventMetrics::new()),
        })
    }

    /// Returns a reference to the entity store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns a reference to the metrics.
    #[must_use]
    pub fn metrics(&self) -> Arc<EventMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Processes one event to completion.
    ///
    /// # Errors
    ///
    /// Returns an error on store failures or out-of-bound event coordinates;
    /// either aborts the pipeline, since downstream aggregates assume no
    /// gaps.
    pub fn process_event(&mut self, event: &Event) -> Result<ProcessOutcome, IndexerError> {
        let start = Instant::now();

        let result = self.apply_event(event);
        if result.is_err() {
            self.metrics.record_error();
        }
        self.metrics.record_processing_time(start.elapsed());

        result
    }

    fn apply_event(&mut self, event: &Event) -> Result<ProcessOutcome, IndexerError> {
        let order = event.order_key()?;
        let token_address = event.kind.token();

        if !enrichment::token_has_valid_host(
            &self.store,
            &self.token_rpc,
            self.host_address,
            token_address,
        )? {
            tracing::warn!(
                event = event.kind.name(),
                token = %ids::address_hex(token_address),
                "dropping event for token with foreign or unknown host"
            );
            self.metrics.record_invalid_host();
            return Ok(ProcessOutcome::InvalidHost);
        }

        self.ensure_token(token_address, event.timestamp, order)?;

        match event.kind.clone() {
            EventKind::FlowUpdated {
                token,
                sender,
                receiver,
                flow_rate,
            } => {
                self.apply_flow_updated(token, sender, receiver, flow_rate, event.timestamp, order)?;
                self.metrics.record_flow();
            }
            EventKind::FlowOperatorUpdated {
                token,
                sender,
                flow_operator,
                permissions,
                flow_rate_allowance,
            } => {
                self.apply_flow_operator_updated(
                    token,
                    sender,
                    flow_operator,
                    permissions,
                    flow_rate_allowance,
                    event.timestamp,
                    order,
                )?;
                self.metrics.record_operator_op();
            }
            EventKind::IndexCreated {
                token,
                publisher,
                index_id,
            } => {
                self.apply_index_created(token, publisher, index_id, event.timestamp, order)?;
                self.metrics.record_index_op();
            }
            EventKind::IndexUpdated {
                token,
                publisher,
                index_id,
                new_index_value,
                total_units_pending,
                total_units_approved,
            } => {
                self.apply_index_updated(
                    token,
                    publisher,
                    index_id,
                    new_index_value,
                    total_units_pending,
                    total_units_approved,
                    event.timestamp,
                    order,
                )?;
                self.metrics.record_index_op();
            }
            EventKind::SubscriptionApproved {
                token,
                subscriber,
                publisher,
                index_id,
            } => {
                self.apply_subscription_approved(
                    token,
                    subscriber,
                    publisher,
                    index_id,
                    event.timestamp,
                    order,
                )?;
                self.metrics.record_subscription_op();
            }
            EventKind::SubscriptionUnitsUpdated {
                token,
                subscriber,
                publisher,
                index_id,
                units,
            } => {
                self.apply_subscription_units_updated(
                    token,
                    subscriber,
                    publisher,
                    index_id,
                    units,
                    event.timestamp,
                    order,
                )?;
                self.metrics.record_subscription_op();
            }
        }

        let record = EventRecord {
            name: event.kind.name().to_string(),
            tx_hash: event.tx_hash,
            block_number: event.block_number,
            log_index: event.log_index,
            order,
            recorded_at: Utc::now(),
        };
        self.store.put_event_record(&record.id(), record)?;

        Ok(ProcessOutcome::Applied)
    }

    /// Creates and enriches the token on first sight, with its statistic.
    fn ensure_token(
        &mut self,
        token_address: Address,
        timestamp: Timestamp,
        order: u64,
    ) -> Result<(), IndexerError> {
        let token_id = ids::address_hex(token_address);
        if self.store.get_token(&token_id)?.is_some() {
            return Ok(());
        }

        let mut token = Token::new(token_address, timestamp, order);
        enrichment::enrich_token(&mut token, &self.token_rpc);
        enrichment::refresh_listing(&mut token, &self.resolver, self.resolver_address);

        let mut stats = TokenStatistic::new(token_address);
        enrichment::update_total_supply_for_native_token(&token, &mut stats, &self.token_rpc);
        stats.updated_at_timestamp = timestamp;
        stats.updated_at_order = order;

        tracing::debug!(token = %token_id, symbol = %token.symbol, "created token");
        self.store.put_token(&token_id, token)?;
        self.store.put_token_statistic(&token_id, stats)?;
        self.metrics.record_token_created();

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_flow_updated(
        &mut self,
        token: Address,
        sender: Address,
        receiver: Address,
        new_rate: FlowRate,
        timestamp: Timestamp,
        order: u64,
    ) -> Result<(), IndexerError> {
        let revision_id = ids::stream_revision_id(sender, receiver, token);
        let mut rev = self
            .store
            .get_stream_revision(&revision_id)?
            .unwrap_or_default();

        let stream_id = ids::stream_id(sender, receiver, token, rev.revision_index);
        let existing = self.store.get_stream(&stream_id)?;
        let previous_rate = existing
            .as_ref()
            .map_or(FlowRate::zero(), |stream| stream.current_flow_rate);

        let transition = revision::classify_transition(previous_rate, new_rate);

        match transition {
            StreamTransition::Open => {
                let stream =
                    Stream::open(sender, receiver, token, rev.revision_index, new_rate, timestamp, order);
                let period = StreamPeriod::open(
                    &stream_id,
                    rev.period_revision_index,
                    new_rate,
                    timestamp,
                    order,
                );

                rev.most_recent_stream = Some(stream_id.clone());
                self.store.put_stream_period(&period.id(), period)?;
                self.store.put_stream(&stream_id, stream)?;
            }
            StreamTransition::RateChange | StreamTransition::Close => {
                let mut stream = existing
                    .ok_or_else(|| IndexerError::MissingStream(stream_id.clone()))?;

                let settled =
                    accrual::amount_flowed(timestamp, stream.updated_at_timestamp, previous_rate);
                stream.streamed_until_updated_at =
                    stream.streamed_until_updated_at.saturating_add(settled);
                stream.current_flow_rate = new_rate;
                stream.updated_at_timestamp = timestamp;
                stream.updated_at_order = order;

                self.stop_open_period(&stream_id, rev.period_revision_index, timestamp)?;

                revision::apply_transition(&mut rev, transition);

                if transition == StreamTransition::RateChange {
                    let period = StreamPeriod::open(
                        &stream_id,
                        rev.period_revision_index,
                        new_rate,
                        timestamp,
                        order,
                    );
                    self.store.put_stream_period(&period.id(), period)?;
                }

                self.store.put_stream(&stream_id, stream)?;
            }
            StreamTransition::Unchanged => {
                if let Some(mut stream) = existing {
                    let settled = accrual::amount_flowed(
                        timestamp,
                        stream.updated_at_timestamp,
                        previous_rate,
                    );
                    stream.streamed_until_updated_at =
                        stream.streamed_until_updated_at.saturating_add(settled);
                    stream.updated_at_timestamp = timestamp;
                    stream.updated_at_order = order;
                    self.store.put_stream(&stream_id, stream)?;
                }
            }
        }

        self.store.put_stream_revision(&revision_id, rev)?;

        self.settle_account_snapshots(token, sender, receiver, previous_rate, new_rate, timestamp, order)?;
        self.settle_token_statistic(token, previous_rate, new_rate, transition, timestamp, order)?;

        Ok(())
    }

    /// Stops the currently open period of a stream, settling its amount.
    fn stop_open_period(
        &mut self,
        stream_id: &str,
        period_revision_index: u32,
        timestamp: Timestamp,
    ) -> Result<(), IndexerError> {
        let period_id = ids::stream_period_id(stream_id, period_revision_index);
        if let Some(mut period) = self.store.get_stream_period(&period_id)? {
            let amount =
                accrual::amount_flowed(timestamp, period.started_at_timestamp, period.flow_rate);
            period.stop(timestamp, amount);
            self.store.put_stream_period(&period_id, period)?;
        }
        Ok(())
    }

    /// Settles both parties' snapshots, then applies the rate delta.
    #[allow(clippy::too_many_arguments)]
    fn settle_account_snapshots(
        &mut self,
        token: Address,
        sender: Address,
        receiver: Address,
        previous_rate: FlowRate,
        new_rate: FlowRate,
        timestamp: Timestamp,
        order: u64,
    ) -> Result<(), IndexerError> {
        let rate_delta = new_rate - previous_rate;

        let sender_id = ids::account_token_snapshot_id(sender, token);
        let mut snapshot = self
            .store
            .get_account_snapshot(&sender_id)?
            .unwrap_or_else(|| AccountTokenSnapshot::new(sender, token));
        Self::settle_snapshot(&mut snapshot, timestamp, order);
        snapshot.total_outflow_rate = snapshot.total_outflow_rate + rate_delta;
        snapshot.total_net_flow_rate = snapshot.total_inflow_rate - snapshot.total_outflow_rate;
        self.store.put_account_snapshot(&sender_id, snapshot)?;

        let receiver_id = ids::account_token_snapshot_id(receiver, token);
        let mut snapshot = self
            .store
            .get_account_snapshot(&receiver_id)?
            .unwrap_or_else(|| AccountTokenSnapshot::new(receiver, token));
        Self::settle_snapshot(&mut snapshot, timestamp, order);
        snapshot.total_inflow_rate = snapshot.total_inflow_rate + rate_delta;
        snapshot.total_net_flow_rate = snapshot.total_inflow_rate - snapshot.total_outflow_rate;
        self.store.put_account_snapshot(&receiver_id, snapshot)?;

        Ok(())
    }

    /// Settles accrued amounts on a snapshot with the rates in force before
    /// this event, then stamps it.
    fn settle_snapshot(snapshot: &mut AccountTokenSnapshot, timestamp: Timestamp, order: u64) {
        let balance_delta = accrual::amount_flowed(
            timestamp,
            snapshot.updated_at_timestamp,
            snapshot.total_net_flow_rate,
        );
        snapshot.balance_until_updated_at = snapshot
            .balance_until_updated_at
            .saturating_add(balance_delta);

        let streamed_out = accrual::amount_flowed(
            timestamp,
            snapshot.updated_at_timestamp,
            snapshot.total_outflow_rate,
        );
        snapshot.total_amount_streamed_until_updated_at = snapshot
            .total_amount_streamed_until_updated_at
            .saturating_add(streamed_out);

        snapshot.updated_at_timestamp = timestamp;
        snapshot.updated_at_order = order;
    }

    /// Settles the token-level aggregate and applies stream-count changes.
    fn settle_token_statistic(
        &mut self,
        token: Address,
        previous_rate: FlowRate,
        new_rate: FlowRate,
        transition: StreamTransition,
        timestamp: Timestamp,
        order: u64,
    ) -> Result<(), IndexerError> {
        let stats_id = ids::address_hex(token);
        let mut stats = self
            .store
            .get_token_statistic(&stats_id)?
            .unwrap_or_else(|| TokenStatistic::new(token));

        let settled = accrual::amount_flowed(
            timestamp,
            stats.updated_at_timestamp,
            stats.total_outflow_rate,
        );
        stats.total_amount_streamed_until_updated_at = stats
            .total_amount_streamed_until_updated_at
            .saturating_add(settled);

        stats.total_outflow_rate = stats.total_outflow_rate + (new_rate - previous_rate);

        match transition {
            StreamTransition::Open => {
                stats.total_number_of_active_streams =
                    stats.total_number_of_active_streams.saturating_add(1);
            }
            StreamTransition::Close => {
                stats.total_number_of_active_streams =
                    stats.total_number_of_active_streams.saturating_sub(1);
                stats.total_number_of_closed_streams =
                    stats.total_number_of_closed_streams.saturating_add(1);
            }
            StreamTransition::RateChange | StreamTransition::Unchanged => {}
        }

        stats.updated_at_timestamp = timestamp;
        stats.updated_at_order = order;
        self.store.put_token_statistic(&stats_id, stats)?;

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_flow_operator_updated(
        &mut self,
        token: Address,
        sender: Address,
        flow_operator: Address,
        permissions: u8,
        flow_rate_allowance: FlowRate,
        timestamp: Timestamp,
        order: u64,
    ) -> Result<(), IndexerError> {
        let operator_id = ids::flow_operator_id(flow_operator, token, sender);
        let mut operator = self
            .store
            .get_flow_operator(&operator_id)?
            .unwrap_or(FlowOperator {
                flow_operator,
                token,
                sender,
                permissions: 0,
                flow_rate_allowance: FlowRate::zero(),
                updated_at_timestamp: timestamp,
                updated_at_order: order,
            });

        operator.permissions = permissions;
        operator.flow_rate_allowance = flow_rate_allowance;
        operator.updated_at_timestamp = timestamp;
        operator.updated_at_order = order;

        self.store.put_flow_operator(&operator_id, operator)?;
        Ok(())
    }

    fn apply_index_created(
        &mut self,
        token: Address,
        publisher: Address,
        index_id: u32,
        timestamp: Timestamp,
        order: u64,
    ) -> Result<(), IndexerError> {
        let id = ids::index_id(publisher, token, index_id);

        // Replays must not reset an index that already exists.
        if self.store.get_index(&id)?.is_none() {
            let index = Index::new(publisher, token, index_id, timestamp, order);
            self.store.put_index(&id, index)?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_index_updated(
        &mut self,
        token: Address,
        publisher: Address,
        index_id: u32,
        new_index_value: U256,
        total_units_pending: U256,
        total_units_approved: U256,
        timestamp: Timestamp,
        order: u64,
    ) -> Result<(), IndexerError> {
        let id = ids::index_id(publisher, token, index_id);
        let mut index = self
            .store
            .get_index(&id)?
            .unwrap_or_else(|| Index::new(publisher, token, index_id, timestamp, order));

        index.index_value = new_index_value;
        index.total_units_pending = total_units_pending;
        index.total_units_approved = total_units_approved;
        index.updated_at_timestamp = timestamp;
        index.updated_at_order = order;

        self.store.put_index(&id, index)?;
        Ok(())
    }

    fn apply_subscription_approved(
        &mut self,
        token: Address,
        subscriber: Address,
        publisher: Address,
        index_id: u32,
        timestamp: Timestamp,
        order: u64,
    ) -> Result<(), IndexerError> {
        let id = ids::subscription_id(subscriber, publisher, token, index_id);
        let mut subscription = self.store.get_subscription(&id)?.unwrap_or_else(|| {
            IndexSubscription::new(subscriber, publisher, token, index_id, timestamp, order)
        });

        subscription.approved = true;
        subscription.updated_at_timestamp = timestamp;
        subscription.updated_at_order = order;

        self.store.put_subscription(&id, subscription)?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_subscription_units_updated(
        &mut self,
        token: Address,
        subscriber: Address,
        publisher: Address,
        index_id: u32,
        units: U256,
        timestamp: Timestamp,
        order: u64,
    ) -> Result<(), IndexerError> {
        let id = ids::subscription_id(subscriber, publisher, token, index_id);

        // Domain existence before the update, via the predicate: a present
        // record with zero units does not exist.
        let existed = self.store.subscription_exists(&id)?;

        let mut subscription = self.store.get_subscription(&id)?.unwrap_or_else(|| {
            IndexSubscription::new(subscriber, publisher, token, index_id, timestamp, order)
        });

        let old_units = subscription.units;
        subscription.units = units;
        subscription.updated_at_timestamp = timestamp;
        subscription.updated_at_order = order;
        let exists_now = subscription.has_units();
        let approved = subscription.approved;

        self.store.put_subscription(&id, subscription)?;

        let idx_id = ids::index_id(publisher, token, index_id);
        if let Some(mut index) = self.store.get_index(&idx_id)? {
            if approved {
                index.total_units_approved =
                    adjust_units(index.total_units_approved, old_units, units);
            } else {
                index.total_units_pending =
                    adjust_units(index.total_units_pending, old_units, units);
            }

            match (existed, exists_now) {
                (false, true) => {
                    index.total_subscriptions_with_units =
                        index.total_subscriptions_with_units.saturating_add(1);
                }
                (true, false) => {
                    index.total_subscriptions_with_units =
                        index.total_subscriptions_with_units.saturating_sub(1);
                }
                _ => {}
            }

            index.updated_at_timestamp = timestamp;
            index.updated_at_order = order;
            self.store.put_index(&idx_id, index)?;
        }

        Ok(())
    }
}

/// Moves a unit total by the difference between old and new units.
fn adjust_units(current: U256, old_units: U256, new_units: U256) -> U256 {
    if new_units >= old_units {
        current.saturating_add(new_units - old_units)
    } else {
        current.saturating_sub(old_units - new_units)
    }
}
