//! In-memory entity store.
//!
//! Backs tests and local development runs. No durability and no Merkle-style
//! commitments; the map is the whole state.

use std::collections::HashMap;

use flowgraph_sdk::{
    AccountTokenSnapshot, EventRecord, FlowOperator, Index, IndexSubscription, Stream,
    StreamPeriod, StreamRevision, Token, TokenStatistic,
};

use super::{EntityStore, StoreError};

/// HashMap-backed entity store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tokens: HashMap<String, Token>,
    token_statistics: HashMap<String, TokenStatistic>,
    stream_revisions: HashMap<String, StreamRevision>,
    streams: HashMap<String, Stream>,
    stream_periods: HashMap<String, StreamPeriod>,
    indexes: HashMap<String, Index>,
    subscriptions: HashMap<String, IndexSubscription>,
    account_snapshots: HashMap<String, AccountTokenSnapshot>,
    flow_operators: HashMap<String, FlowOperator>,
    event_records: HashMap<String, EventRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of records across all entity kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
            + self.token_statistics.len()
            + self.stream_revisions.len()
            + self.streams.len()
            + self.stream_periods.len()
            + self.indexes.len()
            + self.subscriptions.len()
            + self.account_snapshots.len()
            + self.flow_operators.len()
            + self.event_records.len()
    }

    /// Returns true if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntityStore for MemoryStore {
    fn get_token(&self, id: &str) -> Result<Option<Token>, StoreError> {
        Ok(self.tokens.get(id).cloned())
    }

    fn put_token(&mut self, id: &str, token: Token) -> Result<(), StoreError> {
        self.tokens.insert(id.to_string(), token);
        Ok(())
    }

    fn get_token_statistic(&self, id: &str) -> Result<Option<TokenStatistic>, StoreError> {
        Ok(self.token_statistics.get(id).cloned())
    }

    fn put_token_statistic(&mut self, id: &str, stats: TokenStatistic) -> Result<(), StoreError> {
        self.token_statistics.insert(id.to_string(), stats);
        Ok(())
    }

    fn get_stream_revision(&self, id: &str) -> Result<Option<StreamRevision>, StoreError> {
        Ok(self.stream_revisions.get(id).cloned())
    }

    fn put_stream_revision(
        &mut self,
        id: &str,
        revision: StreamRevision,
    ) -> Result<(), StoreError> {
        self.stream_revisions.insert(id.to_string(), revision);
        Ok(())
    }

    fn get_stream(&self, id: &str) -> Result<Option<Stream>, StoreError> {
        Ok(self.streams.get(id).cloned())
    }

    fn put_stream(&mut self, id: &str, stream: Stream) -> Result<(), StoreError> {
        self.streams.insert(id.to_string(), stream);
        Ok(())
    }

    fn get_stream_period(&self, id: &str) -> Result<Option<StreamPeriod>, StoreError> {
        Ok(self.stream_periods.get(id).cloned())
    }

    fn put_stream_period(&mut self, id: &str, period: StreamPeriod) -> Result<(), StoreError> {
        self.stream_periods.insert(id.to_string(), period);
        Ok(())
    }

    fn get_index(&self, id: &str) -> Result<Option<Index>, StoreError> {
        Ok(self.indexes.get(id).cloned())
    }

    fn put_index(&mut self, id: &str, index: Index) -> Result<(), StoreError> {
        self.indexes.insert(id.to_string(), index);
        Ok(())
    }

    fn get_subscription(&self, id: &str) -> Result<Option<IndexSubscription>, StoreError> {
        Ok(self.subscriptions.get(id).cloned())
    }

    fn put_subscription(
        &mut self,
        id: &str,
        subscription: IndexSubscription,
    ) -> Result<(), StoreError> {
        self.subscriptions.insert(id.to_string(), subscription);
        Ok(())
    }

    fn get_account_snapshot(
        &self,
        id: &str,
    ) -> Result<Option<AccountTokenSnapshot>, StoreError> {
        Ok(self.account_snapshots.get(id).cloned())
    }

    fn put_account_snapshot(
        &mut self,
        id: &str,
        snapshot: AccountTokenSnapshot,
    ) -> Result<(), StoreError> {
        self.account_snapshots.insert(id.to_string(), snapshot);
        Ok(())
    }

    fn get_flow_operator(&self, id: &str) -> Result<Option<FlowOperator>, StoreError> {
        Ok(self.flow_operators.get(id).cloned())
    }

    fn put_flow_operator(&mut self, id: &str, operator: FlowOperator) -> Result<(), StoreError> {
        self.flow_operators.insert(id.to_string(), operator);
        Ok(())
    }

    fn get_event_record(&self, id: &str) -> Result<Option<EventRecord>, StoreError> {
        Ok(self.event_records.get(id).cloned())
    }

    fn put_event_record(&mut self, id: &str, record: EventRecord) -> Result<(), StoreError> {
        self.event_records.insert(id.to_string(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;
    use flowgraph_sdk::Timestamp;

    use super::*;

    #[test]
    fn test_memory_store_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_memory_store_get_absent() {
        let store = MemoryStore::new();
        assert_eq!(store.get_token("missing"), Ok(None));
        assert_eq!(store.get_stream("missing"), Ok(None));
    }

    #[test]
    fn test_memory_store_put_get_round_trip() {
        let mut store = MemoryStore::new();
        let token = Token::new(Address::repeat_byte(7), Timestamp::new(100), 1_000_000);
        let id = token.id();

        store.put_token(&id, token.clone()).expect("put");

        assert_eq!(store.get_token(&id), Ok(Some(token)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_put_overwrites() {
        let mut store = MemoryStore::new();
        let mut token = Token::new(Address::repeat_byte(7), Timestamp::new(100), 1_000_000);
        let id = token.id();

        store.put_token(&id, token.clone()).expect("put");

        token.symbol = "FLOWx".to_string();
        store.put_token(&id, token.clone()).expect("put");

        let loaded = store.get_token(&id).expect("get").expect("present");
        assert_eq!(loaded.symbol, "FLOWx");
        assert_eq!(store.len(), 1);
    }
}
