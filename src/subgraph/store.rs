use crate::subgraph::types::SubgraphData;
use std::sync::Arc;
use tokio::sync::watch;

/// Owner of the aggregate view-model.
///
/// Readers subscribe (or read the current value); only the data layer inside
/// this crate can publish. A publish is one atomic channel send, so a reader
/// sees either the previous snapshot or the next one, never a mix.
#[derive(Debug)]
pub struct SubgraphStore {
    snapshot_tx: watch::Sender<Arc<SubgraphData>>,
}

impl SubgraphStore {
    pub fn new() -> Self {
        let (snapshot_tx, _) = watch::channel(Arc::new(SubgraphData::default()));
        Self { snapshot_tx }
    }

    /// Latest snapshot. Cheap: clones an Arc, not the data.
    pub fn current(&self) -> Arc<SubgraphData> {
        self.snapshot_tx.borrow().clone()
    }

    /// Receiver that observes every snapshot replacement.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SubgraphData>> {
        self.snapshot_tx.subscribe()
    }

    /// Replace the snapshot wholesale.
    pub(crate) fn publish(&self, data: SubgraphData) {
        self.snapshot_tx.send_replace(Arc::new(data));
    }

    /// Flip the loading flag while keeping every domain snapshot intact, so
    /// consumers keep rendering stale data during a refresh.
    pub(crate) fn set_loading(&self, loading: bool) {
        let current = self.current();
        if current.loading != loading {
            let mut next = (*current).clone();
            next.loading = loading;
            self.snapshot_tx.send_replace(Arc::new(next));
        }
    }
}

impl Default for SubgraphStore {
    fn default() -> Self {
        Self::new()
    }
}
