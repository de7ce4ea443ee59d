use crate::constants::Chain;
use crate::subgraph::aggregator::SubgraphAggregator;
use crate::subgraph::client::SubgraphTransport;
use crate::subgraph::config::SubgraphConfig;
use crate::subgraph::store::SubgraphStore;
use crate::subgraph::types::SubgraphData;
use alloy_primitives::Address;
use eyre::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Wallet-connection state published by the embedding application.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletState {
    pub account: Option<Address>,
    pub chain: Option<Chain>,
}

/// Watcher service binding the aggregator to its triggers.
///
/// A spawned task observes (wallet state, invalidation counter) and runs one
/// refresh cycle per change. Each cycle is stamped with a generation; only
/// the newest generation may commit to the store, so a slow cycle that
/// finishes after a newer one started is discarded instead of overwriting
/// fresher data. Failed cycles are absorbed here: warn log, previous
/// snapshot retained, loading flag cleared.
pub struct SubgraphService {
    aggregator: Arc<SubgraphAggregator>,
    store: Arc<SubgraphStore>,
    impersonate: Option<Address>,
    wallet_rx: watch::Receiver<WalletState>,
    counter_rx: watch::Receiver<u64>,
    generation: Arc<AtomicU64>,
    watcher_task: Option<JoinHandle<()>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl SubgraphService {
    pub fn new(
        config: SubgraphConfig,
        wallet_rx: watch::Receiver<WalletState>,
        counter_rx: watch::Receiver<u64>,
    ) -> Result<Self> {
        let impersonate = config.impersonated_account()?;
        Ok(Self {
            aggregator: Arc::new(SubgraphAggregator::new(config)),
            store: Arc::new(SubgraphStore::new()),
            impersonate,
            wallet_rx,
            counter_rx,
            generation: Arc::new(AtomicU64::new(0)),
            watcher_task: None,
            shutdown_tx: None,
        })
    }

    pub fn with_transport(
        config: SubgraphConfig,
        transport: Arc<dyn SubgraphTransport>,
        wallet_rx: watch::Receiver<WalletState>,
        counter_rx: watch::Receiver<u64>,
    ) -> Result<Self> {
        let impersonate = config.impersonated_account()?;
        Ok(Self {
            aggregator: Arc::new(SubgraphAggregator::with_transport(config, transport)),
            store: Arc::new(SubgraphStore::new()),
            impersonate,
            wallet_rx,
            counter_rx,
            generation: Arc::new(AtomicU64::new(0)),
            watcher_task: None,
            shutdown_tx: None,
        })
    }

    /// The view-model store. Writes stay inside this crate; hand this out
    /// freely to presentation code.
    pub fn store(&self) -> Arc<SubgraphStore> {
        Arc::clone(&self.store)
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<SubgraphData>> {
        self.store.subscribe()
    }

    /// Start the watcher task. Fetches once for the current state, then once
    /// per trigger change.
    pub async fn start(&mut self) -> Result<()> {
        if self.watcher_task.is_some() {
            return Err(eyre::eyre!("SubgraphService already started"));
        }

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
        self.shutdown_tx = Some(shutdown_tx);

        let aggregator = Arc::clone(&self.aggregator);
        let store = Arc::clone(&self.store);
        let generation = Arc::clone(&self.generation);
        let impersonate = self.impersonate;
        let mut wallet_rx = self.wallet_rx.clone();
        let mut counter_rx = self.counter_rx.clone();

        let task = tokio::spawn(async move {
            info!("Subgraph watcher task started");

            // Consider the startup values as already-seen, then fetch once
            wallet_rx.mark_unchanged();
            counter_rx.mark_unchanged();
            Self::spawn_refresh(&aggregator, &store, &generation, effective_wallet(&wallet_rx, impersonate));

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                    changed = wallet_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        Self::spawn_refresh(&aggregator, &store, &generation, effective_wallet(&wallet_rx, impersonate));
                    }
                    changed = counter_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        Self::spawn_refresh(&aggregator, &store, &generation, effective_wallet(&wallet_rx, impersonate));
                    }
                }
            }

            info!("Subgraph watcher task ended");
        });
        self.watcher_task = Some(task);

        info!("SubgraphService started");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(()).await;
        }

        if let Some(watcher_task) = self.watcher_task.take() {
            if let Err(e) = watcher_task.await {
                warn!("Watcher task error during shutdown: {}", e);
            }
        }

        info!("SubgraphService stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.watcher_task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Launch one generation-stamped refresh cycle.
    fn spawn_refresh(
        aggregator: &Arc<SubgraphAggregator>,
        store: &Arc<SubgraphStore>,
        generation: &Arc<AtomicU64>,
        wallet: WalletState,
    ) {
        let my_generation = generation.fetch_add(1, Ordering::SeqCst) + 1;
        let aggregator = Arc::clone(aggregator);
        let store = Arc::clone(store);
        let generation = Arc::clone(generation);

        tokio::spawn(async move {
            // Without a chain the cycle is a no-op and the store stays
            // untouched, loading flag included
            if wallet.chain.is_none() {
                return;
            }

            store.set_loading(true);

            match aggregator.refresh(wallet.account, wallet.chain).await {
                Ok(Some(data)) => {
                    if generation.load(Ordering::SeqCst) == my_generation {
                        store.publish(data);
                    } else {
                        debug!("Discarding superseded refresh result (generation {})", my_generation);
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    warn!("Subgraph refresh failed, keeping previous snapshot: {}", error);
                    // The newest cycle owns the loading flag
                    if generation.load(Ordering::SeqCst) == my_generation {
                        store.set_loading(false);
                    }
                }
            }
        });
    }
}

fn effective_wallet(wallet_rx: &watch::Receiver<WalletState>, impersonate: Option<Address>) -> WalletState {
    let wallet = wallet_rx.borrow().clone();
    WalletState { account: impersonate.or(wallet.account), chain: wallet.chain }
}

impl Drop for SubgraphService {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("SubgraphService dropped while running, watcher task may be orphaned");
        }
    }
}

/// Builder for SubgraphService to make creation more ergonomic
pub struct SubgraphServiceBuilder {
    config: Option<SubgraphConfig>,
    transport: Option<Arc<dyn SubgraphTransport>>,
    wallet_rx: Option<watch::Receiver<WalletState>>,
    counter_rx: Option<watch::Receiver<u64>>,
}

impl SubgraphServiceBuilder {
    pub fn new() -> Self {
        Self { config: None, transport: None, wallet_rx: None, counter_rx: None }
    }

    pub fn with_config(mut self, config: SubgraphConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn SubgraphTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_wallet(mut self, wallet_rx: watch::Receiver<WalletState>) -> Self {
        self.wallet_rx = Some(wallet_rx);
        self
    }

    pub fn with_invalidation_counter(mut self, counter_rx: watch::Receiver<u64>) -> Self {
        self.counter_rx = Some(counter_rx);
        self
    }

    pub fn build(self) -> Result<SubgraphService> {
        let config = self.config.unwrap_or_else(|| SubgraphConfig::from_env().unwrap_or_default());
        let wallet_rx = self.wallet_rx.ok_or_else(|| eyre::eyre!("wallet state receiver is required"))?;
        // Without a tracker the counter never fires and only wallet changes trigger
        let counter_rx = self.counter_rx.unwrap_or_else(|| watch::channel(0).1);

        match self.transport {
            Some(transport) => SubgraphService::with_transport(config, transport, wallet_rx, counter_rx),
            None => SubgraphService::new(config, wallet_rx, counter_rx),
        }
    }
}

impl Default for SubgraphServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
