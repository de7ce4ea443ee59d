/// Subgraph Data Layer
///
/// This layer implements the multi-source aggregation pipeline:
///
/// - Per-domain query builders combined into one document per schema version
/// - Concurrent per-version fan-out with an all-or-nothing join
/// - Typed per-version raw responses and pure domain resolvers
/// - A watch-channel view-model store with atomic snapshot replacement
/// - A watcher service re-fetching on wallet or pending-transaction changes

// Core data layer components
pub mod aggregator;
pub mod client;
pub mod config;
pub mod query;
pub mod resolve;
pub mod schema;
pub mod service;
pub mod store;
pub mod types;


// Re-export main components for easy usage
pub use aggregator::SubgraphAggregator;
pub use client::{HttpTransport, SubgraphError, SubgraphTransport};
pub use config::SubgraphConfig;
pub use schema::{ResponseSet, VersionData};
pub use service::{SubgraphService, SubgraphServiceBuilder, WalletState};
pub use store::SubgraphStore;
pub use types::{
    ActivityKind, BalancesSnapshot, GovernanceTokenAccount, GovernanceTokenInfo, GovernanceTokenSnapshot,
    PriceHistorySnapshot, PricePoint, SubgraphData, VaultAccount, VaultAccountsSnapshot, VaultActivity,
    VaultBalance, VaultTransaction, VaultTransactionType,
};
