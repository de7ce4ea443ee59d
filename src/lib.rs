// Layered architecture
pub mod subgraph;   // Data layer: per-version fan-out, resolvers, view-model store
pub mod pending;    // Pending-transaction tracking, the invalidation source

// Common identity types, constants and utilities
pub mod constants;
pub mod utils;
pub mod vault;

// Re-export key components from each layer
pub use constants::{Chain, GOVERNANCE_TOKEN_DECIMALS, GOVERNANCE_TOKEN_SYMBOL, VaultVersion, subgraph_url};
pub use pending::{PendingTransaction, PendingTransactionTracker, TransactionKind, TransactionStatus};
pub use subgraph::{
    HttpTransport, ResponseSet, SubgraphAggregator, SubgraphConfig, SubgraphData, SubgraphError,
    SubgraphService, SubgraphServiceBuilder, SubgraphStore, SubgraphTransport, VersionData, WalletState,
};
pub use vault::{Asset, Vault};
