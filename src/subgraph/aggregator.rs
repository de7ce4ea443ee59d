use crate::constants::{Chain, VaultVersion, subgraph_url};
use crate::subgraph::client::{HttpTransport, SubgraphError, SubgraphTransport};
use crate::subgraph::config::SubgraphConfig;
use crate::subgraph::query::build_version_query;
use crate::subgraph::resolve::{
    resolve_balances, resolve_governance_token, resolve_price_history, resolve_transactions,
    resolve_vault_accounts, resolve_vault_activities,
};
use crate::subgraph::schema::{ResponseSet, VersionData};
use crate::subgraph::types::SubgraphData;
use alloy_primitives::Address;
use std::sync::Arc;
use std::time::Instant;
use strum::IntoEnumIterator;
use tokio::task::JoinSet;
use tracing::debug;

/// Version fan-out aggregator.
///
/// One refresh cycle issues one combined query per schema generation, joins
/// on all of them, and resolves every domain from the complete result set.
/// The join is all-or-nothing: a failure on any version fails the cycle, so
/// a partially merged view is never produced.
pub struct SubgraphAggregator {
    config: SubgraphConfig,
    transport: Arc<dyn SubgraphTransport>,
}

impl SubgraphAggregator {
    pub fn new(config: SubgraphConfig) -> Self {
        let transport = Arc::new(HttpTransport::new(config.http_timeout()));
        Self { config, transport }
    }

    /// Swap the wire for tests or alternative clients.
    pub fn with_transport(config: SubgraphConfig, transport: Arc<dyn SubgraphTransport>) -> Self {
        Self { config, transport }
    }

    /// Endpoint for one (version, chain) pair, config overrides first.
    fn endpoint_for(&self, version: VaultVersion, chain: Chain) -> Result<String, SubgraphError> {
        if let Some(url) = self.config.endpoint_override(version, chain) {
            return Ok(url.to_string());
        }
        subgraph_url(version, chain)
            .map(str::to_string)
            .ok_or(SubgraphError::UnresolvableEndpoint { version, chain })
    }

    /// Run one full fetch-and-resolve cycle.
    ///
    /// Without a chain there is no way to resolve an endpoint, so the cycle
    /// is a no-op returning `Ok(None)` with zero requests issued. All
    /// endpoints are resolved before the first request so an unsupported
    /// (version, chain) pair aborts the cycle up front.
    pub async fn refresh(
        &self,
        account: Option<Address>,
        chain: Option<Chain>,
    ) -> Result<Option<SubgraphData>, SubgraphError> {
        let Some(chain) = chain else {
            return Ok(None);
        };

        let started = Instant::now();

        let mut targets = Vec::new();
        for version in VaultVersion::iter() {
            targets.push((version, self.endpoint_for(version, chain)?));
        }

        let mut requests = JoinSet::new();
        for (version, url) in targets {
            let transport = Arc::clone(&self.transport);
            let query = build_version_query(account, version);
            requests.spawn(async move {
                let data = transport.execute(&url, &query).await?;
                let decoded = VersionData::decode(version, data)?;
                Ok::<VersionData, SubgraphError>(decoded)
            });
        }

        // Every version settles before the cycle is allowed to fail
        let mut responses = ResponseSet::default();
        let mut first_error = None;
        while let Some(joined) = requests.join_next().await {
            match joined {
                Ok(Ok(data)) => responses.insert(data),
                Ok(Err(error)) => {
                    first_error.get_or_insert(error);
                }
                Err(join_error) => {
                    first_error.get_or_insert(SubgraphError::Join(join_error.to_string()));
                }
            }
        }
        if let Some(error) = first_error {
            return Err(error);
        }

        debug!(
            "Subgraph fan-out across {} versions completed in {:?}",
            responses.len(),
            started.elapsed()
        );

        Ok(Some(SubgraphData {
            vault_accounts: resolve_vault_accounts(&responses),
            transactions: resolve_transactions(&responses),
            balances: resolve_balances(&responses),
            vault_activities: resolve_vault_activities(&responses),
            governance_token: resolve_governance_token(&responses),
            price_history: resolve_price_history(&responses),
            loading: false,
        }))
    }
}
