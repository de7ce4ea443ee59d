use crate::constants::{Chain, VaultVersion};
use crate::utils::config_loader::{LoadConfigError, SectionConfigLoader, SectionConfigLoaderSync, load_from_file, load_from_file_sync};
use alloy_primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Configuration for the subgraph data layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubgraphConfig {
    /// Timeout for subgraph HTTP requests in seconds
    pub http_timeout_secs: u64,
    /// Development override: query as this address instead of the connected
    /// account. Hex string, validated on use.
    pub impersonate_account: Option<String>,
    /// Endpoint overrides keyed by "<version>-<chain_id>" (e.g. "v2-1"),
    /// for tests and self-hosted indexers
    pub endpoint_overrides: HashMap<String, String>,
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self { http_timeout_secs: 10, impersonate_account: None, endpoint_overrides: HashMap::new() }
    }
}

impl SubgraphConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> eyre::Result<Self> {
        let mut config = Self::default();

        if let Ok(timeout_str) = std::env::var("SUBGRAPH_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs =
                timeout_str.parse().map_err(|e| eyre::eyre!("Invalid SUBGRAPH_HTTP_TIMEOUT_SECS: {}", e))?;
        }

        if let Ok(impersonate) = std::env::var("IMPERSONATE_ACCOUNT") {
            impersonate
                .parse::<Address>()
                .map_err(|e| eyre::eyre!("Invalid IMPERSONATE_ACCOUNT: {}", e))?;
            config.impersonate_account = Some(impersonate);
        }

        Ok(config)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn impersonated_account(&self) -> eyre::Result<Option<Address>> {
        match &self.impersonate_account {
            Some(raw) => {
                let address =
                    raw.parse::<Address>().map_err(|e| eyre::eyre!("Invalid impersonate_account: {}", e))?;
                Ok(Some(address))
            }
            None => Ok(None),
        }
    }

    /// Override for one (version, chain) endpoint, validated as a URL.
    pub fn endpoint_override(&self, version: VaultVersion, chain: Chain) -> Option<&str> {
        self.endpoint_overrides
            .get(&format!("{}-{}", version, chain.chain_id()))
            .filter(|raw| Url::parse(raw).is_ok())
            .map(String::as_str)
    }
}

#[async_trait]
impl SectionConfigLoader for SubgraphConfig {
    type SectionType = SubgraphConfig;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        load_from_file(file_name).await
    }
}

impl SectionConfigLoaderSync for SubgraphConfig {
    type SectionType = SubgraphConfig;

    fn load_section_from_file_sync(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        load_from_file_sync(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SubgraphConfig::default();
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert!(config.impersonated_account().unwrap().is_none());
    }

    #[test]
    fn test_endpoint_override_lookup() {
        let mut config = SubgraphConfig::default();
        config
            .endpoint_overrides
            .insert("v2-1".to_string(), "http://127.0.0.1:8000/subgraphs/v2".to_string());

        assert_eq!(
            config.endpoint_override(VaultVersion::V2, Chain::Mainnet),
            Some("http://127.0.0.1:8000/subgraphs/v2")
        );
        assert_eq!(config.endpoint_override(VaultVersion::V1, Chain::Mainnet), None);
    }

    #[test]
    fn test_endpoint_override_rejects_invalid_url() {
        let mut config = SubgraphConfig::default();
        config.endpoint_overrides.insert("v1-1".to_string(), "not a url".to_string());
        assert_eq!(config.endpoint_override(VaultVersion::V1, Chain::Mainnet), None);
    }

    #[test]
    fn test_invalid_impersonate_account() {
        let config = SubgraphConfig {
            impersonate_account: Some("0xnothex".to_string()),
            ..SubgraphConfig::default()
        };
        assert!(config.impersonated_account().is_err());
    }

    #[test]
    fn test_toml_section() {
        let raw = r#"
            http_timeout_secs = 5

            [endpoint_overrides]
            "v1-1" = "http://127.0.0.1:8000/subgraphs/v1"
        "#;
        let config: SubgraphConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.http_timeout_secs, 5);
        assert!(config.endpoint_override(VaultVersion::V1, Chain::Mainnet).is_some());
    }

    #[test]
    fn test_load_section_from_file() {
        let path = std::env::temp_dir().join("vault-sync-config-test.toml");
        std::fs::write(&path, "http_timeout_secs = 7\n").unwrap();

        let config =
            SubgraphConfig::load_section_from_file_sync(path.to_string_lossy().to_string()).unwrap();
        assert_eq!(config.http_timeout_secs, 7);
        assert!(config.endpoint_overrides.is_empty());

        std::fs::remove_file(&path).ok();
    }
}
