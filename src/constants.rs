use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Schema generation of the vault subgraphs. Several generations are live at
/// the same time and every fetch cycle covers all of them.
#[derive(
    Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VaultVersion {
    V1,
    V2,
}

/// Networks the vault products are deployed on.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, EnumString, EnumIter, Serialize, Deserialize)]
pub enum Chain {
    Mainnet,
    Kovan,
    Avalanche,
}

impl Chain {
    pub fn chain_id(&self) -> u64 {
        match self {
            Chain::Mainnet => 1,
            Chain::Kovan => 42,
            Chain::Avalanche => 43114,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Chain> {
        match chain_id {
            1 => Some(Chain::Mainnet),
            42 => Some(Chain::Kovan),
            43114 => Some(Chain::Avalanche),
            _ => None,
        }
    }
}

/// Governance token metadata. The token lives in its own entity on every
/// subgraph generation rather than in a vault.
pub const GOVERNANCE_TOKEN_SYMBOL: &str = "VGT";
pub const GOVERNANCE_TOKEN_DECIMALS: u8 = 18;

/// Query endpoint for one (version, chain) pair.
///
/// Kovan predates the v2 deployment, so (V2, Kovan) has no endpoint; a fetch
/// cycle on Kovan aborts before issuing any request.
pub fn subgraph_url(version: VaultVersion, chain: Chain) -> Option<&'static str> {
    match (version, chain) {
        (VaultVersion::V1, Chain::Mainnet) => {
            Some("https://api.thegraph.com/subgraphs/name/vault-labs/vault-v1")
        }
        (VaultVersion::V2, Chain::Mainnet) => {
            Some("https://api.thegraph.com/subgraphs/name/vault-labs/vault-v2")
        }
        (VaultVersion::V1, Chain::Kovan) => {
            Some("https://api.thegraph.com/subgraphs/name/vault-labs/vault-v1-kovan")
        }
        (VaultVersion::V2, Chain::Kovan) => None,
        (VaultVersion::V1, Chain::Avalanche) => {
            Some("https://api.thegraph.com/subgraphs/name/vault-labs/vault-v1-avalanche")
        }
        (VaultVersion::V2, Chain::Avalanche) => {
            Some("https://api.thegraph.com/subgraphs/name/vault-labs/vault-v2-avalanche")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_version_display_and_parse() {
        assert_eq!(format!("{}", VaultVersion::V1), "v1");
        assert_eq!(format!("{}", VaultVersion::V2), "v2");
        assert_eq!("v2".parse::<VaultVersion>().unwrap(), VaultVersion::V2);
        assert!(VaultVersion::V1 < VaultVersion::V2);
    }

    #[test]
    fn test_chain_ids_roundtrip() {
        for chain in Chain::iter() {
            assert_eq!(Chain::from_chain_id(chain.chain_id()), Some(chain));
        }
        assert_eq!(Chain::from_chain_id(137), None);
    }

    #[test]
    fn test_endpoints_total_on_production_chains() {
        for version in VaultVersion::iter() {
            assert!(subgraph_url(version, Chain::Mainnet).is_some());
            assert!(subgraph_url(version, Chain::Avalanche).is_some());
        }
    }

    #[test]
    fn test_kovan_has_no_v2_endpoint() {
        assert!(subgraph_url(VaultVersion::V1, Chain::Kovan).is_some());
        assert!(subgraph_url(VaultVersion::V2, Chain::Kovan).is_none());
    }
}
