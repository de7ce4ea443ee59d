use crate::constants::VaultVersion;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, VariantNames};

/// Underlying asset of a vault product.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    Eth,
    Wbtc,
    Usdc,
    Avax,
}

impl Asset {
    pub fn decimals(&self) -> u8 {
        match self {
            Asset::Eth => 18,
            Asset::Wbtc => 8,
            Asset::Usdc => 6,
            Asset::Avax => 18,
        }
    }
}

/// Symbolic identifier of one vault product, independent of version. The
/// Display/FromStr form is the symbol the subgraphs key their entities by.
#[derive(
    Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, EnumIter, VariantNames, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING-KEBAB-CASE")]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum Vault {
    EthCall,
    WbtcCall,
    EthPut,
    AvaxCall,
}

impl Vault {
    pub fn asset(&self) -> Asset {
        match self {
            Vault::EthCall => Asset::Eth,
            Vault::WbtcCall => Asset::Wbtc,
            // The put vault collects premiums in the quote asset
            Vault::EthPut => Asset::Usdc,
            Vault::AvaxCall => Asset::Avax,
        }
    }

    /// Whether this vault exists in a given schema generation. The put and
    /// AVAX vaults launched with v2 and have no v1 entities.
    pub fn is_deployed(&self, version: VaultVersion) -> bool {
        match self {
            Vault::EthCall | Vault::WbtcCall => true,
            Vault::EthPut | Vault::AvaxCall => version >= VaultVersion::V2,
        }
    }

    /// Vaults present in a schema generation, in declaration order.
    pub fn deployed_in(version: VaultVersion) -> Vec<Vault> {
        use strum::IntoEnumIterator;
        Vault::iter().filter(|vault| vault.is_deployed(version)).collect()
    }
}
