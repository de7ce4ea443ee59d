use crate::constants::VaultVersion;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw response shapes, one set per schema generation.
///
/// Every field is `#[serde(default)]`: the subgraph schemas evolve
/// independently and a missing entity decodes to its empty value instead of
/// failing the whole cycle. Amounts and timestamps arrive as decimal strings
/// and stay raw here; the resolvers own parsing and normalization.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaultRef {
    #[serde(default)]
    pub symbol: String,
}

// ---- v1 ----

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V1VaultAccount {
    pub id: String,
    pub vault: VaultRef,
    pub total_deposits: String,
    pub total_yield_earned: String,
    pub total_balance: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V1VaultTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub vault: VaultRef,
    pub amount: String,
    pub address: String,
    pub txhash: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V1BalanceUpdate {
    pub vault: VaultRef,
    pub balance: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V1ShortPosition {
    pub id: String,
    pub vault: VaultRef,
    pub mint_amount: String,
    pub opened_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V1OptionTrade {
    pub id: String,
    pub vault: VaultRef,
    pub sell_amount: String,
    pub premium: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V1GovernanceToken {
    pub total_supply: String,
    pub holders: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V1PerformanceUpdate {
    pub vault: VaultRef,
    /// Scaled by the vault asset's native decimals
    pub price_per_share: String,
    pub round: u16,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V1Data {
    pub vault_accounts: Vec<V1VaultAccount>,
    pub vault_transactions: Vec<V1VaultTransaction>,
    pub balance_updates: Vec<V1BalanceUpdate>,
    pub vault_short_positions: Vec<V1ShortPosition>,
    pub vault_option_trades: Vec<V1OptionTrade>,
    pub governance_token: Option<V1GovernanceToken>,
    pub vault_performance_updates: Vec<V1PerformanceUpdate>,
}

// ---- v2 ----

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V2VaultAccount {
    pub id: String,
    pub vault: VaultRef,
    pub total_deposits: String,
    pub total_balance: String,
    pub total_staked_balance: String,
    pub round: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V2VaultTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub vault: VaultRef,
    pub amount: String,
    pub underlying_amount: String,
    pub address: String,
    pub txhash: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V2BalanceUpdate {
    pub vault: VaultRef,
    pub balance: String,
    pub yield_earned: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V2VaultActivity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub vault: VaultRef,
    pub amount: String,
    pub premium: String,
    pub round: u16,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V2GovernanceToken {
    pub total_supply: String,
    pub num_holders: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V2GovernanceTokenAccount {
    pub id: String,
    pub balance: String,
    pub staked_balance: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V2PerformanceUpdate {
    pub vault: VaultRef,
    /// Already 18-decimal fixed point
    pub price_per_share: String,
    pub round: u16,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V2Data {
    pub vault_accounts: Vec<V2VaultAccount>,
    pub vault_transactions: Vec<V2VaultTransaction>,
    pub balance_updates: Vec<V2BalanceUpdate>,
    pub vault_activities: Vec<V2VaultActivity>,
    pub governance_token: Option<V2GovernanceToken>,
    pub governance_token_accounts: Vec<V2GovernanceTokenAccount>,
    pub vault_performance_updates: Vec<V2PerformanceUpdate>,
}

/// Tagged raw response of one version, so resolvers can never mix up field
/// layouts across generations.
#[derive(Debug, Clone)]
pub enum VersionData {
    V1(V1Data),
    V2(V2Data),
}

impl VersionData {
    pub fn decode(version: VaultVersion, data: serde_json::Value) -> Result<Self, serde_json::Error> {
        match version {
            VaultVersion::V1 => Ok(VersionData::V1(serde_json::from_value(data)?)),
            VaultVersion::V2 => Ok(VersionData::V2(serde_json::from_value(data)?)),
        }
    }

    pub fn version(&self) -> VaultVersion {
        match self {
            VersionData::V1(_) => VaultVersion::V1,
            VersionData::V2(_) => VaultVersion::V2,
        }
    }
}

/// The complete result set of one fan-out cycle, keyed by version. Resolvers
/// only ever see a finished set: every version that was queried is present.
#[derive(Debug, Clone, Default)]
pub struct ResponseSet {
    responses: BTreeMap<VaultVersion, VersionData>,
}

impl ResponseSet {
    pub fn insert(&mut self, data: VersionData) {
        self.responses.insert(data.version(), data);
    }

    pub fn v1(&self) -> Option<&V1Data> {
        match self.responses.get(&VaultVersion::V1) {
            Some(VersionData::V1(data)) => Some(data),
            _ => None,
        }
    }

    pub fn v2(&self) -> Option<&V2Data> {
        match self.responses.get(&VaultVersion::V2) {
            Some(VersionData::V2(data)) => Some(data),
            _ => None,
        }
    }

    pub fn versions(&self) -> impl Iterator<Item = VaultVersion> + '_ {
        self.responses.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_entities_decode_to_defaults() {
        let data = VersionData::decode(VaultVersion::V1, json!({})).unwrap();
        let VersionData::V1(v1) = data else { panic!("wrong variant") };
        assert!(v1.vault_accounts.is_empty());
        assert!(v1.governance_token.is_none());
    }

    #[test]
    fn test_missing_fields_decode_to_defaults() {
        let data = VersionData::decode(
            VaultVersion::V2,
            json!({
                "vaultAccounts": [{ "id": "acc-1", "vault": { "symbol": "ETH-CALL" } }]
            }),
        )
        .unwrap();
        let VersionData::V2(v2) = data else { panic!("wrong variant") };
        assert_eq!(v2.vault_accounts.len(), 1);
        assert_eq!(v2.vault_accounts[0].total_balance, "");
        assert_eq!(v2.vault_accounts[0].round, 0);
    }

    #[test]
    fn test_response_set_typed_accessors() {
        let mut set = ResponseSet::default();
        set.insert(VersionData::V1(V1Data::default()));
        set.insert(VersionData::V2(V2Data::default()));

        assert_eq!(set.len(), 2);
        assert!(set.v1().is_some());
        assert!(set.v2().is_some());
        assert_eq!(set.versions().collect::<Vec<_>>(), vec![VaultVersion::V1, VaultVersion::V2]);
    }
}
