use crate::constants::VaultVersion;
use crate::vault::Vault;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumString};

/// One user position in one vault generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultAccount {
    pub total_deposits: U256,
    pub total_balance: U256,
    pub total_staked_balance: U256,
    /// Round the account was last touched in; v1 predates rounds and stays 0
    pub round: u16,
}

impl VaultAccount {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self == &Self::zero()
    }
}

/// Positions keyed by version, then vault. Every known (version, vault) pair
/// has an entry; untouched vaults carry the zero record.
pub type VaultAccountsSnapshot = BTreeMap<VaultVersion, BTreeMap<Vault, VaultAccount>>;

pub fn default_vault_accounts() -> VaultAccountsSnapshot {
    VaultVersion::iter()
        .map(|version| (version, Vault::iter().map(|vault| (vault, VaultAccount::zero())).collect()))
        .collect()
}

/// Transaction type as the subgraphs report it.
#[derive(Copy, Clone, Debug, Display, Default, PartialEq, Eq, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum VaultTransactionType {
    #[default]
    Unknown,
    Deposit,
    Withdraw,
    InstantWithdraw,
    Transfer,
    Receive,
    Stake,
    Unstake,
    Migrate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultTransaction {
    pub id: String,
    pub vault: Vault,
    pub version: VaultVersion,
    pub kind: VaultTransactionType,
    /// Amount in vault shares or asset units, as reported
    pub amount: U256,
    /// Amount in the underlying asset; equals `amount` for v1 entries
    pub underlying_amount: U256,
    pub address: Address,
    pub tx_hash: String,
    pub timestamp: u64,
}

/// Current balance of one vault for the connected account, summed across
/// versions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultBalance {
    pub total_balance: U256,
    pub yield_earned: U256,
}

pub type BalancesSnapshot = BTreeMap<Vault, VaultBalance>;

pub fn default_balances() -> BalancesSnapshot {
    Vault::iter().map(|vault| (vault, VaultBalance::default())).collect()
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Options minted against vault deposits at the start of a round
    Minting,
    /// Minted options sold, premium collected
    Sales,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultActivity {
    pub id: String,
    pub vault: Vault,
    pub version: VaultVersion,
    pub kind: ActivityKind,
    pub amount: U256,
    pub premium: U256,
    pub round: u16,
    pub timestamp: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceTokenInfo {
    pub total_supply: U256,
    pub num_holders: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceTokenAccount {
    pub balance: U256,
    pub staked_balance: U256,
}

/// Governance-token stats plus the connected account's holdings. `None` is
/// the explicit empty value: the token entity was absent from every version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceTokenSnapshot {
    pub token: Option<GovernanceTokenInfo>,
    pub account: Option<GovernanceTokenAccount>,
}

/// One price-per-share observation, normalized to 18-decimal fixed point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub round: u16,
    pub price_per_share: U256,
    pub timestamp: u64,
}

/// Share-price series keyed by version, then vault. Versions are not merged:
/// share prices of different generations are not comparable.
pub type PriceHistorySnapshot = BTreeMap<VaultVersion, BTreeMap<Vault, Vec<PricePoint>>>;

pub fn default_price_history() -> PriceHistorySnapshot {
    VaultVersion::iter()
        .map(|version| (version, Vault::iter().map(|vault| (vault, Vec::new())).collect()))
        .collect()
}

/// The aggregate view-model: one resolved snapshot of every domain plus the
/// loading flag. Replaced wholesale by the data layer, read-only everywhere
/// else.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubgraphData {
    pub vault_accounts: VaultAccountsSnapshot,
    pub transactions: Vec<VaultTransaction>,
    pub balances: BalancesSnapshot,
    pub vault_activities: Vec<VaultActivity>,
    pub governance_token: GovernanceTokenSnapshot,
    pub price_history: PriceHistorySnapshot,
    pub loading: bool,
}

impl Default for SubgraphData {
    fn default() -> Self {
        Self {
            vault_accounts: default_vault_accounts(),
            transactions: Vec::new(),
            balances: default_balances(),
            vault_activities: Vec::new(),
            governance_token: GovernanceTokenSnapshot::default(),
            price_history: default_price_history(),
            loading: true,
        }
    }
}

impl SubgraphData {
    pub fn account_for(&self, version: VaultVersion, vault: Vault) -> Option<&VaultAccount> {
        self.vault_accounts.get(&version).and_then(|accounts| accounts.get(&vault))
    }

    pub fn balance_of(&self, vault: Vault) -> U256 {
        self.balances.get(&vault).map(|balance| balance.total_balance).unwrap_or(U256::ZERO)
    }

    pub fn price_history_for(&self, version: VaultVersion, vault: Vault) -> &[PricePoint] {
        self.price_history
            .get(&version)
            .and_then(|series| series.get(&vault))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_is_complete() {
        let data = SubgraphData::default();
        assert!(data.loading);

        for version in VaultVersion::iter() {
            for vault in Vault::iter() {
                assert_eq!(data.account_for(version, vault), Some(&VaultAccount::zero()));
                assert!(data.price_history_for(version, vault).is_empty());
            }
        }
        for vault in Vault::iter() {
            assert_eq!(data.balance_of(vault), U256::ZERO);
        }
    }

    #[test]
    fn test_transaction_type_wire_format() {
        assert_eq!("instantWithdraw".parse::<VaultTransactionType>().unwrap(), VaultTransactionType::InstantWithdraw);
        assert_eq!(format!("{}", VaultTransactionType::Deposit), "deposit");
        assert!("burn".parse::<VaultTransactionType>().is_err());
    }
}
