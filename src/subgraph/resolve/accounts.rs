use super::{parse_u256, vault_from_symbol};
use crate::constants::VaultVersion;
use crate::subgraph::schema::ResponseSet;
use crate::subgraph::types::{VaultAccount, VaultAccountsSnapshot, default_vault_accounts};

/// Resolve user positions.
///
/// Merge policy: positions are keyed by version, never summed across
/// generations. Within a version, when the backend returns several rows for
/// the same vault, the row from the most recent round wins (v1 predates
/// rounds, so its last row wins).
pub fn resolve_vault_accounts(responses: &ResponseSet) -> VaultAccountsSnapshot {
    let mut snapshot = default_vault_accounts();

    if let Some(v1) = responses.v1() {
        let accounts = snapshot.entry(VaultVersion::V1).or_default();
        for raw in &v1.vault_accounts {
            let Some(vault) = vault_from_symbol(&raw.vault.symbol) else { continue };
            accounts.insert(
                vault,
                VaultAccount {
                    total_deposits: parse_u256(&raw.total_deposits),
                    total_balance: parse_u256(&raw.total_balance),
                    total_staked_balance: alloy_primitives::U256::ZERO,
                    round: 0,
                },
            );
        }
    }

    if let Some(v2) = responses.v2() {
        let accounts = snapshot.entry(VaultVersion::V2).or_default();
        for raw in &v2.vault_accounts {
            let Some(vault) = vault_from_symbol(&raw.vault.symbol) else { continue };
            let candidate = VaultAccount {
                total_deposits: parse_u256(&raw.total_deposits),
                total_balance: parse_u256(&raw.total_balance),
                total_staked_balance: parse_u256(&raw.total_staked_balance),
                round: raw.round,
            };
            match accounts.get(&vault) {
                Some(existing) if !existing.is_zero() && existing.round > candidate.round => {}
                _ => {
                    accounts.insert(vault, candidate);
                }
            }
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subgraph::schema::{V2Data, V2VaultAccount, VaultRef, VersionData};
    use crate::vault::Vault;
    use alloy_primitives::U256;
    use strum::IntoEnumIterator;

    fn v2_account(symbol: &str, balance: &str, round: u16) -> V2VaultAccount {
        V2VaultAccount {
            id: format!("{symbol}-{round}"),
            vault: VaultRef { symbol: symbol.to_string() },
            total_deposits: balance.to_string(),
            total_balance: balance.to_string(),
            total_staked_balance: "0".to_string(),
            round,
        }
    }

    #[test]
    fn test_most_recent_round_wins() {
        let mut responses = ResponseSet::default();
        responses.insert(VersionData::V2(V2Data {
            vault_accounts: vec![
                v2_account("ETH-CALL", "100", 4),
                v2_account("ETH-CALL", "250", 7),
                v2_account("ETH-CALL", "180", 5),
            ],
            ..V2Data::default()
        }));

        let snapshot = resolve_vault_accounts(&responses);
        let account = &snapshot[&VaultVersion::V2][&Vault::EthCall];
        assert_eq!(account.round, 7);
        assert_eq!(account.total_balance, U256::from(250));
    }

    #[test]
    fn test_default_completeness() {
        let snapshot = resolve_vault_accounts(&ResponseSet::default());
        for version in VaultVersion::iter() {
            for vault in Vault::iter() {
                assert_eq!(snapshot[&version][&vault], VaultAccount::zero());
            }
        }
    }

    #[test]
    fn test_unknown_vault_symbol_is_dropped() {
        let mut responses = ResponseSet::default();
        responses.insert(VersionData::V2(V2Data {
            vault_accounts: vec![v2_account("DOGE-CALL", "999", 1), v2_account("WBTC-CALL", "42", 1)],
            ..V2Data::default()
        }));

        let snapshot = resolve_vault_accounts(&responses);
        let accounts = &snapshot[&VaultVersion::V2];
        assert_eq!(accounts[&Vault::WbtcCall].total_balance, U256::from(42));
        assert_eq!(accounts.len(), Vault::iter().count());
    }
}
