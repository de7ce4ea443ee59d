use super::{parse_u256, parse_u64, vault_from_symbol};
use crate::subgraph::schema::ResponseSet;
use crate::subgraph::types::{BalancesSnapshot, VaultBalance, default_balances};
use crate::vault::Vault;
use alloy_primitives::U256;
use std::collections::BTreeMap;

/// Resolve current per-vault balances.
///
/// Merge policy: summation. Each version contributes its most recent balance
/// update per vault; a vault absent from a version contributes zero. The sum
/// is what the user actually holds when a position spans generations (e.g.
/// a partially migrated deposit).
pub fn resolve_balances(responses: &ResponseSet) -> BalancesSnapshot {
    let mut snapshot = default_balances();

    let mut add = |latest: BTreeMap<Vault, (u64, U256, U256)>| {
        for (vault, (_, balance, yield_earned)) in latest {
            let entry = snapshot.entry(vault).or_default();
            entry.total_balance += balance;
            entry.yield_earned += yield_earned;
        }
    };

    if let Some(v1) = responses.v1() {
        let mut latest: BTreeMap<Vault, (u64, U256, U256)> = BTreeMap::new();
        for raw in &v1.balance_updates {
            let Some(vault) = vault_from_symbol(&raw.vault.symbol) else { continue };
            let timestamp = parse_u64(&raw.timestamp);
            let candidate = (timestamp, parse_u256(&raw.balance), U256::ZERO);
            match latest.get(&vault) {
                Some((existing, _, _)) if *existing > timestamp => {}
                _ => {
                    latest.insert(vault, candidate);
                }
            }
        }
        add(latest);
    }

    if let Some(v2) = responses.v2() {
        let mut latest: BTreeMap<Vault, (u64, U256, U256)> = BTreeMap::new();
        for raw in &v2.balance_updates {
            let Some(vault) = vault_from_symbol(&raw.vault.symbol) else { continue };
            let timestamp = parse_u64(&raw.timestamp);
            let candidate = (timestamp, parse_u256(&raw.balance), parse_u256(&raw.yield_earned));
            match latest.get(&vault) {
                Some((existing, _, _)) if *existing > timestamp => {}
                _ => {
                    latest.insert(vault, candidate);
                }
            }
        }
        add(latest);
    }

    snapshot
}
