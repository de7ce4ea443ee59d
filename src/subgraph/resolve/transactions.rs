use super::{parse_address, parse_u256, parse_u64, vault_from_symbol};
use crate::constants::VaultVersion;
use crate::subgraph::schema::ResponseSet;
use crate::subgraph::types::{VaultTransaction, VaultTransactionType};

/// Resolve the user's transaction history.
///
/// Merge policy: concatenation across versions, sorted by timestamp
/// descending, de-duplicated by transaction id (first occurrence wins; ids
/// are globally unique per subgraph but a migration can surface the same id
/// in two generations).
pub fn resolve_transactions(responses: &ResponseSet) -> Vec<VaultTransaction> {
    let mut transactions = Vec::new();

    if let Some(v1) = responses.v1() {
        for raw in &v1.vault_transactions {
            let Some(vault) = vault_from_symbol(&raw.vault.symbol) else { continue };
            let amount = parse_u256(&raw.amount);
            transactions.push(VaultTransaction {
                id: raw.id.clone(),
                vault,
                version: VaultVersion::V1,
                kind: raw.kind.parse().unwrap_or_default(),
                amount,
                // v1 reports a single amount in the underlying asset
                underlying_amount: amount,
                address: parse_address(&raw.address),
                tx_hash: raw.txhash.clone(),
                timestamp: parse_u64(&raw.timestamp),
            });
        }
    }

    if let Some(v2) = responses.v2() {
        for raw in &v2.vault_transactions {
            let Some(vault) = vault_from_symbol(&raw.vault.symbol) else { continue };
            transactions.push(VaultTransaction {
                id: raw.id.clone(),
                vault,
                version: VaultVersion::V2,
                kind: raw.kind.parse().unwrap_or_default(),
                amount: parse_u256(&raw.amount),
                underlying_amount: parse_u256(&raw.underlying_amount),
                address: parse_address(&raw.address),
                tx_hash: raw.txhash.clone(),
                timestamp: parse_u64(&raw.timestamp),
            });
        }
    }

    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut seen = std::collections::HashSet::new();
    transactions.retain(|tx| seen.insert(tx.id.clone()));

    transactions
}
