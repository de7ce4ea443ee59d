use super::{parse_u256, parse_u64, vault_from_symbol};
use crate::constants::VaultVersion;
use crate::subgraph::schema::ResponseSet;
use crate::subgraph::types::{ActivityKind, VaultActivity};
use alloy_primitives::U256;

/// Resolve protocol-wide vault activity (option mints and sales).
///
/// Merge policy: concatenation across versions sorted by timestamp
/// descending. v1 splits activity over two entities (short positions and
/// option trades); v2 reports one typed entity. Rows with an unrecognized
/// activity type are dropped.
pub fn resolve_vault_activities(responses: &ResponseSet) -> Vec<VaultActivity> {
    let mut activities = Vec::new();

    if let Some(v1) = responses.v1() {
        for raw in &v1.vault_short_positions {
            let Some(vault) = vault_from_symbol(&raw.vault.symbol) else { continue };
            activities.push(VaultActivity {
                id: raw.id.clone(),
                vault,
                version: VaultVersion::V1,
                kind: ActivityKind::Minting,
                amount: parse_u256(&raw.mint_amount),
                premium: U256::ZERO,
                round: 0,
                timestamp: parse_u64(&raw.opened_at),
            });
        }
        for raw in &v1.vault_option_trades {
            let Some(vault) = vault_from_symbol(&raw.vault.symbol) else { continue };
            activities.push(VaultActivity {
                id: raw.id.clone(),
                vault,
                version: VaultVersion::V1,
                kind: ActivityKind::Sales,
                amount: parse_u256(&raw.sell_amount),
                premium: parse_u256(&raw.premium),
                round: 0,
                timestamp: parse_u64(&raw.timestamp),
            });
        }
    }

    if let Some(v2) = responses.v2() {
        for raw in &v2.vault_activities {
            let Some(vault) = vault_from_symbol(&raw.vault.symbol) else { continue };
            let Ok(kind) = raw.kind.parse::<ActivityKind>() else { continue };
            activities.push(VaultActivity {
                id: raw.id.clone(),
                vault,
                version: VaultVersion::V2,
                kind,
                amount: parse_u256(&raw.amount),
                premium: parse_u256(&raw.premium),
                round: raw.round,
                timestamp: parse_u64(&raw.timestamp),
            });
        }
    }

    activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    activities
}
