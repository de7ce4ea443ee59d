use super::{parse_u256, parse_u64, scale_decimals, vault_from_symbol};
use crate::constants::VaultVersion;
use crate::subgraph::schema::ResponseSet;
use crate::subgraph::types::{PriceHistorySnapshot, PricePoint, default_price_history};

/// Resolve share-price history.
///
/// Merge policy: none across versions; share prices of different generations
/// are not comparable, so the snapshot stays keyed by (version, vault).
/// Normalization: v1 reports price per share in the vault asset's native
/// decimals, v2 in 18-decimal fixed point; both resolve to 18 decimals.
/// Points are ordered by round ascending.
pub fn resolve_price_history(responses: &ResponseSet) -> PriceHistorySnapshot {
    let mut snapshot = default_price_history();

    if let Some(v1) = responses.v1() {
        let series = snapshot.entry(VaultVersion::V1).or_default();
        for raw in &v1.vault_performance_updates {
            let Some(vault) = vault_from_symbol(&raw.vault.symbol) else { continue };
            let price = scale_decimals(parse_u256(&raw.price_per_share), vault.asset().decimals(), 18);
            series.entry(vault).or_default().push(PricePoint {
                round: raw.round,
                price_per_share: price,
                timestamp: parse_u64(&raw.timestamp),
            });
        }
    }

    if let Some(v2) = responses.v2() {
        let series = snapshot.entry(VaultVersion::V2).or_default();
        for raw in &v2.vault_performance_updates {
            let Some(vault) = vault_from_symbol(&raw.vault.symbol) else { continue };
            series.entry(vault).or_default().push(PricePoint {
                round: raw.round,
                price_per_share: parse_u256(&raw.price_per_share),
                timestamp: parse_u64(&raw.timestamp),
            });
        }
    }

    for series in snapshot.values_mut() {
        for points in series.values_mut() {
            points.sort_by_key(|point| point.round);
        }
    }

    snapshot
}
