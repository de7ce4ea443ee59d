/// Response resolvers: pure functions from a complete per-version result set
/// to one normalized domain snapshot each.
///
/// Shared rules:
/// - a vault with no presence in a version resolves to the domain's zero
///   record, never to an absent key
/// - unparseable numbers resolve to zero, unknown vault symbols drop the row
/// - each resolver documents its own cross-version merge policy
pub mod accounts;
pub mod activities;
pub mod balances;
pub mod governance;
pub mod price_history;
pub mod transactions;

pub use accounts::resolve_vault_accounts;
pub use activities::resolve_vault_activities;
pub use balances::resolve_balances;
pub use governance::resolve_governance_token;
pub use price_history::resolve_price_history;
pub use transactions::resolve_transactions;

use crate::vault::Vault;
use alloy_primitives::{Address, U256};
use std::str::FromStr;

pub(crate) fn parse_u256(raw: &str) -> U256 {
    raw.parse::<U256>().unwrap_or(U256::ZERO)
}

pub(crate) fn parse_u64(raw: &str) -> u64 {
    raw.parse::<u64>().unwrap_or(0)
}

pub(crate) fn parse_address(raw: &str) -> Address {
    Address::from_str(raw).unwrap_or(Address::ZERO)
}

pub(crate) fn vault_from_symbol(symbol: &str) -> Option<Vault> {
    Vault::from_str(symbol).ok()
}

/// Rescale a fixed-point value between decimal bases.
pub(crate) fn scale_decimals(value: U256, from: u8, to: u8) -> U256 {
    if from == to {
        value
    } else if from < to {
        value * U256::from(10).pow(U256::from(to - from))
    } else {
        value / U256::from(10).pow(U256::from(from - to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u256_defaults_to_zero() {
        assert_eq!(parse_u256("1000"), U256::from(1000));
        assert_eq!(parse_u256(""), U256::ZERO);
        assert_eq!(parse_u256("not-a-number"), U256::ZERO);
    }

    #[test]
    fn test_vault_from_symbol() {
        assert_eq!(vault_from_symbol("ETH-CALL"), Some(Vault::EthCall));
        assert_eq!(vault_from_symbol("DOGE-CALL"), None);
    }

    #[test]
    fn test_scale_decimals() {
        // 1.5 in 8 decimals -> 18 decimals
        assert_eq!(scale_decimals(U256::from(150_000_000u64), 8, 18), U256::from(10).pow(U256::from(18)) * U256::from(15) / U256::from(10));
        assert_eq!(scale_decimals(U256::from(1000), 6, 6), U256::from(1000));
        assert_eq!(scale_decimals(U256::from(10).pow(U256::from(18)), 18, 6), U256::from(10).pow(U256::from(6)));
    }
}
