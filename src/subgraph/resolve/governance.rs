use super::parse_u256;
use crate::subgraph::schema::ResponseSet;
use crate::subgraph::types::{GovernanceTokenAccount, GovernanceTokenInfo, GovernanceTokenSnapshot};

/// Resolve governance-token data.
///
/// Merge policy: the newest version that carries the entity wins. The token
/// contract is shared across generations; the newest subgraph tracks it with
/// the freshest schema, older ones lag behind.
pub fn resolve_governance_token(responses: &ResponseSet) -> GovernanceTokenSnapshot {
    let mut snapshot = GovernanceTokenSnapshot::default();

    if let Some(v2) = responses.v2() {
        if let Some(token) = &v2.governance_token {
            snapshot.token = Some(GovernanceTokenInfo {
                total_supply: parse_u256(&token.total_supply),
                num_holders: token.num_holders,
            });
        }
        if let Some(account) = v2.governance_token_accounts.first() {
            snapshot.account = Some(GovernanceTokenAccount {
                balance: parse_u256(&account.balance),
                staked_balance: parse_u256(&account.staked_balance),
            });
        }
    }

    if snapshot.token.is_none() {
        if let Some(token) = responses.v1().and_then(|v1| v1.governance_token.as_ref()) {
            snapshot.token = Some(GovernanceTokenInfo {
                total_supply: parse_u256(&token.total_supply),
                num_holders: token.holders,
            });
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subgraph::schema::{
        V1Data, V1GovernanceToken, V2Data, V2GovernanceToken, V2GovernanceTokenAccount, VersionData,
    };
    use alloy_primitives::U256;

    #[test]
    fn test_newest_version_wins() {
        let mut responses = ResponseSet::default();
        responses.insert(VersionData::V1(V1Data {
            governance_token: Some(V1GovernanceToken { total_supply: "1000".to_string(), holders: 10 }),
            ..V1Data::default()
        }));
        responses.insert(VersionData::V2(V2Data {
            governance_token: Some(V2GovernanceToken { total_supply: "2000".to_string(), num_holders: 20 }),
            ..V2Data::default()
        }));

        let snapshot = resolve_governance_token(&responses);
        assert_eq!(snapshot.token, Some(GovernanceTokenInfo { total_supply: U256::from(2000), num_holders: 20 }));
    }

    #[test]
    fn test_falls_back_to_older_version() {
        let mut responses = ResponseSet::default();
        responses.insert(VersionData::V1(V1Data {
            governance_token: Some(V1GovernanceToken { total_supply: "1000".to_string(), holders: 10 }),
            ..V1Data::default()
        }));
        responses.insert(VersionData::V2(V2Data::default()));

        let snapshot = resolve_governance_token(&responses);
        assert_eq!(snapshot.token.unwrap().num_holders, 10);
        assert!(snapshot.account.is_none());
    }

    #[test]
    fn test_account_entity() {
        let mut responses = ResponseSet::default();
        responses.insert(VersionData::V2(V2Data {
            governance_token_accounts: vec![V2GovernanceTokenAccount {
                id: "0xab".to_string(),
                balance: "50".to_string(),
                staked_balance: "10".to_string(),
            }],
            ..V2Data::default()
        }));

        let snapshot = resolve_governance_token(&responses);
        assert_eq!(
            snapshot.account,
            Some(GovernanceTokenAccount { balance: U256::from(50), staked_balance: U256::from(10) })
        );
    }

    #[test]
    fn test_absent_everywhere_is_explicit_empty() {
        let snapshot = resolve_governance_token(&ResponseSet::default());
        assert_eq!(snapshot, GovernanceTokenSnapshot::default());
    }
}
