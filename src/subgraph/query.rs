use crate::constants::VaultVersion;
use crate::vault::Vault;
use alloy_primitives::Address;

/// Per-domain GraphQL fragment builders.
///
/// Address-scoped builders take a non-optional `Address`: a fragment with an
/// empty account filter cannot be constructed. `build_version_query` decides
/// which fragments to include.
///
/// Fields are newline-separated so the final document can be compacted by
/// stripping spaces without gluing field names together.

fn account_filter(account: Address) -> String {
    format!("{account:#x}")
}

fn vault_symbols(version: VaultVersion) -> String {
    let symbols: Vec<String> =
        Vault::deployed_in(version).into_iter().map(|vault| format!("\"{vault}\"")).collect();
    symbols.join(",")
}

pub fn vault_accounts_fragment(account: Address, version: VaultVersion) -> String {
    let account = account_filter(account);
    match version {
        VaultVersion::V1 => format!(
            r#"vaultAccounts(where: {{ account: "{account}" }}) {{
id
vault {{
symbol
}}
totalDeposits
totalYieldEarned
totalBalance
}}"#
        ),
        VaultVersion::V2 => format!(
            r#"vaultAccounts(where: {{ account: "{account}" }}) {{
id
vault {{
symbol
}}
totalDeposits
totalBalance
totalStakedBalance
round
}}"#
        ),
    }
}

pub fn transactions_fragment(account: Address, version: VaultVersion) -> String {
    let account = account_filter(account);
    match version {
        VaultVersion::V1 => format!(
            r#"vaultTransactions(where: {{ address: "{account}" }}, orderBy: timestamp, orderDirection: desc) {{
id
type
vault {{
symbol
}}
amount
address
txhash
timestamp
}}"#
        ),
        VaultVersion::V2 => format!(
            r#"vaultTransactions(where: {{ address: "{account}" }}, orderBy: timestamp, orderDirection: desc) {{
id
type
vault {{
symbol
}}
amount
underlyingAmount
address
txhash
timestamp
}}"#
        ),
    }
}

pub fn balances_fragment(account: Address, version: VaultVersion) -> String {
    let account = account_filter(account);
    match version {
        VaultVersion::V1 => format!(
            r#"balanceUpdates(where: {{ account: "{account}" }}, orderBy: timestamp, orderDirection: desc) {{
vault {{
symbol
}}
balance
timestamp
}}"#
        ),
        VaultVersion::V2 => format!(
            r#"balanceUpdates(where: {{ account: "{account}" }}, orderBy: timestamp, orderDirection: desc) {{
vault {{
symbol
}}
balance
yieldEarned
timestamp
}}"#
        ),
    }
}

pub fn activities_fragment(version: VaultVersion) -> String {
    let symbols = vault_symbols(version);
    match version {
        // v1 splits activity into two entities; v2 unified them
        VaultVersion::V1 => format!(
            r#"vaultShortPositions(where: {{ vault_in: [{symbols}] }}) {{
id
vault {{
symbol
}}
mintAmount
openedAt
}}
vaultOptionTrades(where: {{ vault_in: [{symbols}] }}) {{
id
vault {{
symbol
}}
sellAmount
premium
timestamp
}}"#
        ),
        VaultVersion::V2 => format!(
            r#"vaultActivities(where: {{ vault_in: [{symbols}] }}, orderBy: timestamp, orderDirection: desc) {{
id
type
vault {{
symbol
}}
amount
premium
round
timestamp
}}"#
        ),
    }
}

pub fn governance_token_fragment(account: Option<Address>, version: VaultVersion) -> String {
    let token = match version {
        VaultVersion::V1 => r#"governanceToken {
totalSupply
holders
}"#
        .to_string(),
        VaultVersion::V2 => r#"governanceToken {
totalSupply
numHolders
}"#
        .to_string(),
    };

    match (account, version) {
        // v1 has no per-account token entity
        (Some(account), VaultVersion::V2) => {
            let account = account_filter(account);
            format!(
                r#"{token}
governanceTokenAccounts(where: {{ id: "{account}" }}) {{
id
balance
stakedBalance
}}"#
            )
        }
        _ => token,
    }
}

pub fn price_history_fragment(version: VaultVersion) -> String {
    let symbols = vault_symbols(version);
    format!(
        r#"vaultPerformanceUpdates(where: {{ vault_in: [{symbols}] }}, orderBy: timestamp, orderDirection: asc) {{
vault {{
symbol
}}
pricePerShare
round
timestamp
}}"#
    )
}

/// One combined document for one version: exactly the fragments whose
/// preconditions hold, compacted the way the backends expect.
pub fn build_version_query(account: Option<Address>, version: VaultVersion) -> String {
    let mut fragments = Vec::new();

    if let Some(account) = account {
        fragments.push(vault_accounts_fragment(account, version));
        fragments.push(transactions_fragment(account, version));
        fragments.push(balances_fragment(account, version));
    }
    fragments.push(activities_fragment(version));
    fragments.push(governance_token_fragment(account, version));
    fragments.push(price_history_fragment(version));

    // Newlines separate fields, so stripping spaces is safe
    format!("{{\n{}\n}}", fragments.join("\n")).replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn test_account() -> Address {
        Address::repeat_byte(0xab)
    }

    #[test]
    fn test_no_address_omits_account_scoped_fragments() {
        for version in VaultVersion::iter() {
            let query = build_version_query(None, version);
            assert!(!query.contains("vaultAccounts"), "{version}: {query}");
            assert!(!query.contains("vaultTransactions"), "{version}");
            assert!(!query.contains("balanceUpdates"), "{version}");
            assert!(!query.contains("governanceTokenAccounts"), "{version}");
            // version-agnostic fragments are always present
            assert!(query.contains("governanceToken"), "{version}");
            assert!(query.contains("vaultPerformanceUpdates"), "{version}");
        }
    }

    #[test]
    fn test_address_includes_account_scoped_fragments() {
        let query = build_version_query(Some(test_account()), VaultVersion::V2);
        assert!(query.contains("vaultAccounts"));
        assert!(query.contains("vaultTransactions"));
        assert!(query.contains("balanceUpdates"));
        assert!(query.contains("governanceTokenAccounts"));
        assert!(query.contains(&format!("\"{:#x}\"", test_account())));
    }

    #[test]
    fn test_v1_has_no_governance_account_entity() {
        let query = build_version_query(Some(test_account()), VaultVersion::V1);
        assert!(query.contains("governanceToken"));
        assert!(!query.contains("governanceTokenAccounts"));
    }

    #[test]
    fn test_version_specific_fields() {
        let v1 = build_version_query(Some(test_account()), VaultVersion::V1);
        let v2 = build_version_query(Some(test_account()), VaultVersion::V2);

        assert!(v1.contains("totalYieldEarned"));
        assert!(!v2.contains("totalYieldEarned"));
        assert!(v2.contains("totalStakedBalance"));
        assert!(v2.contains("underlyingAmount"));
        assert!(v1.contains("vaultShortPositions"));
        assert!(v2.contains("vaultActivities"));
    }

    #[test]
    fn test_compaction_strips_spaces_only() {
        let query = build_version_query(Some(test_account()), VaultVersion::V2);
        assert!(!query.contains(' '));
        // field separators survive as newlines
        assert!(query.contains("pricePerShare\nround"));
    }

    #[test]
    fn test_fragment_scopes_vaults_to_version() {
        let v1 = activities_fragment(VaultVersion::V1);
        assert!(v1.contains("\"ETH-CALL\""));
        assert!(!v1.contains("\"AVAX-CALL\""));

        let v2 = activities_fragment(VaultVersion::V2);
        assert!(v2.contains("\"AVAX-CALL\""));
    }
}
