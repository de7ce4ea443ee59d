use crate::constants::VaultVersion;
use crate::vault::Vault;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tokio::sync::watch;

/// User action tracked while its transaction is in flight.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    Approval,
    Deposit,
    Withdraw,
    WithdrawInitiation,
    Transfer,
    Migrate,
    Stake,
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Default, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Success,
    Error,
}

/// A submitted but not-yet-finalized on-chain action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: String,
    pub vault: Vault,
    pub version: VaultVersion,
    pub kind: TransactionKind,
    pub amount: U256,
    pub status: TransactionStatus,
}

impl PendingTransaction {
    pub fn new(hash: String, vault: Vault, version: VaultVersion, kind: TransactionKind, amount: U256) -> Self {
        Self { hash, vault, version, kind, amount, status: TransactionStatus::Pending }
    }
}

/// Ordered record of in-flight transactions plus a change counter.
///
/// The counter increases by exactly one on every lifecycle change (submission
/// and each status update). Downstream the counter is a pure trigger: the
/// data layer re-fetches on any change without knowing why it changed.
pub struct PendingTransactionTracker {
    transactions: Vec<PendingTransaction>,
    counter_tx: watch::Sender<u64>,
}

impl PendingTransactionTracker {
    pub fn new() -> Self {
        let (counter_tx, _) = watch::channel(0);
        Self { transactions: Vec::new(), counter_tx }
    }

    pub fn counter(&self) -> u64 {
        *self.counter_tx.borrow()
    }

    /// Receiver for the change counter, consumed by the data-layer watcher.
    pub fn subscribe_counter(&self) -> watch::Receiver<u64> {
        self.counter_tx.subscribe()
    }

    pub fn transactions(&self) -> &[PendingTransaction] {
        &self.transactions
    }

    pub fn last_transaction(&self) -> Option<&PendingTransaction> {
        self.transactions.last()
    }

    /// Record a freshly submitted transaction.
    pub fn track(&mut self, transaction: PendingTransaction) {
        self.transactions.push(transaction);
        self.bump();
    }

    /// Update the status of a tracked transaction by hash. Returns false if
    /// the hash is unknown or the status is unchanged; the counter only moves
    /// on an actual lifecycle change.
    pub fn update_status(&mut self, hash: &str, status: TransactionStatus) -> bool {
        let Some(transaction) = self.transactions.iter_mut().rev().find(|tx| tx.hash == hash) else {
            return false;
        };
        if transaction.status == status {
            return false;
        }
        transaction.status = status;
        self.bump();
        true
    }

    /// Drop settled transactions, keeping the pending tail. Does not touch
    /// the counter: pruning is bookkeeping, not a lifecycle change.
    pub fn prune_settled(&mut self) {
        self.transactions.retain(|tx| tx.status == TransactionStatus::Pending);
    }

    fn bump(&self) {
        self.counter_tx.send_modify(|counter| *counter += 1);
    }
}

impl Default for PendingTransactionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deposit(hash: &str) -> PendingTransaction {
        PendingTransaction::new(
            hash.to_string(),
            Vault::EthCall,
            VaultVersion::V2,
            TransactionKind::Deposit,
            U256::from(1000),
        )
    }

    #[test]
    fn test_counter_increments_by_one_per_lifecycle_change() {
        let mut tracker = PendingTransactionTracker::new();
        assert_eq!(tracker.counter(), 0);

        tracker.track(deposit("0xaa"));
        assert_eq!(tracker.counter(), 1);

        assert!(tracker.update_status("0xaa", TransactionStatus::Success));
        assert_eq!(tracker.counter(), 2);

        // Repeating the same status is not a lifecycle change
        assert!(!tracker.update_status("0xaa", TransactionStatus::Success));
        assert_eq!(tracker.counter(), 2);

        assert!(!tracker.update_status("0xbb", TransactionStatus::Error));
        assert_eq!(tracker.counter(), 2);
    }

    #[test]
    fn test_subscribers_observe_changes() {
        let mut tracker = PendingTransactionTracker::new();
        let rx = tracker.subscribe_counter();

        tracker.track(deposit("0xaa"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), 1);
    }

    #[test]
    fn test_prune_settled_keeps_pending() {
        let mut tracker = PendingTransactionTracker::new();
        tracker.track(deposit("0xaa"));
        tracker.track(deposit("0xbb"));
        tracker.update_status("0xaa", TransactionStatus::Success);

        let counter = tracker.counter();
        tracker.prune_settled();
        assert_eq!(tracker.transactions().len(), 1);
        assert_eq!(tracker.last_transaction().unwrap().hash, "0xbb");
        assert_eq!(tracker.counter(), counter);
    }

    #[test]
    fn test_kind_wire_format() {
        assert_eq!(format!("{}", TransactionKind::WithdrawInitiation), "withdrawInitiation");
        assert_eq!("deposit".parse::<TransactionKind>().unwrap(), TransactionKind::Deposit);
    }
}
