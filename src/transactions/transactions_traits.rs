use super::transactions_model::{
    EffectiveRestatement, NewTransaction, Transaction, TransactionDB, TransactionUpdate,
};
use crate::ledger::InstrumentDetail;
use crate::Result;

/// Trait defining the contract for Transaction repository operations.
///
/// The repository persists values verbatim; all derived values (totals,
/// fees, realized P/L) are computed by the service before they get here.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// All transactions, newest first (date desc, creation desc)
    fn get_transactions(&self) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;
    /// One instrument's history in replay order (date asc, creation asc)
    fn get_transactions_by_instrument(&self, instrument_name: &str) -> Result<Vec<Transaction>>;
    /// Replay-ordered history without one row, used while recomputing edits
    fn get_transactions_by_instrument_excluding(
        &self,
        instrument_name: &str,
        exclude_id: &str,
    ) -> Result<Vec<Transaction>>;
    fn create_transaction(&self, record: TransactionDB) -> Result<Transaction>;
    fn update_transaction(&self, record: TransactionDB) -> Result<Transaction>;
    fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction>;
    /// Applies restated effective fields in one database transaction
    fn apply_restatements(&self, restatements: &[EffectiveRestatement]) -> Result<usize>;
}

/// Trait defining the contract for Transaction service operations.
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions(&self) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;
    fn get_transactions_by_instrument(&self, instrument_name: &str) -> Result<Vec<Transaction>>;
    fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction>;
    fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction>;
    /// Open lots, closed-lot records and net realized P/L for one instrument
    fn get_instrument_detail(&self, instrument_name: &str) -> Result<InstrumentDetail>;
}
