use log::debug;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use super::transactions_errors::TransactionError;
use super::transactions_model::{
    NewTransaction, Transaction, TransactionDB, TransactionSide, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::fees::compute_fees;
use crate::instruments::{InstrumentError, InstrumentRepositoryTrait};
use crate::ledger::{derive_ledger, InstrumentDetail, LedgerEntry};
use crate::utils::round_money;
use crate::Result;

/// Service for recording transactions and deriving per-instrument views.
///
/// Derived values are computed here before anything is persisted: the
/// total from quantity and price, commission and tax from the instrument's
/// fee schedule, and realized P/L by replaying the instrument's history
/// through the lot matcher.
pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    instrument_repository: Arc<dyn InstrumentRepositoryTrait>,
}

impl TransactionService {
    /// Creates a new TransactionService instance
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        instrument_repository: Arc<dyn InstrumentRepositoryTrait>,
    ) -> Self {
        Self {
            transaction_repository,
            instrument_repository,
        }
    }

    fn instrument_class(&self, name: &str) -> Result<String> {
        self.instrument_repository
            .get_instrument_by_name(name)?
            .map(|instrument| instrument.instrument_class)
            .ok_or_else(|| {
                InstrumentError::NotFound(format!("Instrument '{}' not found", name)).into()
            })
    }
}

impl TransactionServiceTrait for TransactionService {
    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        self.transaction_repository.get_transactions()
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.transaction_repository.get_transaction(transaction_id)
    }

    fn get_transactions_by_instrument(&self, instrument_name: &str) -> Result<Vec<Transaction>> {
        self.transaction_repository
            .get_transactions_by_instrument(instrument_name)
    }

    fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate().map_err(crate::Error::from)?;

        let side =
            TransactionSide::from_str(&new_transaction.side).map_err(crate::Error::from)?;
        let transaction_date = new_transaction.parsed_date().map_err(crate::Error::from)?;
        let instrument_class = self.instrument_class(&new_transaction.instrument_name)?;

        let total_amount = round_money(new_transaction.quantity * new_transaction.price);
        let fees = compute_fees(
            &instrument_class,
            side,
            total_amount,
            new_transaction.commission,
        );

        let history = self
            .transaction_repository
            .get_transactions_by_instrument(&new_transaction.instrument_name)?;
        let mut book = derive_ledger(&history).map_err(crate::Error::from)?;
        let profit_loss = book.apply(&LedgerEntry {
            side,
            quantity: new_transaction.quantity,
            price: new_transaction.price,
            date: transaction_date,
            commission: fees.commission,
            tax: fees.tax,
        });

        let now = chrono::Utc::now().naive_utc();
        let record = TransactionDB {
            id: new_transaction
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            instrument_name: new_transaction.instrument_name.clone(),
            side: side.as_str().to_string(),
            quantity: new_transaction.quantity.to_string(),
            price: new_transaction.price.to_string(),
            original_quantity: Some(new_transaction.quantity.to_string()),
            original_price: Some(new_transaction.price.to_string()),
            total_amount: total_amount.to_string(),
            commission: fees.commission.to_string(),
            tax: fees.tax.to_string(),
            profit_loss: profit_loss.to_string(),
            transaction_date,
            note: new_transaction.note.clone(),
            created_at: now,
            updated_at: now,
        };

        debug!(
            "Creating {} transaction for '{}': {} @ {}",
            side.as_str(),
            new_transaction.instrument_name,
            new_transaction.quantity,
            new_transaction.price
        );
        self.transaction_repository.create_transaction(record)
    }

    /// Updates a transaction, recomputing its derived values against the
    /// rest of the instrument's history. Original quantity and price are
    /// set once at creation and stay untouched here; a later restatement
    /// pass rebuilds effective values from them.
    fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction> {
        update.validate().map_err(crate::Error::from)?;

        let existing = self.transaction_repository.get_transaction(&update.id)?;
        if existing.instrument_name != update.instrument_name {
            return Err(TransactionError::InvalidData(
                "A transaction cannot be moved to another instrument".to_string(),
            )
            .into());
        }

        let side = TransactionSide::from_str(&update.side).map_err(crate::Error::from)?;
        let transaction_date = update.parsed_date().map_err(crate::Error::from)?;
        let instrument_class = self.instrument_class(&update.instrument_name)?;

        let total_amount = round_money(update.quantity * update.price);
        let fees = compute_fees(&instrument_class, side, total_amount, update.commission);

        let history = self
            .transaction_repository
            .get_transactions_by_instrument_excluding(&update.instrument_name, &update.id)?;
        let mut book = derive_ledger(&history).map_err(crate::Error::from)?;
        let profit_loss = book.apply(&LedgerEntry {
            side,
            quantity: update.quantity,
            price: update.price,
            date: transaction_date,
            commission: fees.commission,
            tax: fees.tax,
        });

        let record = TransactionDB {
            id: existing.id.clone(),
            instrument_name: existing.instrument_name.clone(),
            side: side.as_str().to_string(),
            quantity: update.quantity.to_string(),
            price: update.price.to_string(),
            original_quantity: existing.original_quantity.map(|q| q.to_string()),
            original_price: existing.original_price.map(|p| p.to_string()),
            total_amount: total_amount.to_string(),
            commission: fees.commission.to_string(),
            tax: fees.tax.to_string(),
            profit_loss: profit_loss.to_string(),
            transaction_date,
            note: update.note.clone(),
            created_at: existing.created_at,
            updated_at: chrono::Utc::now().naive_utc(),
        };

        self.transaction_repository.update_transaction(record)
    }

    fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.transaction_repository
            .delete_transaction(transaction_id)
    }

    /// Builds the detail view for one instrument: net position, realized
    /// P/L, open lots with signed quantities, closed-lot records and the
    /// transaction list newest first.
    fn get_instrument_detail(&self, instrument_name: &str) -> Result<InstrumentDetail> {
        // Fails with NotFound before touching the transaction table
        self.instrument_class(instrument_name)?;

        let history = self
            .transaction_repository
            .get_transactions_by_instrument(instrument_name)?;
        let book = derive_ledger(&history).map_err(crate::Error::from)?;

        let mut closed_lots = book.closed_lots.clone();
        closed_lots.sort_by(|a, b| b.close_date.cmp(&a.close_date));

        let mut transactions = history;
        transactions.reverse();

        Ok(InstrumentDetail {
            instrument_name: instrument_name.to_string(),
            current_position: book.net_position(),
            realized_profit_loss: book.realized_profit_loss(),
            open_lots: book.open_lot_views(),
            closed_lots,
            transactions,
        })
    }
}
