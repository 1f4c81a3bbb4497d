use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::transactions_errors::TransactionError;
use super::transactions_model::{EffectiveRestatement, Transaction, TransactionDB};
use super::transactions_traits::TransactionRepositoryTrait;
use crate::db::get_connection;
use crate::schema::transactions;
use crate::Result;

/// Repository for persisting transactions.
///
/// Stores exactly what the service hands it; totals, fees and realized
/// P/L are computed upstream.
pub struct TransactionRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository instance
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    /// Retrieves all transactions, newest first
    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .select(TransactionDB::as_select())
            .order((
                transactions::transaction_date.desc(),
                transactions::created_at.desc(),
            ))
            .load::<TransactionDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Transaction::from).collect())
            .map_err(TransactionError::from)
            .map_err(Into::into)
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .map(Transaction::from)
            .map_err(TransactionError::from)
            .map_err(Into::into)
    }

    /// One instrument's history in replay order (date asc, creation asc)
    fn get_transactions_by_instrument(&self, instrument_name: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .filter(transactions::instrument_name.eq(instrument_name))
            .select(TransactionDB::as_select())
            .order((
                transactions::transaction_date.asc(),
                transactions::created_at.asc(),
            ))
            .load::<TransactionDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Transaction::from).collect())
            .map_err(TransactionError::from)
            .map_err(Into::into)
    }

    fn get_transactions_by_instrument_excluding(
        &self,
        instrument_name: &str,
        exclude_id: &str,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .filter(transactions::instrument_name.eq(instrument_name))
            .filter(transactions::id.ne(exclude_id))
            .select(TransactionDB::as_select())
            .order((
                transactions::transaction_date.asc(),
                transactions::created_at.asc(),
            ))
            .load::<TransactionDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Transaction::from).collect())
            .map_err(TransactionError::from)
            .map_err(Into::into)
    }

    fn create_transaction(&self, record: TransactionDB) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        diesel::insert_into(transactions::table)
            .values(&record)
            .get_result::<TransactionDB>(&mut conn)
            .map(Transaction::from)
            .map_err(TransactionError::from)
            .map_err(Into::into)
    }

    fn update_transaction(&self, record: TransactionDB) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        diesel::update(transactions::table.find(&record.id))
            .set(&record)
            .get_result::<TransactionDB>(&mut conn)
            .map(Transaction::from)
            .map_err(TransactionError::from)
            .map_err(Into::into)
    }

    fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        let existing = transactions::table
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .map_err(TransactionError::from)?;

        diesel::delete(transactions::table.find(transaction_id))
            .execute(&mut conn)
            .map_err(TransactionError::from)?;

        Ok(existing.into())
    }

    /// Writes restated effective fields for many rows in one database
    /// transaction. Original columns are never touched here.
    fn apply_restatements(&self, restatements: &[EffectiveRestatement]) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let now = chrono::Utc::now().naive_utc();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut updated = 0;
            for restatement in restatements {
                updated += diesel::update(transactions::table.find(&restatement.transaction_id))
                    .set((
                        transactions::quantity.eq(restatement.quantity.to_string()),
                        transactions::price.eq(restatement.price.to_string()),
                        transactions::total_amount.eq(restatement.total_amount.to_string()),
                        transactions::updated_at.eq(now),
                    ))
                    .execute(conn)?;
            }
            Ok(updated)
        })
        .map_err(TransactionError::from)
        .map_err(Into::into)
    }
}
