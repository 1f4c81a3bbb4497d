use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::instruments_errors::InstrumentError;
use super::instruments_model::{Instrument, InstrumentDB, InstrumentUpdate, NewInstrument};
use super::instruments_traits::InstrumentRepositoryTrait;
use crate::db::get_connection;
use crate::schema::{instruments, transactions};
use crate::Result;

/// Repository for managing instrument master data in the database
pub struct InstrumentRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl InstrumentRepository {
    /// Creates a new InstrumentRepository instance
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl InstrumentRepositoryTrait for InstrumentRepository {
    /// Retrieves all instruments ordered by name
    fn get_instruments(&self) -> Result<Vec<Instrument>> {
        let mut conn = get_connection(&self.pool)?;

        instruments::table
            .select(InstrumentDB::as_select())
            .order(instruments::name.asc())
            .load::<InstrumentDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Instrument::from).collect())
            .map_err(InstrumentError::from)
            .map_err(Into::into)
    }

    fn get_instrument_by_id(&self, instrument_id: &str) -> Result<Instrument> {
        let mut conn = get_connection(&self.pool)?;

        instruments::table
            .find(instrument_id)
            .first::<InstrumentDB>(&mut conn)
            .map(Instrument::from)
            .map_err(InstrumentError::from)
            .map_err(Into::into)
    }

    fn get_instrument_by_name(&self, name: &str) -> Result<Option<Instrument>> {
        let mut conn = get_connection(&self.pool)?;

        instruments::table
            .filter(instruments::name.eq(name))
            .first::<InstrumentDB>(&mut conn)
            .optional()
            .map(|row| row.map(Instrument::from))
            .map_err(InstrumentError::from)
            .map_err(Into::into)
    }

    /// Counts the transactions still referencing an instrument
    fn count_transactions(&self, name: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .filter(transactions::instrument_name.eq(name))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(InstrumentError::from)
            .map_err(Into::into)
    }

    fn create_instrument(&self, new_instrument: NewInstrument) -> Result<Instrument> {
        let mut conn = get_connection(&self.pool)?;

        new_instrument.validate()?;

        let mut instrument_db: InstrumentDB = new_instrument.into();
        if instrument_db.id.is_empty() {
            instrument_db.id = Uuid::new_v4().to_string();
        }

        diesel::insert_into(instruments::table)
            .values(&instrument_db)
            .get_result::<InstrumentDB>(&mut conn)
            .map(Instrument::from)
            .map_err(InstrumentError::from)
            .map_err(Into::into)
    }

    fn update_instrument(&self, update: InstrumentUpdate) -> Result<Instrument> {
        let mut conn = get_connection(&self.pool)?;

        update.validate()?;

        let existing = instruments::table
            .find(&update.id)
            .first::<InstrumentDB>(&mut conn)
            .map_err(InstrumentError::from)?;

        let mut instrument_db = existing;
        instrument_db.name = update.name.trim().to_string();
        instrument_db.instrument_class = update.instrument_class;
        instrument_db.updated_at = chrono::Utc::now().naive_utc();

        diesel::update(instruments::table.find(&instrument_db.id))
            .set(&instrument_db)
            .get_result::<InstrumentDB>(&mut conn)
            .map(Instrument::from)
            .map_err(InstrumentError::from)
            .map_err(Into::into)
    }

    fn delete_instrument(&self, instrument_id: &str) -> Result<Instrument> {
        let mut conn = get_connection(&self.pool)?;

        let existing = instruments::table
            .find(instrument_id)
            .first::<InstrumentDB>(&mut conn)
            .map_err(InstrumentError::from)?;

        diesel::delete(instruments::table.find(instrument_id))
            .execute(&mut conn)
            .map_err(InstrumentError::from)?;

        Ok(existing.into())
    }
}
