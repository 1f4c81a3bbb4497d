use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::corporate_actions_errors::CorporateActionError;
use super::corporate_actions_model::{CorporateAction, CorporateActionDB};
use super::corporate_actions_traits::CorporateActionRepositoryTrait;
use crate::db::get_connection;
use crate::schema::corporate_actions;
use crate::Result;

/// Repository for the corporate-action log
pub struct CorporateActionRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl CorporateActionRepository {
    /// Creates a new CorporateActionRepository instance
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl CorporateActionRepositoryTrait for CorporateActionRepository {
    fn get_corporate_actions(&self) -> Result<Vec<CorporateAction>> {
        let mut conn = get_connection(&self.pool)?;

        corporate_actions::table
            .select(CorporateActionDB::as_select())
            .order((
                corporate_actions::action_date.desc(),
                corporate_actions::created_at.desc(),
            ))
            .load::<CorporateActionDB>(&mut conn)
            .map(|rows| rows.into_iter().map(CorporateAction::from).collect())
            .map_err(CorporateActionError::from)
            .map_err(Into::into)
    }

    fn get_corporate_action(&self, action_id: &str) -> Result<CorporateAction> {
        let mut conn = get_connection(&self.pool)?;

        corporate_actions::table
            .find(action_id)
            .first::<CorporateActionDB>(&mut conn)
            .map(CorporateAction::from)
            .map_err(CorporateActionError::from)
            .map_err(Into::into)
    }

    /// Retrieves one instrument's actions in application order
    fn get_corporate_actions_by_instrument(
        &self,
        instrument_name: &str,
    ) -> Result<Vec<CorporateAction>> {
        let mut conn = get_connection(&self.pool)?;

        corporate_actions::table
            .filter(corporate_actions::instrument_name.eq(instrument_name))
            .select(CorporateActionDB::as_select())
            .order((
                corporate_actions::action_date.asc(),
                corporate_actions::created_at.asc(),
            ))
            .load::<CorporateActionDB>(&mut conn)
            .map(|rows| rows.into_iter().map(CorporateAction::from).collect())
            .map_err(CorporateActionError::from)
            .map_err(Into::into)
    }

    fn create_corporate_action(&self, record: CorporateActionDB) -> Result<CorporateAction> {
        let mut conn = get_connection(&self.pool)?;

        diesel::insert_into(corporate_actions::table)
            .values(&record)
            .get_result::<CorporateActionDB>(&mut conn)
            .map(CorporateAction::from)
            .map_err(CorporateActionError::from)
            .map_err(Into::into)
    }

    fn update_corporate_action(&self, record: CorporateActionDB) -> Result<CorporateAction> {
        let mut conn = get_connection(&self.pool)?;

        diesel::update(corporate_actions::table.find(&record.id))
            .set(&record)
            .get_result::<CorporateActionDB>(&mut conn)
            .map(CorporateAction::from)
            .map_err(CorporateActionError::from)
            .map_err(Into::into)
    }

    fn delete_corporate_action(&self, action_id: &str) -> Result<CorporateAction> {
        let mut conn = get_connection(&self.pool)?;

        let existing = corporate_actions::table
            .find(action_id)
            .first::<CorporateActionDB>(&mut conn)
            .map_err(CorporateActionError::from)?;

        diesel::delete(corporate_actions::table.find(action_id))
            .execute(&mut conn)
            .map_err(CorporateActionError::from)?;

        Ok(existing.into())
    }
}
