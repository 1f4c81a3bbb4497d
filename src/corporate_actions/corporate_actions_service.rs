use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::corporate_actions_model::{
    CorporateAction, CorporateActionDB, CorporateActionUpdate, NewCorporateAction,
};
use super::corporate_actions_traits::{
    CorporateActionRepositoryTrait, CorporateActionServiceTrait,
};
use crate::instruments::{InstrumentError, InstrumentRepositoryTrait};
use crate::restatement::SyncServiceTrait;
use crate::Result;

/// Service for the corporate-action log.
///
/// Actions are the source of truth for effective transaction values, so
/// every mutation here restates the affected instrument before returning.
pub struct CorporateActionService {
    corporate_action_repository: Arc<dyn CorporateActionRepositoryTrait>,
    instrument_repository: Arc<dyn InstrumentRepositoryTrait>,
    sync_service: Arc<dyn SyncServiceTrait>,
}

impl CorporateActionService {
    /// Creates a new CorporateActionService instance
    pub fn new(
        corporate_action_repository: Arc<dyn CorporateActionRepositoryTrait>,
        instrument_repository: Arc<dyn InstrumentRepositoryTrait>,
        sync_service: Arc<dyn SyncServiceTrait>,
    ) -> Self {
        Self {
            corporate_action_repository,
            instrument_repository,
            sync_service,
        }
    }

    fn require_instrument(&self, name: &str) -> Result<()> {
        if self
            .instrument_repository
            .get_instrument_by_name(name)?
            .is_none()
        {
            return Err(
                InstrumentError::NotFound(format!("Instrument '{}' not found", name)).into(),
            );
        }
        Ok(())
    }
}

impl CorporateActionServiceTrait for CorporateActionService {
    fn get_corporate_actions(&self) -> Result<Vec<CorporateAction>> {
        self.corporate_action_repository.get_corporate_actions()
    }

    fn get_corporate_action(&self, action_id: &str) -> Result<CorporateAction> {
        self.corporate_action_repository
            .get_corporate_action(action_id)
    }

    fn get_corporate_actions_by_instrument(
        &self,
        instrument_name: &str,
    ) -> Result<Vec<CorporateAction>> {
        self.corporate_action_repository
            .get_corporate_actions_by_instrument(instrument_name)
    }

    fn create_corporate_action(&self, new_action: NewCorporateAction) -> Result<CorporateAction> {
        new_action.validate().map_err(crate::Error::from)?;
        self.require_instrument(&new_action.instrument_name)?;

        let action_date = new_action.parsed_date().map_err(crate::Error::from)?;
        let now = chrono::Utc::now().naive_utc();
        let record = CorporateActionDB {
            id: new_action
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            instrument_name: new_action.instrument_name.clone(),
            action_type: new_action.action_type.clone(),
            action_date,
            ratio: new_action.ratio.map(|r| r.to_string()),
            amount: new_action.amount.map(|a| a.to_string()),
            note: new_action.note.clone(),
            created_at: now,
            updated_at: now,
        };

        debug!(
            "Recording {} for '{}' on {}",
            new_action.action_type, new_action.instrument_name, action_date
        );
        let created = self
            .corporate_action_repository
            .create_corporate_action(record)?;

        self.sync_service
            .sync_instrument(&created.instrument_name)?;
        Ok(created)
    }

    /// Updates an action, restating both the old and new instrument when
    /// the action moves between them.
    fn update_corporate_action(&self, update: CorporateActionUpdate) -> Result<CorporateAction> {
        update.validate().map_err(crate::Error::from)?;

        let existing = self
            .corporate_action_repository
            .get_corporate_action(&update.id)?;
        self.require_instrument(&update.instrument_name)?;

        let action_date = update.parsed_date().map_err(crate::Error::from)?;
        let record = CorporateActionDB {
            id: existing.id.clone(),
            instrument_name: update.instrument_name.clone(),
            action_type: update.action_type.clone(),
            action_date,
            ratio: update.ratio.map(|r| r.to_string()),
            amount: update.amount.map(|a| a.to_string()),
            note: update.note.clone(),
            created_at: existing.created_at,
            updated_at: chrono::Utc::now().naive_utc(),
        };

        let updated = self
            .corporate_action_repository
            .update_corporate_action(record)?;

        if existing.instrument_name != updated.instrument_name {
            self.sync_service
                .sync_instrument(&existing.instrument_name)?;
        }
        self.sync_service
            .sync_instrument(&updated.instrument_name)?;
        Ok(updated)
    }

    fn delete_corporate_action(&self, action_id: &str) -> Result<CorporateAction> {
        let deleted = self
            .corporate_action_repository
            .delete_corporate_action(action_id)?;

        self.sync_service
            .sync_instrument(&deleted.instrument_name)?;
        Ok(deleted)
    }
}
