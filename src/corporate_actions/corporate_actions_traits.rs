use super::corporate_actions_model::{
    CorporateAction, CorporateActionDB, CorporateActionUpdate, NewCorporateAction,
};
use crate::Result;

/// Trait defining the contract for CorporateAction repository operations.
pub trait CorporateActionRepositoryTrait: Send + Sync {
    /// All corporate actions, newest first (date desc, creation desc)
    fn get_corporate_actions(&self) -> Result<Vec<CorporateAction>>;
    fn get_corporate_action(&self, action_id: &str) -> Result<CorporateAction>;
    /// One instrument's actions in application order (date asc, creation asc)
    fn get_corporate_actions_by_instrument(
        &self,
        instrument_name: &str,
    ) -> Result<Vec<CorporateAction>>;
    fn create_corporate_action(&self, record: CorporateActionDB) -> Result<CorporateAction>;
    fn update_corporate_action(&self, record: CorporateActionDB) -> Result<CorporateAction>;
    fn delete_corporate_action(&self, action_id: &str) -> Result<CorporateAction>;
}

/// Trait defining the contract for CorporateAction service operations.
///
/// Every mutation restates the affected instrument's transactions before
/// returning, so effective values never lag the action log.
pub trait CorporateActionServiceTrait: Send + Sync {
    fn get_corporate_actions(&self) -> Result<Vec<CorporateAction>>;
    fn get_corporate_action(&self, action_id: &str) -> Result<CorporateAction>;
    fn get_corporate_actions_by_instrument(
        &self,
        instrument_name: &str,
    ) -> Result<Vec<CorporateAction>>;
    fn create_corporate_action(&self, new_action: NewCorporateAction) -> Result<CorporateAction>;
    fn update_corporate_action(&self, update: CorporateActionUpdate) -> Result<CorporateAction>;
    fn delete_corporate_action(&self, action_id: &str) -> Result<CorporateAction>;
}
