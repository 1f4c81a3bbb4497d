pub(crate) mod corporate_actions_constants;
pub(crate) mod corporate_actions_errors;
pub(crate) mod corporate_actions_model;
pub(crate) mod corporate_actions_repository;
pub(crate) mod corporate_actions_service;
pub(crate) mod corporate_actions_traits;

pub use corporate_actions_constants::{ACTION_DIVIDEND, ACTION_REVERSE_SPLIT, ACTION_SPLIT};
pub use corporate_actions_errors::CorporateActionError;
pub use corporate_actions_model::{
    CorporateAction, CorporateActionDB, CorporateActionType, CorporateActionUpdate,
    NewCorporateAction,
};
pub use corporate_actions_repository::CorporateActionRepository;
pub use corporate_actions_service::CorporateActionService;
pub use corporate_actions_traits::{CorporateActionRepositoryTrait, CorporateActionServiceTrait};
