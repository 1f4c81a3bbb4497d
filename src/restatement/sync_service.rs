use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::adjuster::restate;
use crate::corporate_actions::CorporateActionRepositoryTrait;
use crate::transactions::TransactionRepositoryTrait;
use crate::Result;

/// Result of one restatement sync pass over an instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub updated: usize,
    pub message: String,
}

/// Trait defining the contract for restatement sync operations.
pub trait SyncServiceTrait: Send + Sync {
    fn sync_instrument(&self, instrument_name: &str) -> Result<SyncOutcome>;
}

/// Service that brings an instrument's stored effective values back in
/// line with its corporate-action log.
pub struct SyncService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    corporate_action_repository: Arc<dyn CorporateActionRepositoryTrait>,
}

impl SyncService {
    /// Creates a new SyncService instance
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        corporate_action_repository: Arc<dyn CorporateActionRepositoryTrait>,
    ) -> Self {
        Self {
            transaction_repository,
            corporate_action_repository,
        }
    }
}

impl SyncServiceTrait for SyncService {
    /// Restates one instrument and persists only the rows whose effective
    /// fields changed. All writes happen in one database transaction.
    fn sync_instrument(&self, instrument_name: &str) -> Result<SyncOutcome> {
        let transactions = self
            .transaction_repository
            .get_transactions_by_instrument(instrument_name)?;
        let actions = self
            .corporate_action_repository
            .get_corporate_actions_by_instrument(instrument_name)?;

        let restatements = restate(&transactions, &actions)?;
        if restatements.is_empty() {
            return Ok(SyncOutcome {
                updated: 0,
                message: format!(
                    "All {} transactions for '{}' already in sync",
                    transactions.len(),
                    instrument_name
                ),
            });
        }

        let updated = self
            .transaction_repository
            .apply_restatements(&restatements)?;

        info!(
            "Restated {} of {} transactions for '{}'",
            updated,
            transactions.len(),
            instrument_name
        );
        Ok(SyncOutcome {
            updated,
            message: format!(
                "Restated {} of {} transactions for '{}'",
                updated,
                transactions.len(),
                instrument_name
            ),
        })
    }
}
