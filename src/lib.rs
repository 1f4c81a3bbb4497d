pub mod constants;
pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

pub mod corporate_actions;
pub mod fees;
pub mod instruments;
pub mod ledger;
pub mod restatement;
pub mod stats;
pub mod transactions;

pub use errors::{Error, Result};
