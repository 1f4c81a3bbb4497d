pub(crate) mod adjuster;
pub(crate) mod sync_service;

pub use adjuster::restate;
pub use sync_service::{SyncOutcome, SyncService, SyncServiceTrait};

#[cfg(test)]
pub(crate) mod tests;
