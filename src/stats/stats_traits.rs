use super::stats_model::ProfitLossStats;
use crate::Result;

/// Trait defining the contract for stats aggregation.
pub trait StatsServiceTrait: Send + Sync {
    /// Trading totals and realized P/L per instrument, with an overall rollup
    fn profit_loss_stats(&self) -> Result<ProfitLossStats>;
}
