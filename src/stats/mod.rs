pub(crate) mod stats_model;
pub(crate) mod stats_service;
pub(crate) mod stats_traits;

pub use stats_model::{InstrumentStats, OverallStats, ProfitLossStats};
pub use stats_service::StatsService;
pub use stats_traits::StatsServiceTrait;
