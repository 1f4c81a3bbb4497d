pub(crate) mod fee_schedule;

pub use fee_schedule::{compute_fees, Fees};
