pub mod decimal_serde;
pub mod rounding;

pub use decimal_serde::*;
pub use rounding::{round_money, round_quantity};
