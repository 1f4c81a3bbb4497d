pub const SIDE_BUY: &str = "BUY";
pub const SIDE_SELL: &str = "SELL";

pub const TRANSACTION_SIDES: [&str; 2] = [SIDE_BUY, SIDE_SELL];
