use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{MONEY_DECIMAL_PRECISION, QUANTITY_DECIMAL_PRECISION};

/// Rounds a monetary amount to 2 decimals, half away from zero.
///
/// Applied at every computation stage, not only at the end, so repeated
/// derivations agree with stored values.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a quantity to 4 decimals, preserving fractional shares.
pub fn round_quantity(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        QUANTITY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}
