use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::{CLASS_CROSS_BORDER_EQUITY, CLASS_FOREIGN_EQUITY};
use crate::transactions::TransactionSide;
use crate::utils::round_money;

/// Commission and tax charged on a single transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fees {
    pub commission: Decimal,
    pub tax: Decimal,
}

/// Computes commission and tax for a transaction from its notional amount.
///
/// Rates per instrument class:
/// - domestic equity: commission 0.015% both sides, tax 0.005% on SELL only
/// - cross-border equity: commission 0.02% both sides, tax 0.1% both sides
/// - foreign equity: commission is the caller-supplied amount (or zero), no tax
///
/// An unknown class falls back to the domestic schedule. The fallback is
/// deliberate policy, but it is logged so bad master data surfaces.
pub fn compute_fees(
    instrument_class: &str,
    side: TransactionSide,
    notional: Decimal,
    manual_commission: Option<Decimal>,
) -> Fees {
    let (commission, tax) = match instrument_class {
        CLASS_CROSS_BORDER_EQUITY => (notional * dec!(0.0002), notional * dec!(0.001)),
        CLASS_FOREIGN_EQUITY => (manual_commission.unwrap_or(Decimal::ZERO), Decimal::ZERO),
        class => {
            if class != crate::constants::CLASS_DOMESTIC_EQUITY {
                warn!(
                    "Unknown instrument class '{}', falling back to the domestic fee schedule",
                    class
                );
            }
            let tax = if side == TransactionSide::Sell {
                notional * dec!(0.00005)
            } else {
                Decimal::ZERO
            };
            (notional * dec!(0.00015), tax)
        }
    };

    Fees {
        commission: round_money(commission),
        tax: round_money(tax),
    }
}
