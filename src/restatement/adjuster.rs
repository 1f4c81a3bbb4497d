use log::warn;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::corporate_actions::{CorporateAction, CorporateActionType};
use crate::transactions::{EffectiveRestatement, Transaction};
use crate::utils::{round_money, round_quantity};
use crate::{Error, Result};

/// Recomputes effective quantity and price for every transaction from its
/// immutable originals and the instrument's corporate-action log.
///
/// An action applies to a transaction when its effective date is strictly
/// after the transaction date. Actions are applied in (date, created_at)
/// order regardless of how the caller sorted them, so the pass is
/// idempotent and order-independent. A transaction with no qualifying
/// action resets to its originals.
///
/// Returns restatements only for rows whose effective fields actually
/// changed. Fails before computing anything if a transaction is missing
/// its original fields; effective values can no longer be trusted then.
pub fn restate(
    transactions: &[Transaction],
    actions: &[CorporateAction],
) -> Result<Vec<EffectiveRestatement>> {
    for tx in transactions {
        if tx.original_quantity.is_none() || tx.original_price.is_none() {
            return Err(Error::InvariantViolation(format!(
                "Transaction '{}' has no original quantity/price to restate from",
                tx.id
            )));
        }
    }

    let mut ordered: Vec<&CorporateAction> = actions.iter().collect();
    ordered.sort_by(|a, b| {
        (a.action_date, a.created_at).cmp(&(b.action_date, b.created_at))
    });

    let mut restatements = Vec::new();
    for tx in transactions {
        let mut quantity = tx.original_quantity.unwrap_or_default();
        let mut price = tx.original_price.unwrap_or_default();

        for action in &ordered {
            if action.action_date <= tx.transaction_date {
                continue;
            }
            match apply_action(action, quantity, price) {
                Some((q, p)) => {
                    quantity = q;
                    price = p;
                }
                None => warn!(
                    "Skipping malformed corporate action '{}' during restatement",
                    action.id
                ),
            }
        }

        let total_amount = round_money(quantity * price);
        if quantity != tx.quantity || price != tx.price || total_amount != tx.total_amount {
            restatements.push(EffectiveRestatement {
                transaction_id: tx.id.clone(),
                quantity,
                price,
                total_amount,
            });
        }
    }

    Ok(restatements)
}

/// Applies one action to a (quantity, price) pair. Returns None when the
/// action's required field is missing or non-positive.
fn apply_action(
    action: &CorporateAction,
    quantity: Decimal,
    price: Decimal,
) -> Option<(Decimal, Decimal)> {
    let action_type = CorporateActionType::from_str(&action.action_type).ok()?;
    match action_type {
        CorporateActionType::Dividend => {
            let amount = action.amount.filter(|a| a.is_sign_positive() && !a.is_zero())?;
            let adjusted = round_money(price - amount).max(Decimal::ZERO);
            Some((quantity, adjusted))
        }
        CorporateActionType::Split | CorporateActionType::ReverseSplit => {
            let ratio = action.ratio.filter(|r| r.is_sign_positive() && !r.is_zero())?;
            Some((round_quantity(quantity / ratio), round_money(price * ratio)))
        }
    }
}
