// Tests for the pure restatement pass.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::corporate_actions::{
    CorporateAction, ACTION_DIVIDEND, ACTION_REVERSE_SPLIT, ACTION_SPLIT,
};
use crate::restatement::restate;
use crate::transactions::{EffectiveRestatement, Transaction};
use crate::Error;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn transaction(id: &str, date_str: &str, quantity: Decimal, price: Decimal) -> Transaction {
    let now = chrono::Utc::now().naive_utc();
    Transaction {
        id: id.to_string(),
        instrument_name: "ACME".to_string(),
        side: "BUY".to_string(),
        quantity,
        price,
        original_quantity: Some(quantity),
        original_price: Some(price),
        total_amount: quantity * price,
        commission: dec!(0),
        tax: dec!(0),
        profit_loss: dec!(0),
        transaction_date: date(date_str),
        note: None,
        created_at: now,
        updated_at: now,
    }
}

fn action(
    id: &str,
    action_type: &str,
    date_str: &str,
    ratio: Option<Decimal>,
    amount: Option<Decimal>,
) -> CorporateAction {
    let now = chrono::Utc::now().naive_utc();
    CorporateAction {
        id: id.to_string(),
        instrument_name: "ACME".to_string(),
        action_type: action_type.to_string(),
        action_date: date(date_str),
        ratio,
        amount,
        note: None,
        created_at: now,
        updated_at: now,
    }
}

/// Applies a restatement list back onto the transactions, the way the
/// sync service persists it.
fn applied(transactions: &[Transaction], restatements: &[EffectiveRestatement]) -> Vec<Transaction> {
    let mut result = transactions.to_vec();
    for restatement in restatements {
        let tx = result
            .iter_mut()
            .find(|t| t.id == restatement.transaction_id)
            .unwrap();
        tx.quantity = restatement.quantity;
        tx.price = restatement.price;
        tx.total_amount = restatement.total_amount;
    }
    result
}

#[test]
fn no_actions_is_identity() {
    let transactions = vec![transaction("t1", "2024-01-02", dec!(100), dec!(20))];
    let restatements = restate(&transactions, &[]).unwrap();
    assert!(restatements.is_empty());
}

#[test]
fn no_actions_resets_drifted_effective_values() {
    let mut tx = transaction("t1", "2024-01-02", dec!(100), dec!(20));
    tx.quantity = dec!(200);
    tx.price = dec!(10);
    tx.total_amount = dec!(2000);

    let restatements = restate(&[tx], &[]).unwrap();
    assert_eq!(restatements.len(), 1);
    assert_eq!(restatements[0].quantity, dec!(100));
    assert_eq!(restatements[0].price, dec!(20));
    assert_eq!(restatements[0].total_amount, dec!(2000.00));
}

#[test]
fn split_halving_ratio_doubles_quantity() {
    // ratio 0.5: 100 @ 20 becomes 200 @ 10
    let transactions = vec![transaction("t1", "2024-01-02", dec!(100), dec!(20))];
    let actions = vec![action("a1", ACTION_SPLIT, "2024-02-01", Some(dec!(0.5)), None)];

    let restatements = restate(&transactions, &actions).unwrap();
    assert_eq!(restatements.len(), 1);
    assert_eq!(restatements[0].quantity, dec!(200.0000));
    assert_eq!(restatements[0].price, dec!(10.00));
    assert_eq!(restatements[0].total_amount, dec!(2000.00));
}

#[test]
fn dividend_floors_price_at_zero() {
    let transactions = vec![transaction("t1", "2024-01-02", dec!(10), dec!(1.50))];
    let actions = vec![action(
        "a1",
        ACTION_DIVIDEND,
        "2024-02-01",
        None,
        Some(dec!(2.00)),
    )];

    let restatements = restate(&transactions, &actions).unwrap();
    assert_eq!(restatements.len(), 1);
    assert_eq!(restatements[0].price, dec!(0));
    assert_eq!(restatements[0].total_amount, dec!(0.00));
}

#[test]
fn action_on_transaction_date_does_not_apply() {
    let transactions = vec![
        transaction("t1", "2024-02-01", dec!(100), dec!(20)),
        transaction("t2", "2024-01-31", dec!(100), dec!(20)),
    ];
    let actions = vec![action("a1", ACTION_SPLIT, "2024-02-01", Some(dec!(0.5)), None)];

    let restatements = restate(&transactions, &actions).unwrap();
    // Only the strictly earlier transaction is restated
    assert_eq!(restatements.len(), 1);
    assert_eq!(restatements[0].transaction_id, "t2");
}

#[test]
fn restatement_is_idempotent() {
    let transactions = vec![transaction("t1", "2024-01-02", dec!(100), dec!(20))];
    let actions = vec![
        action("a1", ACTION_SPLIT, "2024-02-01", Some(dec!(0.5)), None),
        action("a2", ACTION_DIVIDEND, "2024-03-01", None, Some(dec!(1))),
    ];

    let first = restate(&transactions, &actions).unwrap();
    let synced = applied(&transactions, &first);
    let second = restate(&synced, &actions).unwrap();
    assert!(second.is_empty());
}

#[test]
fn restatement_ignores_caller_ordering() {
    let transactions = vec![transaction("t1", "2024-01-02", dec!(100), dec!(20))];
    let mut actions = vec![
        action("a1", ACTION_SPLIT, "2024-02-01", Some(dec!(0.5)), None),
        action("a2", ACTION_DIVIDEND, "2024-03-01", None, Some(dec!(1))),
    ];

    let forward = restate(&transactions, &actions).unwrap();
    actions.reverse();
    let backward = restate(&transactions, &actions).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn deleting_all_actions_restores_originals() {
    let transactions = vec![transaction("t1", "2024-01-02", dec!(100), dec!(20))];
    let actions = vec![action("a1", ACTION_SPLIT, "2024-02-01", Some(dec!(4)), None)];

    let restated = applied(&transactions, &restate(&transactions, &actions).unwrap());
    assert_eq!(restated[0].quantity, dec!(25.0000));
    assert_eq!(restated[0].price, dec!(80.00));

    let reverted = applied(&restated, &restate(&restated, &[]).unwrap());
    assert_eq!(reverted[0].quantity, dec!(100));
    assert_eq!(reverted[0].price, dec!(20));
}

#[test]
fn split_then_reverse_split_cancel_out() {
    let transactions = vec![transaction("t1", "2024-01-02", dec!(100), dec!(20))];
    let actions = vec![
        action("a1", ACTION_SPLIT, "2024-02-01", Some(dec!(0.25)), None),
        action("a2", ACTION_REVERSE_SPLIT, "2024-03-01", Some(dec!(4)), None),
    ];

    let restatements = restate(&transactions, &actions).unwrap();
    // 100 -> 400 -> 100 and 20 -> 5 -> 20: effective values unchanged
    assert!(restatements.is_empty());
}

#[test]
fn missing_originals_is_an_invariant_violation() {
    let mut tx = transaction("t1", "2024-01-02", dec!(100), dec!(20));
    tx.original_quantity = None;

    let result = restate(&[tx], &[]);
    assert!(matches!(result, Err(Error::InvariantViolation(_))));
}

#[test]
fn malformed_action_is_skipped() {
    let transactions = vec![transaction("t1", "2024-01-02", dec!(100), dec!(20))];
    // A split with no ratio cannot be applied
    let actions = vec![action("a1", ACTION_SPLIT, "2024-02-01", None, None)];

    let restatements = restate(&transactions, &actions).unwrap();
    assert!(restatements.is_empty());
}
