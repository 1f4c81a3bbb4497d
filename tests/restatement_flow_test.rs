use rust_decimal_macros::dec;
use std::sync::Arc;

use tradebook::constants::CLASS_DOMESTIC_EQUITY;
use tradebook::corporate_actions::{
    CorporateActionRepository, CorporateActionService, CorporateActionServiceTrait,
    NewCorporateAction, ACTION_DIVIDEND, ACTION_SPLIT,
};
use tradebook::instruments::{InstrumentRepository, InstrumentService, InstrumentServiceTrait, NewInstrument};
use tradebook::restatement::{SyncService, SyncServiceTrait};
use tradebook::transactions::{
    NewTransaction, TransactionRepository, TransactionService, TransactionServiceTrait,
};

mod common;

struct Fixture {
    transaction_service: TransactionService,
    corporate_action_service: CorporateActionService,
    sync_service: Arc<SyncService>,
}

fn fixture(test_id: &str) -> Fixture {
    let pool = common::setup_pool(test_id);
    let instrument_repository = Arc::new(InstrumentRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let corporate_action_repository = Arc::new(CorporateActionRepository::new(pool.clone()));

    let sync_service = Arc::new(SyncService::new(
        transaction_repository.clone(),
        corporate_action_repository.clone(),
    ));
    let instrument_service = InstrumentService::new(instrument_repository.clone());
    instrument_service
        .create_instrument(NewInstrument {
            id: None,
            name: "OmegaCorp".to_string(),
            instrument_class: CLASS_DOMESTIC_EQUITY.to_string(),
        })
        .unwrap();

    Fixture {
        transaction_service: TransactionService::new(
            transaction_repository.clone(),
            instrument_repository.clone(),
        ),
        corporate_action_service: CorporateActionService::new(
            corporate_action_repository,
            instrument_repository,
            sync_service.clone(),
        ),
        sync_service,
    }
}

fn buy(quantity: &str, price: &str, date: &str) -> NewTransaction {
    NewTransaction {
        id: None,
        instrument_name: "OmegaCorp".to_string(),
        side: "BUY".to_string(),
        quantity: quantity.parse().unwrap(),
        price: price.parse().unwrap(),
        transaction_date: date.to_string(),
        commission: None,
        note: None,
    }
}

fn split(ratio: &str, date: &str) -> NewCorporateAction {
    NewCorporateAction {
        id: None,
        instrument_name: "OmegaCorp".to_string(),
        action_type: ACTION_SPLIT.to_string(),
        action_date: date.to_string(),
        ratio: Some(ratio.parse().unwrap()),
        amount: None,
        note: None,
    }
}

#[test]
fn split_restates_and_delete_reverts() {
    let f = fixture("split_revert");
    let tx = f
        .transaction_service
        .create_transaction(buy("100", "20.00", "2024-01-02"))
        .unwrap();

    let action = f
        .corporate_action_service
        .create_corporate_action(split("0.5", "2024-02-01"))
        .unwrap();

    let restated = f.transaction_service.get_transaction(&tx.id).unwrap();
    assert_eq!(restated.quantity, dec!(200.0000));
    assert_eq!(restated.price, dec!(10.00));
    assert_eq!(restated.total_amount, dec!(2000.00));
    // Originals never move
    assert_eq!(restated.original_quantity, Some(dec!(100)));
    assert_eq!(restated.original_price, Some(dec!(20.00)));
    // Fees and P/L are not restated
    assert_eq!(restated.commission, tx.commission);
    assert_eq!(restated.profit_loss, tx.profit_loss);

    f.corporate_action_service
        .delete_corporate_action(&action.id)
        .unwrap();
    let reverted = f.transaction_service.get_transaction(&tx.id).unwrap();
    assert_eq!(reverted.quantity, dec!(100));
    assert_eq!(reverted.price, dec!(20.00));
}

#[test]
fn sync_is_idempotent() {
    let f = fixture("sync_idempotent");
    f.transaction_service
        .create_transaction(buy("100", "20.00", "2024-01-02"))
        .unwrap();
    f.corporate_action_service
        .create_corporate_action(split("0.25", "2024-02-01"))
        .unwrap();

    let outcome = f.sync_service.sync_instrument("OmegaCorp").unwrap();
    assert_eq!(outcome.updated, 0);
}

#[test]
fn dividend_floors_effective_price_at_zero() {
    let f = fixture("dividend_floor");
    let tx = f
        .transaction_service
        .create_transaction(buy("10", "1.50", "2024-01-02"))
        .unwrap();

    f.corporate_action_service
        .create_corporate_action(NewCorporateAction {
            id: None,
            instrument_name: "OmegaCorp".to_string(),
            action_type: ACTION_DIVIDEND.to_string(),
            action_date: "2024-02-01".to_string(),
            ratio: None,
            amount: Some(dec!(2.00)),
            note: None,
        })
        .unwrap();

    let restated = f.transaction_service.get_transaction(&tx.id).unwrap();
    assert_eq!(restated.price, dec!(0));
    assert_eq!(restated.quantity, dec!(10));
    assert_eq!(restated.total_amount, dec!(0.00));
}

#[test]
fn action_on_transaction_date_leaves_it_alone() {
    let f = fixture("same_date");
    let tx = f
        .transaction_service
        .create_transaction(buy("100", "20.00", "2024-02-01"))
        .unwrap();

    f.corporate_action_service
        .create_corporate_action(split("0.5", "2024-02-01"))
        .unwrap();

    let unchanged = f.transaction_service.get_transaction(&tx.id).unwrap();
    assert_eq!(unchanged.quantity, dec!(100));
    assert_eq!(unchanged.price, dec!(20.00));
}

#[test]
fn malformed_dividend_is_rejected_before_any_write() {
    let f = fixture("invalid_action");
    let result = f
        .corporate_action_service
        .create_corporate_action(NewCorporateAction {
            id: None,
            instrument_name: "OmegaCorp".to_string(),
            action_type: ACTION_DIVIDEND.to_string(),
            action_date: "2024-02-01".to_string(),
            ratio: Some(dec!(2)),
            amount: None,
            note: None,
        });
    assert!(result.is_err());
    assert!(f
        .corporate_action_service
        .get_corporate_actions()
        .unwrap()
        .is_empty());
}
