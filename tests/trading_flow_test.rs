use rust_decimal_macros::dec;
use std::sync::Arc;

use tradebook::constants::CLASS_DOMESTIC_EQUITY;
use tradebook::instruments::{
    InstrumentError, InstrumentRepository, InstrumentService, InstrumentServiceTrait,
    NewInstrument,
};
use tradebook::stats::{StatsService, StatsServiceTrait};
use tradebook::transactions::{
    NewTransaction, TransactionRepository, TransactionService, TransactionServiceTrait,
};
use tradebook::Error;

mod common;

fn new_instrument(name: &str) -> NewInstrument {
    NewInstrument {
        id: None,
        name: name.to_string(),
        instrument_class: CLASS_DOMESTIC_EQUITY.to_string(),
    }
}

fn new_transaction(
    instrument: &str,
    side: &str,
    quantity: &str,
    price: &str,
    date: &str,
) -> NewTransaction {
    NewTransaction {
        id: None,
        instrument_name: instrument.to_string(),
        side: side.to_string(),
        quantity: quantity.parse().unwrap(),
        price: price.parse().unwrap(),
        transaction_date: date.to_string(),
        commission: None,
        note: None,
    }
}

#[test]
fn domestic_round_trip_realizes_199_61() {
    let pool = common::setup_pool("round_trip");
    let instrument_repository = Arc::new(InstrumentRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let instrument_service = InstrumentService::new(instrument_repository.clone());
    let transaction_service =
        TransactionService::new(transaction_repository.clone(), instrument_repository.clone());

    instrument_service
        .create_instrument(new_instrument("AlphaCorp"))
        .unwrap();

    let buy = transaction_service
        .create_transaction(new_transaction("AlphaCorp", "BUY", "100", "10.00", "2024-02-01"))
        .unwrap();
    assert_eq!(buy.total_amount, dec!(1000.00));
    assert_eq!(buy.commission, dec!(0.15));
    assert_eq!(buy.tax, dec!(0));
    assert_eq!(buy.profit_loss, dec!(0));
    assert_eq!(buy.original_quantity, Some(dec!(100)));
    assert_eq!(buy.original_price, Some(dec!(10.00)));

    let sell = transaction_service
        .create_transaction(new_transaction("AlphaCorp", "SELL", "100", "12.00", "2024-02-10"))
        .unwrap();
    assert_eq!(sell.commission, dec!(0.18));
    assert_eq!(sell.tax, dec!(0.06));
    assert_eq!(sell.profit_loss, dec!(199.61));

    let detail = transaction_service
        .get_instrument_detail("AlphaCorp")
        .unwrap();
    assert_eq!(detail.current_position, dec!(0));
    assert_eq!(detail.realized_profit_loss, dec!(199.61));
    assert!(detail.open_lots.is_empty());
    assert_eq!(detail.closed_lots.len(), 1);
    // Newest first
    assert_eq!(detail.transactions[0].id, sell.id);

    let stats = StatsService::new(transaction_repository.clone())
        .profit_loss_stats()
        .unwrap();
    assert_eq!(stats.instruments.len(), 1);
    assert_eq!(stats.instruments[0].total_buy_amount, dec!(1000.00));
    assert_eq!(stats.instruments[0].total_sell_amount, dec!(1200.00));
    assert_eq!(stats.instruments[0].realized_profit_loss, dec!(199.61));
    assert_eq!(stats.overall.transaction_count, 2);
}

#[test]
fn sell_across_two_lots_records_two_closed_lots() {
    let pool = common::setup_pool("two_lots");
    let instrument_repository = Arc::new(InstrumentRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let instrument_service = InstrumentService::new(instrument_repository.clone());
    let transaction_service =
        TransactionService::new(transaction_repository.clone(), instrument_repository.clone());

    instrument_service
        .create_instrument(new_instrument("BetaCorp"))
        .unwrap();
    transaction_service
        .create_transaction(new_transaction("BetaCorp", "BUY", "50", "10.00", "2024-01-02"))
        .unwrap();
    transaction_service
        .create_transaction(new_transaction("BetaCorp", "BUY", "50", "11.00", "2024-01-03"))
        .unwrap();
    let sell = transaction_service
        .create_transaction(new_transaction("BetaCorp", "SELL", "100", "12.00", "2024-01-10"))
        .unwrap();

    // Cheapest lot closes first: 50*2 - 0.08, then 50*1 - 0.08 - 0.24
    assert_eq!(sell.profit_loss, dec!(149.60));

    let detail = transaction_service.get_instrument_detail("BetaCorp").unwrap();
    assert_eq!(detail.closed_lots.len(), 2);
    assert_eq!(detail.current_position, dec!(0));
    let profits: Vec<_> = detail.closed_lots.iter().map(|c| c.profit_loss).collect();
    assert!(profits.contains(&dec!(99.92)));
    assert!(profits.contains(&dec!(49.68)));
}

#[test]
fn view_models_serialize_with_camel_case_and_string_decimals() {
    let pool = common::setup_pool("view_serde");
    let instrument_repository = Arc::new(InstrumentRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let instrument_service = InstrumentService::new(instrument_repository.clone());
    let transaction_service =
        TransactionService::new(transaction_repository.clone(), instrument_repository.clone());

    instrument_service
        .create_instrument(new_instrument("EpsilonCorp"))
        .unwrap();
    transaction_service
        .create_transaction(new_transaction("EpsilonCorp", "BUY", "100", "10.00", "2024-02-01"))
        .unwrap();
    transaction_service
        .create_transaction(new_transaction("EpsilonCorp", "SELL", "40", "12.00", "2024-02-10"))
        .unwrap();

    let detail = transaction_service
        .get_instrument_detail("EpsilonCorp")
        .unwrap();
    let detail_json = serde_json::to_value(&detail).unwrap();
    assert_eq!(detail_json["instrumentName"], "EpsilonCorp");
    assert_eq!(detail_json["currentPosition"], "60");
    assert_eq!(detail_json["openLots"][0]["quantity"], "60");
    assert_eq!(detail_json["openLots"][0]["notional"], "600.00");
    assert_eq!(detail_json["openLots"][0]["side"], "LONG");
    assert_eq!(detail_json["closedLots"][0]["openPrice"], "10.00");
    // Newest transaction first, decimals as strings
    assert_eq!(detail_json["transactions"][0]["side"], "SELL");
    assert_eq!(detail_json["transactions"][0]["totalAmount"], "480.00");
    assert_eq!(detail_json["transactions"][0]["originalQuantity"], "40");

    let stats = StatsService::new(transaction_repository.clone())
        .profit_loss_stats()
        .unwrap();
    let stats_json = serde_json::to_value(&stats).unwrap();
    assert_eq!(stats_json["instruments"][0]["instrumentName"], "EpsilonCorp");
    assert_eq!(stats_json["instruments"][0]["totalBuyAmount"], "1000.00");
    assert_eq!(stats_json["instruments"][0]["totalSellAmount"], "480.00");
    assert_eq!(stats_json["overall"]["transactionCount"], 2);
}

#[test]
fn unknown_instrument_is_rejected() {
    let pool = common::setup_pool("unknown_instrument");
    let instrument_repository = Arc::new(InstrumentRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let transaction_service =
        TransactionService::new(transaction_repository, instrument_repository);

    let result = transaction_service.create_transaction(new_transaction(
        "Ghost", "BUY", "1", "1.00", "2024-01-02",
    ));
    assert!(matches!(
        result,
        Err(Error::Instrument(InstrumentError::NotFound(_)))
    ));

    let result = transaction_service.get_instrument_detail("Ghost");
    assert!(matches!(
        result,
        Err(Error::Instrument(InstrumentError::NotFound(_)))
    ));
}

#[test]
fn instrument_with_transactions_cannot_be_deleted() {
    let pool = common::setup_pool("delete_conflict");
    let instrument_repository = Arc::new(InstrumentRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let instrument_service = InstrumentService::new(instrument_repository.clone());
    let transaction_service =
        TransactionService::new(transaction_repository, instrument_repository.clone());

    let instrument = instrument_service
        .create_instrument(new_instrument("GammaCorp"))
        .unwrap();
    transaction_service
        .create_transaction(new_transaction("GammaCorp", "BUY", "10", "5.00", "2024-01-02"))
        .unwrap();

    let result = instrument_service.delete_instrument(&instrument.id);
    assert!(matches!(
        result,
        Err(Error::Instrument(InstrumentError::Conflict(_)))
    ));
}

#[test]
fn updating_a_transaction_recomputes_against_the_rest() {
    let pool = common::setup_pool("update_recompute");
    let instrument_repository = Arc::new(InstrumentRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let instrument_service = InstrumentService::new(instrument_repository.clone());
    let transaction_service =
        TransactionService::new(transaction_repository.clone(), instrument_repository.clone());

    instrument_service
        .create_instrument(new_instrument("DeltaCorp"))
        .unwrap();
    transaction_service
        .create_transaction(new_transaction("DeltaCorp", "BUY", "100", "10.00", "2024-01-02"))
        .unwrap();
    let sell = transaction_service
        .create_transaction(new_transaction("DeltaCorp", "SELL", "100", "12.00", "2024-01-10"))
        .unwrap();

    let updated = transaction_service
        .update_transaction(tradebook::transactions::TransactionUpdate {
            id: sell.id.clone(),
            instrument_name: "DeltaCorp".to_string(),
            side: "SELL".to_string(),
            quantity: dec!(100),
            price: dec!(11.00),
            transaction_date: "2024-01-10".to_string(),
            commission: None,
            note: None,
        })
        .unwrap();

    // 100*1 - 0.15 (buy fees) - 0.17 (sell commission) - 0.06 (sell tax)
    assert_eq!(updated.total_amount, dec!(1100.00));
    assert_eq!(updated.commission, dec!(0.17));
    assert_eq!(updated.tax, dec!(0.06));
    assert_eq!(updated.profit_loss, dec!(99.62));
    assert_eq!(updated.created_at, sell.created_at);
    // Originals stay what was entered at creation
    assert_eq!(updated.original_price, Some(dec!(12.00)));
    assert_eq!(updated.original_quantity, Some(dec!(100)));
}
