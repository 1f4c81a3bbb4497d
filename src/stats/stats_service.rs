use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::stats_model::{InstrumentStats, OverallStats, ProfitLossStats};
use super::stats_traits::StatsServiceTrait;
use crate::ledger::derive_ledger;
use crate::transactions::{Transaction, TransactionRepositoryTrait, SIDE_BUY, SIDE_SELL};
use crate::utils::round_money;
use crate::Result;

/// Service aggregating trading totals across the whole transaction log.
///
/// Realized P/L comes from replaying each instrument's history through the
/// lot matcher rather than from the stored per-transaction values, so the
/// numbers stay consistent with the detail views.
pub struct StatsService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl StatsService {
    /// Creates a new StatsService instance
    pub fn new(transaction_repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self {
            transaction_repository,
        }
    }
}

impl StatsServiceTrait for StatsService {
    fn profit_loss_stats(&self) -> Result<ProfitLossStats> {
        let transactions = self.transaction_repository.get_transactions()?;

        let mut by_instrument: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
        for tx in transactions {
            by_instrument
                .entry(tx.instrument_name.clone())
                .or_default()
                .push(tx);
        }

        let mut instruments = Vec::with_capacity(by_instrument.len());
        for (instrument_name, mut history) in by_instrument {
            history.sort_by(|a, b| {
                (a.transaction_date, a.created_at).cmp(&(b.transaction_date, b.created_at))
            });

            let mut total_buy_amount = Decimal::ZERO;
            let mut total_sell_amount = Decimal::ZERO;
            let mut total_buy_quantity = Decimal::ZERO;
            let mut total_sell_quantity = Decimal::ZERO;
            for tx in &history {
                match tx.side.as_str() {
                    SIDE_BUY => {
                        total_buy_amount += tx.total_amount;
                        total_buy_quantity += tx.quantity;
                    }
                    SIDE_SELL => {
                        total_sell_amount += tx.total_amount;
                        total_sell_quantity += tx.quantity;
                    }
                    _ => {}
                }
            }

            let book = derive_ledger(&history)?;
            instruments.push(InstrumentStats {
                instrument_name,
                total_buy_amount: round_money(total_buy_amount),
                total_sell_amount: round_money(total_sell_amount),
                total_buy_quantity,
                total_sell_quantity,
                realized_profit_loss: book.realized_profit_loss(),
                transaction_count: history.len(),
            });
        }

        let overall = OverallStats {
            total_buy_amount: round_money(
                instruments.iter().map(|s| s.total_buy_amount).sum(),
            ),
            total_sell_amount: round_money(
                instruments.iter().map(|s| s.total_sell_amount).sum(),
            ),
            realized_profit_loss: round_money(
                instruments.iter().map(|s| s.realized_profit_loss).sum(),
            ),
            transaction_count: instruments.iter().map(|s| s.transaction_count).sum(),
        };

        Ok(ProfitLossStats {
            instruments,
            overall,
        })
    }
}
