use log::debug;
use rust_decimal::Decimal;

use super::ledger_errors::Result;
use super::ledger_model::{ClosedLot, LedgerEntry, LedgerBook, LotSide, OpenLot};
use crate::transactions::{Transaction, TransactionSide};
use crate::utils::round_money;

/// Replays one instrument's transaction history and returns the resulting
/// book of open lots and closed-lot records.
///
/// Transactions must already be in replay order (date asc, creation asc),
/// which is how the repository hands them out.
pub fn derive_ledger(transactions: &[Transaction]) -> Result<LedgerBook> {
    debug!("Deriving ledger from {} transactions", transactions.len());

    let mut book = LedgerBook::new();
    for tx in transactions {
        let entry = LedgerEntry::try_from(tx)?;
        book.apply(&entry);
    }
    Ok(book)
}

impl LedgerBook {
    /// Applies one transaction to the book and returns the realized P/L it
    /// produced, net of allocated fees.
    ///
    /// A BUY first closes open short lots starting from the highest price;
    /// a SELL first closes open long lots starting from the lowest price.
    /// Either way the leftover quantity opens a new lot on the entry's own
    /// side.
    ///
    /// Fee allocation:
    /// - the opening lot's commission and tax are deducted only on the
    ///   closing event that exhausts the lot's remaining quantity, never
    ///   prorated across partial closes;
    /// - the closing entry's own commission and tax are deducted only on
    ///   its final matched unit, and only when the entry is fully absorbed
    ///   into closes. If part of the entry opens a new lot instead, its
    ///   fees ride along on that lot.
    pub fn apply(&mut self, entry: &LedgerEntry) -> Decimal {
        match entry.side {
            TransactionSide::Buy => self.apply_close_then_open(entry, LotSide::Short),
            TransactionSide::Sell => self.apply_close_then_open(entry, LotSide::Long),
        }
    }

    fn apply_close_then_open(&mut self, entry: &LedgerEntry, closing_side: LotSide) -> Decimal {
        let mut remaining = entry.quantity;
        let mut realized = Decimal::ZERO;

        while remaining > Decimal::ZERO {
            let lots = match closing_side {
                LotSide::Long => &mut self.long_lots,
                LotSide::Short => &mut self.short_lots,
            };
            // Head of the list is the extreme price: cheapest long, richest short
            let Some(lot) = lots.first_mut() else { break };

            let matched = remaining.min(lot.quantity);
            let exhausts_lot = matched == lot.quantity;
            remaining -= matched;
            let absorbs_entry = remaining.is_zero();

            let gross = match closing_side {
                LotSide::Long => (entry.price - lot.price) * matched,
                LotSide::Short => (lot.price - entry.price) * matched,
            };
            let mut profit_loss = gross;
            if exhausts_lot {
                profit_loss -= lot.commission + lot.tax;
            }
            if absorbs_entry {
                profit_loss -= entry.commission + entry.tax;
            }
            let profit_loss = round_money(profit_loss);
            realized += profit_loss;

            self.closed_lots.push(ClosedLot {
                side: closing_side,
                open_date: lot.open_date,
                close_date: entry.date,
                open_price: lot.price,
                close_price: entry.price,
                quantity: matched,
                profit_loss,
            });

            if exhausts_lot {
                lots.remove(0);
            } else {
                lot.quantity -= matched;
            }
        }

        if remaining > Decimal::ZERO {
            self.open_lot(entry, remaining);
        }

        round_money(realized)
    }

    /// Opens a lot for the unmatched remainder, keeping the side's price
    /// ordering and breaking price ties by insertion order.
    fn open_lot(&mut self, entry: &LedgerEntry, quantity: Decimal) {
        let (side, lots) = match entry.side {
            TransactionSide::Buy => (LotSide::Long, &mut self.long_lots),
            TransactionSide::Sell => (LotSide::Short, &mut self.short_lots),
        };

        let lot = OpenLot {
            side,
            quantity,
            price: entry.price,
            open_date: entry.date,
            commission: entry.commission,
            tax: entry.tax,
        };

        let position = match side {
            // ascending: first strictly more expensive lot
            LotSide::Long => lots.iter().position(|l| entry.price < l.price),
            // descending: first strictly cheaper lot
            LotSide::Short => lots.iter().position(|l| entry.price > l.price),
        };
        match position {
            Some(index) => lots.insert(index, lot),
            None => lots.push(lot),
        }
    }
}
