use crate::commission::{
    fee::BaseFee,
    ledger::{WeekKey, WeeklyLedger, WeeklyLedgerEntry},
    transaction::Transaction,
    Amount,
};

use super::{CommissionEngine, CommissionError};
use std::collections::hash_map::Entry;

impl CommissionEngine {
    /// Natural users can withdraw up to the weekly limit for free during each
    /// ISO week. Whatever goes over it is charged a percentage.
    pub(super) fn cash_out_natural(
        &self,
        ledger: &mut WeeklyLedger,
        tx: &Transaction,
    ) -> Result<Amount, CommissionError> {
        let limit = self.cash_out_natural.weekly_limit_amount;
        let amount = tx.amount();
        let key = WeekKey::new(tx.user_id(), tx.date());

        let entry = match ledger.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(vacant) => {
                // First withdrawal of the week: only the part over the limit is charged.
                let mut entry = WeeklyLedgerEntry::new(amount, Amount::ZERO);
                let mut fee = Amount::ZERO;
                if amount > limit {
                    fee = self.cash_out_natural.base_fee(amount - limit)?;
                    entry.commission(amount)?;
                }
                vacant.insert(entry);

                return Ok(fee);
            }
        };

        entry.withdraw(amount)?;
        if entry.running_total <= limit {
            return Ok(Amount::ZERO);
        }

        let mut charged = entry.running_total - entry.commissioned;
        // Nothing was charged yet this week, so the allowance is still untouched.
        if entry.commissioned.is_zero() {
            charged -= limit;
        }
        entry.commission(amount)?;

        self.cash_out_natural.base_fee(charged)
    }
}
