use crate::commission::{fee::BaseFee, Amount};

use super::{CommissionEngine, CommissionError};

impl CommissionEngine {
    /// A percentage of the deposit, capped.
    pub(super) fn cash_in(&self, amount: Amount) -> Result<Amount, CommissionError> {
        Ok(self.cash_in.base_fee(amount)?.min(self.cash_in.max_amount))
    }
}
