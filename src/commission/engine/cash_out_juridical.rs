use crate::commission::{fee::BaseFee, Amount};

use super::{CommissionEngine, CommissionError};

impl CommissionEngine {
    /// A percentage of the withdrawal, with a floor.
    pub(super) fn cash_out_juridical(&self, amount: Amount) -> Result<Amount, CommissionError> {
        Ok(self
            .cash_out_juridical
            .base_fee(amount)?
            .max(self.cash_out_juridical.min_amount))
    }
}
