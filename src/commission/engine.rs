use super::{
    fee::{BaseFee, CashInConfig, CashOutJuridicalConfig, CashOutNaturalConfig, ConfigKind, FeeConfigs},
    ledger::WeeklyLedger,
    rounding::round_currency,
    transaction::{Transaction, TransactionType, UserType},
    Amount, DECIMAL_PRECISION,
};
use thiserror::Error;
use tracing::{debug, trace};

mod cash_in;
mod cash_out_juridical;
mod cash_out_natural;

/// Every error aborts the whole batch: no commission is returned at all.
#[derive(Debug, Error, PartialEq)]
pub enum CommissionError {
    #[error("{0} configuration not found.")]
    ConfigMissing(ConfigKind),

    #[error("Invalid {kind} configuration: {reason}.")]
    ConfigInvalid {
        kind: ConfigKind,
        reason: &'static str,
    },

    #[error("Transaction data not found.")]
    TransactionDataMissing,

    #[error("Invalid Transaction data at index {index}: {reason}.")]
    TransactionDataInvalid { index: usize, reason: &'static str },

    /// A fee or a weekly total does not fit in a decimal.
    #[error("Amount overflow while computing commissions.")]
    Overflow,
}

/// Computes commissions from the three fee configurations.
///
/// An engine can be reused for several batches: each call to
/// `calculate_commissions` starts from an empty weekly ledger.
#[derive(Debug, Clone)]
pub struct CommissionEngine {
    cash_in: CashInConfig,
    cash_out_juridical: CashOutJuridicalConfig,
    cash_out_natural: CashOutNaturalConfig,
}

impl CommissionEngine {
    /// Fails if a configuration is missing, then if one is invalid. Both checks
    /// go through cash-in, cash-out-juridical and cash-out-natural, in that
    /// order.
    pub fn new(configs: FeeConfigs) -> Result<Self, CommissionError> {
        let cash_in = configs
            .cash_in
            .ok_or(CommissionError::ConfigMissing(ConfigKind::CashIn))?;
        let cash_out_juridical = configs
            .cash_out_juridical
            .ok_or(CommissionError::ConfigMissing(ConfigKind::CashOutJuridical))?;
        let cash_out_natural = configs
            .cash_out_natural
            .ok_or(CommissionError::ConfigMissing(ConfigKind::CashOutNatural))?;

        validate(&cash_in)?;
        validate(&cash_out_juridical)?;
        validate(&cash_out_natural)?;

        Ok(Self {
            cash_in,
            cash_out_juridical,
            cash_out_natural,
        })
    }

    /// Compute the commission of every transaction, in input order.
    ///
    /// The whole batch is checked before the first commission is computed, so
    /// an invalid transaction never leaves partial results behind.
    pub fn calculate_commissions(
        &self,
        transactions: &[Transaction],
    ) -> Result<Vec<Amount>, CommissionError> {
        if transactions.is_empty() {
            return Err(CommissionError::TransactionDataMissing);
        }

        for (index, tx) in transactions.iter().enumerate() {
            tx.validate()
                .map_err(|reason| CommissionError::TransactionDataInvalid { index, reason })?;
        }

        // The ledger accumulates withdrawals as they come, so transactions
        // must be applied in order, one at a time.
        let mut ledger = WeeklyLedger::new();
        let commissions = transactions
            .iter()
            .map(|tx| self.commission(&mut ledger, tx))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            transactions = transactions.len(),
            weeks = ledger.len(),
            "computed commissions"
        );

        Ok(commissions)
    }

    /// Compute the commission of a single transaction, rounded to cents.
    /// Cash-outs of natural users read and update `ledger`.
    pub fn commission(
        &self,
        ledger: &mut WeeklyLedger,
        tx: &Transaction,
    ) -> Result<Amount, CommissionError> {
        let fee = match (tx.tx_type(), tx.user_type()) {
            (TransactionType::CashIn, _) => self.cash_in(tx.amount())?,
            (TransactionType::CashOut, UserType::Juridical) => {
                self.cash_out_juridical(tx.amount())?
            }
            (TransactionType::CashOut, UserType::Natural) => self.cash_out_natural(ledger, tx)?,
        };

        trace!(user_id = tx.user_id(), %fee, "commission");

        Ok(round_currency(fee, DECIMAL_PRECISION))
    }
}

fn validate(config: &impl BaseFee) -> Result<(), CommissionError> {
    config
        .validate()
        .map_err(|reason| CommissionError::ConfigInvalid {
            kind: config.kind(),
            reason,
        })
}
