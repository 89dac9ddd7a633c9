use super::{Amount, UserId};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Natural,   // An individual, entitled to a free weekly cash-out allowance.
    Juridical, // A business, always charged with a floor.
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    CashIn,  // Money deposited.
    CashOut, // Money withdrawn.
}

/// A single operation of the batch. It can't be mutated once built: the
/// engine only ever reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    date: NaiveDate,
    user_id: UserId,
    user_type: UserType,
    tx_type: TransactionType,
    amount: Amount,
    currency: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        user_id: UserId,
        user_type: UserType,
        tx_type: TransactionType,
        amount: Amount,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            date,
            user_id,
            user_type,
            tx_type,
            amount,
            currency: currency.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn tx_type(&self) -> TransactionType {
        self.tx_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Check that the transaction can go through a fee formula.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.user_id == 0 {
            return Err("user id must be at least 1");
        }
        if self.amount <= Amount::ZERO {
            return Err("amount must be positive");
        }
        if self.currency.trim().is_empty() {
            return Err("missing currency");
        }

        Ok(())
    }
}
