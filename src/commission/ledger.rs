use super::{engine::CommissionError, Amount, UserId};
use chrono::{Datelike, NaiveDate};
use std::collections::{hash_map::Entry, HashMap};

/// Identifies one user during one ISO week.
///
/// The ISO year is part of the key: week 1 of 2016 and week 1 of 2017 are
/// different weeks, even in a batch spanning both years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekKey {
    pub user_id: UserId,
    pub iso_year: i32,
    pub iso_week: u32,
}

impl WeekKey {
    pub fn new(user_id: UserId, date: NaiveDate) -> Self {
        let week = date.iso_week();
        Self {
            user_id,
            iso_year: week.year(),
            iso_week: week.week(),
        }
    }
}

/// What a user withdrew so far during a week.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyLedgerEntry {
    /// Sum of all the withdrawals of the week.
    pub(super) running_total: Amount,

    /// Sum of the withdrawals that went through a fee calculation.
    /// It never decreases, and never exceeds `running_total`.
    pub(super) commissioned: Amount,
}

impl WeeklyLedgerEntry {
    pub const fn new(running_total: Amount, commissioned: Amount) -> Self {
        Self {
            running_total,
            commissioned,
        }
    }

    pub fn running_total(&self) -> Amount {
        self.running_total
    }

    pub fn commissioned(&self) -> Amount {
        self.commissioned
    }

    pub(super) fn withdraw(&mut self, amount: Amount) -> Result<(), CommissionError> {
        self.running_total = self
            .running_total
            .checked_add(amount)
            .ok_or(CommissionError::Overflow)?;

        Ok(())
    }

    pub(super) fn commission(&mut self, amount: Amount) -> Result<(), CommissionError> {
        self.commissioned = self
            .commissioned
            .checked_add(amount)
            .ok_or(CommissionError::Overflow)?;

        Ok(())
    }
}

/// The weekly withdrawals of natural users. A ledger only lives as long as
/// the batch it was built for.
#[derive(Debug, Default)]
pub struct WeeklyLedger {
    entries: HashMap<WeekKey, WeeklyLedgerEntry>,
}

impl WeeklyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &WeekKey) -> Option<&WeeklyLedgerEntry> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: WeekKey, entry: WeeklyLedgerEntry) {
        self.entries.insert(key, entry);
    }

    pub(super) fn entry(&mut self, key: WeekKey) -> Entry<'_, WeekKey, WeeklyLedgerEntry> {
        self.entries.entry(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
