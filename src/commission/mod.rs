//! Computes the commission owed for each transaction of a batch.
//!
//! Engine: validates the fee configurations and the batch, then dispatches
//! every transaction to the matching fee formula, in input order.
//! WeeklyLedger: what each natural user already withdrew during an ISO week,
//! so the free weekly allowance is only granted once.

pub mod engine;
pub mod fee;
pub mod ledger;
pub mod rounding;
pub mod transaction;

pub use engine::{CommissionEngine, CommissionError};
pub use fee::{
    BaseFee, CashInConfig, CashOutJuridicalConfig, CashOutNaturalConfig, ConfigKind, FeeConfigs,
};
pub use ledger::{WeekKey, WeeklyLedger, WeeklyLedgerEntry};
pub use transaction::{Transaction, TransactionType, UserType};

// Using named types doesn't provide any compiler help, but it helps a lot with
// readability: HashMap<WeekKey, WeeklyLedgerEntry> reads better than a tuple of
// integers, and changing user ids from u32 to u64 is trivial.
pub type UserId = u32;

// Money is never an f32/f64: percentages of amounts have to round the same way
// on every platform.
pub type Amount = rust_decimal::Decimal;

/// Commissions are charged in cents.
pub const DECIMAL_PRECISION: u32 = 2;
