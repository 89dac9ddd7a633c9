use crate::commission::{Amount, CashInConfig, CashOutJuridicalConfig, CashOutNaturalConfig};
use serde::Deserialize;

// The commission API names the percentage `percents`; `percent` is accepted too.
// The boundary is named after what it does: `max`, `week_limit` or `min`.

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Boundary {
    pub amount: Amount,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CashInRecord {
    #[serde(alias = "percent")]
    pub percents: Amount,
    pub max: Boundary,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CashOutNaturalRecord {
    #[serde(alias = "percent")]
    pub percents: Amount,
    pub week_limit: Boundary,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CashOutJuridicalRecord {
    #[serde(alias = "percent")]
    pub percents: Amount,
    pub min: Boundary,
}

impl From<CashInRecord> for CashInConfig {
    fn from(record: CashInRecord) -> Self {
        Self::new(record.percents, record.max.amount, record.max.currency)
    }
}

impl From<CashOutNaturalRecord> for CashOutNaturalConfig {
    fn from(record: CashOutNaturalRecord) -> Self {
        Self::new(
            record.percents,
            record.week_limit.amount,
            record.week_limit.currency,
        )
    }
}

impl From<CashOutJuridicalRecord> for CashOutJuridicalConfig {
    fn from(record: CashOutJuridicalRecord) -> Self {
        Self::new(record.percents, record.min.amount, record.min.currency)
    }
}
