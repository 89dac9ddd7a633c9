use super::{engine::CommissionError, rounding::round_currency, Amount, DECIMAL_PRECISION};
use std::fmt;

/// Names one of the three fee configurations, mostly for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    CashIn,
    CashOutJuridical,
    CashOutNatural,
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigKind::CashIn => "Cash In",
            ConfigKind::CashOutJuridical => "Cash Out Juridical",
            ConfigKind::CashOutNatural => "Cash Out Natural",
        })
    }
}

/// What every fee configuration has in common: a percentage of the amount,
/// and a boundary whose meaning depends on the configuration (a cap, a floor
/// or a weekly allowance).
pub trait BaseFee {
    fn kind(&self) -> ConfigKind;

    /// A percentage: 0.03 means 0.03%, not 3%.
    fn percent(&self) -> Amount;

    fn boundary(&self) -> Amount;

    fn currency(&self) -> &str;

    /// The percentage applied to `amount`, rounded to cents.
    fn base_fee(&self, amount: Amount) -> Result<Amount, CommissionError> {
        let fee = self
            .percent()
            .checked_div(Amount::ONE_HUNDRED)
            .and_then(|rate| rate.checked_mul(amount))
            .ok_or(CommissionError::Overflow)?;

        Ok(round_currency(fee, DECIMAL_PRECISION))
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.percent() < Amount::ZERO {
            return Err("percent must not be negative");
        }
        if self.boundary() < Amount::ZERO {
            return Err("amount must not be negative");
        }
        if self.currency().trim().is_empty() {
            return Err("missing currency");
        }

        Ok(())
    }
}

/// Deposits: a percentage of the amount, capped at `max_amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct CashInConfig {
    pub percent: Amount,
    pub max_amount: Amount,
    pub currency: String,
}

impl CashInConfig {
    pub fn new(percent: Amount, max_amount: Amount, currency: impl Into<String>) -> Self {
        Self {
            percent,
            max_amount,
            currency: currency.into(),
        }
    }
}

impl BaseFee for CashInConfig {
    fn kind(&self) -> ConfigKind {
        ConfigKind::CashIn
    }

    fn percent(&self) -> Amount {
        self.percent
    }

    fn boundary(&self) -> Amount {
        self.max_amount
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}

/// Withdrawals by natural users: the first `weekly_limit_amount` of each ISO
/// week is free, the rest is charged a percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct CashOutNaturalConfig {
    pub percent: Amount,
    pub weekly_limit_amount: Amount,
    pub currency: String,
}

impl CashOutNaturalConfig {
    pub fn new(percent: Amount, weekly_limit_amount: Amount, currency: impl Into<String>) -> Self {
        Self {
            percent,
            weekly_limit_amount,
            currency: currency.into(),
        }
    }
}

impl BaseFee for CashOutNaturalConfig {
    fn kind(&self) -> ConfigKind {
        ConfigKind::CashOutNatural
    }

    fn percent(&self) -> Amount {
        self.percent
    }

    fn boundary(&self) -> Amount {
        self.weekly_limit_amount
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}

/// Withdrawals by juridical users: a percentage of the amount, never less than
/// `min_amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct CashOutJuridicalConfig {
    pub percent: Amount,
    pub min_amount: Amount,
    pub currency: String,
}

impl CashOutJuridicalConfig {
    pub fn new(percent: Amount, min_amount: Amount, currency: impl Into<String>) -> Self {
        Self {
            percent,
            min_amount,
            currency: currency.into(),
        }
    }
}

impl BaseFee for CashOutJuridicalConfig {
    fn kind(&self) -> ConfigKind {
        ConfigKind::CashOutJuridical
    }

    fn percent(&self) -> Amount {
        self.percent
    }

    fn boundary(&self) -> Amount {
        self.min_amount
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}

/// The configurations as handed over by a config source. Any of them can be
/// missing; the engine refuses to start until all three are there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeConfigs {
    pub cash_in: Option<CashInConfig>,
    pub cash_out_juridical: Option<CashOutJuridicalConfig>,
    pub cash_out_natural: Option<CashOutNaturalConfig>,
}

impl FeeConfigs {
    pub fn new(
        cash_in: CashInConfig,
        cash_out_juridical: CashOutJuridicalConfig,
        cash_out_natural: CashOutNaturalConfig,
    ) -> Self {
        Self {
            cash_in: Some(cash_in),
            cash_out_juridical: Some(cash_out_juridical),
            cash_out_natural: Some(cash_out_natural),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_base_fee() {
        let config = CashInConfig::new(dec!(0.03), dec!(5), "EUR");
        for (amount, want) in vec![
            (dec!(200), dec!(0.06)),
            (dec!(1000000), dec!(300)),
            (dec!(0.01), dec!(0)),
            (dec!(1650), dec!(0.5)), // 0.495 rounds up
        ] {
            assert_eq!(Ok(want), config.base_fee(amount), "{}", amount);
        }
    }

    #[test]
    // 150% of an amount close to the largest decimal does not fit.
    fn test_base_fee_overflow() {
        let very_big_number = Amount::from_str("70000000000000000000000000000").unwrap();

        assert_eq!(
            Err(CommissionError::Overflow),
            CashOutJuridicalConfig::new(dec!(150), dec!(0.5), "EUR").base_fee(very_big_number)
        );
        assert_eq!(
            Ok(dec!(210000000000000000000000000)),
            CashOutJuridicalConfig::new(dec!(0.3), dec!(0.5), "EUR").base_fee(very_big_number)
        );
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(
            dec!(5),
            CashInConfig::new(dec!(0.03), dec!(5), "EUR").boundary()
        );
        assert_eq!(
            dec!(1000),
            CashOutNaturalConfig::new(dec!(0.3), dec!(1000), "EUR").boundary()
        );
        assert_eq!(
            dec!(0.5),
            CashOutJuridicalConfig::new(dec!(0.3), dec!(0.5), "EUR").boundary()
        );
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            Ok(()),
            CashInConfig::new(dec!(0), dec!(0), "EUR").validate()
        );
        assert_eq!(
            Err("percent must not be negative"),
            CashOutNaturalConfig::new(dec!(-0.3), dec!(1000), "EUR").validate()
        );
        assert_eq!(
            Err("amount must not be negative"),
            CashOutJuridicalConfig::new(dec!(0.3), dec!(-0.5), "EUR").validate()
        );
        assert_eq!(
            Err("missing currency"),
            CashInConfig::new(dec!(0.03), dec!(5), "").validate()
        );
    }

    #[test]
    fn test_config_kind_display() {
        assert_eq!("Cash In", ConfigKind::CashIn.to_string());
        assert_eq!("Cash Out Juridical", ConfigKind::CashOutJuridical.to_string());
        assert_eq!("Cash Out Natural", ConfigKind::CashOutNatural.to_string());
    }
}
