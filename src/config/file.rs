use super::{
    record::{CashInRecord, CashOutJuridicalRecord, CashOutNaturalRecord},
    ConfigSource, Error,
};
use crate::commission::{CashInConfig, CashOutJuridicalConfig, CashOutNaturalConfig, FeeConfigs};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    cash_in: Option<CashInRecord>,
    cash_out_natural: Option<CashOutNaturalRecord>,
    cash_out_juridical: Option<CashOutJuridicalRecord>,
}

/// Reads the fee configurations from a local JSON file, e.g.
///
/// ```json
/// {
///   "cash_in": { "percents": 0.03, "max": { "amount": 5, "currency": "EUR" } },
///   "cash_out_natural": { "percents": 0.3, "week_limit": { "amount": 1000, "currency": "EUR" } },
///   "cash_out_juridical": { "percents": 0.3, "min": { "amount": 0.5, "currency": "EUR" } }
/// }
/// ```
///
/// A missing section is a missing configuration.
pub struct FileConfigSource {
    file: ConfigFile,
}

impl FileConfigSource {
    pub fn open(path: &Path) -> Result<Self, Error> {
        info!(path = %path.display(), "reading fee configurations");
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, Error> {
        Ok(Self {
            file: serde_json::from_str(content)?,
        })
    }
}

impl ConfigSource for FileConfigSource {
    fn cash_in(&self) -> Result<Option<CashInConfig>, Error> {
        Ok(self.file.cash_in.clone().map(Into::into))
    }

    fn cash_out_natural(&self) -> Result<Option<CashOutNaturalConfig>, Error> {
        Ok(self.file.cash_out_natural.clone().map(Into::into))
    }

    fn cash_out_juridical(&self) -> Result<Option<CashOutJuridicalConfig>, Error> {
        Ok(self.file.cash_out_juridical.clone().map(Into::into))
    }
}

/// Configurations already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    configs: FeeConfigs,
}

impl StaticConfigSource {
    pub fn new(configs: FeeConfigs) -> Self {
        Self { configs }
    }
}

impl ConfigSource for StaticConfigSource {
    fn cash_in(&self) -> Result<Option<CashInConfig>, Error> {
        Ok(self.configs.cash_in.clone())
    }

    fn cash_out_natural(&self) -> Result<Option<CashOutNaturalConfig>, Error> {
        Ok(self.configs.cash_out_natural.clone())
    }

    fn cash_out_juridical(&self) -> Result<Option<CashOutJuridicalConfig>, Error> {
        Ok(self.configs.cash_out_juridical.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{FileConfigSource, StaticConfigSource};
    use crate::commission::{CashInConfig, CashOutNaturalConfig, FeeConfigs};
    use crate::config::{load, Error};
    use rust_decimal_macros::dec;
    use std::io::Write;

    const FULL: &str = r#"{
        "cash_in": { "percents": 0.03, "max": { "amount": 5, "currency": "EUR" } },
        "cash_out_natural": { "percents": 0.3, "week_limit": { "amount": 1000, "currency": "EUR" } },
        "cash_out_juridical": { "percents": 0.3, "min": { "amount": 0.5, "currency": "EUR" } }
    }"#;

    #[test]
    fn test_file_source() {
        let configs = load(&FileConfigSource::parse(FULL).unwrap()).unwrap();

        assert_eq!(
            Some(CashInConfig::new(dec!(0.03), dec!(5), "EUR")),
            configs.cash_in
        );
        assert_eq!(
            Some(CashOutNaturalConfig::new(dec!(0.3), dec!(1000), "EUR")),
            configs.cash_out_natural
        );
        assert_eq!(dec!(0.5), configs.cash_out_juridical.unwrap().min_amount);
    }

    #[test]
    fn test_file_source_missing_section() {
        let source = FileConfigSource::parse(
            r#"{ "cash_in": { "percents": 0.03, "max": { "amount": 5, "currency": "EUR" } } }"#,
        )
        .unwrap();
        let configs = load(&source).unwrap();

        assert!(configs.cash_in.is_some());
        assert!(configs.cash_out_natural.is_none());
        assert!(configs.cash_out_juridical.is_none());
    }

    #[test]
    fn test_file_source_open() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let configs = load(&FileConfigSource::open(file.path()).unwrap()).unwrap();
        assert!(configs.cash_out_juridical.is_some());

        let missing = FileConfigSource::open(&file.path().with_extension("missing"));
        assert!(matches!(missing, Err(Error::Io(_))));
    }

    #[test]
    fn test_file_source_invalid_json() {
        assert!(matches!(
            FileConfigSource::parse("{ not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_static_source() {
        let source = StaticConfigSource::new(FeeConfigs {
            cash_in: Some(CashInConfig::new(dec!(0.03), dec!(5), "EUR")),
            ..Default::default()
        });
        let configs = load(&source).unwrap();

        assert!(configs.cash_in.is_some());
        assert!(configs.cash_out_juridical.is_none());
    }
}
