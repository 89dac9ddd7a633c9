//! Where fee configurations come from.
//!
//! The engine doesn't care: any `ConfigSource` can hand over the three
//! configurations, whether it reads them from the commission API, a local
//! file or memory.

mod file;
mod http;
mod record;

pub use file::{FileConfigSource, StaticConfigSource};
pub use http::HttpConfigSource;
pub use record::{Boundary, CashInRecord, CashOutJuridicalRecord, CashOutNaturalRecord};

use crate::commission::{
    CashInConfig, CashOutJuridicalConfig, CashOutNaturalConfig, ConfigKind, FeeConfigs,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum Error {
    /// The configuration could not be fetched or decoded. Never retried.
    #[error("Can not retrieve {kind} configuration: {reason}")]
    Fetch { kind: ConfigKind, reason: String },

    #[error("Can not read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Can not parse configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Provides the three fee configurations. `Ok(None)` means the source simply
/// has no such configuration, which the engine reports as missing.
pub trait ConfigSource {
    fn cash_in(&self) -> Result<Option<CashInConfig>, Error>;
    fn cash_out_natural(&self) -> Result<Option<CashOutNaturalConfig>, Error>;
    fn cash_out_juridical(&self) -> Result<Option<CashOutJuridicalConfig>, Error>;
}

/// Fetch all the configurations: cash-in first, then cash-out for juridical
/// users, then cash-out for natural users. The first failure stops the others.
pub fn load(source: &impl ConfigSource) -> Result<FeeConfigs, Error> {
    let configs = FeeConfigs {
        cash_in: source.cash_in()?,
        cash_out_juridical: source.cash_out_juridical()?,
        cash_out_natural: source.cash_out_natural()?,
    };
    debug!(?configs, "loaded fee configurations");

    Ok(configs)
}
