use crate::{
    commission::CommissionEngine,
    config::{self, ConfigSource},
    input::{self, InputFormat},
    output,
};

use anyhow::{Context, Result};
use tracing::info;

/// Run a whole batch: read the transactions, fetch the fee configurations,
/// compute the commissions and write them out.
///
/// Commissions are only written once all of them are known, so a failing
/// batch never outputs anything.
pub fn run(
    input_stream: impl std::io::Read,
    format: InputFormat,
    source: &impl ConfigSource,
    output_stream: impl std::io::Write,
) -> Result<()> {
    let transactions = input::parse(input_stream, format)?;
    info!(transactions = transactions.len(), "read transactions");

    let configs = config::load(source)?;
    let engine = CommissionEngine::new(configs)?;
    let commissions = engine.calculate_commissions(&transactions)?;
    info!(commissions = commissions.len(), "computed commissions");

    output::write(output_stream, &commissions).context("failed to write commissions")?;

    Ok(())
}
