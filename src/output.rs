use crate::commission::{Amount, DECIMAL_PRECISION};

// Writes the commissions to the given stream, one per line, with exactly two
// decimals ("5.00", not "5").
pub fn write(output_stream: impl std::io::Write, commissions: &[Amount]) -> Result<(), std::io::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output_stream);

    for commission in commissions {
        writer.write_record([format(*commission)])?;
    }

    writer.flush()
}

/// Render a commission the way it is printed.
pub fn format(commission: Amount) -> String {
    format!(
        "{:.precision$}",
        commission,
        precision = DECIMAL_PRECISION as usize
    )
}
