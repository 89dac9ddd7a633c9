use crate::commission::{Amount, Transaction, TransactionType, UserId, UserType};

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub mod schema;

const SUPPORTED_CURRENCY: &str = "EUR";

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("File can't be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON data can't be parsed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV data can't be parsed: {0}")]
    Csv(String), // CSV is malformed

    #[error("Empty file/json data.")]
    Empty,

    #[error("Invalid data format.\n{}", .0.join("\n"))]
    Schema(Vec<String>), // One message per violation

    #[error("Invalid record: {0}")]
    Format(String), // Data format is incorrect
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Guess the format from the file extension. Anything but `.csv` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Open a transactions file. The format is guessed from the file extension
/// unless given.
pub fn open(
    path: &Path,
    format: Option<InputFormat>,
) -> Result<(std::fs::File, InputFormat), Error> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    debug!(path = %path.display(), ?format, "reading transactions");

    Ok((std::fs::File::open(path)?, format))
}

// When parsing, I'm making the assumption that we want to completely abort
// on errors: a batch with a single bad record produces no commission at all,
// so it's best to fix the file and try again.
pub fn parse(input: impl std::io::Read, format: InputFormat) -> Result<Vec<Transaction>, Error> {
    let buffered = std::io::BufReader::new(input);
    let transactions = match format {
        InputFormat::Json => parse_json(buffered)?,
        InputFormat::Csv => parse_csv(buffered)?,
    };

    debug!(transactions = transactions.len(), "parsed transactions");
    Ok(transactions)
}

fn parse_json(input: impl std::io::Read) -> Result<Vec<Transaction>, Error> {
    let document: serde_json::Value = serde_json::from_reader(input)?;
    if document.as_array().map_or(false, |items| items.is_empty()) {
        return Err(Error::Empty);
    }
    schema::validate(&document).map_err(Error::Schema)?;

    let records: Vec<TransactionRecord> = serde_json::from_value(document)?;
    records.into_iter().map(Transaction::try_from).collect()
}

fn parse_csv(input: impl std::io::Read) -> Result<Vec<Transaction>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let transactions = reader
        .deserialize::<CsvTransactionRecord>()
        .map(|r| match r {
            Ok(record) => Transaction::try_from(TransactionRecord::from(record)),
            Err(err) => Err(err.into()),
        })
        .collect::<Result<Vec<Transaction>, Error>>()?;

    if transactions.is_empty() {
        return Err(Error::Empty);
    }

    Ok(transactions)
}

// I have record types because I can't directly deserialise into my "domain"
// type, i.e. Transaction, and I don't want it to make assumptions on how the
// transactions are actually formatted.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    date: NaiveDate,

    user_id: UserId,

    user_type: UserTypeRecord,

    #[serde(rename = "type")]
    tx_type: TransactionTypeRecord,

    operation: OperationRecord,
}

#[derive(Debug, Deserialize)]
pub struct OperationRecord {
    amount: Amount,
    currency: String,
}

// CSV can't nest, so the operation is flattened.
#[derive(Debug, Deserialize)]
pub struct CsvTransactionRecord {
    date: NaiveDate,
    user_id: UserId,
    user_type: UserTypeRecord,
    #[serde(rename = "type")]
    tx_type: TransactionTypeRecord,
    amount: Amount,
    currency: String,
}

impl From<CsvTransactionRecord> for TransactionRecord {
    fn from(record: CsvTransactionRecord) -> Self {
        Self {
            date: record.date,
            user_id: record.user_id,
            user_type: record.user_type,
            tx_type: record.tx_type,
            operation: OperationRecord {
                amount: record.amount,
                currency: record.currency,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTypeRecord {
    Natural,
    Juridical,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionTypeRecord {
    CashIn,
    CashOut,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = Error;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        if record.user_id == 0 {
            return Err(Error::Format("user_id must be at least 1".to_string()));
        }
        if record.operation.amount < Amount::new(1, 2) {
            return Err(Error::Format("amount must be at least 0.01".to_string()));
        }
        if record.operation.currency != SUPPORTED_CURRENCY {
            return Err(Error::Format(format!(
                "unsupported currency {:?}",
                record.operation.currency
            )));
        }

        let user_type = match record.user_type {
            UserTypeRecord::Natural => UserType::Natural,
            UserTypeRecord::Juridical => UserType::Juridical,
        };
        let tx_type = match record.tx_type {
            TransactionTypeRecord::CashIn => TransactionType::CashIn,
            TransactionTypeRecord::CashOut => TransactionType::CashOut,
        };

        Ok(Self::new(
            record.date,
            record.user_id,
            user_type,
            tx_type,
            record.operation.amount,
            record.operation.currency,
        ))
    }
}
