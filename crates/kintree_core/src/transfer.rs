//! Import/export of the record list as JSON.
//!
//! # Responsibility
//! - Decode external bytes into a member collection with top-level shape
//!   checking.
//! - Encode the current collection as a pretty-printed, dated artifact.
//!
//! # Invariants
//! - Import failures never leave a partially-decoded collection behind; the
//!   caller's state is only replaced on full success.
//! - Shape checking stops at "is the top level an ordered sequence";
//!   anything deeper is ordinary decoding.

use crate::model::member::Member;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TransferResult<T> = Result<T, TransferError>;

/// Errors from import/export handling.
#[derive(Debug)]
pub enum TransferError {
    /// The input parsed, but its top level is not a sequence of records.
    NotAnArray,
    /// The input (or outgoing collection) could not be (de)serialized; the
    /// message carries the underlying parser text.
    Parse(String),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnArray => write!(f, "import data must be a list of member records"),
            Self::Parse(message) => write!(f, "import/export failed: {message}"),
        }
    }
}

impl Error for TransferError {}

/// Parses an external byte blob into a member collection.
///
/// Rejects non-array top-level shapes explicitly so the caller can show a
/// format message distinct from a parse failure.
pub fn import_members(bytes: &[u8]) -> TransferResult<Vec<Member>> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|err| TransferError::Parse(err.to_string()))?;

    if !value.is_array() {
        return Err(TransferError::NotAnArray);
    }

    serde_json::from_value(value).map_err(|err| TransferError::Parse(err.to_string()))
}

/// Serializes the full collection as a pretty-printed record list.
pub fn export_members(members: &[Member]) -> TransferResult<String> {
    serde_json::to_string_pretty(members).map_err(|err| TransferError::Parse(err.to_string()))
}

/// Download-artifact name carrying the given date: `family-tree-YYYY-MM-DD.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("family-tree-{}.json", date.format("%Y-%m-%d"))
}
