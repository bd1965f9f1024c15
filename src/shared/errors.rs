//! Per-receptor failures. These never stop a run: the receptor is
//! skipped and reported in the error list.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// One of V, CDR3 or J is missing or empty
    InvalidTypes,
    /// Normalized gene id not present in the reference
    MissingGermline(String),
    /// No valid transition around D, holds the label string
    NoCutpoint(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FailureReason::InvalidTypes => write!(f, "invalid_types"),
            FailureReason::MissingGermline(key) => write!(f, "missing_germline_{}", key),
            FailureReason::NoCutpoint(labels) => write!(f, "{}", labels),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub v: Option<String>,
    pub cdr3: Option<String>,
    pub j: Option<String>,
    pub reason: FailureReason,
}

impl ErrorRecord {
    pub fn new(
        v: Option<&str>,
        cdr3: Option<&str>,
        j: Option<&str>,
        reason: FailureReason,
    ) -> ErrorRecord {
        ErrorRecord {
            v: v.map(str::to_string),
            cdr3: cdr3.map(str::to_string),
            j: j.map(str::to_string),
            reason,
        }
    }
}
