use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

/// One decoded input row: column name -> cell value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

/// A decoded tabular file: the rows plus the header names in file order.
#[derive(Debug, Clone)]
pub struct RecordSet {
    pub records: Vec<Record>,
    pub columns: Vec<String>,
}

/// Output of phone-number extraction over a record set.
///
/// `valid_numbers` holds canonical numbers with set semantics: duplicates
/// across rows collapse to a single occurrence. `rejected` keeps the raw
/// candidates that failed validation so callers can surface data-quality
/// issues instead of dropping them silently.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub candidates: Vec<String>,
    pub valid_numbers: Vec<String>,
    pub rejected: Vec<String>,
    pub valid_rows: Vec<Record>,
    pub columns: Vec<String>,
}

/// Result of a capability check: two disjoint partitions whose union is
/// the set of checked numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub enabled: Vec<String>,
    pub not_enabled: Vec<String>,
}

/// A bearer credential with its absolute expiry instant.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub secret: String,
    pub expires_at: Instant,
}

impl AccessToken {
    pub fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Success,
    Error,
}

/// Per-request result lists, serialized with the aggregator's field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(rename = "rcsEnabled")]
    pub rcs_enabled: Vec<String>,
    #[serde(rename = "rcsNotEnabled")]
    pub rcs_not_enabled: Vec<String>,
    #[serde(rename = "rejectedNumbers")]
    pub rejected_numbers: Vec<String>,
}

/// The response envelope for one check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub status: ReportStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ReportData>,
    pub checked_at: DateTime<Utc>,
}

impl CheckReport {
    pub fn success(extraction: &Extraction, classification: Classification) -> Self {
        Self {
            status: ReportStatus::Success,
            message: "RCS capabilities checked successfully".to_string(),
            data: Some(ReportData {
                rcs_enabled: classification.enabled,
                rcs_not_enabled: classification.not_enabled,
                rejected_numbers: extraction.rejected.clone(),
            }),
            checked_at: Utc::now(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ReportStatus::Error,
            message: message.into(),
            data: None,
            checked_at: Utc::now(),
        }
    }
}
