use crate::domain::model::{Extraction, RecordSet};
use crate::domain::phone::{self, PhoneFormat};
use crate::utils::error::{CheckError, Result};
use serde_json::Value;
use std::collections::HashSet;

/// Pull phone-number candidates out of a decoded record set, normalize
/// them against `region`'s numbering plan and deduplicate the survivors.
///
/// Candidates keep row order; the canonical set keeps first-occurrence
/// order with duplicates collapsed. Rows whose number normalized are
/// returned in full so callers can correlate results back to input data.
/// A file where the designated column never appears, or where nothing
/// normalizes, is an error: the pipeline must stop rather than classify
/// an empty list.
pub fn extract_phone_data(
    set: &RecordSet,
    column: &str,
    region: &str,
    format: PhoneFormat,
) -> Result<Extraction> {
    if set.records.is_empty() {
        return Err(CheckError::InputError {
            message: "Input file contains no data rows".to_string(),
        });
    }

    if !set.records.iter().any(|r| r.data.contains_key(column)) {
        return Err(CheckError::InputError {
            message: format!("Missing '{}' column in the input file", column),
        });
    }

    let mut candidates = Vec::new();
    let mut valid_numbers = Vec::new();
    let mut rejected = Vec::new();
    let mut valid_rows = Vec::new();
    let mut seen = HashSet::new();

    for record in &set.records {
        let cell = record.data.get(column).unwrap_or(&Value::Null);
        let candidate = match phone::candidate_text(cell)? {
            Some(candidate) => candidate,
            None => continue,
        };
        candidates.push(candidate.clone());

        match phone::normalize_candidate(cell, region, format)? {
            Some(canonical) => {
                if seen.insert(canonical.clone()) {
                    valid_numbers.push(canonical);
                }
                valid_rows.push(record.clone());
            }
            None => {
                tracing::debug!(candidate = %candidate, "rejected phone number");
                rejected.push(candidate);
            }
        }
    }

    if valid_numbers.is_empty() {
        return Err(CheckError::InputError {
            message: format!(
                "Missing '{}' column or no valid phone numbers found",
                column
            ),
        });
    }

    // Header order first, then any column observed only on rows.
    let mut columns = set.columns.clone();
    let known: HashSet<String> = columns.iter().cloned().collect();
    let mut extras: Vec<String> = set
        .records
        .iter()
        .flat_map(|r| r.data.keys())
        .filter(|k| !known.contains(*k))
        .cloned()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    extras.sort();
    columns.extend(extras);

    Ok(Extraction {
        candidates,
        valid_numbers,
        rejected,
        valid_rows,
        columns,
    })
}
