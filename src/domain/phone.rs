use crate::utils::error::{CheckError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Output convention for a canonical number.
///
/// `E164` is what the aggregator API expects (`+919876543210`); `National`
/// is the bare subscriber number with the trunk prefix stripped
/// (`9876543210`), used by pipelines that feed domestic messaging systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneFormat {
    E164,
    National,
}

/// Numbering-plan rules for one region.
#[derive(Debug, Clone, Copy)]
pub struct NumberingPlan {
    pub region: &'static str,
    pub country_code: &'static str,
    pub trunk_prefix: &'static str,
    pub subscriber_len: usize,
    /// Digits a subscriber number may start with.
    pub leading_digits: &'static str,
}

static PLANS: &[NumberingPlan] = &[NumberingPlan {
    region: "IN",
    country_code: "91",
    trunk_prefix: "0",
    subscriber_len: 10,
    leading_digits: "6789",
}];

pub fn plan_for(region: &str) -> Option<&'static NumberingPlan> {
    PLANS.iter().find(|p| p.region.eq_ignore_ascii_case(region))
}

static SCIENTIFIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?[eE]\+?\d+$").expect("Failed to compile regex"));

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-\.()]+").expect("Failed to compile regex"));

/// Turn a raw cell into the textual candidate destined for validation.
///
/// Spreadsheets hand large phone numbers over as floats, often rendered in
/// scientific notation (`9.87654321E9`), so numeric cells and
/// scientific-notation strings are expanded to plain digit strings first.
/// Rounding on numbers beyond f64 precision is accepted. Empty cells yield
/// `None`; cell types that cannot hold a phone number are a structural
/// error.
pub fn candidate_text(cell: &Value) -> Result<Option<String>> {
    match cell {
        Value::Null => Ok(None),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if SCIENTIFIC.is_match(trimmed) {
                return Ok(expand_scientific(trimmed));
            }
            Ok(Some(trimmed.to_string()))
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i.to_string()))
            } else if let Some(u) = n.as_u64() {
                Ok(Some(u.to_string()))
            } else if let Some(f) = n.as_f64().filter(|f| f.is_finite()) {
                Ok(Some(format!("{:.0}", f)))
            } else {
                Ok(None)
            }
        }
        other => Err(CheckError::InputError {
            message: format!("phone number cell must be text or numeric, got: {}", other),
        }),
    }
}

fn expand_scientific(text: &str) -> Option<String> {
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| format!("{:.0}", f))
}

/// Extract the bare subscriber number if `text` spells a valid number for
/// `plan` in any accepted form: bare national, trunk-prefixed,
/// country-code-prefixed, or `+`-international, with common separators
/// (spaces, dashes, dots, parens) interspersed.
fn subscriber_digits(text: &str, plan: &NumberingPlan) -> Option<String> {
    let cleaned = SEPARATORS.replace_all(text, "");
    let (digits, international) = match cleaned.strip_prefix('+') {
        Some(rest) => (rest, true),
        None => (cleaned.as_ref(), false),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let subscriber = if international {
        // A `+` number must belong to the plan's country.
        digits
            .strip_prefix(plan.country_code)
            .filter(|rest| rest.len() == plan.subscriber_len)?
    } else if digits.len() == plan.subscriber_len {
        digits
    } else if let Some(rest) = digits
        .strip_prefix(plan.country_code)
        .filter(|rest| rest.len() == plan.subscriber_len)
    {
        rest
    } else if let Some(rest) = digits
        .strip_prefix(plan.trunk_prefix)
        .filter(|rest| rest.len() == plan.subscriber_len)
    {
        rest
    } else {
        return None;
    };

    if plan.leading_digits.contains(&subscriber[..1]) {
        Some(subscriber.to_string())
    } else {
        None
    }
}

/// Normalize one raw cell against the numbering plan of `region`.
///
/// Returns `Ok(None)` for the ordinary case of a blank or invalid number;
/// only structural problems (unusable cell type, unknown region) are
/// errors. Pure function of its inputs, and idempotent over its own
/// output in either format.
pub fn normalize_candidate(cell: &Value, region: &str, format: PhoneFormat) -> Result<Option<String>> {
    let plan = plan_for(region).ok_or_else(|| CheckError::InvalidConfigValueError {
        field: "region".to_string(),
        value: region.to_string(),
        reason: "No numbering plan for this region".to_string(),
    })?;

    let text = match candidate_text(cell)? {
        Some(text) => text,
        None => return Ok(None),
    };

    Ok(subscriber_digits(&text, plan).map(|subscriber| match format {
        PhoneFormat::E164 => format!("+{}{}", plan.country_code, subscriber),
        PhoneFormat::National => subscriber,
    }))
}
