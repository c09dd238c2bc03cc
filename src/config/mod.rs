pub mod cli;
pub mod dotgo;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::phone;
#[cfg(feature = "cli")]
use crate::utils::error::{CheckError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_file_extension, validate_non_empty_string, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "xls", "xlsx"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "rcs-check")]
#[command(about = "Check RCS capability for a bulk file of phone numbers")]
pub struct CliConfig {
    /// CSV/XLS/XLSX file containing a phone-number column
    #[arg(long)]
    pub input: String,

    /// Column holding the phone numbers
    #[arg(long, default_value = "phonenumber")]
    pub column: String,

    /// Default region for the numbering plan
    #[arg(long, default_value = "IN")]
    pub region: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn phone_column(&self) -> &str {
        &self.column
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_file_extension("input", &self.input, SUPPORTED_EXTENSIONS)?;
        validate_non_empty_string("column", &self.column)?;
        if phone::plan_for(&self.region).is_none() {
            return Err(CheckError::InvalidConfigValueError {
                field: "region".to_string(),
                value: self.region.clone(),
                reason: "No numbering plan for this region".to_string(),
            });
        }
        validate_non_empty_string("output_path", &self.output_path)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn config(input: &str) -> CliConfig {
        CliConfig {
            input: input.to_string(),
            column: "phonenumber".to_string(),
            region: "IN".to_string(),
            output_path: "./output".to_string(),
            verbose: false,
            log_json: false,
        }
    }

    #[test]
    fn test_accepts_supported_extensions() {
        assert!(config("contacts.csv").validate().is_ok());
        assert!(config("contacts.xls").validate().is_ok());
        assert!(config("data/Contacts.XLSX").validate().is_ok());
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        assert!(config("contacts.pdf").validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_region() {
        let mut cfg = config("contacts.csv");
        cfg.region = "ZZ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_column() {
        let mut cfg = config("contacts.csv");
        cfg.column = "  ".to_string();
        assert!(cfg.validate().is_err());
    }
}
