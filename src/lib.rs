pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::dotgo::DotgoConfig;
pub use core::classify::DotgoChecker;
pub use core::engine::CheckEngine;
pub use core::pipeline::CapabilityPipeline;
pub use core::token::{ClientCredentials, CredentialScope, TokenCache};
pub use domain::model::{CheckReport, Classification, Extraction};
pub use utils::error::{CheckError, Result};
