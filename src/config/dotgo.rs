use crate::core::token::ClientCredentials;
use crate::utils::error::{CheckError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use std::env;

/// The aggregator caps one capability request at 10,000 numbers.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Aggregator connection settings, environment-style.
#[derive(Debug, Clone)]
pub struct DotgoConfig {
    pub auth_base_url: String,
    pub api_credentials: ClientCredentials,
    pub aggregator_credentials: ClientCredentials,
    pub server_root: String,
    pub bot_id: String,
    pub chunk_size: usize,
}

impl DotgoConfig {
    /// Load from environment variables, reading a `.env` file first if one
    /// is present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            auth_base_url: required("DOTGO_AUTH_BASE_URL")?,
            api_credentials: ClientCredentials {
                client_id: required("DOTGO_CLIENT_ID")?,
                client_secret: required("DOTGO_CLIENT_SECRET")?,
            },
            aggregator_credentials: ClientCredentials {
                client_id: required("DOTGO_AGGREGATOR_CLIENT_ID")?,
                client_secret: required("DOTGO_AGGREGATOR_CLIENT_SECRET")?,
            },
            server_root: required("DOTGO_SERVER_ROOT")?,
            bot_id: required("DOTGO_BOT_ID")?,
            chunk_size: chunk_size_from_env()?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| CheckError::MissingConfigError {
        field: name.to_string(),
    })
}

fn chunk_size_from_env() -> Result<usize> {
    match env::var("DOTGO_CHUNK_SIZE") {
        Ok(raw) => raw.parse().map_err(|_| CheckError::InvalidConfigValueError {
            field: "DOTGO_CHUNK_SIZE".to_string(),
            value: raw.clone(),
            reason: "Expected a positive integer".to_string(),
        }),
        Err(_) => Ok(DEFAULT_CHUNK_SIZE),
    }
}

impl Validate for DotgoConfig {
    fn validate(&self) -> Result<()> {
        validate_url("DOTGO_AUTH_BASE_URL", &self.auth_base_url)?;
        validate_url("DOTGO_SERVER_ROOT", &self.server_root)?;
        validate_non_empty_string("DOTGO_CLIENT_ID", &self.api_credentials.client_id)?;
        validate_non_empty_string("DOTGO_CLIENT_SECRET", &self.api_credentials.client_secret)?;
        validate_non_empty_string(
            "DOTGO_AGGREGATOR_CLIENT_ID",
            &self.aggregator_credentials.client_id,
        )?;
        validate_non_empty_string(
            "DOTGO_AGGREGATOR_CLIENT_SECRET",
            &self.aggregator_credentials.client_secret,
        )?;
        validate_non_empty_string("DOTGO_BOT_ID", &self.bot_id)?;
        validate_positive_number("DOTGO_CHUNK_SIZE", self.chunk_size, 1)?;
        Ok(())
    }
}
