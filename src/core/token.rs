use crate::domain::model::AccessToken;
use crate::utils::error::{CheckError, Result};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// One of the two client-credential identities used against the token
/// endpoint. The capability API and the bot/template APIs authenticate
/// with different client pairs but share the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScope {
    Api,
    Aggregator,
}

#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

struct CredentialSlot {
    credentials: ClientCredentials,
    cached: Mutex<Option<AccessToken>>,
}

impl CredentialSlot {
    fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            cached: Mutex::new(None),
        }
    }
}

/// Expiry-aware cache for the aggregator's bearer tokens.
///
/// Each scope has its own slot: refreshing one never reads or invalidates
/// the other. The slot mutex is held across the whole
/// check-then-fetch-then-store sequence, so concurrent callers of the same
/// scope trigger exactly one fetch. A failed exchange caches nothing.
pub struct TokenCache {
    http: reqwest::Client,
    auth_base_url: String,
    api: CredentialSlot,
    aggregator: CredentialSlot,
}

impl TokenCache {
    pub fn new(
        http: reqwest::Client,
        auth_base_url: String,
        api: ClientCredentials,
        aggregator: ClientCredentials,
    ) -> Self {
        Self {
            http,
            auth_base_url,
            api: CredentialSlot::new(api),
            aggregator: CredentialSlot::new(aggregator),
        }
    }

    fn slot(&self, scope: CredentialScope) -> &CredentialSlot {
        match scope {
            CredentialScope::Api => &self.api,
            CredentialScope::Aggregator => &self.aggregator,
        }
    }

    pub async fn get(&self, scope: CredentialScope) -> Result<AccessToken> {
        let slot = self.slot(scope);
        let mut cached = slot.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh() {
                tracing::debug!(?scope, "using cached access token");
                return Ok(token.clone());
            }
        }

        tracing::debug!(?scope, "fetching access token");
        let token = self.fetch(&slot.credentials).await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    async fn fetch(&self, credentials: &ClientCredentials) -> Result<AccessToken> {
        let url = format!("{}/oauth/token", self.auth_base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(credential_error)?
            .error_for_status()
            .map_err(credential_error)?;

        let body: TokenResponse = response.json().await.map_err(credential_error)?;

        let secret = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CheckError::CredentialError {
                message: "Token endpoint returned no access_token".to_string(),
            })?;

        let expires_in = body.expires_in.unwrap_or(0);
        Ok(AccessToken {
            secret,
            expires_at: Instant::now() + Duration::from_secs(expires_in),
        })
    }
}

fn credential_error(e: reqwest::Error) -> CheckError {
    CheckError::CredentialError {
        message: format!("Token exchange failed: {}", e),
    }
}
