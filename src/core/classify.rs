use crate::domain::model::{AccessToken, Classification};
use crate::domain::ports::CapabilityChecker;
use crate::utils::chunk::chunked;
use crate::utils::error::{CheckError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Serialize)]
struct CapabilityRequest<'a> {
    users: &'a [String],
}

#[derive(Debug, Default, Deserialize)]
struct CapabilityResponse {
    #[serde(default, rename = "rcsEnabledContacts")]
    rcs_enabled_contacts: Vec<String>,
}

/// Client for the aggregator's capability endpoint.
///
/// Numbers are sent in sequential batches of at most `chunk_size` (the
/// endpoint caps one request at 10,000 numbers). Classification is
/// all-or-nothing: a failing batch fails the whole call and results
/// accumulated from earlier batches are discarded, never returned.
pub struct DotgoChecker {
    http: reqwest::Client,
    server_root: String,
    bot_id: String,
    chunk_size: usize,
}

impl DotgoChecker {
    pub fn new(http: reqwest::Client, server_root: String, bot_id: String, chunk_size: usize) -> Self {
        Self {
            http,
            server_root,
            bot_id,
            chunk_size,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/bot/v1/{}/rcsEnabledContacts", self.server_root, self.bot_id)
    }
}

#[async_trait]
impl CapabilityChecker for DotgoChecker {
    async fn check(&self, numbers: &[String], token: &AccessToken) -> Result<Classification> {
        let url = self.endpoint();
        let batches = chunked(numbers, self.chunk_size);
        let mut classification = Classification::default();

        for (index, &batch) in batches.iter().enumerate() {
            tracing::debug!(batch = index + 1, size = batch.len(), "checking batch");

            let response = self
                .http
                .post(&url)
                .bearer_auth(&token.secret)
                .json(&CapabilityRequest { users: batch })
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(CheckError::ClassificationError {
                    message: format!(
                        "Batch {}/{} failed with status {}",
                        index + 1,
                        batches.len(),
                        response.status()
                    ),
                });
            }

            let body: CapabilityResponse = response.json().await?;

            // Membership decides the partition; the response may mention
            // numbers outside this batch and those are ignored.
            let enabled: HashSet<&str> = body
                .rcs_enabled_contacts
                .iter()
                .map(String::as_str)
                .collect();

            for number in batch {
                if enabled.contains(number.as_str()) {
                    classification.enabled.push(number.clone());
                } else {
                    classification.not_enabled.push(number.clone());
                }
            }
        }

        Ok(classification)
    }
}
