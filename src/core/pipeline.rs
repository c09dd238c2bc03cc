use crate::core::decode::{decode, FileFormat};
use crate::core::extract::extract_phone_data;
use crate::core::token::{CredentialScope, TokenCache};
use crate::domain::model::{CheckReport, Classification, Extraction, RecordSet};
use crate::domain::phone::PhoneFormat;
use crate::domain::ports::{CapabilityChecker, ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_file_size;

/// Upload size cap, matching the aggregator portal's 5 MB limit.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// The production pipeline: file bytes in, persisted report out.
pub struct CapabilityPipeline<S: Storage, C: ConfigProvider, K: CapabilityChecker> {
    storage: S,
    config: C,
    tokens: TokenCache,
    checker: K,
}

impl<S: Storage, C: ConfigProvider, K: CapabilityChecker> CapabilityPipeline<S, C, K> {
    pub fn new(storage: S, config: C, tokens: TokenCache, checker: K) -> Self {
        Self {
            storage,
            config,
            tokens,
            checker,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, K: CapabilityChecker> Pipeline
    for CapabilityPipeline<S, C, K>
{
    async fn extract(&self) -> Result<RecordSet> {
        let path = self.config.input_path();
        let format = FileFormat::from_path(path)?;

        let bytes = self.storage.read_file(path).await?;
        validate_file_size("input file", bytes.len(), MAX_UPLOAD_BYTES)?;

        tracing::debug!(path = %path, bytes = bytes.len(), "decoding input file");
        decode(format, &bytes)
    }

    async fn transform(&self, records: RecordSet) -> Result<Extraction> {
        extract_phone_data(
            &records,
            self.config.phone_column(),
            self.config.region(),
            PhoneFormat::E164,
        )
    }

    async fn classify(&self, extraction: &Extraction) -> Result<Classification> {
        let token = self.tokens.get(CredentialScope::Api).await?;
        self.checker.check(&extraction.valid_numbers, &token).await
    }

    async fn report(
        &self,
        extraction: &Extraction,
        classification: Classification,
    ) -> Result<CheckReport> {
        let report = CheckReport::success(extraction, classification);

        let path = format!("{}/rcs_report.json", self.config.output_path());
        let json = serde_json::to_vec_pretty(&report)?;
        self.storage.write_file(&path, &json).await?;

        tracing::debug!(path = %path, "report persisted");
        Ok(report)
    }
}
