use crate::domain::model::{AccessToken, CheckReport, Classification, Extraction, RecordSet};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn phone_column(&self) -> &str;
    fn region(&self) -> &str;
    fn output_path(&self) -> &str;
}

/// One check run, staged: decode the file, normalize and deduplicate the
/// numbers, classify them against the aggregator, persist the report.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RecordSet>;
    async fn transform(&self, records: RecordSet) -> Result<Extraction>;
    async fn classify(&self, extraction: &Extraction) -> Result<Classification>;
    async fn report(
        &self,
        extraction: &Extraction,
        classification: Classification,
    ) -> Result<CheckReport>;
}

/// External capability classification. Implementations define the failure
/// policy across batches; the default aggregator client is all-or-nothing,
/// and swapping in an incremental policy only means providing another
/// implementation.
#[async_trait]
pub trait CapabilityChecker: Send + Sync {
    async fn check(&self, numbers: &[String], token: &AccessToken) -> Result<Classification>;
}
