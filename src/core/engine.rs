use crate::domain::model::CheckReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Drives one check run through the pipeline stages.
pub struct CheckEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> CheckEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<CheckReport> {
        tracing::info!("Reading input file...");
        let records = self.pipeline.extract().await?;
        tracing::info!("Decoded {} rows", records.records.len());

        tracing::info!("Normalizing phone numbers...");
        let extraction = self.pipeline.transform(records).await?;
        tracing::info!(
            "{} candidates, {} unique valid numbers, {} rejected",
            extraction.candidates.len(),
            extraction.valid_numbers.len(),
            extraction.rejected.len()
        );

        tracing::info!("Checking RCS capabilities...");
        let classification = self.pipeline.classify(&extraction).await?;
        tracing::info!(
            "{} enabled, {} not enabled",
            classification.enabled.len(),
            classification.not_enabled.len()
        );

        let report = self.pipeline.report(&extraction, classification).await?;
        Ok(report)
    }
}
