//! The region analytics pipeline
//!
//! Stages run strictly in dependency order on a single logical thread of
//! control: fetch → flatten → impute/encode → dual representation →
//! composite features → statistical packaging → narrative generation. Each
//! invocation builds everything from scratch; nothing is shared across
//! requests.

pub mod features;
pub mod flatten;
pub mod impute;
pub mod scale;
pub mod statistics;

use std::time::Instant;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::generate::TextGenerator;
use crate::models::{AnalysisOutcome, AnalysisResult, DataPackage, HealthRecord};
use crate::narrative::{NarrativeOrchestrator, Sleeper};
use crate::store::RecordStore;
use crate::utils::logging::{log_stage_complete, log_stage_start};

/// The full analytics pipeline over injected collaborators
#[derive(Debug)]
pub struct AnalysisPipeline<R, G, S> {
    store: R,
    generator: G,
    sleeper: S,
    config: AnalysisConfig,
}

impl<R, G, S> AnalysisPipeline<R, G, S>
where
    R: RecordStore,
    G: TextGenerator,
    S: Sleeper + Clone,
{
    /// Assemble a pipeline from its collaborators
    pub fn new(store: R, generator: G, sleeper: S, config: AnalysisConfig) -> Self {
        Self {
            store,
            generator,
            sleeper,
            config,
        }
    }

    /// Run the whole pipeline for one region.
    ///
    /// Returns `NoRecords` without touching the text-generation service when
    /// the region has no stored records, and `PackagingFailed` when the
    /// statistical package could not be assembled. Only record-store
    /// transport failures propagate as errors.
    pub async fn analyze_region(&self, region_id: &str) -> Result<AnalysisOutcome> {
        log_stage_start("health record analysis", region_id);
        let started = Instant::now();

        let records = self.store.fetch_health_records(region_id).await?;
        if records.is_empty() {
            return Ok(AnalysisOutcome::NoRecords);
        }

        let package = match package_batch(&records) {
            Ok(package) => package,
            Err(error) => {
                log::error!("Error in data validation: {error}");
                return Ok(AnalysisOutcome::PackagingFailed);
            }
        };

        let orchestrator =
            NarrativeOrchestrator::new(&self.generator, self.sleeper.clone(), &self.config);
        let sections = orchestrator.run(&package).await;

        log_stage_complete("health record analysis", records.len(), Some(started.elapsed()));

        Ok(AnalysisOutcome::Completed(Box::new(AnalysisResult {
            metrics_analysis: sections.metrics_analysis,
            relationships_analysis: sections.relationships_analysis,
            patterns_analysis: sections.patterns_analysis,
            recommendations: sections.recommendations,
            data_package: package,
        })))
    }
}

/// Run the data-side stages over a non-empty batch and package the result.
///
/// This is the whole pipeline except fetching and narrative generation, and
/// is what the narrative stage is seeded with.
pub fn package_batch(records: &[HealthRecord]) -> Result<DataPackage> {
    let flattened = flatten::flatten_records(records)?;
    let imputed = impute::impute_and_encode(flattened);
    let mut representations = scale::build_representations(imputed);
    let composites = features::append_composites(&mut representations.scaled);
    statistics::build_package(&representations.raw, &representations.scaled, &composites)
}
