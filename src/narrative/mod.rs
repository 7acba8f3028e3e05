//! Narrative orchestrator
//!
//! Issues one text-generation request per analysis section, strictly
//! sequentially and in fixed order, each seeded with the full statistical
//! package and a section-specific instruction. A failing section is recorded
//! as a failure-marker string and never aborts the remaining sections; there
//! is no retry within an invocation.

pub mod context;
pub mod pacing;
pub mod section;

pub use pacing::{Pacer, Sleeper, TokioSleeper};
pub use section::AnalysisSection;

use crate::config::AnalysisConfig;
use crate::generate::{ChatMessage, GenerationRequest, TextGenerator};
use crate::models::DataPackage;

/// The four section texts, each either prose or a failure marker
#[derive(Debug, Clone)]
pub struct SectionTexts {
    /// Metrics interpretation
    pub metrics_analysis: String,
    /// Relationships analysis
    pub relationships_analysis: String,
    /// Pattern identification
    pub patterns_analysis: String,
    /// Recommendations
    pub recommendations: String,
}

/// Drives the four sequential generation requests for one package
#[derive(Debug)]
pub struct NarrativeOrchestrator<'a, G, S> {
    generator: &'a G,
    pacer: Pacer<S>,
    config: &'a AnalysisConfig,
}

impl<'a, G: TextGenerator, S: Sleeper> NarrativeOrchestrator<'a, G, S> {
    /// Build an orchestrator around an injected generator and sleeper
    pub fn new(generator: &'a G, sleeper: S, config: &'a AnalysisConfig) -> Self {
        Self {
            generator,
            pacer: Pacer::new(config, sleeper),
            config,
        }
    }

    /// Generate all four sections with per-section failure isolation.
    pub async fn run(&self, package: &DataPackage) -> SectionTexts {
        let shared_context = context::build_context(package);
        let mut texts: [String; 4] = Default::default();

        for (slot, section) in AnalysisSection::ALL.into_iter().enumerate() {
            log::info!("Starting {} analysis...", section.task_name());

            let prompt = context::build_prompt(&shared_context, section.instruction());
            let request = GenerationRequest {
                model: self.config.model_id.clone(),
                messages: vec![ChatMessage::user(prompt)],
                temperature: self.config.temperature,
                max_tokens: self.config.max_output_tokens,
            };

            match self.generator.generate(&request).await {
                Ok(text) => {
                    log::info!("Completed {} analysis", section.task_name());
                    texts[slot] = text;
                    self.pacer.after_success().await;
                }
                Err(error) => {
                    log::error!("Error in {} analysis: {error}", section.task_name());
                    texts[slot] = format!("Analysis failed: {error}");
                    self.pacer.after_failure().await;
                }
            }
        }

        let [metrics_analysis, relationships_analysis, patterns_analysis, recommendations] = texts;
        SectionTexts {
            metrics_analysis,
            relationships_analysis,
            patterns_analysis,
            recommendations,
        }
    }
}
