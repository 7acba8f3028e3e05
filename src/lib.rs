//! A Rust library implementing the region health analytics pipeline: raw
//! per-patient records are flattened, imputed, encoded and standardized into
//! dual numeric representations, summarized into a validated statistical
//! package, and interpreted through sequential calls to an external
//! text-generation service with per-section failure isolation.

pub mod config;
pub mod error;
pub mod generate;
pub mod models;
pub mod narrative;
pub mod pipeline;
pub mod store;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{AnalysisConfig, GeneratorConfig, StoreConfig};
pub use error::{AnalyticsError, Result};
pub use models::{AnalysisOutcome, AnalysisResult, DataPackage, Dataset, HealthRecord};
pub use pipeline::{package_batch, AnalysisPipeline};

// External collaborators
pub use generate::{ChatMessage, GenerationRequest, HttpTextGenerator, TextGenerator};
pub use narrative::{AnalysisSection, NarrativeOrchestrator, Sleeper, TokioSleeper};
pub use store::{HttpRecordStore, RecordStore};
