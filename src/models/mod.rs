//! Data models for the analytics pipeline: raw records, columnar datasets,
//! and the statistical summary artifacts.

pub mod dataset;
pub mod package;
pub mod record;

pub use dataset::{Column, ColumnData, Dataset, DualRepresentation};
pub use package::{
    AnalysisOutcome, AnalysisResult, ColumnStats, DataPackage, DataQuality, OrderedMap,
    OutlierProfile, RiskScoreSummary, NO_RECORDS_MESSAGE, PACKAGING_FAILED_MESSAGE,
};
pub use record::{HealthRecord, NESTED_CATEGORIES, VITAL_COLUMNS};
