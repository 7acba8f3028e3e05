//! Statistical summary package and final analysis artifacts
//!
//! The `DataPackage` is the immutable output of the statistical packager and
//! the sole input to the narrative stage. `AnalysisOutcome` is the typed
//! tri-state handed back to the caller: a completed analysis, a clean
//! no-records short circuit, or a packaging failure.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A map that serializes its entries in insertion order.
///
/// Statistics and correlation blocks keep dataset column order, so the
/// serialized package (and therefore the narrative context) is byte-stable
/// for a given batch.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<T>(Vec<(String, T)>);

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedMap<T> {
    /// Create an empty map
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert an entry, replacing any existing entry with the same key
    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Look up an entry by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl<T: Serialize> Serialize for OrderedMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Descriptive statistics for one raw numeric column, rounded to 2 decimals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// Sample standard deviation
    pub std: f64,
    /// Minimum observed value
    pub min: f64,
    /// Maximum observed value
    pub max: f64,
}

/// Outlier profile for one raw numeric column under the 1.5×IQR rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierProfile {
    /// Number of values outside the IQR bounds
    pub outlier_count: usize,
    /// Total number of values in the column
    pub total_count: usize,
    /// `round(100 * outlier_count / total_count, 2)`
    pub outlier_percentage: f64,
}

/// Distribution summary of one composite risk score over the scaled dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskScoreSummary {
    /// Number of rows the score was computed over
    pub count: usize,
    /// Mean score
    pub mean: f64,
    /// Sample standard deviation of the score
    pub std: f64,
    /// Minimum score
    pub min: f64,
    /// 25th percentile
    #[serde(rename = "25%")]
    pub p25: f64,
    /// Median
    #[serde(rename = "50%")]
    pub p50: f64,
    /// 75th percentile
    #[serde(rename = "75%")]
    pub p75: f64,
    /// Maximum score
    pub max: f64,
}

/// Data-quality block of the package
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataQuality {
    /// Outlier profile per raw numeric column
    pub outliers: OrderedMap<OutlierProfile>,
}

/// The validated statistical summary for one region batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataPackage {
    /// Columns present with at least one non-missing value
    pub features: Vec<String>,
    /// Per-column descriptive statistics from the raw dataset
    pub statistics: OrderedMap<ColumnStats>,
    /// Pairwise Pearson matrix from the raw dataset; empty unless at least
    /// two qualifying numeric columns exist
    pub correlations: OrderedMap<OrderedMap<f64>>,
    /// Distribution summaries for composite risk scores, from the scaled
    /// dataset
    pub risk_scores: OrderedMap<RiskScoreSummary>,
    /// Data-quality indicators
    pub data_quality: DataQuality,
}

/// The four narrative result keys, fixed shape
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Clinical interpretation of the statistical distributions
    pub metrics_analysis: String,
    /// Interpretation of the correlation structure
    pub relationships_analysis: String,
    /// Significant patterns across the indicators
    pub patterns_analysis: String,
    /// Targeted intervention and monitoring recommendations
    pub recommendations: String,
    /// The statistical package the narratives were generated from
    pub data_package: DataPackage,
}

/// Message returned when a region has no stored records
pub const NO_RECORDS_MESSAGE: &str = "No health records found for this region";

/// Message returned when the statistical packager failed
pub const PACKAGING_FAILED_MESSAGE: &str = "Error: Data validation failed";

/// What one pipeline invocation produced
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// Full analysis, with all four narrative sections present
    Completed(Box<AnalysisResult>),
    /// The region had no records; no external narrative calls were made
    NoRecords,
    /// Statistics could not be assembled; analysis is unavailable
    PackagingFailed,
}

impl AnalysisOutcome {
    /// Whether this outcome carries a full analysis
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

impl Serialize for AnalysisOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Completed(result) => result.serialize(serializer),
            Self::NoRecords => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("analysis", NO_RECORDS_MESSAGE)?;
                map.end()
            }
            Self::PackagingFailed => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("analysis", PACKAGING_FAILED_MESSAGE)?;
                map.end()
            }
        }
    }
}
