//! Composite feature engine
//!
//! Derives risk indices on the scaled dataset. The cardiovascular score
//! re-standardizes its input columns over just that subset even though the
//! scaled dataset is already standardized; this mirrors the reference
//! behavior of per-subset re-scaling and is pinned by tests.

use crate::models::{ColumnData, Dataset};
use crate::pipeline::scale::standardize;
use crate::utils::logging::log_data_warning;
use crate::utils::numeric::round2;

/// Input columns of the cardiovascular risk score
pub const CV_RISK_FACTORS: [&str; 4] = ["heart_rate", "systolic_bp", "bmi", "blood_glucose"];

/// Name of the cardiovascular risk score column
pub const CV_RISK_SCORE: &str = "cv_risk_score";

/// Name of the respiratory health index column
pub const RESPIRATORY_HEALTH: &str = "respiratory_health";

/// Append composite risk columns to the scaled dataset.
///
/// Returns the names of the composites that were actually produced. A
/// missing input column shrinks or skips the corresponding composite; it
/// never fails the pipeline.
pub fn append_composites(scaled: &mut Dataset) -> Vec<&'static str> {
    let mut produced = Vec::new();

    if append_cv_risk_score(scaled) {
        produced.push(CV_RISK_SCORE);
    }
    if append_respiratory_health(scaled) {
        produced.push(RESPIRATORY_HEALTH);
    }

    produced
}

/// Row-wise mean of the re-standardized risk-factor columns, rounded to 2
fn append_cv_risk_score(scaled: &mut Dataset) -> bool {
    let available: Vec<&str> = CV_RISK_FACTORS
        .iter()
        .copied()
        .filter(|name| scaled.numeric(name).is_some())
        .collect();

    if available.is_empty() {
        log_data_warning("no cardiovascular risk factors available", None);
        return false;
    }
    if available.len() < CV_RISK_FACTORS.len() {
        log_data_warning(
            "computing cardiovascular risk score from a reduced factor set",
            None,
        );
    }

    let restandardized: Vec<Vec<Option<f64>>> = available
        .iter()
        .map(|name| standardize(scaled.numeric(name).unwrap_or(&[])))
        .collect();

    let rows = scaled.row_count();
    let mut scores = Vec::with_capacity(rows);
    for row in 0..rows {
        let values: Vec<f64> = restandardized.iter().filter_map(|col| col[row]).collect();
        if values.is_empty() {
            scores.push(None);
        } else {
            scores.push(Some(round2(values.iter().sum::<f64>() / values.len() as f64)));
        }
    }

    scaled.push_column(CV_RISK_SCORE, ColumnData::Numeric(scores));
    true
}

/// `respiratory_rate / 20 + oxygen_saturation / 100`, rounded to 2; requires
/// both inputs
fn append_respiratory_health(scaled: &mut Dataset) -> bool {
    let (Some(rate), Some(saturation)) = (
        scaled.numeric("respiratory_rate"),
        scaled.numeric("oxygen_saturation"),
    ) else {
        return false;
    };

    let index: Vec<Option<f64>> = rate
        .iter()
        .zip(saturation)
        .map(|(r, s)| match (r, s) {
            (Some(r), Some(s)) => Some(round2(r / 20.0 + s / 100.0)),
            _ => None,
        })
        .collect();

    scaled.push_column(RESPIRATORY_HEALTH, ColumnData::Numeric(index));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::numeric::mean;

    fn numeric(values: &[f64]) -> ColumnData {
        ColumnData::Numeric(values.iter().map(|v| Some(*v)).collect())
    }

    fn scaled_with_factors() -> Dataset {
        let mut dataset = Dataset::with_rows(4);
        dataset.push_column("heart_rate", numeric(&[-1.0, 0.0, 0.5, 0.5]));
        dataset.push_column("systolic_bp", numeric(&[-0.5, -0.5, 0.0, 1.0]));
        dataset.push_column("bmi", numeric(&[0.0, 0.0, 0.0, 0.0]));
        dataset.push_column("blood_glucose", numeric(&[-1.5, 0.5, 0.5, 0.5]));
        dataset
    }

    #[test]
    fn test_cv_risk_score_produced() {
        let mut dataset = scaled_with_factors();
        let produced = append_composites(&mut dataset);

        assert!(produced.contains(&CV_RISK_SCORE));
        let scores = dataset.numeric_values(CV_RISK_SCORE).unwrap();
        assert_eq!(scores.len(), 4);
    }

    #[test]
    fn test_cv_risk_restandardizes_subset() {
        // Already-standardized inputs are re-scaled over just the subset, so
        // a constant column contributes zero and the row-wise mean of the
        // re-scaled factors is centered. Documented quirk of the reference.
        let mut dataset = scaled_with_factors();
        append_composites(&mut dataset);

        let scores = dataset.numeric_values(CV_RISK_SCORE).unwrap();
        assert!(mean(&scores).abs() < 0.01);
    }

    #[test]
    fn test_cv_risk_skips_missing_factor() {
        let mut dataset = scaled_with_factors();
        dataset.remove_column("bmi");
        let produced = append_composites(&mut dataset);

        assert!(produced.contains(&CV_RISK_SCORE));
        assert_eq!(dataset.numeric_values(CV_RISK_SCORE).unwrap().len(), 4);
    }

    #[test]
    fn test_cv_risk_skipped_without_any_factor() {
        let mut dataset = Dataset::with_rows(2);
        dataset.push_column("body_temperature", numeric(&[0.1, -0.1]));
        let produced = append_composites(&mut dataset);

        assert!(produced.is_empty());
        assert!(dataset.column(CV_RISK_SCORE).is_none());
    }

    #[test]
    fn test_respiratory_health_requires_both_inputs() {
        let mut dataset = scaled_with_factors();
        dataset.push_column("respiratory_rate", numeric(&[16.0, 18.0, 20.0, 22.0]));
        let produced = append_composites(&mut dataset);
        assert!(!produced.contains(&RESPIRATORY_HEALTH));

        dataset.push_column("oxygen_saturation", numeric(&[98.0, 97.0, 96.0, 99.0]));
        let produced = append_composites(&mut dataset);
        assert!(produced.contains(&RESPIRATORY_HEALTH));
        assert_eq!(
            dataset.numeric_values(RESPIRATORY_HEALTH).unwrap()[0],
            round2(16.0 / 20.0 + 98.0 / 100.0)
        );
    }
}
