//! Statistical packager
//!
//! Assembles the validated `DataPackage` for a batch: descriptive statistics
//! and a Pearson correlation matrix over the raw dataset, 1.5×IQR outlier
//! profiles per raw numeric column, and distribution summaries for the
//! composite risk scores over the scaled dataset. Any failure here is caught
//! at the packaging boundary; the caller treats it as "analysis unavailable".

use crate::error::{AnalyticsError, Result};
use crate::models::{
    ColumnStats, DataPackage, DataQuality, Dataset, OrderedMap, OutlierProfile, RiskScoreSummary,
};
use crate::pipeline::features::{CV_RISK_SCORE, RESPIRATORY_HEALTH};
use crate::utils::numeric::{mean, median, pearson, quantile, round2, sample_std};

/// Build the data package from the two representations of one batch.
///
/// `composites` names the composite columns the feature engine produced on
/// the scaled dataset.
pub fn build_package(
    raw: &Dataset,
    scaled: &Dataset,
    composites: &[&'static str],
) -> Result<DataPackage> {
    if raw.row_count() != scaled.row_count() {
        return Err(AnalyticsError::Packaging(format!(
            "representation row counts disagree: raw {} vs scaled {}",
            raw.row_count(),
            scaled.row_count()
        )));
    }
    if raw.row_count() == 0 {
        return Err(AnalyticsError::Packaging(
            "cannot package an empty dataset".to_string(),
        ));
    }

    let features: Vec<String> = raw
        .columns()
        .iter()
        .filter(|c| c.data.non_missing_count() > 0)
        .map(|c| c.name.clone())
        .collect();

    // Numeric columns with at least one observed value qualify for the
    // statistics, correlation and outlier blocks.
    let valid_columns: Vec<&str> = raw
        .numeric_column_names()
        .filter(|name| {
            raw.column(name)
                .is_some_and(|c| c.data.non_missing_count() > 0)
        })
        .collect();

    let mut statistics = OrderedMap::new();
    let mut outliers = OrderedMap::new();
    for name in &valid_columns {
        let values = raw.numeric_values(name).ok_or_else(|| {
            AnalyticsError::Packaging(format!("numeric column {name} disappeared"))
        })?;
        statistics.insert(*name, column_stats(&values));
        outliers.insert(*name, detect_outliers(&values));
    }

    let correlations = if valid_columns.len() > 1 {
        correlation_matrix(raw, &valid_columns)?
    } else {
        OrderedMap::new()
    };

    let mut risk_scores = OrderedMap::new();
    for composite in composites {
        let Some(values) = scaled.numeric_values(composite) else {
            continue;
        };
        if values.is_empty() {
            continue;
        }
        let key = match *composite {
            CV_RISK_SCORE => "cardiovascular",
            RESPIRATORY_HEALTH => "respiratory",
            other => other,
        };
        risk_scores.insert(key, describe(&values));
    }

    let package = DataPackage {
        features,
        statistics,
        correlations,
        risk_scores,
        data_quality: DataQuality { outliers },
    };

    log::info!(
        "Packaged {} features, {} statistics columns, {} risk scores",
        package.features.len(),
        package.statistics.len(),
        package.risk_scores.len()
    );

    Ok(package)
}

/// `{mean, median, std, min, max}` for one column, rounded to 2 decimals
fn column_stats(values: &[f64]) -> ColumnStats {
    ColumnStats {
        mean: round2(mean(values)),
        median: round2(median(values)),
        std: round2(sample_std(values)),
        min: round2(values.iter().copied().fold(f64::INFINITY, f64::min)),
        max: round2(values.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
    }
}

/// Outlier profile under the 1.5×IQR rule, on the column's own quartiles
pub fn detect_outliers(values: &[f64]) -> OutlierProfile {
    let q1 = quantile(values, 0.25);
    let q3 = quantile(values, 0.75);
    let iqr = q3 - q1;
    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;

    let outlier_count = values.iter().filter(|v| **v < lower || **v > upper).count();
    let total_count = values.len();
    OutlierProfile {
        outlier_count,
        total_count,
        outlier_percentage: round2(100.0 * outlier_count as f64 / total_count as f64),
    }
}

/// Symmetric Pearson matrix with a unit diagonal, rounded to 2 decimals.
///
/// A zero-variance column yields 0.0 against every other column so the block
/// stays representable in JSON.
fn correlation_matrix(
    raw: &Dataset,
    columns: &[&str],
) -> Result<OrderedMap<OrderedMap<f64>>> {
    let series: Vec<Vec<f64>> = columns
        .iter()
        .map(|name| {
            raw.numeric_values(name).ok_or_else(|| {
                AnalyticsError::Packaging(format!("numeric column {name} disappeared"))
            })
        })
        .collect::<Result<_>>()?;

    let mut matrix = OrderedMap::new();
    for (i, left) in columns.iter().enumerate() {
        let mut row = OrderedMap::new();
        for (j, right) in columns.iter().enumerate() {
            let r = if i == j {
                1.0
            } else {
                pearson(&series[i], &series[j]).unwrap_or(0.0)
            };
            row.insert(*right, round2(r));
        }
        matrix.insert(*left, row);
    }
    Ok(matrix)
}

/// Distribution summary in `describe()` shape
fn describe(values: &[f64]) -> RiskScoreSummary {
    RiskScoreSummary {
        count: values.len(),
        mean: mean(values),
        std: sample_std(values),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        p25: quantile(values, 0.25),
        p50: quantile(values, 0.5),
        p75: quantile(values, 0.75),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnData;

    fn numeric(values: &[f64]) -> ColumnData {
        ColumnData::Numeric(values.iter().map(|v| Some(*v)).collect())
    }

    fn single_column_batch() -> (Dataset, Dataset) {
        let mut raw = Dataset::with_rows(4);
        raw.push_column("bmi", numeric(&[20.0, 22.0, 24.0, 26.0]));
        let scaled = raw.clone();
        (raw, scaled)
    }

    #[test]
    fn test_single_column_has_stats_but_no_correlations() {
        let (raw, scaled) = single_column_batch();
        let package = build_package(&raw, &scaled, &[]).unwrap();

        assert_eq!(package.features, vec!["bmi".to_string()]);
        let stats = package.statistics.get("bmi").unwrap();
        assert_eq!(stats.mean, 23.0);
        assert_eq!(stats.median, 23.0);
        assert_eq!(stats.min, 20.0);
        assert_eq!(stats.max, 26.0);
        assert!(package.correlations.is_empty());
    }

    #[test]
    fn test_correlation_matrix_symmetric_with_unit_diagonal() {
        let mut raw = Dataset::with_rows(4);
        raw.push_column("a", numeric(&[1.0, 2.0, 3.0, 4.0]));
        raw.push_column("b", numeric(&[2.0, 1.0, 4.0, 3.0]));
        raw.push_column("c", numeric(&[4.0, 3.0, 2.0, 1.0]));
        let scaled = raw.clone();

        let package = build_package(&raw, &scaled, &[]).unwrap();
        let corr = &package.correlations;

        for left in ["a", "b", "c"] {
            assert_eq!(corr.get(left).unwrap().get(left), Some(&1.0));
            for right in ["a", "b", "c"] {
                assert_eq!(
                    corr.get(left).unwrap().get(right),
                    corr.get(right).unwrap().get(left)
                );
            }
        }
        assert_eq!(corr.get("a").unwrap().get("c"), Some(&-1.0));
    }

    #[test]
    fn test_zero_variance_column_correlates_as_zero() {
        let mut raw = Dataset::with_rows(3);
        raw.push_column("a", numeric(&[1.0, 2.0, 3.0]));
        raw.push_column("flat", numeric(&[5.0, 5.0, 5.0]));
        let scaled = raw.clone();

        let package = build_package(&raw, &scaled, &[]).unwrap();
        assert_eq!(
            package.correlations.get("a").unwrap().get("flat"),
            Some(&0.0)
        );
        assert_eq!(
            package.correlations.get("flat").unwrap().get("flat"),
            Some(&1.0)
        );
    }

    #[test]
    fn test_outlier_profile_invariants() {
        let mut values: Vec<f64> = (0..20).map(f64::from).collect();
        values.push(1000.0);
        let profile = detect_outliers(&values);

        assert!(profile.outlier_count <= profile.total_count);
        assert_eq!(profile.outlier_count, 1);
        assert_eq!(profile.total_count, 21);
        assert_eq!(
            profile.outlier_percentage,
            round2(100.0 * profile.outlier_count as f64 / profile.total_count as f64)
        );
    }

    #[test]
    fn test_outliers_on_uniform_data() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        let profile = detect_outliers(&values);
        assert_eq!(profile.outlier_count, 0);
        assert_eq!(profile.outlier_percentage, 0.0);
    }

    #[test]
    fn test_risk_scores_from_scaled_composites() {
        let (raw, mut scaled) = single_column_batch();
        scaled.push_column("cv_risk_score", numeric(&[-1.0, -0.5, 0.5, 1.0]));

        let package = build_package(&raw, &scaled, &[CV_RISK_SCORE]).unwrap();
        let summary = package.risk_scores.get("cardiovascular").unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.min, -1.0);
        assert_eq!(summary.max, 1.0);
        assert_eq!(summary.p50, 0.0);
    }

    #[test]
    fn test_row_mismatch_is_a_packaging_error() {
        let (raw, _) = single_column_batch();
        let scaled = Dataset::with_rows(3);
        assert!(build_package(&raw, &scaled, &[]).is_err());
    }
}
