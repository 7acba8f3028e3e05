//! Missing-value imputation and categorical encoding
//!
//! Numeric gaps are filled with the column median, categorical gaps with the
//! column mode. Remaining categorical columns are one-hot encoded with the
//! first (sorted) category as the dropped reference; indicator columns are
//! numeric 0/1. Encoding is batch-local and not stable across regions.
//!
//! A column with zero non-missing values cannot be imputed; it is removed
//! here (with a warning) so the guarantee holds that no surviving column
//! contains missing values.

use itertools::Itertools;

use crate::models::{ColumnData, Dataset};
use crate::utils::logging::log_data_warning;
use crate::utils::numeric::median;

/// Impute missing values and one-hot encode categorical columns.
pub fn impute_and_encode(mut dataset: Dataset) -> Dataset {
    let all_missing: Vec<String> = dataset
        .columns()
        .iter()
        .filter(|c| c.data.non_missing_count() == 0)
        .map(|c| c.name.clone())
        .collect();
    for name in &all_missing {
        log_data_warning("dropping column with no observed values", Some(name));
        dataset.remove_column(name);
    }

    let numeric_names: Vec<String> =
        dataset.numeric_column_names().map(str::to_string).collect();
    for name in &numeric_names {
        let values: Vec<Option<f64>> =
            dataset.numeric(name).map(<[Option<f64>]>::to_vec).unwrap_or_default();
        let observed: Vec<f64> = values.iter().flatten().copied().collect();
        let fill = median(&observed);
        let imputed = values.iter().map(|v| Some(v.unwrap_or(fill))).collect();
        dataset.push_column(name.clone(), ColumnData::Numeric(imputed));
    }

    let categorical_names: Vec<String> = dataset
        .categorical_column_names()
        .map(str::to_string)
        .collect();
    for name in &categorical_names {
        let Some(column) = dataset.remove_column(name) else {
            continue;
        };
        let ColumnData::Categorical(values) = column.data else {
            continue;
        };

        let fill = mode(&values);
        let imputed: Vec<String> = values
            .into_iter()
            .map(|v| v.unwrap_or_else(|| fill.clone()))
            .collect();

        // Sorted distinct categories; the first is the dropped reference.
        let categories: Vec<&String> = imputed.iter().unique().sorted().collect();
        for category in categories.iter().skip(1) {
            let indicators = imputed
                .iter()
                .map(|v| Some(if v == *category { 1.0 } else { 0.0 }))
                .collect();
            dataset.push_column(format!("{name}_{category}"), ColumnData::Numeric(indicators));
        }
    }

    dataset
}

/// Most frequent non-missing value, lexicographically smallest on ties
fn mode(values: &[Option<String>]) -> String {
    values
        .iter()
        .flatten()
        .counts()
        .into_iter()
        .sorted_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)))
        .next()
        .map(|(value, _)| value.clone())
        .unwrap_or_default()
}
