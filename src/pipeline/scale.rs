//! Dual-representation builder
//!
//! Produces the raw dataset (identity copy, original units) and the scaled
//! dataset (every numeric column standardized to zero mean and unit variance
//! over the batch) from one imputed batch. Standardization divides by the
//! population standard deviation; a zero-variance column maps to all zeros.
//! Both datasets are frozen once built.

use crate::models::{ColumnData, Dataset, DualRepresentation};
use crate::utils::numeric::{mean, population_std};

/// Build the raw and scaled representations of an imputed dataset.
#[must_use]
pub fn build_representations(dataset: Dataset) -> DualRepresentation {
    let mut scaled = Dataset::with_rows(dataset.row_count());

    for column in dataset.columns() {
        match &column.data {
            ColumnData::Numeric(values) => {
                scaled.push_column(column.name.clone(), ColumnData::Numeric(standardize(values)));
            }
            ColumnData::Categorical(values) => {
                scaled.push_column(
                    column.name.clone(),
                    ColumnData::Categorical(values.clone()),
                );
            }
        }
    }

    DualRepresentation {
        raw: dataset,
        scaled,
    }
}

/// Standardize one column; missing cells stay missing.
pub fn standardize(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let observed: Vec<f64> = values.iter().flatten().copied().collect();
    let m = mean(&observed);
    let std = population_std(&observed);

    values
        .iter()
        .map(|v| {
            v.map(|v| if std == 0.0 { 0.0 } else { (v - m) / std })
        })
        .collect()
}
