//! Record flattening
//!
//! Expands nested question categories into `<category>_<key>` scalar columns
//! and splits the composite blood-pressure string into `systolic_bp` /
//! `diastolic_bp`. The resulting column set is the union of fields observed
//! anywhere in the batch; rows lacking a field get missing markers.

use serde_json::Value;

use crate::error::{AnalyticsError, Result};
use crate::models::{ColumnData, Dataset, HealthRecord};

/// Flatten a non-empty batch of records into a columnar dataset.
///
/// Column kinds form the explicit schema for the rest of the pipeline: a
/// column is categorical if any observed value is textual or boolean, numeric
/// otherwise.
pub fn flatten_records(records: &[HealthRecord]) -> Result<Dataset> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyBatch);
    }

    let rows = records.len();
    let mut dataset = Dataset::with_rows(rows);

    for (idx, (name, _)) in records[0].vitals().into_iter().enumerate() {
        let values = records.iter().map(|r| r.vitals()[idx].1).collect();
        dataset.push_column(name, ColumnData::Numeric(values));
    }

    dataset.push_column(
        "gender",
        ColumnData::Categorical(records.iter().map(|r| r.gender.clone()).collect()),
    );

    for (category_index, (category, _)) in records[0].nested_categories().into_iter().enumerate() {
        for key in observed_keys(records, category_index) {
            let cells: Vec<Option<&Value>> = records
                .iter()
                .map(|r| {
                    r.nested_categories()[category_index]
                        .1
                        .and_then(|map| map.get(&key))
                        .filter(|v| !v.is_null())
                })
                .collect();
            let column_name = format!("{category}_{key}");
            dataset.push_column(column_name, columnize(&cells));
        }
    }

    let (systolic, diastolic): (Vec<_>, Vec<_>) =
        records.iter().map(HealthRecord::split_blood_pressure).unzip();
    dataset.push_column("systolic_bp", ColumnData::Numeric(systolic));
    dataset.push_column("diastolic_bp", ColumnData::Numeric(diastolic));

    Ok(dataset)
}

/// Union of keys for one nested category, in first-observed order
fn observed_keys(records: &[HealthRecord], category_index: usize) -> Vec<String> {
    let mut keys = Vec::new();
    for record in records {
        if let Some(map) = record.nested_categories()[category_index].1 {
            for key in map.keys() {
                if !keys.iter().any(|k| k == key) {
                    keys.push(key.clone());
                }
            }
        }
    }
    keys
}

/// Decide a column's kind from its observed values and build its data.
///
/// Any textual or boolean value makes the whole column categorical, with
/// numeric cells stringified so mixed columns stay uniform.
fn columnize(cells: &[Option<&Value>]) -> ColumnData {
    let is_categorical = cells
        .iter()
        .flatten()
        .any(|v| v.is_string() || v.is_boolean());

    if is_categorical {
        let values = cells
            .iter()
            .map(|cell| {
                cell.map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
            })
            .collect();
        ColumnData::Categorical(values)
    } else {
        let values = cells.iter().map(|cell| cell.and_then(Value::as_f64)).collect();
        ColumnData::Numeric(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn nested(value: serde_json::Value) -> Option<Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    fn record_with_pain(pain: serde_json::Value) -> HealthRecord {
        HealthRecord {
            heart_rate: Some(70.0),
            blood_pressure: Some("120/80".to_string()),
            pain_discomfort: nested(pain),
            ..HealthRecord::default()
        }
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        assert!(matches!(
            flatten_records(&[]),
            Err(AnalyticsError::EmptyBatch)
        ));
    }

    #[test]
    fn test_nested_fields_expand_with_prefix() {
        let records = vec![record_with_pain(json!({"level": "mild", "score": 3}))];
        let dataset = flatten_records(&records).unwrap();

        assert!(dataset.categorical("pain_discomfort_level").is_some());
        assert_eq!(
            dataset.numeric("pain_discomfort_score").unwrap(),
            &[Some(3.0)]
        );
        assert!(dataset.column("pain_discomfort").is_none());
    }

    #[test]
    fn test_sparse_union_of_keys() {
        let records = vec![
            record_with_pain(json!({"level": "mild"})),
            record_with_pain(json!({"frequency": "daily"})),
        ];
        let dataset = flatten_records(&records).unwrap();

        assert_eq!(
            dataset.categorical("pain_discomfort_level").unwrap(),
            &[Some("mild".to_string()), None]
        );
        assert_eq!(
            dataset.categorical("pain_discomfort_frequency").unwrap(),
            &[None, Some("daily".to_string())]
        );
    }

    #[test]
    fn test_blood_pressure_split_and_dropped() {
        let records = vec![
            record_with_pain(json!({})),
            HealthRecord {
                blood_pressure: Some("140/abc".to_string()),
                ..HealthRecord::default()
            },
        ];
        let dataset = flatten_records(&records).unwrap();

        assert_eq!(
            dataset.numeric("systolic_bp").unwrap(),
            &[Some(120.0), Some(140.0)]
        );
        assert_eq!(dataset.numeric("diastolic_bp").unwrap(), &[Some(80.0), None]);
        assert!(dataset.column("blood_pressure").is_none());
    }

    #[test]
    fn test_mixed_value_column_becomes_categorical() {
        let records = vec![
            record_with_pain(json!({"severity": 2})),
            record_with_pain(json!({"severity": "high"})),
        ];
        let dataset = flatten_records(&records).unwrap();

        assert_eq!(
            dataset.categorical("pain_discomfort_severity").unwrap(),
            &[Some("2".to_string()), Some("high".to_string())]
        );
    }
}
