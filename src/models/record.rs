//! Health record entity model
//!
//! This module contains the `HealthRecord` model, one row of per-patient
//! health indicators as served by the record store. Records are immutable
//! once fetched; the pipeline only ever derives new structures from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Nested JSON categories grouping qualitative health-domain answers.
///
/// Each category present on a record is expanded by the flattener into
/// `<category>_<key>` columns.
pub const NESTED_CATEGORIES: [&str; 9] = [
    "general_health",
    "pain_discomfort",
    "digestion_appetite",
    "chronic_conditions",
    "lifestyle_habits",
    "womens_health",
    "family_community_health",
    "mental_health",
    "heart_health",
];

/// Scalar vital columns carried directly on a record.
pub const VITAL_COLUMNS: [&str; 6] = [
    "heart_rate",
    "respiratory_rate",
    "body_temperature",
    "bmi",
    "blood_glucose",
    "oxygen_saturation",
];

/// One raw per-patient row of health indicators for a region
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Heart rate in beats per minute
    pub heart_rate: Option<f64>,
    /// Blood pressure as a composite "systolic/diastolic" string
    pub blood_pressure: Option<String>,
    /// Respiratory rate in breaths per minute
    pub respiratory_rate: Option<f64>,
    /// Body temperature in degrees Celsius
    pub body_temperature: Option<f64>,
    /// Body mass index
    pub bmi: Option<f64>,
    /// Blood glucose in mg/dL
    pub blood_glucose: Option<f64>,
    /// Oxygen saturation percentage
    pub oxygen_saturation: Option<f64>,
    /// Self-reported gender
    pub gender: Option<String>,
    /// General health questionnaire answers
    pub general_health: Option<Map<String, Value>>,
    /// Pain and discomfort questionnaire answers
    pub pain_discomfort: Option<Map<String, Value>>,
    /// Digestion and appetite questionnaire answers
    pub digestion_appetite: Option<Map<String, Value>>,
    /// Chronic condition questionnaire answers
    pub chronic_conditions: Option<Map<String, Value>>,
    /// Lifestyle habit questionnaire answers
    pub lifestyle_habits: Option<Map<String, Value>>,
    /// Women's health questionnaire answers
    pub womens_health: Option<Map<String, Value>>,
    /// Family and community health questionnaire answers
    pub family_community_health: Option<Map<String, Value>>,
    /// Mental health questionnaire answers
    pub mental_health: Option<Map<String, Value>>,
    /// Heart health questionnaire answers
    pub heart_health: Option<Map<String, Value>>,
}

impl HealthRecord {
    /// Scalar vitals in the fixed column order used by the flattener
    #[must_use]
    pub fn vitals(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("heart_rate", self.heart_rate),
            ("respiratory_rate", self.respiratory_rate),
            ("body_temperature", self.body_temperature),
            ("bmi", self.bmi),
            ("blood_glucose", self.blood_glucose),
            ("oxygen_saturation", self.oxygen_saturation),
        ]
    }

    /// Nested categories in the fixed order used by the flattener
    #[must_use]
    pub fn nested_categories(&self) -> [(&'static str, Option<&Map<String, Value>>); 9] {
        [
            ("general_health", self.general_health.as_ref()),
            ("pain_discomfort", self.pain_discomfort.as_ref()),
            ("digestion_appetite", self.digestion_appetite.as_ref()),
            ("chronic_conditions", self.chronic_conditions.as_ref()),
            ("lifestyle_habits", self.lifestyle_habits.as_ref()),
            ("womens_health", self.womens_health.as_ref()),
            (
                "family_community_health",
                self.family_community_health.as_ref(),
            ),
            ("mental_health", self.mental_health.as_ref()),
            ("heart_health", self.heart_health.as_ref()),
        ]
    }

    /// Split the composite blood-pressure string into systolic and diastolic
    /// readings, coercing non-numeric parts to `None`
    #[must_use]
    pub fn split_blood_pressure(&self) -> (Option<f64>, Option<f64>) {
        let Some(raw) = self.blood_pressure.as_deref() else {
            return (None, None);
        };
        let mut parts = raw.splitn(2, '/');
        let systolic = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
        let diastolic = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
        (systolic, diastolic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_blood_pressure() {
        let record = HealthRecord {
            blood_pressure: Some("120/80".to_string()),
            ..HealthRecord::default()
        };
        assert_eq!(record.split_blood_pressure(), (Some(120.0), Some(80.0)));
    }

    #[test]
    fn test_split_blood_pressure_non_numeric() {
        let record = HealthRecord {
            blood_pressure: Some("high/80".to_string()),
            ..HealthRecord::default()
        };
        assert_eq!(record.split_blood_pressure(), (None, Some(80.0)));
    }

    #[test]
    fn test_split_blood_pressure_missing() {
        let record = HealthRecord::default();
        assert_eq!(record.split_blood_pressure(), (None, None));
    }

    #[test]
    fn test_accessor_order_matches_column_constants() {
        let record = HealthRecord::default();
        let vitals: Vec<&str> = record.vitals().iter().map(|(n, _)| *n).collect();
        assert_eq!(vitals, VITAL_COLUMNS);

        let nested: Vec<&str> = record.nested_categories().iter().map(|(n, _)| *n).collect();
        assert_eq!(nested, NESTED_CATEGORIES);
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let record: HealthRecord =
            serde_json::from_str(r#"{"heart_rate": 72.0, "gender": "female"}"#).unwrap();
        assert_eq!(record.heart_rate, Some(72.0));
        assert!(record.bmi.is_none());
        assert!(record.mental_health.is_none());
    }
}
