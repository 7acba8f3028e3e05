//! Shared context assembly for the narrative requests
//!
//! The data package is dumped into a textual context block shared by all
//! four section prompts: one uppercase header per non-empty package block,
//! each followed by its pretty-printed JSON.

use serde_json::Value;

use crate::models::DataPackage;

/// Serialize the package into the shared context block.
#[must_use]
pub fn build_context(package: &DataPackage) -> String {
    let mut context = String::from("Region Health Analysis Data Package:\n\n");

    let blocks: [(&str, Value); 5] = [
        ("features", json_block(&package.features)),
        ("statistics", json_block(&package.statistics)),
        ("correlations", json_block(&package.correlations)),
        ("risk_scores", json_block(&package.risk_scores)),
        ("data_quality", json_block(&package.data_quality)),
    ];

    for (key, value) in blocks {
        if is_empty_block(&value) {
            continue;
        }
        let dump = serde_json::to_string_pretty(&value).unwrap_or_default();
        context.push_str(&format!("{}:\n{}\n\n", key.to_uppercase(), dump));
    }

    context
}

/// Prompt for one section: the shared context plus its instruction
#[must_use]
pub fn build_prompt(context: &str, instruction: &str) -> String {
    format!("{context}\nANALYSIS TASK:\n{instruction}")
}

fn json_block<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn is_empty_block(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnStats, DataPackage};

    #[test]
    fn test_empty_blocks_are_skipped() {
        let mut package = DataPackage::default();
        package.features.push("bmi".to_string());

        let context = build_context(&package);
        assert!(context.starts_with("Region Health Analysis Data Package:\n\n"));
        assert!(context.contains("FEATURES:"));
        assert!(!context.contains("STATISTICS:"));
        assert!(!context.contains("CORRELATIONS:"));
        // data_quality always carries its outliers key
        assert!(context.contains("DATA_QUALITY:"));
    }

    #[test]
    fn test_statistics_block_rendered_when_present() {
        let mut package = DataPackage::default();
        package.statistics.insert(
            "bmi",
            ColumnStats {
                mean: 23.0,
                median: 23.0,
                std: 2.58,
                min: 20.0,
                max: 26.0,
            },
        );

        let context = build_context(&package);
        assert!(context.contains("STATISTICS:"));
        assert!(context.contains("\"bmi\""));
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt("CONTEXT\n", "Do the analysis");
        assert_eq!(prompt, "CONTEXT\n\nANALYSIS TASK:\nDo the analysis");
    }
}
