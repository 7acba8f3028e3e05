//! Logging utilities
//!
//! This module provides standardized logging functions for pipeline stages.

/// Log a pipeline stage start with consistent format
pub fn log_stage_start(stage: &str, region_id: &str) {
    log::info!("Starting {stage} for region {region_id}");
}

/// Log a pipeline stage completion with consistent format
///
/// # Arguments
/// * `stage` - Name of the stage that completed
/// * `rows` - Number of rows the stage operated on
/// * `elapsed` - Optional elapsed time
pub fn log_stage_complete(stage: &str, rows: usize, elapsed: Option<std::time::Duration>) {
    if let Some(duration) = elapsed {
        log::info!("Completed {stage} over {rows} rows in {duration:?}");
    } else {
        log::info!("Completed {stage} over {rows} rows");
    }
}

/// Log a degraded-data condition with consistent format
pub fn log_data_warning(message: &str, column: Option<&str>) {
    if let Some(column) = column {
        log::warn!("{message}: column {column}");
    } else {
        log::warn!("{message}");
    }
}
