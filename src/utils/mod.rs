//! Shared utilities: numeric helpers and logging.

pub mod logging;
pub mod numeric;

pub use logging::{log_data_warning, log_stage_complete, log_stage_start};
pub use numeric::{mean, median, pearson, population_std, quantile, round2, sample_std};
