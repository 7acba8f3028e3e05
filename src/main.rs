use std::env;
use std::time::Instant;

use anyhow::Context;
use log::{info, warn};
use rand::Rng;
use serde_json::{json, Map, Value};

use region_health_analytics::{
    package_batch, AnalysisConfig, AnalysisPipeline, GeneratorConfig, HealthRecord,
    HttpRecordStore, HttpTextGenerator, StoreConfig, TokioSleeper,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arg = env::args().nth(1).unwrap_or_else(|| "--sample".to_string());

    if arg == "--sample" {
        return run_sample_batch();
    }

    let region_id = arg;
    info!("Analyzing health records for region {region_id}");

    let store_config = StoreConfig {
        base_url: env::var("STORE_BASE_URL")
            .context("STORE_BASE_URL must point at the record store")?,
        api_key: env::var("STORE_API_KEY").ok(),
        ..StoreConfig::default()
    };
    let generator_config = GeneratorConfig {
        endpoint: env::var("GENAI_ENDPOINT").unwrap_or_else(|_| GeneratorConfig::default().endpoint),
        api_key: env::var("GENAI_API_KEY").ok(),
        ..GeneratorConfig::default()
    };

    let pipeline = AnalysisPipeline::new(
        HttpRecordStore::new(store_config)?,
        HttpTextGenerator::new(generator_config)?,
        TokioSleeper,
        AnalysisConfig::default(),
    );

    let start = Instant::now();
    let outcome = pipeline.analyze_region(&region_id).await?;
    info!("Analysis finished in {:?}", start.elapsed());

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Run only the data-side stages over a generated batch, without external
/// services, and print the statistical package.
fn run_sample_batch() -> anyhow::Result<()> {
    info!("No region id given; analyzing a generated sample batch");

    let records = sample_records(25);
    let start = Instant::now();
    match package_batch(&records) {
        Ok(package) => {
            info!(
                "Packaged {} records in {:?}",
                records.len(),
                start.elapsed()
            );
            println!("{}", serde_json::to_string_pretty(&package)?);
        }
        Err(error) => warn!("Sample batch could not be packaged: {error}"),
    }
    Ok(())
}

/// Generate a plausible batch of records with occasional gaps
fn sample_records(count: usize) -> Vec<HealthRecord> {
    let mut rng = rand::rng();
    let mut records = Vec::with_capacity(count);

    for _ in 0..count {
        let systolic: i32 = rng.random_range(100..165);
        let diastolic: i32 = rng.random_range(60..100);

        let heart_rate = rng.random_range(55.0..100.0);
        let respiratory_rate = rng.random_range(12.0..22.0);
        let bmi = rng.random_range(17.0..36.0);

        records.push(HealthRecord {
            heart_rate: maybe(&mut rng, heart_rate),
            blood_pressure: Some(format!("{systolic}/{diastolic}")),
            respiratory_rate: maybe(&mut rng, respiratory_rate),
            body_temperature: Some(rng.random_range(36.1..37.6)),
            bmi: maybe(&mut rng, bmi),
            blood_glucose: Some(rng.random_range(70.0..160.0)),
            oxygen_saturation: Some(rng.random_range(92.0..100.0)),
            gender: Some(
                if rng.random_bool(0.5) { "female" } else { "male" }.to_string(),
            ),
            general_health: Some(nested(json!({
                "energy_level": rng.random_range(1..=5),
                "sleep_quality": if rng.random_bool(0.6) { "good" } else { "poor" },
            }))),
            mental_health: Some(nested(json!({
                "stress_level": rng.random_range(1..=10),
            }))),
            ..HealthRecord::default()
        });
    }

    records
}

fn maybe(rng: &mut impl Rng, value: f64) -> Option<f64> {
    if rng.random_bool(0.1) { None } else { Some(value) }
}

fn nested(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
