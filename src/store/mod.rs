//! Record store interface
//!
//! The pipeline fetches a region's health records through the `RecordStore`
//! trait; the concrete store is injected by the caller. `HttpRecordStore`
//! talks to a REST store serving JSON arrays of records. An empty array is a
//! valid outcome, not an error.

use std::future::Future;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::models::HealthRecord;

/// Source of raw health records for a region
pub trait RecordStore {
    /// Fetch all stored records for one region, in stored order
    fn fetch_health_records(
        &self,
        region_id: &str,
    ) -> impl Future<Output = Result<Vec<HealthRecord>>> + Send;
}

/// HTTP-backed record store
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl HttpRecordStore {
    /// Build a store client from its configuration
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }
}

impl RecordStore for HttpRecordStore {
    fn fetch_health_records(
        &self,
        region_id: &str,
    ) -> impl Future<Output = Result<Vec<HealthRecord>>> + Send {
        let url = format!(
            "{}/regions/{}/health-records",
            self.config.base_url, region_id
        );
        let mut request = self.client.get(url);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }
        let region_id = region_id.to_string();

        async move {
            let records: Vec<HealthRecord> = request
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            if records.is_empty() {
                log::warn!("No records found for region {region_id}");
            } else {
                log::info!(
                    "Fetched {} records for region {region_id}",
                    records.len()
                );
            }
            Ok(records)
        }
    }
}
