//! HTTP acquisition of the One Call feed.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::config::ClientConfig;
use crate::model::WeatherDataset;

/// Capability to produce a raw dataset for the configured location.
///
/// The production implementation talks to the One Call endpoint; tests swap
/// in canned datasets or failing stubs. Errors from this trait never reach
/// facade callers — the client degrades them to an empty dataset.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, config: &ClientConfig) -> Result<WeatherDataset>;
}

/// One Call API v3 over HTTPS.
#[derive(Debug, Clone, Default)]
pub struct OneCallApi {
    http: Client,
}

impl OneCallApi {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherFetcher for OneCallApi {
    async fn fetch(&self, config: &ClientConfig) -> Result<WeatherDataset> {
        let res = self
            .http
            .get(&config.api_url)
            .query(&[
                ("lat", config.latitude.to_string()),
                ("lon", config.longitude.to_string()),
                ("lang", config.language.clone()),
                ("units", config.units.as_str().to_string()),
                ("appid", config.api_key.clone()),
            ])
            .send()
            .await
            .context("Failed to send request to the One Call endpoint")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read One Call response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "One Call request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        if body.trim().is_empty() {
            return Err(anyhow!("One Call response body was empty"));
        }

        let dataset: WeatherDataset =
            serde_json::from_str(&body).context("Failed to parse One Call JSON")?;

        Ok(dataset)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
