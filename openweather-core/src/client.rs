//! Public facade: one call fetches the live feed, maintains the morning
//! snapshot and resolves the daily forecast.

use chrono::{DateTime, FixedOffset, Local};
use tracing::warn;

use crate::config::ClientConfig;
use crate::fetch::{OneCallApi, WeatherFetcher};
use crate::model::{WeatherDataset, WeatherInfo};
use crate::resolve::resolve_daily_forecast;
use crate::snapshot::{RefreshPolicy, SnapshotStore};

/// High-level client for the One Call API.
///
/// Every step runs strictly in sequence: fetch, stamp, conditional snapshot
/// write, snapshot read, in-memory resolution. The snapshot file carries no
/// locking; callers invoking the facade from several threads serialize
/// access themselves.
#[derive(Debug)]
pub struct WeatherClient {
    config: ClientConfig,
    fetcher: Box<dyn WeatherFetcher>,
    store: SnapshotStore,
    refresh: RefreshPolicy,
}

impl WeatherClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_fetcher(config, Box::new(OneCallApi::new()))
    }

    /// Same as [`WeatherClient::new`] with a custom fetch collaborator.
    pub fn with_fetcher(config: ClientConfig, fetcher: Box<dyn WeatherFetcher>) -> Self {
        let store = SnapshotStore::new(config.snapshot_path.clone());
        Self {
            config,
            fetcher,
            store,
            refresh: RefreshPolicy::default(),
        }
    }

    /// Replaces the default 05:00–07:00 snapshot window.
    pub fn with_refresh_policy(mut self, refresh: RefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Reads the current temperature and today's four-point forecast.
    ///
    /// Provider or disk trouble never fails this call: a broken fetch
    /// degrades to an empty dataset and placeholder forecasts, logged on the
    /// way down.
    pub async fn read_current_and_forecast(&self) -> WeatherInfo {
        self.read_current_and_forecast_at(Local::now().fixed_offset())
            .await
    }

    /// Clock-injected variant of [`WeatherClient::read_current_and_forecast`].
    pub async fn read_current_and_forecast_at(&self, now: DateTime<FixedOffset>) -> WeatherInfo {
        let mut live = match self.fetcher.fetch(&self.config).await {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!("Request wasn't successful: {err:#}");
                WeatherDataset::default()
            }
        };

        let offset = *now.offset();
        live.stamp_local_times(offset);

        // The whole day is only visible in the early-morning feed; keep a
        // copy so afternoon lookups can still answer for 07:00.
        if self.refresh.should_refresh(now.time()) {
            if let Err(err) = self.store.save(&live) {
                warn!("Failed to save snapshot: {err:#}");
            }
        }

        let saved = self.store.load().map(|mut dataset| {
            dataset.stamp_local_times(offset);
            dataset
        });

        resolve_daily_forecast(live, saved, now.naive_local(), self.config.units.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::WeatherIcon;
    use crate::model::{HourlyEntry, WeatherCondition};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::path::Path;
    use tempfile::TempDir;

    // 2024-01-01T00:00:00Z
    const MIDNIGHT: i64 = 1_704_067_200;

    #[derive(Debug)]
    struct FixedFetcher {
        dataset: WeatherDataset,
    }

    #[async_trait]
    impl WeatherFetcher for FixedFetcher {
        async fn fetch(&self, _config: &ClientConfig) -> anyhow::Result<WeatherDataset> {
            Ok(self.dataset.clone())
        }
    }

    #[derive(Debug)]
    struct FailingFetcher;

    #[async_trait]
    impl WeatherFetcher for FailingFetcher {
        async fn fetch(&self, _config: &ClientConfig) -> anyhow::Result<WeatherDataset> {
            Err(anyhow!("connection refused"))
        }
    }

    fn config(snapshot_path: &Path) -> ClientConfig {
        ClientConfig::builder()
            .api_key("TEST_KEY")
            .location(53.8667, 9.8833)
            .snapshot_path(snapshot_path)
            .build()
            .expect("test config must build")
    }

    /// Dataset with one entry per hour of 2024-01-01 (UTC) from `from_hour`
    /// to 23, temperature = hour of day.
    fn day_dataset(from_hour: i64) -> WeatherDataset {
        let hourly = (from_hour..24)
            .map(|hour| HourlyEntry {
                dt: MIDNIGHT + hour * 3600,
                temp: hour as f64,
                weather: vec![WeatherCondition {
                    id: "800".to_string(),
                    main: "Clear".to_string(),
                    description: "clear sky".to_string(),
                }],
                local_time: None,
            })
            .collect();

        let mut dataset = WeatherDataset {
            hourly,
            ..WeatherDataset::default()
        };
        dataset.current.temp = 4.6;
        dataset
    }

    fn utc_clock(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("valid offset")
            .with_ymd_and_hms(2024, 1, 1, hour, minute, 0)
            .single()
            .expect("valid clock")
    }

    #[tokio::test]
    async fn degrades_to_placeholders_when_the_fetch_fails() {
        let dir = TempDir::new().expect("temp dir");
        let client = WeatherClient::with_fetcher(
            config(&dir.path().join("snap.json")),
            Box::new(FailingFetcher),
        );

        let info = client.read_current_and_forecast_at(utc_clock(12, 0)).await;

        assert_eq!(info.current_temperature, 0.0);
        assert_eq!(info.daily_forecast.len(), 4);
        for forecast in &info.daily_forecast {
            assert_eq!(forecast.temperature, 0.0);
            assert_eq!(forecast.icon, WeatherIcon::Unknown);
        }
        assert!(info.saved.is_none());
    }

    #[tokio::test]
    async fn saves_a_snapshot_only_inside_the_morning_window() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("snap.json");
        let client = WeatherClient::with_fetcher(
            config(&path),
            Box::new(FixedFetcher {
                dataset: day_dataset(6),
            }),
        );

        client.read_current_and_forecast_at(utc_clock(12, 0)).await;
        assert!(!path.exists());

        client.read_current_and_forecast_at(utc_clock(6, 0)).await;
        assert!(path.exists());
    }

    #[tokio::test]
    async fn afternoon_lookup_recovers_the_morning_from_the_snapshot() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("snap.json");

        // 06:00: the live feed still contains 07:00, and the snapshot is taken.
        let morning_client = WeatherClient::with_fetcher(
            config(&path),
            Box::new(FixedFetcher {
                dataset: day_dataset(6),
            }),
        );
        let morning = morning_client
            .read_current_and_forecast_at(utc_clock(6, 0))
            .await;
        assert_eq!(morning.daily_forecast[0].temperature, 7.0);

        // 15:00: the live window now starts at 15; 07:00 must come from disk.
        let afternoon_client = WeatherClient::with_fetcher(
            config(&path),
            Box::new(FixedFetcher {
                dataset: day_dataset(15),
            }),
        );
        let afternoon = afternoon_client
            .read_current_and_forecast_at(utc_clock(15, 0))
            .await;

        assert!(afternoon.saved.is_some());
        assert_eq!(afternoon.daily_forecast[0].temperature, 7.0);
        assert_eq!(afternoon.daily_forecast[1].temperature, 13.0);
        assert_eq!(afternoon.daily_forecast[3].temperature, 23.0);
    }

    #[tokio::test]
    async fn current_temperature_comes_from_the_live_dataset() {
        let dir = TempDir::new().expect("temp dir");
        let client = WeatherClient::with_fetcher(
            config(&dir.path().join("snap.json")),
            Box::new(FixedFetcher {
                dataset: day_dataset(12),
            }),
        );

        let info = client.read_current_and_forecast_at(utc_clock(12, 0)).await;

        assert_eq!(info.current_temperature, 5.0);
        assert_eq!(info.unit, "°C");
    }

    #[tokio::test]
    async fn custom_refresh_policy_moves_the_snapshot_window() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("snap.json");
        let t = |h| chrono::NaiveTime::from_hms_opt(h, 0, 0).expect("valid time");

        let client = WeatherClient::with_fetcher(
            config(&path),
            Box::new(FixedFetcher {
                dataset: day_dataset(12),
            }),
        )
        .with_refresh_policy(RefreshPolicy::new(t(12), t(13)));

        client.read_current_and_forecast_at(utc_clock(12, 30)).await;
        assert!(path.exists());
    }
}
