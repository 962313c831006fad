//! Core library for the `openweather` CLI and anything else that wants a
//! daily forecast from the OpenWeatherMap One Call API.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Fetching and deserializing the One Call feed
//! - The morning-snapshot store and refresh policy
//! - Forecast resolution: live dataset first, snapshot second, placeholder last
//!
//! It is used by `openweather-cli`, but can also be reused by other binaries
//! or services.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod icon;
pub mod model;
pub mod resolve;
pub mod snapshot;

pub use client::WeatherClient;
pub use config::{ClientConfig, ClientConfigBuilder, Settings, Units};
pub use error::ClientError;
pub use fetch::{OneCallApi, WeatherFetcher};
pub use icon::{WeatherIcon, map_condition_to_icon};
pub use model::{
    CurrentConditions, Forecast, HourlyEntry, WeatherCondition, WeatherDataset, WeatherInfo,
};
pub use resolve::{
    DAILY_FORECAST_HOURS, find_entry_for_hour, resolve, resolve_daily_forecast, resolve_hour,
};
pub use snapshot::{RefreshPolicy, SnapshotStore};
