use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::ClientError;

/// Default One Call endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// File name of the stored morning snapshot.
pub const SNAPSHOT_FILE_NAME: &str = "saved_weather_forecast.json";

/// Unit system requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    /// Display label attached to resolved temperatures.
    pub fn label(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial, standard."
            )),
        }
    }
}

/// Validated, immutable configuration consumed by the client.
///
/// Built once via [`ClientConfig::builder`]; missing required settings are
/// reported before any network or disk access happens.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_key: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Language code passed to the provider, e.g. "de" or "en".
    pub language: String,
    pub units: Units,
    /// Where the morning snapshot lives on disk.
    pub snapshot_path: PathBuf,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`]. API key and location are required; the rest
/// has working defaults.
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    api_url: String,
    api_key: Option<String>,
    location: Option<(f64, f64)>,
    language: String,
    units: Units,
    snapshot_path: Option<PathBuf>,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            location: None,
            language: "de".to_string(),
            units: Units::Metric,
            snapshot_path: None,
        }
    }
}

impl ClientConfigBuilder {
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some((latitude, longitude));
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Validates and freezes the configuration.
    pub fn build(self) -> Result<ClientConfig, ClientError> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ClientError::MissingApiKey)?;
        let (latitude, longitude) = self.location.ok_or(ClientError::MissingLocation)?;
        let snapshot_path = self.snapshot_path.unwrap_or_else(default_snapshot_path);

        Ok(ClientConfig {
            api_url: self.api_url,
            api_key,
            latitude,
            longitude,
            language: self.language,
            units: self.units,
            snapshot_path,
        })
    }
}

/// Platform cache location for the snapshot file, falling back to the
/// working directory when no home directory can be determined.
pub fn default_snapshot_path() -> PathBuf {
    ProjectDirs::from("dev", "openweather", "openweather-cli")
        .map(|dirs| dirs.cache_dir().join(SNAPSHOT_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(SNAPSHOT_FILE_NAME))
}

/// Credentials and location defaults stored on disk for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub language: Option<String>,
    pub units: Option<Units>,
}

impl Settings {
    /// Load settings from disk, or return an empty default if the file
    /// doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::settings_file_path()?;
        if !path.exists() {
            // First run: no settings file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the settings file.
    pub fn settings_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "openweather", "openweather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("settings.toml"))
    }

    /// Seeds a config builder with whatever the stored settings provide.
    /// Flags or further builder calls can still override every field.
    pub fn to_builder(&self) -> ClientConfigBuilder {
        let mut builder = ClientConfig::builder();

        if let Some(key) = &self.api_key {
            builder = builder.api_key(key);
        }
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            builder = builder.location(lat, lon);
        }
        if let Some(language) = &self.language {
            builder = builder.language(language);
        }
        if let Some(units) = self.units {
            builder = builder.units(units);
        }

        builder
    }
}
