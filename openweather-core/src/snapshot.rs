//! Persistence of the most recent full dataset, and the policy deciding when
//! a freshly fetched dataset should become the day's snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveTime};
use tracing::warn;

use crate::model::WeatherDataset;

/// Decides whether the dataset fetched right now should overwrite the stored
/// snapshot.
///
/// The hourly feed only reaches back to the current hour, so a copy taken in
/// the early morning is the last one that still covers the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    start: NaiveTime,
    end: NaiveTime,
}

impl RefreshPolicy {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// True while `now` lies inside the refresh window, `start` inclusive,
    /// `end` exclusive.
    pub fn should_refresh(&self, now: NaiveTime) -> bool {
        self.start <= now && now < self.end
    }
}

impl Default for RefreshPolicy {
    /// The 05:00–07:00 morning window.
    fn default() -> Self {
        Self {
            start: NaiveTime::MIN + Duration::hours(5),
            end: NaiveTime::MIN + Duration::hours(7),
        }
    }
}

/// Stores one dataset as JSON at a well-known path.
///
/// A single-slot cache: no versioning, no expiry, last writer wins. Reads
/// are idempotent and writes happen at most once per day, so no locking is
/// applied; callers invoking the facade from several threads serialize
/// access themselves.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `dataset`, creating parent directories as needed.
    pub fn save(&self, dataset: &WeatherDataset) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create snapshot directory: {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string(dataset).context("Failed to serialize snapshot")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write snapshot file: {}", self.path.display()))
    }

    /// Reads the stored dataset, if any.
    ///
    /// A missing, unreadable or corrupt file yields `None`; the cause is
    /// logged and never surfaced to the caller.
    pub fn load(&self) -> Option<WeatherDataset> {
        if !self.path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("Failed to read snapshot file {}: {err}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(dataset) => Some(dataset),
            Err(err) => {
                warn!(
                    "Failed to parse snapshot file {}: {err}",
                    self.path.display()
                );
                None
            }
        }
    }
}
