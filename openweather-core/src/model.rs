//! Domain model: the One Call dataset as the provider ships it, plus the
//! resolved output entities handed back to callers.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ClientError;
use crate::icon::WeatherIcon;

/// One full One Call response: current conditions plus the provider's
/// rolling window of hourly samples.
///
/// `hourly` keeps the order the provider returned and is never re-sorted.
/// The default value stands in for "no data" whenever a fetch fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherDataset {
    #[serde(default)]
    pub current: CurrentConditions,
    #[serde(default)]
    pub hourly: Vec<HourlyEntry>,
}

impl WeatherDataset {
    /// Stamps every hourly entry with a wall-clock time by applying `offset`
    /// uniformly to the raw UTC timestamps.
    ///
    /// The offset is the caller's current one, not each entry's own, so
    /// entries on the far side of a DST transition inside the forecast window
    /// come out an hour off. Known limitation, kept for compatibility with
    /// existing snapshots.
    pub fn stamp_local_times(&mut self, offset: FixedOffset) {
        for entry in &mut self.hourly {
            entry.local_time =
                DateTime::from_timestamp(entry.dt, 0).map(|utc| utc.with_timezone(&offset));
        }
    }
}

/// The `current` block of the One Call response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub dt: i64,
    #[serde(default)]
    pub temp: f64,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

/// One hour's sample from the provider's rolling forecast window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Seconds since the Unix epoch, UTC, as sent by the provider.
    pub dt: i64,
    pub temp: f64,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    /// Wall-clock time derived from `dt` by the enrichment step. Not part of
    /// the provider payload and recomputed after every snapshot load.
    #[serde(skip)]
    pub local_time: Option<DateTime<FixedOffset>>,
}

/// One condition record attached to a sample, e.g. code 800 "Clear".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Condition code in canonical text form. The provider sends a number;
    /// both number and string payloads are accepted.
    #[serde(default, deserialize_with = "code_from_number_or_string")]
    pub id: String,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

fn code_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(i64),
        Text(String),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Number(n) => n.to_string(),
        Code::Text(s) => s,
    })
}

/// One resolved forecast point.
///
/// Immutable once built. A point no dataset can answer for carries
/// temperature 0, [`WeatherIcon::Unknown`] and empty labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    /// Requested point in time as a naive local wall clock, offset stripped.
    pub hour: NaiveDateTime,
    /// Rounded to the nearest whole degree, ties away from zero.
    pub temperature: f64,
    pub icon: WeatherIcon,
    pub icon_symbol: String,
    pub condition_short: String,
    pub condition_description: String,
}

impl Forecast {
    /// Placeholder forecast for an hour without matching data.
    pub fn missing(hour: NaiveDateTime) -> Self {
        Self {
            hour,
            temperature: 0.0,
            icon: WeatherIcon::Unknown,
            icon_symbol: WeatherIcon::Unknown.symbol().to_string(),
            condition_short: String::new(),
            condition_description: String::new(),
        }
    }
}

/// Result envelope returned by the facade.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherInfo {
    pub current_temperature: f64,
    /// Display label of the configured unit system, e.g. "°C".
    pub unit: String,
    /// Exactly four entries: today at 07:00, 13:00, 19:00 and 23:00.
    pub daily_forecast: Vec<Forecast>,
    /// Live dataset behind the forecast, kept for by-hour re-querying.
    pub live: WeatherDataset,
    /// Morning snapshot, if one existed on disk.
    pub saved: Option<WeatherDataset>,
}

impl WeatherInfo {
    /// Re-resolves a single hour of today against the retained datasets.
    ///
    /// Fails only on an out-of-range `hour`; a missing entry still comes back
    /// as a placeholder forecast.
    pub fn forecast_for_hour(&self, hour: u32) -> Result<Forecast, ClientError> {
        crate::resolve::resolve_hour(
            &self.live,
            self.saved.as_ref(),
            hour,
            Local::now().naive_local(),
        )
    }
}
