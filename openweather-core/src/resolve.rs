//! Forecast resolution: picking the hourly entry that answers "what is the
//! weather at hour H today", with fallback to the morning snapshot.
//!
//! The provider's hourly feed is a rolling window starting at the current
//! hour, so by late morning the 07:00 sample has scrolled out of the live
//! dataset. Resolution therefore consults the live dataset first and the
//! saved snapshot second, and only then gives up with a placeholder.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::error::ClientError;
use crate::icon::map_condition_to_icon;
use crate::model::{Forecast, HourlyEntry, WeatherDataset, WeatherInfo};

/// Hours of the day covered by the daily forecast, in output order.
pub const DAILY_FORECAST_HOURS: [u32; 4] = [7, 13, 19, 23];

/// Finds the first hourly entry on the same calendar day as `target` whose
/// time of day lies in `[target, target + 1h − 1s)`.
///
/// The window stops one second short of the next hour mark so that an entry
/// sitting exactly on a boundary can only belong to one bucket when lookups
/// happen at exact hour marks. The first entry in provider order wins; later
/// entries in the same window are never returned. Entries that were never
/// stamped with a local time cannot match.
pub fn find_entry_for_hour(
    dataset: &WeatherDataset,
    target: NaiveDateTime,
) -> Option<&HourlyEntry> {
    let window_start = target.time();
    let window_end = (target + Duration::seconds(3599)).time();

    dataset.hourly.iter().find(|entry| {
        entry.local_time.is_some_and(|t| {
            t.date_naive() == target.date() && t.time() >= window_start && t.time() < window_end
        })
    })
}

/// Rounds to the nearest whole degree; halves round away from zero, so 5.5
/// becomes 6 and -5.5 becomes -6.
pub fn round_temperature(value: f64) -> f64 {
    value.round()
}

/// Resolves one target hour: live dataset first, saved snapshot second,
/// placeholder last. Total — every target produces a `Forecast`.
pub fn resolve(
    live: &WeatherDataset,
    saved: Option<&WeatherDataset>,
    target: NaiveDateTime,
) -> Forecast {
    let mut entry = find_entry_for_hour(live, target);

    if entry.is_none() {
        if let Some(saved) = saved {
            entry = find_entry_for_hour(saved, target);
            match entry {
                Some(_) => debug!("{target}: taking saved snapshot data"),
                None => debug!("{target}: snapshot has no matching entry either"),
            }
        }
    }

    let Some(entry) = entry else {
        debug!("{target}: no data");
        return Forecast::missing(target);
    };

    let mut forecast = Forecast::missing(target);
    forecast.temperature = round_temperature(entry.temp);

    match entry.weather.first() {
        Some(condition) => {
            let (icon, symbol) = map_condition_to_icon(&condition.id);
            forecast.icon = icon;
            forecast.icon_symbol = symbol.to_string();
            forecast.condition_short = condition.main.clone();
            forecast.condition_description = condition.description.clone();
        }
        None => debug!("{target}: entry carries no condition record"),
    }

    debug!(
        "{target}: temp {} icon {:?} ({})",
        forecast.temperature, forecast.icon, forecast.condition_description
    );
    forecast
}

/// Resolves the four representative forecast points for the day of `now`, in
/// fixed order regardless of the current time, and packs them together with
/// the current temperature.
pub fn resolve_daily_forecast(
    live: WeatherDataset,
    saved: Option<WeatherDataset>,
    now: NaiveDateTime,
    unit: impl Into<String>,
) -> WeatherInfo {
    let midnight = now.date().and_time(NaiveTime::MIN);

    let daily_forecast = DAILY_FORECAST_HOURS
        .iter()
        .map(|&hour| {
            let target = midnight + Duration::hours(i64::from(hour));
            resolve(&live, saved.as_ref(), target)
        })
        .collect();

    WeatherInfo {
        current_temperature: round_temperature(live.current.temp),
        unit: unit.into(),
        daily_forecast,
        live,
        saved,
    }
}

/// Resolves a single hour of the day of `now`.
///
/// An `hour` outside 0..=23 is an input error and reported as such rather
/// than degraded to a placeholder.
pub fn resolve_hour(
    live: &WeatherDataset,
    saved: Option<&WeatherDataset>,
    hour: u32,
    now: NaiveDateTime,
) -> Result<Forecast, ClientError> {
    if hour > 23 {
        return Err(ClientError::HourOutOfRange { hour });
    }

    let target = now.date().and_time(NaiveTime::MIN) + Duration::hours(i64::from(hour));
    Ok(resolve(live, saved, target))
}
