use thiserror::Error;

/// Configuration and input errors, reported before any network or disk
/// access happens.
///
/// Data-availability problems (unreachable provider, corrupt snapshot,
/// missing hourly entry) never show up here; those degrade to empty values
/// and are logged instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error(
        "No API key configured.\n\
         Hint: call `api_key` on the builder, or run `openweather configure` first."
    )]
    MissingApiKey,

    #[error(
        "No location configured.\n\
         Hint: call `location` on the builder with latitude and longitude."
    )]
    MissingLocation,

    #[error("Hour {hour} is out of range, must be between 0 and 23.")]
    HourOutOfRange { hour: u32 },
}
