use anyhow::Context;
use clap::{Parser, Subcommand};

use openweather_core::{Settings, Units, WeatherClient};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "openweather", version, about = "OpenWeatherMap One Call client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and a default location interactively.
    Configure,

    /// Show the current temperature and today's forecast.
    Show {
        /// Latitude in decimal degrees; overrides the stored default.
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees; overrides the stored default.
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Language code for condition descriptions, e.g. "de" or "en".
        #[arg(long)]
        lang: Option<String>,

        /// Unit system: metric, imperial or standard.
        #[arg(long)]
        units: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                lat,
                lon,
                lang,
                units,
            } => show(lat, lon, lang, units).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut settings = Settings::load()?;

    let api_key = inquire::Text::new("OpenWeatherMap API key:")
        .with_help_message("You get one for free at https://openweathermap.org/api")
        .prompt()?;
    settings.api_key = Some(api_key.trim().to_string());

    let latitude = inquire::Text::new("Default latitude:").prompt()?;
    let longitude = inquire::Text::new("Default longitude:").prompt()?;
    settings.latitude = Some(
        latitude
            .trim()
            .parse()
            .context("Latitude must be a decimal number, e.g. 53.8667")?,
    );
    settings.longitude = Some(
        longitude
            .trim()
            .parse()
            .context("Longitude must be a decimal number, e.g. 9.8833")?,
    );

    settings.save()?;
    println!(
        "Settings written to {}",
        Settings::settings_file_path()?.display()
    );

    Ok(())
}

async fn show(
    lat: Option<f64>,
    lon: Option<f64>,
    lang: Option<String>,
    units: Option<String>,
) -> anyhow::Result<()> {
    let settings = Settings::load()?;

    let mut builder = settings.to_builder();
    if let (Some(lat), Some(lon)) = (lat, lon) {
        builder = builder.location(lat, lon);
    }
    if let Some(lang) = lang {
        builder = builder.language(lang);
    }
    if let Some(units) = units {
        builder = builder.units(Units::try_from(units.as_str())?);
    }

    let config = builder
        .build()
        .context("Incomplete configuration. Run `openweather configure` or pass --lat/--lon.")?;

    let client = WeatherClient::new(config);
    let info = client.read_current_and_forecast().await;

    println!(
        "Current temperature: {} {}",
        info.current_temperature, info.unit
    );
    for forecast in &info.daily_forecast {
        println!(
            "{}  {:>4} {}  {}  {}",
            forecast.hour.format("%H:%M"),
            forecast.temperature,
            info.unit,
            forecast.icon_symbol,
            forecast.condition_description,
        );
    }

    Ok(())
}
