//! Classification of OpenWeatherMap condition codes into a small icon
//! taxonomy, plus a printable glyph for each icon.

use serde::{Deserialize, Serialize};

/// Coarse weather icon derived from the provider's condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeatherIcon {
    #[default]
    Unknown,
    Sun,
    SmallCloud,
    MediumCloud,
    SunCloudRain,
    Cloud,
    CloudWithRain,
    CloudWithSnow,
    CloudWithLightning,
    ThunderCloudAndRain,
    Moon,
    Snow,
    Fog,
}

impl WeatherIcon {
    /// Classifies a condition code such as `"800"` or `"502"`.
    ///
    /// The prefix rules are checked in this exact order, first match wins:
    /// `"51x"` and `"52x"` resolve before the general `"5x"` rule, and the
    /// exact `"800"` before the general `"8x"` rule. Anything unrecognized,
    /// including the empty string, is [`WeatherIcon::Unknown`].
    pub fn from_condition_code(code: &str) -> Self {
        if code.starts_with('2') {
            return WeatherIcon::ThunderCloudAndRain;
        }
        if code.starts_with('3') {
            return WeatherIcon::SunCloudRain;
        }
        if code.starts_with("50") {
            return WeatherIcon::SunCloudRain;
        }
        if code.starts_with("51") {
            return WeatherIcon::CloudWithSnow;
        }
        if code.starts_with("52") {
            return WeatherIcon::CloudWithRain;
        }
        if code.starts_with('5') {
            return WeatherIcon::CloudWithRain;
        }
        if code.starts_with('6') {
            return WeatherIcon::Snow;
        }
        if code.starts_with('7') {
            return WeatherIcon::Fog;
        }
        if code == "800" {
            return WeatherIcon::Sun;
        }
        if code.starts_with('8') {
            return WeatherIcon::Cloud;
        }

        WeatherIcon::Unknown
    }

    /// Fixed unicode glyph for this icon.
    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherIcon::Cloud => "\u{2601}",
            WeatherIcon::CloudWithLightning => "\u{26C8}",
            WeatherIcon::CloudWithRain => "\u{2614}",
            WeatherIcon::CloudWithSnow => "\u{2603}",
            WeatherIcon::MediumCloud => "\u{26C5}",
            WeatherIcon::SmallCloud => "\u{26C5}",
            WeatherIcon::Sun => "\u{2600}",
            WeatherIcon::SunCloudRain => "\u{26C5}",
            WeatherIcon::ThunderCloudAndRain => "\u{26C8}",
            WeatherIcon::Moon => "\u{263D}",
            WeatherIcon::Snow => "\u{2603}",
            WeatherIcon::Fog => "\u{2601}",
            WeatherIcon::Unknown => "\u{26C4}",
        }
    }
}

/// Maps a condition code to its icon and glyph in one step.
pub fn map_condition_to_icon(code: &str) -> (WeatherIcon, &'static str) {
    let icon = WeatherIcon::from_condition_code(code);
    (icon, icon.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thunderstorm_and_drizzle_families() {
        assert_eq!(
            WeatherIcon::from_condition_code("210"),
            WeatherIcon::ThunderCloudAndRain
        );
        assert_eq!(
            WeatherIcon::from_condition_code("300"),
            WeatherIcon::SunCloudRain
        );
    }

    #[test]
    fn rain_family_orders_specific_prefixes_first() {
        assert_eq!(
            WeatherIcon::from_condition_code("500"),
            WeatherIcon::SunCloudRain
        );
        assert_eq!(
            WeatherIcon::from_condition_code("511"),
            WeatherIcon::CloudWithSnow
        );
        assert_eq!(
            WeatherIcon::from_condition_code("520"),
            WeatherIcon::CloudWithRain
        );
        // 53x has no specific rule and lands on the general "5" case.
        assert_eq!(
            WeatherIcon::from_condition_code("531"),
            WeatherIcon::CloudWithRain
        );
    }

    #[test]
    fn snow_and_atmosphere_families() {
        assert_eq!(WeatherIcon::from_condition_code("600"), WeatherIcon::Snow);
        assert_eq!(WeatherIcon::from_condition_code("741"), WeatherIcon::Fog);
    }

    #[test]
    fn clear_sky_is_exactly_800() {
        assert_eq!(WeatherIcon::from_condition_code("800"), WeatherIcon::Sun);
        assert_eq!(WeatherIcon::from_condition_code("801"), WeatherIcon::Cloud);
        assert_eq!(WeatherIcon::from_condition_code("804"), WeatherIcon::Cloud);
    }

    #[test]
    fn unrecognized_codes_map_to_unknown() {
        assert_eq!(WeatherIcon::from_condition_code(""), WeatherIcon::Unknown);
        assert_eq!(WeatherIcon::from_condition_code("9"), WeatherIcon::Unknown);
        assert_eq!(
            WeatherIcon::from_condition_code("clear"),
            WeatherIcon::Unknown
        );
    }

    #[test]
    fn every_icon_has_a_glyph() {
        let icons = [
            WeatherIcon::Unknown,
            WeatherIcon::Sun,
            WeatherIcon::SmallCloud,
            WeatherIcon::MediumCloud,
            WeatherIcon::SunCloudRain,
            WeatherIcon::Cloud,
            WeatherIcon::CloudWithRain,
            WeatherIcon::CloudWithSnow,
            WeatherIcon::CloudWithLightning,
            WeatherIcon::ThunderCloudAndRain,
            WeatherIcon::Moon,
            WeatherIcon::Snow,
            WeatherIcon::Fog,
        ];
        for icon in icons {
            assert!(!icon.symbol().is_empty());
        }
    }

    #[test]
    fn combined_mapping_returns_icon_and_glyph() {
        let (icon, symbol) = map_condition_to_icon("800");
        assert_eq!(icon, WeatherIcon::Sun);
        assert_eq!(symbol, "\u{2600}");

        let (icon, symbol) = map_condition_to_icon("");
        assert_eq!(icon, WeatherIcon::Unknown);
        assert_eq!(symbol, "\u{26C4}");
    }
}
