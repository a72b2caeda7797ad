//! Mapping from a provider condition category to how it is shown.

use serde::{Deserialize, Serialize};

/// Background theme chosen from the condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationBucket {
    Sunny,
    #[default]
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
}

impl PresentationBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationBucket::Sunny => "sunny",
            PresentationBucket::Cloudy => "cloudy",
            PresentationBucket::Rainy => "rainy",
            PresentationBucket::Snowy => "snowy",
            PresentationBucket::Stormy => "stormy",
        }
    }

    /// Background gradient identifier, e.g. `bg-gradient-rainy`.
    pub fn background_class(&self) -> String {
        format!("bg-gradient-{}", self.as_str())
    }
}

impl std::fmt::Display for PresentationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a condition category. Unknown categories fall back to cloudy.
pub fn classify(category: &str) -> PresentationBucket {
    match category.to_lowercase().as_str() {
        "clear" => PresentationBucket::Sunny,
        "clouds" => PresentationBucket::Cloudy,
        "rain" | "drizzle" => PresentationBucket::Rainy,
        "snow" => PresentationBucket::Snowy,
        "thunderstorm" => PresentationBucket::Stormy,
        _ => PresentationBucket::Cloudy,
    }
}

/// Icon shown on the reading card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Sun,
    Cloud,
    CloudRain,
    CloudSnow,
    Zap,
}

impl WeatherIcon {
    pub fn for_category(category: &str) -> Self {
        match category.to_lowercase().as_str() {
            "clear" => WeatherIcon::Sun,
            "clouds" => WeatherIcon::Cloud,
            "rain" | "drizzle" => WeatherIcon::CloudRain,
            "snow" => WeatherIcon::CloudSnow,
            "thunderstorm" => WeatherIcon::Zap,
            _ => WeatherIcon::Cloud,
        }
    }

    /// Sun and lightning icons pulse.
    pub fn pulses(&self) -> bool {
        matches!(self, WeatherIcon::Sun | WeatherIcon::Zap)
    }

    /// Bucket whose accent colour the icon is drawn in.
    pub fn tint(&self) -> PresentationBucket {
        match self {
            WeatherIcon::Sun => PresentationBucket::Sunny,
            WeatherIcon::Cloud => PresentationBucket::Cloudy,
            WeatherIcon::CloudRain => PresentationBucket::Rainy,
            WeatherIcon::CloudSnow => PresentationBucket::Snowy,
            WeatherIcon::Zap => PresentationBucket::Stormy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_map_to_documented_buckets() {
        let cases = [
            ("Clear", PresentationBucket::Sunny),
            ("Clouds", PresentationBucket::Cloudy),
            ("Rain", PresentationBucket::Rainy),
            ("Drizzle", PresentationBucket::Rainy),
            ("Snow", PresentationBucket::Snowy),
            ("Thunderstorm", PresentationBucket::Stormy),
        ];

        for (category, expected) in cases {
            assert_eq!(classify(category), expected, "category {category}");
        }
    }

    #[test]
    fn classification_ignores_case() {
        assert_eq!(classify("RAIN"), PresentationBucket::Rainy);
        assert_eq!(classify("thunderSTORM"), PresentationBucket::Stormy);
    }

    #[test]
    fn unknown_categories_default_to_cloudy() {
        for category in ["Mist", "Haze", "Tornado", "", "clear sky"] {
            assert_eq!(classify(category), PresentationBucket::Cloudy);
        }
    }

    #[test]
    fn background_class_names() {
        assert_eq!(PresentationBucket::Rainy.background_class(), "bg-gradient-rainy");
        assert_eq!(PresentationBucket::default().background_class(), "bg-gradient-cloudy");
    }

    #[test]
    fn icons_follow_category() {
        assert_eq!(WeatherIcon::for_category("Clear"), WeatherIcon::Sun);
        assert_eq!(WeatherIcon::for_category("drizzle"), WeatherIcon::CloudRain);
        assert_eq!(WeatherIcon::for_category("Smoke"), WeatherIcon::Cloud);
        assert!(WeatherIcon::Zap.pulses());
        assert!(!WeatherIcon::CloudSnow.pulses());
        assert_eq!(WeatherIcon::CloudSnow.tint(), PresentationBucket::Snowy);
    }
}
