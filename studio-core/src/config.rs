use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Light or dark colour scheme. Dark until the user says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where requests go. Only tests and proxies need to touch this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// OpenWeatherMap base URL (default: <https://api.openweathermap.org>)
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,

    /// IP geolocation lookup URL (default: <http://ip-api.com/json>)
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,

    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_geolocation_url() -> String {
    "http://ip-api.com/json".to_string()
}

const fn default_timeout() -> u64 {
    15
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            weather_base_url: default_weather_base_url(),
            geolocation_url: default_geolocation_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Preferences stored on disk.
///
/// Example TOML:
/// ```toml
/// weather-theme = "dark"
/// openweather-api-key = "..."
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(rename = "weather-theme", default)]
    pub theme: Theme,

    #[serde(rename = "openweather-api-key", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "is_default_endpoint")]
    pub endpoint: EndpointConfig,
}

fn is_default_endpoint(endpoint: &EndpointConfig) -> bool {
    *endpoint == EndpointConfig::default()
}

impl Config {
    /// Load config from `path`, or defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-studio", "weather-studio")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("preferences.toml"))
    }

    /// Store `theme` and write the file at `path`.
    pub fn set_theme(&mut self, theme: Theme, path: &Path) -> Result<()> {
        self.theme = theme;
        self.save_to(path)
    }

    /// Flip between dark and light and write the file at `path`.
    pub fn toggle_theme(&mut self, path: &Path) -> Result<Theme> {
        let theme = self.theme.toggled();
        self.set_theme(theme, path)?;
        Ok(theme)
    }

    /// Returns the stored API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    /// Store `api_key` unless it is blank. Returns whether anything changed.
    pub fn set_api_key(&mut self, api_key: &str) -> bool {
        if api_key.trim().is_empty() || self.api_key.as_deref() == Some(api_key) {
            return false;
        }

        self.api_key = Some(api_key.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_dark_without_key() {
        let cfg = Config::default();
        assert_eq!(cfg.theme, Theme::Dark);
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_and_reload_restores_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut cfg = Config { theme: Theme::Light, ..Config::default() };
        assert!(cfg.set_api_key("KEY"));
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, Theme::Light);
        assert_eq!(loaded.api_key(), Some("KEY"));
    }

    #[test]
    fn uses_fixed_keys_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("abc123");
        cfg.save_to(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("weather-theme = \"dark\""));
        assert!(raw.contains("openweather-api-key = \"abc123\""));
        assert!(!raw.contains("[endpoint]"));
    }

    #[test]
    fn blank_api_key_is_not_stored() {
        let mut cfg = Config::default();
        assert!(!cfg.set_api_key("   "));
        assert_eq!(cfg.api_key, None);

        assert!(cfg.set_api_key("KEY"));
        assert!(!cfg.set_api_key("KEY"));
    }

    #[test]
    fn partial_endpoint_table_fills_defaults() {
        let cfg: Config = toml::from_str(
            "weather-theme = \"light\"\n[endpoint]\nweather_base_url = \"http://localhost:9\"\n",
        )
        .unwrap();

        assert_eq!(cfg.theme, Theme::Light);
        assert_eq!(cfg.endpoint.weather_base_url, "http://localhost:9");
        assert_eq!(cfg.endpoint.timeout_secs, 15);
    }

    #[test]
    fn theme_toggle_flips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn toggled_theme_is_written_and_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        let mut cfg = Config::default();
        assert_eq!(cfg.toggle_theme(&path).unwrap(), Theme::Light);
        assert_eq!(Config::load_from(&path).unwrap().theme, Theme::Light);

        cfg.set_theme(Theme::Dark, &path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().theme, Theme::Dark);
    }
}
