use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{collections::HashMap, fmt, fs, path::PathBuf};
use thiserror::Error;

pub const DEFAULT_LATITUDE: f64 = 45.22;
pub const DEFAULT_LONGITUDE: f64 = 36.72;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Moscow;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("required option {0} is not set")]
    Missing(&'static str),

    #[error("option {key} has invalid value '{value}': expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Process configuration, built once at startup.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub user_id: i64,
    pub openweather_api_key: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Zone for report dates, greetings and chart labels.
    pub timezone: Tz,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("user_id", &self.user_id)
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}

/// Optional on-disk defaults. Keys mirror the environment variables in lower case.
///
/// Example TOML:
/// bot_token = "..."
/// user_id = 123456
/// latitude = 45.22
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub bot_token: Option<String>,
    pub user_id: Option<i64>,
    pub openweather_api_key: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
}

impl FileConfig {
    fn into_values(self) -> HashMap<&'static str, String> {
        let entries = [
            ("BOT_TOKEN", self.bot_token),
            ("USER_ID", self.user_id.map(|v| v.to_string())),
            ("OPENWEATHER_API_KEY", self.openweather_api_key),
            ("LATITUDE", self.latitude.map(|v| v.to_string())),
            ("LONGITUDE", self.longitude.map(|v| v.to_string())),
            ("TIMEZONE", self.timezone),
        ];
        entries.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))).collect()
    }
}

impl Config {
    /// Build from a key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let bot_token = require("BOT_TOKEN")?;
        let user_id: i64 = parse(require("USER_ID")?, "USER_ID", "an integer chat id")?;
        // Telegram never assigns chat id 0; treat it as an unset placeholder.
        if user_id == 0 {
            return Err(ConfigError::Missing("USER_ID"));
        }
        let openweather_api_key = require("OPENWEATHER_API_KEY")?;

        let latitude = match get("LATITUDE") {
            Some(v) => parse_coordinate(v, "LATITUDE", 90.0, "decimal degrees in -90..=90")?,
            None => DEFAULT_LATITUDE,
        };
        let longitude = match get("LONGITUDE") {
            Some(v) => parse_coordinate(v, "LONGITUDE", 180.0, "decimal degrees in -180..=180")?,
            None => DEFAULT_LONGITUDE,
        };
        let timezone = match get("TIMEZONE") {
            Some(v) => parse(v, "TIMEZONE", "an IANA time zone name")?,
            None => DEFAULT_TIMEZONE,
        };

        Ok(Self { bot_token, user_id, openweather_api_key, latitude, longitude, timezone })
    }

    /// Environment variables only.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Environment variables layered over the optional config file.
    pub fn load() -> Result<Self> {
        let file = FileConfig::load()?.into_values();
        let cfg = Self::from_lookup(|key| {
            std::env::var(key).ok().or_else(|| file.get(key).cloned())
        })?;
        Ok(cfg)
    }
}

impl FileConfig {
    /// Read the config file, or return empty defaults if it doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherbot", "weatherbot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn parse<T: std::str::FromStr>(
    value: String,
    key: &'static str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { key, value, expected })
}

fn parse_coordinate(
    value: String,
    key: &'static str,
    limit: f64,
    expected: &'static str,
) -> Result<f64, ConfigError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && (-limit..=limit).contains(&v) => Ok(v),
        _ => Err(ConfigError::Invalid { key, value, expected }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] =
        [("BOT_TOKEN", "123:abc"), ("USER_ID", "42"), ("OPENWEATHER_API_KEY", "ow-key")];

    #[test]
    fn required_only_uses_defaults() {
        let cfg = Config::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(cfg.user_id, 42);
        assert_eq!(cfg.latitude, DEFAULT_LATITUDE);
        assert_eq!(cfg.longitude, DEFAULT_LONGITUDE);
        assert_eq!(cfg.timezone, chrono_tz::Europe::Moscow);
    }

    #[test]
    fn each_required_option_is_enforced() {
        for missing in ["BOT_TOKEN", "USER_ID", "OPENWEATHER_API_KEY"] {
            let pairs: Vec<_> = REQUIRED.iter().copied().filter(|(k, _)| *k != missing).collect();
            let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
            assert_eq!(err, ConfigError::Missing(missing));
        }
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[0] = ("BOT_TOKEN", "   ");
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BOT_TOKEN"));
    }

    #[test]
    fn non_numeric_user_id_is_invalid() {
        let mut pairs = REQUIRED.to_vec();
        pairs[1] = ("USER_ID", "@someone");
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "USER_ID", .. }));
    }

    #[test]
    fn zero_user_id_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[1] = ("USER_ID", "0");
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("USER_ID"));
    }

    #[test]
    fn coordinates_and_zone_are_parsed() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([("LATITUDE", "55.75"), ("LONGITUDE", "37.62"), ("TIMEZONE", "Europe/Berlin")]);
        let cfg = Config::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(cfg.latitude, 55.75);
        assert_eq!(cfg.longitude, 37.62);
        assert_eq!(cfg.timezone, chrono_tz::Europe::Berlin);
    }

    #[test]
    fn out_of_range_latitude_is_invalid() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("LATITUDE", "123"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "LATITUDE", .. }));
    }

    #[test]
    fn unknown_zone_is_invalid() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("TIMEZONE", "Mars/Olympus"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TIMEZONE", .. }));
    }

    #[test]
    fn file_values_map_to_option_names() {
        let file: FileConfig = toml::from_str("user_id = 7\nlatitude = 1.5\n").unwrap();
        let values = file.into_values();

        assert_eq!(values.get("USER_ID").map(String::as_str), Some("7"));
        assert_eq!(values.get("LATITUDE").map(String::as_str), Some("1.5"));
        assert!(!values.contains_key("BOT_TOKEN"));
    }

    #[test]
    fn debug_hides_credentials() {
        let cfg = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        let out = format!("{cfg:?}");
        assert!(!out.contains("123:abc"));
        assert!(!out.contains("ow-key"));
    }
}
