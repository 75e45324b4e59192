use async_trait::async_trait;
use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    error::{WeatherError, truncate_body},
    model::{FALLBACK_CITY, ForecastSample, ForecastSeries, WeatherSnapshot},
};

use super::WeatherGateway;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const TIMEOUT: Duration = Duration::from_secs(10);
const FORECAST_COUNT: &str = "6";
const LANG: &str = "ru";
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    /// Zone forecast timestamps are shown in.
    tz: Tz,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, tz: Tz) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, tz, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: String,
        tz: Tz,
        base_url: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(TIMEOUT).build().map_err(WeatherError::Client)?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tz,
            http,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        lat: f64,
        lon: f64,
        extra: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let lat = lat.to_string();
        let lon = lon.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", LANG),
            ])
            .query(extra)
            .send()
            .await
            .map_err(|source| WeatherError::Request { endpoint, source: source.without_url() })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Request { endpoint, source: source.without_url() })?;

        if !status.is_success() {
            return Err(WeatherError::Status { endpoint, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Parse { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: Option<String>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    main: OwForecastMain,
    dt_txt: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, WeatherError> {
        let description = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or(WeatherError::MissingField("weather[0].description"))?;

        let city = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_CITY.to_string());

        Ok(WeatherSnapshot {
            city,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            temp_min_c: self.main.temp_min,
            temp_max_c: self.main.temp_max,
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            description,
            wind_speed_mps: self.wind.speed,
            wind_deg: self.wind.deg.map(bearing),
        })
    }
}

/// Whole degrees in 0..=360.
fn bearing(deg: f64) -> u16 {
    deg.round().clamp(0.0, 360.0) as u16
}

/// Parse a UTC `dt_txt` value into wall-clock time in `tz`.
fn parse_dt_txt(raw: &str, tz: Tz) -> Result<NaiveDateTime, WeatherError> {
    let utc = NaiveDateTime::parse_from_str(raw, DT_TXT_FORMAT)
        .map_err(|_| WeatherError::InvalidTimestamp(raw.to_string()))?;
    Ok(Utc.from_utc_datetime(&utc).with_timezone(&tz).naive_local())
}

#[async_trait]
impl WeatherGateway for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn get_current(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, WeatherError> {
        let parsed: OwCurrentResponse = self.fetch("weather", lat, lon, &[]).await?;
        let snapshot = parsed.into_snapshot()?;

        debug!(
            city = %snapshot.city,
            temp = snapshot.temperature_c,
            description = %snapshot.description,
            "current weather received"
        );
        Ok(snapshot)
    }

    #[instrument(skip(self))]
    async fn get_forecast(&self, lat: f64, lon: f64) -> Result<ForecastSeries, WeatherError> {
        let parsed: OwForecastResponse =
            self.fetch("forecast", lat, lon, &[("cnt", FORECAST_COUNT)]).await?;

        let series: ForecastSeries = parsed
            .list
            .into_iter()
            .map(|entry| -> Result<ForecastSample, WeatherError> {
                Ok(ForecastSample {
                    time: parse_dt_txt(&entry.dt_txt, self.tz)?,
                    temperature_c: entry.main.temp,
                })
            })
            .collect::<Result<_, _>>()?;

        debug!(samples = series.len(), "forecast received");
        Ok(series)
    }
}
