use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{ForecastSeries, WeatherSnapshot},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current conditions and short-term forecasts for one location.
#[async_trait]
pub trait WeatherGateway: Send + Sync + Debug {
    async fn get_current(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, WeatherError>;

    /// Samples in provider order.
    async fn get_forecast(&self, lat: f64, lon: f64) -> Result<ForecastSeries, WeatherError>;
}
