//! Core library for the `weatherbot` report sender.
//!
//! This crate defines:
//! - Configuration loading (environment over an optional TOML file)
//! - The report formatting pipeline (wind direction, trend chart, message)
//! - The OpenWeather gateway and the Telegram notifier
//! - The orchestrator that ties one fetch-compose-send run together
//!
//! Formatting functions are pure and never fail; only the orchestrator turns
//! upstream failures into a run outcome.

pub mod chart;
pub mod compass;
pub mod config;
pub mod error;
pub mod locale;
pub mod model;
pub mod notifier;
pub mod orchestrator;
pub mod provider;
pub mod report;

pub use chart::ChartOutcome;
pub use compass::{CompassDirection, wind_direction};
pub use config::{Config, ConfigError};
pub use error::{NotifyError, RunError, WeatherError};
pub use model::{ForecastSample, ForecastSeries, ReportKind, WeatherSnapshot};
pub use notifier::{Notifier, TelegramClient};
pub use orchestrator::{Orchestrator, Target};
pub use provider::{OpenWeatherProvider, WeatherGateway};
pub use report::compose;
