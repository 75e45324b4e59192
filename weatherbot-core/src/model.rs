use chrono::NaiveDateTime;

/// City shown when the provider response carries no name.
pub const FALLBACK_CITY: &str = "Тамань";

/// Current conditions at the configured location.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    /// Provider units (hPa).
    pub pressure_hpa: f64,
    pub description: String,
    pub wind_speed_mps: f64,
    /// `None` when the provider omitted the bearing; distinct from `Some(0)`.
    pub wind_deg: Option<u16>,
}

impl WeatherSnapshot {
    /// True when every numeric field can be rendered.
    pub fn is_finite(&self) -> bool {
        [
            self.temperature_c,
            self.feels_like_c,
            self.temp_min_c,
            self.temp_max_c,
            self.pressure_hpa,
            self.wind_speed_mps,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSample {
    /// Wall-clock time in the report time zone.
    pub time: NaiveDateTime,
    pub temperature_c: f64,
}

/// Forecast samples in provider order.
pub type ForecastSeries = Vec<ForecastSample>;

/// Which path produced the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Scheduled daily send.
    Morning,
    /// Reply to an explicit request.
    OnDemand,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city: FALLBACK_CITY.to_string(),
            temperature_c: 1.0,
            feels_like_c: 1.0,
            temp_min_c: 0.0,
            temp_max_c: 2.0,
            humidity_pct: 50,
            pressure_hpa: 1000.0,
            description: "снег".to_string(),
            wind_speed_mps: 1.0,
            wind_deg: None,
        }
    }

    #[test]
    fn finite_snapshot_is_renderable() {
        assert!(snapshot().is_finite());
    }

    #[test]
    fn nan_field_is_detected() {
        let mut s = snapshot();
        s.pressure_hpa = f64::NAN;
        assert!(!s.is_finite());
    }
}
