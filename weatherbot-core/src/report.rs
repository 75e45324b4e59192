//! Final message composition.

use std::fmt::{self, Write};

use chrono::{DateTime, TimeZone, Timelike};
use thiserror::Error;
use tracing::warn;

use crate::{
    chart::{ChartOutcome, round_temp},
    compass::wind_direction,
    locale::{self, Greeting},
    model::{ReportKind, WeatherSnapshot},
};

/// hPa to mmHg.
pub const HPA_TO_MMHG: f64 = 0.750062;

#[derive(Debug, Error)]
enum ComposeError {
    #[error("snapshot contains a non-finite value")]
    NonFinite,

    #[error("formatter error: {0}")]
    Format(#[from] fmt::Error),
}

/// Build the report text.
///
/// `None` for `snapshot` means the current-conditions fetch failed and yields
/// [`locale::APOLOGY`]. A snapshot that cannot be rendered degrades to a one-line
/// summary; this function never fails.
pub fn compose<Tz: TimeZone>(
    snapshot: Option<&WeatherSnapshot>,
    chart: &ChartOutcome,
    now: &DateTime<Tz>,
    kind: ReportKind,
) -> String {
    let Some(snapshot) = snapshot else {
        return locale::APOLOGY.to_string();
    };

    match render(snapshot, chart, now, kind) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "falling back to one-line report");
            fallback(snapshot)
        }
    }
}

fn render<Tz: TimeZone>(
    s: &WeatherSnapshot,
    chart: &ChartOutcome,
    now: &DateTime<Tz>,
    kind: ReportKind,
) -> Result<String, ComposeError> {
    if !s.is_finite() {
        return Err(ComposeError::NonFinite);
    }

    let local = now.naive_local();
    let greeting = Greeting::select(kind, local.hour());
    let wind = match wind_direction(s.wind_deg) {
        Some(dir) => format!("{:.1} м/с, {dir}", s.wind_speed_mps),
        None => format!("{:.1} м/с", s.wind_speed_mps),
    };

    let mut out = String::new();
    writeln!(out, "{}", greeting.text())?;
    writeln!(out)?;
    writeln!(out, "📍 {}", s.city)?;
    writeln!(out, "🗓️ {}", locale::date_line(&local.date()))?;
    writeln!(out, "⏰ {}", locale::clock(&local.time()))?;
    writeln!(out)?;
    writeln!(out, "🌤️ Погода сейчас:")?;
    writeln!(out, "• Состояние: {}", locale::capitalize(&s.description))?;
    writeln!(
        out,
        "• Температура: {}°C (ощущается как {}°C)",
        round_temp(s.temperature_c),
        round_temp(s.feels_like_c)
    )?;
    writeln!(out, "• Ветер: 💨 {wind}")?;
    writeln!(out, "• Влажность: {}%", s.humidity_pct)?;
    writeln!(out, "• Давление: {} мм рт. ст.", pressure_mmhg(s.pressure_hpa))?;
    writeln!(
        out,
        "• Днём: от {}°C до {}°C",
        round_temp(s.temp_min_c),
        round_temp(s.temp_max_c)
    )?;

    if let Some(block) = chart.block() {
        writeln!(out)?;
        writeln!(out, "{block}")?;
    }
    writeln!(out)?;
    write!(out, "{}", locale::closing(kind))?;

    Ok(out)
}

/// Condition and temperature only.
fn fallback(s: &WeatherSnapshot) -> String {
    let condition = locale::capitalize(&s.description);
    if s.temperature_c.is_finite() {
        format!("🌤️ {}: {condition}, {}°C", s.city, round_temp(s.temperature_c))
    } else {
        format!("🌤️ {}: {condition}", s.city)
    }
}

pub fn pressure_mmhg(hpa: f64) -> i64 {
    (hpa * HPA_TO_MMHG).round() as i64
}
