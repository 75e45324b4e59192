//! Short-term temperature trend as a fixed-width text bar chart.

use std::fmt::Write;

use crate::{locale, model::ForecastSample};

pub const HEADER: &str = "📈 Температура на ближайшие часы:";

const MAX_SAMPLES: usize = 5;
const MIN_SAMPLES: usize = 3;
const WIDTH: usize = 10;
const FILLED: char = '█';
const EMPTY: char = '░';

/// Result of rendering a forecast; only `Rendered` ends up in a report.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Rendered(String),
    /// Fewer than three samples.
    InsufficientData,
    RenderError(String),
}

impl ChartOutcome {
    /// The chart block, if one was produced.
    pub fn block(&self) -> Option<&str> {
        match self {
            ChartOutcome::Rendered(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Render the first five samples of `series`.
///
/// Never fails its caller: missing data and bad values are reported through
/// [`ChartOutcome`] and compose as "no chart".
pub fn render(series: &[ForecastSample]) -> ChartOutcome {
    if series.len() < MIN_SAMPLES {
        return ChartOutcome::InsufficientData;
    }
    let samples = &series[..series.len().min(MAX_SAMPLES)];

    if let Some(bad) = samples.iter().find(|s| !s.temperature_c.is_finite()) {
        return ChartOutcome::RenderError(format!(
            "non-finite temperature at {}",
            bad.time.format("%Y-%m-%d %H:%M")
        ));
    }

    match draw(samples) {
        Ok(text) => ChartOutcome::Rendered(text),
        Err(err) => ChartOutcome::RenderError(err.to_string()),
    }
}

fn draw(samples: &[ForecastSample]) -> Result<String, std::fmt::Error> {
    let min = samples.iter().map(|s| s.temperature_c).fold(f64::INFINITY, f64::min);
    let max = samples.iter().map(|s| s.temperature_c).fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };

    let mut out = String::new();
    writeln!(out, "{HEADER}")?;
    for sample in samples {
        let filled = normalize(sample.temperature_c, min, range);
        writeln!(
            out,
            "{} │{} {}°C",
            locale::clock(&sample.time),
            bar(filled),
            round_temp(sample.temperature_c)
        )?;
    }
    writeln!(out, "мин.  │{} {}°C", bar(2), round_temp(min))?;
    write!(out, "макс. │{} {}°C", bar(WIDTH), round_temp(max))?;

    Ok(out)
}

/// Position of `temp` on a 0..=10 scale.
fn normalize(temp: f64, min: f64, range: f64) -> usize {
    (((temp - min) / range) * WIDTH as f64).floor().clamp(0.0, WIDTH as f64) as usize
}

fn bar(filled: usize) -> String {
    let filled = filled.min(WIDTH);
    let mut s = String::with_capacity(WIDTH * FILLED.len_utf8());
    s.extend(std::iter::repeat_n(FILLED, filled));
    s.extend(std::iter::repeat_n(EMPTY, WIDTH - filled));
    s
}

/// Nearest whole degree, half away from zero. Integer output never prints "-0".
pub(crate) fn round_temp(t: f64) -> i64 {
    t.round() as i64
}
