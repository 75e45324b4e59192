//! Fetch, compose and deliver one report.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{error, info, instrument, warn};

use crate::{
    chart::{self, ChartOutcome},
    error::{RunError, WeatherError},
    locale,
    model::ReportKind,
    notifier::Notifier,
    provider::WeatherGateway,
    report,
};

/// Where and to whom reports go.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub latitude: f64,
    pub longitude: f64,
    pub recipient_id: i64,
    pub timezone: Tz,
}

#[derive(Debug)]
pub struct Orchestrator<G, N> {
    gateway: G,
    notifier: N,
    target: Target,
}

impl<G: WeatherGateway, N: Notifier> Orchestrator<G, N> {
    pub fn new(gateway: G, notifier: N, target: Target) -> Self {
        Self { gateway, notifier, target }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Current wall-clock time in the report zone.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.target.timezone)
    }

    /// Fetch and compose without delivering.
    ///
    /// Fails only when current conditions are unavailable; a missing forecast
    /// just drops the chart.
    pub async fn build_report(
        &self,
        kind: ReportKind,
        now: &DateTime<Tz>,
    ) -> Result<String, WeatherError> {
        let Target { latitude, longitude, .. } = self.target;

        let snapshot = self.gateway.get_current(latitude, longitude).await?;
        info!(city = %snapshot.city, temp = snapshot.temperature_c, "current weather fetched");

        let chart = match self.gateway.get_forecast(latitude, longitude).await {
            Ok(series) => chart::render(&series),
            Err(err) => {
                warn!(error = %err, "forecast unavailable, sending report without chart");
                ChartOutcome::InsufficientData
            }
        };
        if let ChartOutcome::RenderError(reason) = &chart {
            warn!(%reason, "chart could not be rendered");
        }

        Ok(report::compose(Some(&snapshot), &chart, now, kind))
    }

    /// One full run at the current time.
    pub async fn run(&self, kind: ReportKind) -> Result<(), RunError> {
        let now = self.now();
        self.run_at(kind, &now).await
    }

    /// Succeeds only when the report reached the recipient.
    #[instrument(skip(self, now), fields(recipient = self.target.recipient_id))]
    pub async fn run_at(&self, kind: ReportKind, now: &DateTime<Tz>) -> Result<(), RunError> {
        let text = match self.build_report(kind, now).await {
            Ok(text) => text,
            Err(source) => {
                error!(error = %source, "current weather unavailable, sending apology");
                let apology_sent = match self.deliver(locale::APOLOGY).await {
                    Ok(()) => true,
                    Err(err) => {
                        error!(error = %err, "apology could not be delivered");
                        false
                    }
                };
                return Err(RunError::CurrentUnavailable { source, apology_sent });
            }
        };

        self.deliver(&text).await.map_err(RunError::Delivery)?;
        info!("report delivered");
        Ok(())
    }

    async fn deliver(&self, text: &str) -> Result<(), crate::error::NotifyError> {
        self.notifier.send(self.target.recipient_id, text).await
    }
}
