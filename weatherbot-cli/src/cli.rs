use anyhow::Context;
use clap::Parser;
use tracing::info;
use weatherbot_core::{
    Config, OpenWeatherProvider, Orchestrator, ReportKind, TelegramClient, Target,
};

use crate::listener;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbot", version, about = "Daily weather report for Telegram")]
pub struct Cli {
    /// Listen for chat commands instead of sending one scheduled report.
    #[arg(long)]
    pub bot: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load().context("configuration error")?;
        info!(
            user_id = config.user_id,
            latitude = config.latitude,
            longitude = config.longitude,
            timezone = %config.timezone,
            "configuration loaded"
        );

        let gateway =
            OpenWeatherProvider::new(config.openweather_api_key.clone(), config.timezone)?;
        let notifier = TelegramClient::new(config.bot_token.clone())?;
        let orchestrator = Orchestrator::new(
            gateway,
            notifier,
            Target {
                latitude: config.latitude,
                longitude: config.longitude,
                recipient_id: config.user_id,
                timezone: config.timezone,
            },
        );

        if self.bot {
            listener::run(&orchestrator).await
        } else {
            orchestrator.run(ReportKind::Morning).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_scheduled_send() {
        let cli = Cli::try_parse_from(["weatherbot"]).unwrap();
        assert!(!cli.bot);
    }

    #[test]
    fn bot_flag_selects_listener() {
        let cli = Cli::try_parse_from(["weatherbot", "--bot"]).unwrap();
        assert!(cli.bot);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["weatherbot", "--daemon"]).is_err());
    }
}
