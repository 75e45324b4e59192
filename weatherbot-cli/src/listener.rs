//! `--bot` mode: long-poll Telegram and answer commands from the configured user.

use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info, warn};
use weatherbot_core::{
    Notifier, Orchestrator, ReportKind, TelegramClient, WeatherGateway, locale,
    notifier::telegram::Update,
};

const POLL_TIMEOUT_SECS: u64 = 25;
const POLL_ERROR_PAUSE: Duration = Duration::from_secs(5);

const HELP: &str = "👋 Я присылаю прогноз погоды каждое утро.\n\n\
                    /weather — погода сейчас\n\
                    /help — список команд";
const UNKNOWN: &str = "🤔 Не знаю такой команды. Попробуйте /weather или /help.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Help,
    Weather,
    Unknown,
}

impl Command {
    /// `/weather@my_bot now` parses as `Weather`. Plain text is not a command.
    fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);

        Some(match name.to_lowercase().as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "weather" | "pogoda" | "погода" => Command::Weather,
            _ => Command::Unknown,
        })
    }
}

/// Command sent by `owner`, if `update` carries one.
fn command_for(update: &Update, owner: i64) -> Option<Command> {
    let message = update.message.as_ref()?;
    if message.chat.id != owner {
        debug!(chat = message.chat.id, "ignoring message from another chat");
        return None;
    }
    Command::parse(message.text.as_deref()?)
}

pub async fn run<G: WeatherGateway>(
    orchestrator: &Orchestrator<G, TelegramClient>,
) -> anyhow::Result<()> {
    serve(orchestrator, tokio::signal::ctrl_c()).await
}

/// Poll until `shutdown` resolves. `shutdown` is pinned once and raced against
/// the poll, the error pause and command handling.
async fn serve<G, S>(
    orchestrator: &Orchestrator<G, TelegramClient>,
    shutdown: S,
) -> anyhow::Result<()>
where
    G: WeatherGateway,
    S: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(shutdown);
    let owner = orchestrator.target().recipient_id;
    let mut offset = None;
    info!("listening for commands, press Ctrl-C to stop");

    loop {
        let updates = tokio::select! {
            biased;
            res = &mut shutdown => return stopped(res),
            res = orchestrator.notifier().get_updates(offset, POLL_TIMEOUT_SECS) => res,
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(err) => {
                warn!(error = %err, "polling failed");
                tokio::select! {
                    biased;
                    res = &mut shutdown => return stopped(res),
                    _ = tokio::time::sleep(POLL_ERROR_PAUSE) => continue,
                }
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            if let Some(command) = command_for(&update, owner) {
                tokio::select! {
                    biased;
                    res = &mut shutdown => return stopped(res),
                    _ = handle(orchestrator, command) => {}
                }
            }
        }
    }
}

fn stopped(signal: std::io::Result<()>) -> anyhow::Result<()> {
    signal.context("failed to listen for Ctrl-C")?;
    info!("shutting down");
    Ok(())
}

async fn handle<G: WeatherGateway, N: Notifier>(orchestrator: &Orchestrator<G, N>, command: Command) {
    info!(?command, "command received");
    let reply = match command {
        Command::Start | Command::Help => HELP.to_string(),
        Command::Unknown => UNKNOWN.to_string(),
        Command::Weather => {
            let now = orchestrator.now();
            match orchestrator.build_report(ReportKind::OnDemand, &now).await {
                Ok(text) => text,
                Err(err) => {
                    warn!(error = %err, "current weather unavailable");
                    locale::APOLOGY.to_string()
                }
            }
        }
    };

    let owner = orchestrator.target().recipient_id;
    if let Err(err) = orchestrator.notifier().send(owner, &reply).await {
        warn!(error = %err, "reply could not be delivered");
    }
}
