//! Command handler implementation.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::BotCommand;
use crate::monitor::{IncidentLogEntry, MonitorState};
use crate::text::{self, Lang};

/// Number of history entries shown by the graph command.
const HISTORY_LIMIT: usize = 20;

/// Handles chat commands.
///
/// Read-only with respect to the monitor state; the polling loop is
/// the only writer.
pub struct CommandHandler {
    /// Shared monitor state.
    state: Arc<RwLock<MonitorState>>,
}

impl CommandHandler {
    /// Creates a new command handler.
    #[must_use]
    pub fn new(state: Arc<RwLock<MonitorState>>) -> Self {
        Self { state }
    }

    /// Tries to parse and execute a command from a message.
    ///
    /// Returns `None` if the message is not a command for this bot.
    pub async fn try_handle(
        &self,
        message_text: &str,
        bot_username: &str,
        lang: Lang,
    ) -> Option<String> {
        let command = BotCommand::parse(message_text, bot_username)?;
        debug!("Handling command: {}", command);
        Some(self.execute(command, lang).await)
    }

    /// Executes a parsed command.
    async fn execute(&self, command: BotCommand, lang: Lang) -> String {
        match command {
            BotCommand::Start => text::help(lang).to_owned(),
            BotCommand::Status => self.handle_status(lang).await,
            BotCommand::Graph => self.handle_graph(lang).await,
        }
    }

    async fn handle_status(&self, lang: Lang) -> String {
        let state = self.state.read().await;
        text::status_report(lang, state.last_snapshot())
    }

    async fn handle_graph(&self, lang: Lang) -> String {
        let state = self.state.read().await;
        let recent = state.recent_incidents(HISTORY_LIMIT);

        if recent.is_empty() {
            return text::no_data(lang).to_owned();
        }

        render_history(lang, &recent)
    }
}

impl std::fmt::Debug for CommandHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHandler").finish_non_exhaustive()
    }
}

/// Renders the incident history as a text timeline, oldest first.
fn render_history(lang: Lang, entries: &[IncidentLogEntry]) -> String {
    let mut lines = vec![text::history_header(lang).to_owned()];
    for entry in entries {
        lines.push(format!(
            "{}  {} {}",
            text::format_timestamp(entry.at),
            entry.state.emoji(),
            entry.state.label()
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{ServiceState, StatusSnapshot};

    const BOT: &str = "RedditStatusBot";

    fn handler_with_state(state: MonitorState) -> CommandHandler {
        CommandHandler::new(Arc::new(RwLock::new(state)))
    }

    #[tokio::test]
    async fn test_status_before_any_poll_reports_unknown() {
        let handler = handler_with_state(MonitorState::new());

        let reply = handler
            .try_handle("/status", BOT, Lang::En)
            .await
            .expect("should be a command");

        assert!(reply.contains("unknown"));
    }

    #[tokio::test]
    async fn test_status_reflects_last_observation() {
        let mut state = MonitorState::new();
        state.record_observation(StatusSnapshot::new(
            ServiceState::Operational,
            Some("All Systems Operational".to_owned()),
        ));
        let handler = handler_with_state(state);

        let reply = handler.try_handle("/status", BOT, Lang::En).await.unwrap();
        assert!(reply.contains("✅"));
        assert!(reply.contains("All Systems Operational"));
    }

    #[tokio::test]
    async fn test_graph_with_empty_log() {
        let handler = handler_with_state(MonitorState::new());

        let reply = handler.try_handle("/graph", BOT, Lang::En).await.unwrap();
        assert_eq!(reply, "No data yet.");
    }

    #[tokio::test]
    async fn test_graph_lists_transitions_in_order() {
        let mut state = MonitorState::new();
        state.record_observation(StatusSnapshot::new(ServiceState::Operational, None));
        state.record_observation(StatusSnapshot::new(ServiceState::Outage, None));
        let handler = handler_with_state(state);

        let reply = handler.try_handle("/graph", BOT, Lang::En).await.unwrap();
        let operational_at = reply.find("operational").unwrap();
        let outage_at = reply.find("outage").unwrap();
        assert!(operational_at < outage_at);
    }

    #[tokio::test]
    async fn test_non_command_text_is_ignored() {
        let handler = handler_with_state(MonitorState::new());
        assert!(handler.try_handle("hello", BOT, Lang::En).await.is_none());
    }

    #[tokio::test]
    async fn test_start_is_localized() {
        let handler = handler_with_state(MonitorState::new());

        let en = handler.try_handle("/start", BOT, Lang::En).await.unwrap();
        let ru = handler.try_handle("/start", BOT, Lang::Ru).await.unwrap();

        assert!(en.contains("/status"));
        assert!(ru.contains("/status"));
        assert_ne!(en, ru);
    }
}
