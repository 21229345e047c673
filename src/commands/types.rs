//! Command types and parsing.

use std::fmt;

/// Commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// Show the help text.
    Start,

    /// Show the current upstream status.
    Status,

    /// Show the recorded incident history.
    Graph,
}

impl BotCommand {
    /// Parses a command from a message text.
    ///
    /// Accepts an optional `@botname` suffix (Telegram appends it to
    /// commands sent in groups); a suffix addressed to a different bot
    /// is ignored. Returns `None` for anything that is not a known
    /// command.
    #[must_use]
    pub fn parse(text: &str, bot_username: &str) -> Option<Self> {
        let first = text.trim().split_whitespace().next()?;
        let mut token = first.strip_prefix('/')?;

        if let Some((cmd, target)) = token.split_once('@') {
            if !target.eq_ignore_ascii_case(bot_username) {
                return None;
            }
            token = cmd;
        }

        match token.to_lowercase().as_str() {
            "start" | "help" => Some(Self::Start),
            "status" => Some(Self::Status),
            "graph" => Some(Self::Graph),
            _ => None,
        }
    }

    /// Returns the command name as it appears in help.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Status => "status",
            Self::Graph => "graph",
        }
    }
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}
