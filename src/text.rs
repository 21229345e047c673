//! User-facing message catalogs (English and Russian).
//!
//! Command replies follow the requesting user's language; channel
//! notifications are always English since a channel has no per-user
//! language.

use chrono::{DateTime, Utc};

use crate::status::{ServiceState, StatusSnapshot};

/// Message language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Ru,
}

impl Lang {
    /// Picks a catalog from an IETF language code; `ru*` selects Russian.
    #[must_use]
    pub fn from_language_code(code: Option<&str>) -> Self {
        match code {
            Some(c) if c.to_lowercase().starts_with("ru") => Self::Ru,
            _ => Self::En,
        }
    }
}

/// Static help text for `/start`.
#[must_use]
pub const fn help(lang: Lang) -> &'static str {
    match lang {
        Lang::En => {
            "👋 Hi! I watch the official Reddit status page.\n\n\
             Commands:\n\
             /status — current Reddit status\n\
             /graph — recent status changes"
        }
        Lang::Ru => {
            "👋 Привет! Я слежу за официальным статусом Reddit.\n\n\
             Команды:\n\
             /status — текущий статус Reddit\n\
             /graph — последние изменения статуса"
        }
    }
}

/// One-line state description with the status emoji.
#[must_use]
pub const fn state_line(lang: Lang, state: ServiceState) -> &'static str {
    match (lang, state) {
        (Lang::En, ServiceState::Operational) => "✅ Reddit is operating normally.",
        (Lang::En, ServiceState::Degraded) => "⚠️ Reddit seems to be having issues!",
        (Lang::En, ServiceState::Outage) => "🛑 Reddit is down!",
        (Lang::En, ServiceState::Unknown) => "❓ Reddit status is unknown.",
        (Lang::Ru, ServiceState::Operational) => "✅ Reddit работает нормально.",
        (Lang::Ru, ServiceState::Degraded) => "⚠️ Проблемы на Reddit!",
        (Lang::Ru, ServiceState::Outage) => "🛑 Reddit не работает!",
        (Lang::Ru, ServiceState::Unknown) => "❓ Статус Reddit неизвестен.",
    }
}

#[must_use]
pub const fn no_data(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "No data yet.",
        Lang::Ru => "Пока нет данных.",
    }
}

#[must_use]
pub const fn history_header(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Status changes (UTC):",
        Lang::Ru => "Изменения статуса (UTC):",
    }
}

const fn date_label(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Date (UTC)",
        Lang::Ru => "Дата (UTC)",
    }
}

/// Formats a timestamp the way the bot displays times (minute
/// precision, UTC).
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Multi-line report of the given snapshot, used by `/status` and
/// heartbeat messages.
#[must_use]
pub fn status_report(lang: Lang, snapshot: &StatusSnapshot) -> String {
    let mut lines = vec![state_line(lang, snapshot.state).to_owned()];
    if let Some(description) = &snapshot.raw_message {
        lines.push(format!("🌐 {description}"));
    }
    lines.push(format!(
        "🕒 {}: {}",
        date_label(lang),
        format_timestamp(snapshot.observed_at)
    ));
    lines.join("\n")
}

/// Channel message for a detected state change.
#[must_use]
pub fn change_message(previous: ServiceState, snapshot: &StatusSnapshot) -> String {
    let mut lines = vec![
        state_line(Lang::En, snapshot.state).to_owned(),
        format!("Status: {} (was: {})", snapshot.state, previous),
    ];
    if let Some(description) = &snapshot.raw_message {
        lines.push(format!("🌐 {description}"));
    }
    lines.push(format!(
        "🕒 {}: {}",
        date_label(Lang::En),
        format_timestamp(snapshot.observed_at)
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_detection() {
        assert_eq!(Lang::from_language_code(Some("ru")), Lang::Ru);
        assert_eq!(Lang::from_language_code(Some("RU-ru")), Lang::Ru);
        assert_eq!(Lang::from_language_code(Some("en")), Lang::En);
        assert_eq!(Lang::from_language_code(Some("de")), Lang::En);
        assert_eq!(Lang::from_language_code(None), Lang::En);
    }

    #[test]
    fn test_status_report_includes_description() {
        let snapshot = StatusSnapshot::new(
            ServiceState::Operational,
            Some("All Systems Operational".to_owned()),
        );
        let report = status_report(Lang::En, &snapshot);
        assert!(report.starts_with("✅"));
        assert!(report.contains("All Systems Operational"));
    }

    #[test]
    fn test_status_report_without_description() {
        let snapshot = StatusSnapshot::new(ServiceState::Unknown, None);
        let report = status_report(Lang::En, &snapshot);
        assert!(report.contains("unknown") || report.contains("❓"));
        assert!(!report.contains("🌐"));
    }

    #[test]
    fn test_change_message_names_both_states() {
        let snapshot = StatusSnapshot::new(ServiceState::Outage, None);
        let message = change_message(ServiceState::Operational, &snapshot);
        assert!(message.contains("outage"));
        assert!(message.contains("was: operational"));
    }
}
