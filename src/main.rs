//! Reddit Status Bot - Main Entry Point
//!
//! A Telegram bot that polls the official Reddit status page, announces
//! state changes to a configured channel, and answers status commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use teloxide::prelude::*;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use reddit_status_bot::commands::CommandHandler;
use reddit_status_bot::config::{BotConfig, MonitorSettings};
use reddit_status_bot::monitor::{MonitorMessage, MonitorState, StatusMonitor};
use reddit_status_bot::status::StatusPageClient;
use reddit_status_bot::telegram::{ChannelNotifier, LogOnlyNotifier, TelegramNotifier};
use reddit_status_bot::text::Lang;

/// Telegram bot that announces Reddit status changes.
#[derive(Parser, Debug)]
#[command(name = "status_bot")]
#[command(about = "Watch the Reddit status page and announce changes on Telegram")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Override the poll interval in seconds.
    #[arg(long)]
    poll_interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    // Load configurations
    let bot_config =
        BotConfig::from_env().context("Failed to load bot configuration from environment")?;

    let mut settings = MonitorSettings::from_env_with_defaults();
    if let Some(secs) = args.poll_interval {
        settings.poll_interval_secs = secs;
    }

    info!(
        "Polling {} every {} seconds",
        settings.status_url, settings.poll_interval_secs
    );

    let fetcher = StatusPageClient::new(
        &settings.status_url,
        settings.fetch_timeout(),
        &settings.user_agent,
    )
    .context("Failed to build status page client")?;

    // Connect to Telegram
    let bot = Bot::new(&bot_config.token);
    let me = bot.get_me().await.context("Failed to connect to Telegram")?;
    let bot_username = me.user.username.clone().unwrap_or_default();
    info!("Connected to Telegram as @{}", bot_username);

    let notifier: Arc<dyn ChannelNotifier> = match &bot_config.notify_chat {
        Some(raw) => {
            let chat = TelegramNotifier::parse_recipient(raw).with_context(|| {
                format!("NOTIFY_CHAT is not a numeric chat id or @channelusername: {raw}")
            })?;
            info!("Status notifications go to {:?}", chat);
            Arc::new(TelegramNotifier::new(
                bot.clone(),
                chat,
                settings.min_notify_interval_secs,
            ))
        }
        None => {
            warn!("NOTIFY_CHAT not set; state changes will only be logged");
            Arc::new(LogOnlyNotifier)
        }
    };

    let state = Arc::new(RwLock::new(MonitorState::new()));

    // Create monitor channel
    let (monitor_tx, monitor_rx) = mpsc::channel::<MonitorMessage>(32);

    let monitor = StatusMonitor::new(Arc::new(fetcher), notifier, Arc::clone(&state))
        .with_poll_interval(settings.poll_interval())
        .with_heartbeat(settings.heartbeat());

    // Spawn the polling loop
    let monitor_handle = tokio::spawn(async move {
        monitor.run(monitor_rx).await;
    });

    let handler = Arc::new(CommandHandler::new(Arc::clone(&state)));

    info!("Bot is running. Use Ctrl+C to stop.");

    let tree = Update::filter_message().endpoint(answer_message);
    Dispatcher::builder(bot, tree)
        .dependencies(dptree::deps![handler, bot_username])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    // Cleanup
    info!("Shutting down...");
    let _ = monitor_tx.send(MonitorMessage::Shutdown).await;
    let _ = monitor_handle.await;

    Ok(())
}

/// Answers one incoming message; non-command text is ignored.
async fn answer_message(
    bot: Bot,
    msg: Message,
    handler: Arc<CommandHandler>,
    bot_username: String,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let lang = Lang::from_language_code(msg.from.as_ref().and_then(|u| u.language_code.as_deref()));

    if let Some(reply) = handler.try_handle(text, &bot_username, lang).await {
        bot.send_message(msg.chat.id, reply).await?;
    }

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
