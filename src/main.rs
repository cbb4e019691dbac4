use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use modules_bot::bot::{callback_handler, message_handler, Command};
use modules_bot::catalog::Catalog;
use modules_bot::config::BotConfig;
use modules_bot::images::ImageStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Modules Telegram Bot");

    // Missing token is fatal, before anything talks to Telegram
    let config = BotConfig::from_env()?;
    let catalog = Arc::new(Catalog::builtin()?);
    let images = Arc::new(ImageStore::new(config.image_dir()));

    info!(
        modules = catalog.len(),
        image_dir = %images.dir().display(),
        "Catalog loaded"
    );

    let bot = Bot::new(config.token.clone());

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![catalog, images])
        .default_handler(|upd| async move {
            debug!(update = ?upd, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
