//! Message Handler module for the start command and the trigger button

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::gateway::{Gateway, TelegramGateway};
use crate::navigation::{classify_text, NavigationEvent};

use super::ui_builder::{
    main_menu, Markup, MENU_PROMPT, START_PROMPT, TRIGGER_CLEARED, TRIGGER_LABEL,
};

/// Dispatcher endpoint for incoming messages
pub async fn message_handler(bot: Bot, msg: Message, catalog: Arc<Catalog>) -> Result<()> {
    let Some(text) = msg.text() else {
        debug!(chat_id = %msg.chat.id, "Ignoring non-text message");
        return Ok(());
    };

    let gateway = TelegramGateway::new(bot);
    handle_text(&gateway, &catalog, msg.chat.id, text).await?;
    Ok(())
}

/// Classify a text message and respond to it
///
/// Returns the handled event, or `None` when the text was ignored.
pub async fn handle_text<G: Gateway + ?Sized>(
    gateway: &G,
    catalog: &Catalog,
    chat_id: ChatId,
    text: &str,
) -> Result<Option<NavigationEvent>> {
    let Some(event) = classify_text(text) else {
        debug!(chat_id = %chat_id, message_length = text.len(), "Ignoring free text message");
        return Ok(None);
    };

    match &event {
        NavigationEvent::StartCommand => send_start_prompt(gateway, chat_id).await?,
        NavigationEvent::StartButtonPress => send_first_menu(gateway, catalog, chat_id).await?,
        other => {
            warn!(chat_id = %chat_id, event = ?other, "Unexpected event for a text message");
            return Ok(None);
        }
    }

    info!(chat_id = %chat_id, event = ?event, view = ?event.resulting_view(), "Handled message");
    Ok(Some(event))
}

/// Reply to `/start` with the one-time trigger keyboard
pub async fn send_start_prompt<G: Gateway + ?Sized>(gateway: &G, chat_id: ChatId) -> Result<()> {
    gateway
        .send_text(
            chat_id,
            START_PROMPT,
            Some(Markup::TriggerPrompt(TRIGGER_LABEL.to_string())),
        )
        .await
}

/// Show the main menu after the trigger button, then drop the reply keyboard
pub async fn send_first_menu<G: Gateway + ?Sized>(
    gateway: &G,
    catalog: &Catalog,
    chat_id: ChatId,
) -> Result<()> {
    gateway
        .send_text(chat_id, MENU_PROMPT, Some(Markup::Menu(main_menu(catalog))))
        .await?;

    // The menu is already out; a failed cleanup only leaves a stale keyboard.
    if let Err(e) = gateway
        .send_text(chat_id, TRIGGER_CLEARED, Some(Markup::RemoveTrigger))
        .await
    {
        warn!(chat_id = %chat_id, error = %e, "Failed to remove trigger keyboard");
    }

    Ok(())
}
