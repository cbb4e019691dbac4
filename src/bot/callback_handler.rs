//! Callback Handler module for processing inline menu selections

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::MessageId;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogEntry};
use crate::gateway::{Gateway, TelegramGateway};
use crate::images::ImageStore;
use crate::navigation::{classify_callback, NavigationEvent};

use super::ui_builder::{back_only_menu, main_menu, Markup, MENU_PROMPT, UNKNOWN_SELECTION_NOTICE};

/// The message an inline button was attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Dispatcher endpoint for callback queries
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    catalog: Arc<Catalog>,
    images: Arc<ImageStore>,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    let origin = q.message.as_ref().map(|msg| Origin {
        chat_id: msg.chat().id,
        message_id: msg.id(),
    });
    let data = q.data.as_deref().unwrap_or("");

    let gateway = TelegramGateway::new(bot);
    handle_callback(&gateway, &catalog, &images, &q.id.to_string(), origin, data).await?;
    Ok(())
}

/// Acknowledge a menu selection and respond to it
///
/// Returns the handled event. Without an origin message there is no chat to
/// answer in, so the selection is only acknowledged.
pub async fn handle_callback<G: Gateway + ?Sized>(
    gateway: &G,
    catalog: &Catalog,
    images: &ImageStore,
    callback_id: &str,
    origin: Option<Origin>,
    data: &str,
) -> Result<NavigationEvent> {
    // Telegram rejects answers to queries replayed after a restart; the
    // selection still gets a response.
    if let Err(e) = gateway.answer_callback(callback_id).await {
        debug!(callback_id = %callback_id, error = %e, "Could not answer callback query");
    }

    let event = classify_callback(catalog, data);

    let Some(origin) = origin else {
        warn!(event = ?event, "Callback message is unavailable, nothing to update");
        return Ok(event);
    };

    match &event {
        NavigationEvent::ModuleSelected(name) => match catalog.lookup(name) {
            Some(entry) => {
                delete_best_effort(gateway, origin).await;
                send_module(gateway, images, origin.chat_id, entry).await?;
            }
            None => send_unknown_selection(gateway, catalog, origin.chat_id).await?,
        },
        NavigationEvent::BackSelected => {
            delete_best_effort(gateway, origin).await;
            send_main_menu(gateway, catalog, origin.chat_id).await?;
        }
        NavigationEvent::UnknownSelection(raw) => {
            debug!(chat_id = %origin.chat_id, data = %raw, "Unknown callback data");
            send_unknown_selection(gateway, catalog, origin.chat_id).await?;
        }
        NavigationEvent::StartCommand | NavigationEvent::StartButtonPress => {}
    }

    info!(chat_id = %origin.chat_id, event = ?event, view = ?event.resulting_view(), "Handled callback");
    Ok(event)
}

/// Delete the message the menu was on, ignoring failures
///
/// Telegram refuses to delete messages older than 48 hours, and the user may
/// have deleted it already. Neither should stop the next menu from being sent.
async fn delete_best_effort<G: Gateway + ?Sized>(gateway: &G, origin: Origin) {
    if let Err(e) = gateway.delete_message(origin.chat_id, origin.message_id).await {
        debug!(chat_id = %origin.chat_id, error = %e, "Could not delete previous message");
    }
}

/// Send a module description, as a photo caption when its image is available
pub async fn send_module<G: Gateway + ?Sized>(
    gateway: &G,
    images: &ImageStore,
    chat_id: ChatId,
    entry: &CatalogEntry,
) -> Result<()> {
    let markup = Some(Markup::Menu(back_only_menu()));

    match entry.image.as_deref().and_then(|file| images.load(file)) {
        Some(photo) => gateway.send_photo(chat_id, photo, &entry.text, markup).await,
        None => gateway.send_text(chat_id, &entry.text, markup).await,
    }
}

pub async fn send_main_menu<G: Gateway + ?Sized>(
    gateway: &G,
    catalog: &Catalog,
    chat_id: ChatId,
) -> Result<()> {
    gateway
        .send_text(chat_id, MENU_PROMPT, Some(Markup::Menu(main_menu(catalog))))
        .await
}

async fn send_unknown_selection<G: Gateway + ?Sized>(
    gateway: &G,
    catalog: &Catalog,
    chat_id: ChatId,
) -> Result<()> {
    gateway
        .send_text(
            chat_id,
            UNKNOWN_SELECTION_NOTICE,
            Some(Markup::Menu(main_menu(catalog))),
        )
        .await
}
