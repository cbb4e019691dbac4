//! # Messaging Gateway
//!
//! The small set of chat primitives the navigation handlers need. The
//! production implementation wraps a teloxide [`Bot`]; tests substitute a
//! recording fake.

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, InputFile, MessageId, ReplyMarkup};

use crate::bot::ui_builder::Markup;
use crate::images::Photo;

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str, markup: Option<Markup>) -> Result<()>;

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: Photo,
        caption: &str,
        markup: Option<Markup>,
    ) -> Result<()>;

    /// May fail for old messages or messages the bot does not own
    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<()>;

    /// Stop the client-side loading indicator of a callback button
    async fn answer_callback(&self, callback_id: &str) -> Result<()>;
}

/// Gateway backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Gateway for TelegramGateway {
    async fn send_text(&self, chat_id: ChatId, text: &str, markup: Option<Markup>) -> Result<()> {
        let request = self.bot.send_message(chat_id, text.to_string());
        match markup {
            Some(markup) => request.reply_markup(ReplyMarkup::from(markup)).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: Photo,
        caption: &str,
        markup: Option<Markup>,
    ) -> Result<()> {
        let file = InputFile::memory(photo.bytes).file_name(photo.file_name);
        let request = self
            .bot
            .send_photo(chat_id, file)
            .caption(caption.to_string());
        match markup {
            Some(markup) => request.reply_markup(ReplyMarkup::from(markup)).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        self.bot.delete_message(chat_id, message_id).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()))
            .await?;
        Ok(())
    }
}
