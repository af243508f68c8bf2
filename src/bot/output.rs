//! Outbound chat operations.
//!
//! The conversation executor talks to a [`ChatOutput`]; [`TelegramOutput`] is the
//! real implementation, tests use in-memory recorders.

use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ParseMode};

use super::ui_builder::{to_inline_markup, Keyboard};

/// Messages a conversation can send to its chat. Text is Telegram HTML.
#[async_trait]
pub trait ChatOutput: Send + Sync {
    async fn send_text(&self, text: &str, keyboard: Option<&Keyboard>) -> Result<()>;

    async fn send_photo(
        &self,
        image_ref: &str,
        caption: Option<&str>,
        keyboard: Option<&Keyboard>,
    ) -> Result<()>;

    async fn edit_text(&self, message_id: i32, text: &str, keyboard: Option<&Keyboard>)
        -> Result<()>;
}

/// [`ChatOutput`] bound to one Telegram chat
pub struct TelegramOutput {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramOutput {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl ChatOutput for TelegramOutput {
    async fn send_text(&self, text: &str, keyboard: Option<&Keyboard>) -> Result<()> {
        let request = self
            .bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Html);

        match keyboard {
            Some(keyboard) => request.reply_markup(to_inline_markup(keyboard)).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn send_photo(
        &self,
        image_ref: &str,
        caption: Option<&str>,
        keyboard: Option<&Keyboard>,
    ) -> Result<()> {
        let url = reqwest::Url::parse(image_ref)
            .with_context(|| format!("Invalid image URL: {image_ref}"))?;
        let mut request = self
            .bot
            .send_photo(self.chat_id, InputFile::url(url))
            .parse_mode(ParseMode::Html);

        if let Some(caption) = caption {
            request = request.caption(caption);
        }
        match keyboard {
            Some(keyboard) => request.reply_markup(to_inline_markup(keyboard)).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn edit_text(
        &self,
        message_id: i32,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<()> {
        let request = self
            .bot
            .edit_message_text(self.chat_id, MessageId(message_id), text)
            .parse_mode(ParseMode::Html);

        match keyboard {
            Some(keyboard) => request.reply_markup(to_inline_markup(keyboard)).await?,
            None => request.await?,
        };
        Ok(())
    }
}
