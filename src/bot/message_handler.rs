//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::Me;
use tracing::debug;

use crate::cocktail_api::RecipeSource;
use crate::commands::resolve_text;
use crate::config::BotConfig;
use crate::dialogue::{Event, SessionDialogue};

use super::dialogue_manager::{run_dialogue_event, EventContext};
use super::output::TelegramOutput;

/// Turn a message into a conversation event, `None` when it should be ignored
pub fn message_event(msg: &Message, bot_name: &str) -> Option<Event> {
    match msg.text() {
        Some(text) => {
            debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");
            let event = resolve_text(text, bot_name);
            if event.is_none() {
                debug!(user_id = %msg.chat.id, "Ignoring command addressed to another bot");
            }
            event
        }
        None => {
            debug!(user_id = %msg.chat.id, "Received unsupported message type from user");
            Some(Event::Unsupported)
        }
    }
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    me: Me,
    dialogue: SessionDialogue,
    source: Arc<dyn RecipeSource>,
    config: Arc<BotConfig>,
) -> Result<()> {
    let Some(event) = message_event(&msg, me.username()) else {
        return Ok(());
    };

    // Extract user's language code from Telegram
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_ref())
        .map(|s| s.as_str());

    let ctx = EventContext {
        chat_id: msg.chat.id.0,
        language_code,
        origin_message: None,
    };
    let output = TelegramOutput::new(bot, msg.chat.id);

    run_dialogue_event(&output, source.as_ref(), &config, dialogue, event, &ctx).await
}
