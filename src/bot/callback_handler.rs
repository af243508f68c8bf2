//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

use crate::cocktail_api::RecipeSource;
use crate::commands::MenuAction;
use crate::config::BotConfig;
use crate::dialogue::{Event, SessionDialogue};

use super::dialogue_manager::{run_dialogue_event, EventContext};
use super::output::TelegramOutput;

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: SessionDialogue,
    source: Arc<dyn RecipeSource>,
    config: Arc<BotConfig>,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    // Answer the callback query to remove the loading state
    bot.answer_callback_query(q.id.clone()).await?;

    let data = q.data.as_deref().unwrap_or("");
    let Some(action) = MenuAction::from_callback(data) else {
        debug!(user_id = %q.from.id, data, "Ignoring unrecognized callback payload");
        return Ok(());
    };

    let ctx = EventContext {
        chat_id: dialogue.chat_id().0,
        language_code: q.from.language_code.as_deref(),
        origin_message: q.message.as_ref().map(|msg| msg.id().0),
    };
    let output = TelegramOutput::new(bot, dialogue.chat_id());

    run_dialogue_event(
        &output,
        source.as_ref(),
        &config,
        dialogue,
        Event::Action(action),
        &ctx,
    )
    .await
}
