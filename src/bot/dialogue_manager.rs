//! Dialogue Manager module: runs conversation events against a chat.
//!
//! The state machine in [`crate::dialogue`] decides what to do; this module does
//! it (lookups, formatting, sending) and keeps the session store up to date.

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::cocktail_api::RecipeSource;
use crate::config::{BotConfig, DeliveryConfig};
use crate::dialogue::{transition, Event, Notice, Reply, Session, SessionDialogue};
use crate::recipe_formatter::{render_failure, render_result, OutgoingMessage};
use crate::recipe_model::Query;

use super::output::ChatOutput;
use super::ui_builder::{
    create_cancel_keyboard, create_menu_keyboard, menu_text, notice_text, prompt_text,
    reprompt_text, Keyboard,
};

/// Where an event came from
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    pub chat_id: i64,
    pub language_code: Option<&'a str>,
    /// Message carrying the pressed button, for callback events
    pub origin_message: Option<i32>,
}

/// Load the chat's session, process the event and store the new session.
/// Idle sessions are removed from storage.
pub async fn run_dialogue_event(
    output: &dyn ChatOutput,
    source: &dyn RecipeSource,
    config: &BotConfig,
    dialogue: SessionDialogue,
    event: Event,
    ctx: &EventContext<'_>,
) -> Result<()> {
    let session = dialogue.get_or_default().await?;
    let next = process_event(output, source, config, &session, event, ctx).await;

    if next.state.is_idle() {
        dialogue.exit().await?;
    } else {
        dialogue.update(next).await?;
    }

    Ok(())
}

/// Apply one event to a session and send every resulting reply.
///
/// Delivery failures are logged and do not stop the remaining replies, so the
/// returned session is always the one the state machine chose.
pub async fn process_event(
    output: &dyn ChatOutput,
    source: &dyn RecipeSource,
    config: &BotConfig,
    session: &Session,
    event: Event,
    ctx: &EventContext<'_>,
) -> Session {
    let step = transition(session, event, Utc::now(), config.session.ttl());
    debug!(
        user_id = ctx.chat_id,
        from = ?session.state,
        to = ?step.session.state,
        replies = step.replies.len(),
        "Dialogue transition"
    );

    for reply in &step.replies {
        if let Err(e) = execute_reply(output, source, config, reply, ctx).await {
            error!(user_id = ctx.chat_id, reply = ?reply, error = %e, "Failed to deliver reply");
        }
    }

    step.session
}

async fn execute_reply(
    output: &dyn ChatOutput,
    source: &dyn RecipeSource,
    config: &BotConfig,
    reply: &Reply,
    ctx: &EventContext<'_>,
) -> Result<()> {
    let language_code = ctx.language_code;

    match reply {
        Reply::Notice(Notice::Cancelled) => {
            // Replace the prompt the cancel button was attached to
            let text = notice_text(Notice::Cancelled, language_code);
            edit_or_send(output, ctx, &text, None).await
        }
        Reply::Notice(notice) => {
            output
                .send_text(&notice_text(*notice, language_code), None)
                .await
        }
        Reply::Prompt(mode) => {
            let keyboard = create_cancel_keyboard(language_code);
            edit_or_send(output, ctx, &prompt_text(*mode, language_code), Some(&keyboard)).await
        }
        Reply::Reprompt(mode, error) => {
            debug!(user_id = ctx.chat_id, mode = ?mode, error = ?error, "Rejected search input");
            let keyboard = create_cancel_keyboard(language_code);
            output
                .send_text(&reprompt_text(*mode, *error, language_code), Some(&keyboard))
                .await
        }
        Reply::Run(query) => run_query(output, source, config, query, ctx).await,
        Reply::Menu => {
            let keyboard = create_menu_keyboard(language_code);
            output
                .send_text(&menu_text(language_code), Some(&keyboard))
                .await
        }
    }
}

/// Edit the originating message when there is one, otherwise send a new message
async fn edit_or_send(
    output: &dyn ChatOutput,
    ctx: &EventContext<'_>,
    text: &str,
    keyboard: Option<&Keyboard>,
) -> Result<()> {
    if let Some(message_id) = ctx.origin_message {
        match output.edit_text(message_id, text, keyboard).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!(user_id = ctx.chat_id, message_id, error = %e, "Failed to edit message, sending a new one")
            }
        }
    }
    output.send_text(text, keyboard).await
}

async fn run_query(
    output: &dyn ChatOutput,
    source: &dyn RecipeSource,
    config: &BotConfig,
    query: &Query,
    ctx: &EventContext<'_>,
) -> Result<()> {
    info!(user_id = ctx.chat_id, query = %query, "Running recipe query");

    match source.fetch(query).await {
        Ok(result) => {
            let rendered = render_result(
                query,
                &result,
                config.delivery.message_chunk_limit,
                ctx.language_code,
            );
            info!(
                user_id = ctx.chat_id,
                query = %query,
                results = result.len(),
                messages = rendered.messages.len(),
                "Sending query results"
            );

            deliver_batched(output, &rendered.messages, &config.delivery, ctx).await?;
            if let Some(footer) = rendered.footer {
                output.send_text(&footer, None).await?;
            }
            Ok(())
        }
        Err(e) => {
            warn!(user_id = ctx.chat_id, query = %query, error = %e, "Lookup failed, telling user to retry later");
            output
                .send_text(&render_failure(ctx.language_code), None)
                .await
        }
    }
}

/// Send messages in batches of `batch_size`, pausing between batches
pub async fn deliver_batched(
    output: &dyn ChatOutput,
    messages: &[OutgoingMessage],
    delivery: &DeliveryConfig,
    ctx: &EventContext<'_>,
) -> Result<()> {
    let batch_size = delivery.batch_size.max(1);
    let batch_count = messages.len().div_ceil(batch_size);

    for (index, batch) in messages.chunks(batch_size).enumerate() {
        for message in batch {
            if let Err(e) = deliver_message(output, message, delivery, ctx).await {
                error!(user_id = ctx.chat_id, batch = index + 1, error = %e, "Failed to deliver result message");
            }
        }

        if index + 1 < batch_count {
            debug!(
                user_id = ctx.chat_id,
                batch = index + 1,
                batch_count,
                "Pausing between message batches"
            );
            tokio::time::sleep(delivery.batch_delay()).await;
        }
    }

    Ok(())
}

/// Send one message, as a photo when it has an image. A rejected photo falls back
/// to the same text without the image.
async fn deliver_message(
    output: &dyn ChatOutput,
    message: &OutgoingMessage,
    delivery: &DeliveryConfig,
    ctx: &EventContext<'_>,
) -> Result<()> {
    let Some(image_ref) = message.image_ref.as_deref() else {
        return output.send_text(&message.text, None).await;
    };

    let fits_caption = message.text.chars().count() <= delivery.caption_limit;
    let caption = fits_caption.then_some(message.text.as_str());

    match output.send_photo(image_ref, caption, None).await {
        Ok(()) if fits_caption => Ok(()),
        Ok(()) => output.send_text(&message.text, None).await,
        Err(e) => {
            warn!(
                user_id = ctx.chat_id,
                image_ref,
                error = %e,
                "Photo delivery failed, falling back to text"
            );
            output.send_text(&message.text, None).await
        }
    }
}
