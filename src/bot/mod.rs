//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Handles incoming commands and text messages
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and static texts
//! - `dialogue_manager`: Runs dialogue transitions and sends their replies
//! - `output`: Outbound chat operations and their Telegram implementation

pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod output;
pub mod ui_builder;

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::dialogue::Session;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

pub use dialogue_manager::{process_event, run_dialogue_event, EventContext};
pub use output::{ChatOutput, TelegramOutput};
pub use ui_builder::{Button, Keyboard};

/// Update handler tree. Every update enters the chat's dialogue first.
///
/// Expects `InMemStorage<Session>`, `Arc<dyn RecipeSource>` and `Arc<BotConfig>`
/// in the dispatcher dependencies.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    teloxide::dispatching::dialogue::enter::<Update, InMemStorage<Session>, Session, _>()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler))
}
