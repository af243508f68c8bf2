use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use cocktails::bot;
use cocktails::cocktail_api::{CocktailClient, RecipeSource};
use cocktails::commands::Command;
use cocktails::config::Settings;
use cocktails::dialogue::Session;
use cocktails::localization::init_localization;
use cocktails::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let settings = Settings::from_env()?;
    init_tracing(settings.debug_mode);

    info!("Starting Cocktail Telegram Bot");
    info!(config = ?settings.bot, "Loaded configuration");

    init_localization()?;

    let source: Arc<dyn RecipeSource> = Arc::new(CocktailClient::new(&settings.bot.api)?);
    let config = Arc::new(settings.bot.clone());

    // Initialize the bot
    let bot = Bot::new(&settings.bot_token);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![InMemStorage::<Session>::new(), source, config])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
