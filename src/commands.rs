//! Menu and command dispatch.
//!
//! Slash commands and inline button payloads both resolve to a [`MenuAction`], so
//! the conversation state machine never needs to know which one the user used.

use teloxide::utils::command::{BotCommands, ParseError};

use crate::dialogue::{Event, SearchMode};

/// Commands registered with Telegram
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show the main menu")]
    Start,
    #[command(description = "show help")]
    Help,
    #[command(description = "about this bot")]
    About,
    #[command(description = "get a random cocktail")]
    Random,
    #[command(description = "search cocktails by name")]
    Search,
    #[command(description = "list cocktails by first letter")]
    Letter,
    #[command(description = "look up an ingredient")]
    Ingredient,
    #[command(description = "list drinks made with an ingredient")]
    Drinks,
    #[command(description = "cancel the current search")]
    Cancel,
}

/// Named actions shared by commands and menu buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Help,
    About,
    Random,
    Search(SearchMode),
    Cancel,
    /// A slash command we do not know
    Unknown,
}

const CALLBACK_START: &str = "start";
const CALLBACK_HELP: &str = "help";
const CALLBACK_ABOUT: &str = "about";
const CALLBACK_RANDOM: &str = "random";
const CALLBACK_CANCEL: &str = "cancel";
const CALLBACK_SEARCH_NAME: &str = "search:name";
const CALLBACK_SEARCH_LETTER: &str = "search:letter";
const CALLBACK_SEARCH_INGREDIENT: &str = "search:ingredient";
const CALLBACK_SEARCH_DRINKS: &str = "search:drinks";

impl MenuAction {
    pub fn from_command(command: Command) -> Self {
        match command {
            Command::Start => MenuAction::Start,
            Command::Help => MenuAction::Help,
            Command::About => MenuAction::About,
            Command::Random => MenuAction::Random,
            Command::Search => MenuAction::Search(SearchMode::Name),
            Command::Letter => MenuAction::Search(SearchMode::Letter),
            Command::Ingredient => MenuAction::Search(SearchMode::Ingredient),
            Command::Drinks => MenuAction::Search(SearchMode::DrinksByIngredient),
            Command::Cancel => MenuAction::Cancel,
        }
    }

    /// Resolve an inline button payload. Unknown payloads yield `None`.
    pub fn from_callback(data: &str) -> Option<Self> {
        let action = match data {
            CALLBACK_START => MenuAction::Start,
            CALLBACK_HELP => MenuAction::Help,
            CALLBACK_ABOUT => MenuAction::About,
            CALLBACK_RANDOM => MenuAction::Random,
            CALLBACK_CANCEL => MenuAction::Cancel,
            CALLBACK_SEARCH_NAME => MenuAction::Search(SearchMode::Name),
            CALLBACK_SEARCH_LETTER => MenuAction::Search(SearchMode::Letter),
            CALLBACK_SEARCH_INGREDIENT => MenuAction::Search(SearchMode::Ingredient),
            CALLBACK_SEARCH_DRINKS => MenuAction::Search(SearchMode::DrinksByIngredient),
            _ => return None,
        };
        Some(action)
    }

    /// Payload carried by the button for this action
    pub fn callback_data(self) -> &'static str {
        match self {
            MenuAction::Start | MenuAction::Unknown => CALLBACK_START,
            MenuAction::Help => CALLBACK_HELP,
            MenuAction::About => CALLBACK_ABOUT,
            MenuAction::Random => CALLBACK_RANDOM,
            MenuAction::Cancel => CALLBACK_CANCEL,
            MenuAction::Search(SearchMode::Name) => CALLBACK_SEARCH_NAME,
            MenuAction::Search(SearchMode::Letter) => CALLBACK_SEARCH_LETTER,
            MenuAction::Search(SearchMode::Ingredient) => CALLBACK_SEARCH_INGREDIENT,
            MenuAction::Search(SearchMode::DrinksByIngredient) => CALLBACK_SEARCH_DRINKS,
        }
    }
}

/// Resolve the text of an incoming message into a conversation event.
///
/// Returns `None` for commands addressed to a different bot.
pub fn resolve_text(text: &str, bot_name: &str) -> Option<Event> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return Some(Event::Text(text.to_string()));
    }

    // Arguments after the command word are not used by any command
    let word = trimmed.split_whitespace().next().unwrap_or(trimmed);
    match Command::parse(word, bot_name) {
        Ok(command) => Some(Event::Action(MenuAction::from_command(command))),
        Err(ParseError::WrongBotName(_)) => None,
        Err(_) => Some(Event::Action(MenuAction::Unknown)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: &str = "CocktailBot";

    #[test]
    fn test_commands_resolve_to_actions() {
        assert_eq!(
            resolve_text("/start", BOT),
            Some(Event::Action(MenuAction::Start))
        );
        assert_eq!(
            resolve_text("/letter", BOT),
            Some(Event::Action(MenuAction::Search(SearchMode::Letter)))
        );
        assert_eq!(
            resolve_text("/drinks@CocktailBot", BOT),
            Some(Event::Action(MenuAction::Search(SearchMode::DrinksByIngredient)))
        );
        assert_eq!(
            resolve_text("/start deep-link-payload", BOT),
            Some(Event::Action(MenuAction::Start))
        );
    }

    #[test]
    fn test_unknown_and_foreign_commands() {
        assert_eq!(
            resolve_text("/shake", BOT),
            Some(Event::Action(MenuAction::Unknown))
        );
        assert_eq!(resolve_text("/start@OtherBot", BOT), None);
    }

    #[test]
    fn test_plain_text_is_kept_verbatim() {
        assert_eq!(
            resolve_text(" Blue Lagoon ", BOT),
            Some(Event::Text(" Blue Lagoon ".to_string()))
        );
    }

    #[test]
    fn test_callback_payloads_round_trip() {
        let actions = [
            MenuAction::Start,
            MenuAction::Help,
            MenuAction::About,
            MenuAction::Random,
            MenuAction::Cancel,
            MenuAction::Search(SearchMode::Name),
            MenuAction::Search(SearchMode::Letter),
            MenuAction::Search(SearchMode::Ingredient),
            MenuAction::Search(SearchMode::DrinksByIngredient),
        ];
        for action in actions {
            assert_eq!(MenuAction::from_callback(action.callback_data()), Some(action));
        }
    }

    #[test]
    fn test_unrecognized_payload_is_ignored() {
        assert_eq!(MenuAction::from_callback("edit_3"), None);
        assert_eq!(MenuAction::from_callback(""), None);
    }
}
