//! UI Builder module for creating keyboards and static conversation texts

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::commands::MenuAction;
use crate::dialogue::{InputError, Notice, SearchMode, MAX_QUERY_CHARS};

/// A labelled button carrying a callback payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: String,
}

impl Button {
    fn for_action(label: String, action: MenuAction) -> Self {
        Self {
            label,
            action: action.callback_data().to_string(),
        }
    }
}

/// Platform-neutral inline keyboard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// All callback payloads, row by row
    pub fn actions(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flatten()
            .map(|button| button.action.as_str())
            .collect()
    }
}

/// Main menu with the five lookups plus help and about
pub fn create_menu_keyboard(language_code: Option<&str>) -> Keyboard {
    let button = |key: &str, action: MenuAction| Button::for_action(t_lang(key, language_code), action);

    Keyboard {
        rows: vec![
            vec![button("button-random", MenuAction::Random)],
            vec![
                button("button-search-name", MenuAction::Search(SearchMode::Name)),
                button("button-search-letter", MenuAction::Search(SearchMode::Letter)),
            ],
            vec![
                button("button-search-ingredient", MenuAction::Search(SearchMode::Ingredient)),
                button(
                    "button-drinks-by-ingredient",
                    MenuAction::Search(SearchMode::DrinksByIngredient),
                ),
            ],
            vec![
                button("button-help", MenuAction::Help),
                button("button-about", MenuAction::About),
            ],
        ],
    }
}

/// Single cancel button shown under input prompts
pub fn create_cancel_keyboard(language_code: Option<&str>) -> Keyboard {
    Keyboard {
        rows: vec![vec![Button::for_action(
            t_lang("button-cancel", language_code),
            MenuAction::Cancel,
        )]],
    }
}

pub fn to_inline_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.action.clone()))
            .collect::<Vec<_>>()
    }))
}

pub fn menu_text(language_code: Option<&str>) -> String {
    t_lang("menu-prompt", language_code)
}

pub fn prompt_text(mode: SearchMode, language_code: Option<&str>) -> String {
    t_lang(mode.prompt_key(), language_code)
}

/// Validation error followed by the original prompt
pub fn reprompt_text(mode: SearchMode, error: InputError, language_code: Option<&str>) -> String {
    let error_text = match error {
        InputError::TooLong => t_args_lang(
            error.message_key(),
            &[("max", &MAX_QUERY_CHARS.to_string())],
            language_code,
        ),
        InputError::Empty | InputError::NotSingleLetter => {
            t_lang(error.message_key(), language_code)
        }
    };
    format!("⚠️ {}\n\n{}", error_text, prompt_text(mode, language_code))
}

pub fn notice_text(notice: Notice, language_code: Option<&str>) -> String {
    match notice {
        Notice::Welcome => format!(
            "👋 <b>{}</b>\n\n{}",
            t_lang("welcome-title", language_code),
            t_lang("welcome-description", language_code)
        ),
        Notice::Help => format!(
            "<b>{}</b>\n\n{}",
            t_lang("help-title", language_code),
            t_lang("help-text", language_code)
        ),
        Notice::About => format!(
            "<b>{}</b>\n\n{}",
            t_lang("about-title", language_code),
            t_lang("about-text", language_code)
        ),
        Notice::Cancelled => format!("❌ {}", t_lang("search-cancelled", language_code)),
        Notice::Expired => format!("⌛ {}", t_lang("session-expired", language_code)),
        Notice::UnknownCommand => t_lang("unknown-command", language_code),
        Notice::IdleText => t_lang("idle-text", language_code),
        Notice::Unsupported => t_lang("unsupported-message", language_code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_offers_every_action() {
        let keyboard = create_menu_keyboard(None);
        let actions = keyboard.actions();

        assert_eq!(actions.len(), 7);
        for action in actions {
            assert!(MenuAction::from_callback(action).is_some());
        }
    }

    #[test]
    fn test_cancel_keyboard() {
        let keyboard = create_cancel_keyboard(None);
        assert_eq!(keyboard.actions(), vec!["cancel"]);
        assert!(keyboard.rows[0][0].label.contains("Cancel"));
    }

    #[test]
    fn test_reprompt_includes_error_and_prompt() {
        let text = reprompt_text(SearchMode::Letter, InputError::NotSingleLetter, None);
        assert!(text.contains("Please enter a single letter (A-Z)."));
        assert!(text.ends_with("Please enter a single letter (A-Z) to search for cocktails:"));
    }

    #[test]
    fn test_too_long_mentions_limit() {
        let text = reprompt_text(SearchMode::Name, InputError::TooLong, None);
        assert!(text.contains("100"));
    }

    #[test]
    fn test_french_menu_labels() {
        let keyboard = create_menu_keyboard(Some("fr-FR"));
        assert!(keyboard.rows[0][0].label.contains("hasard"));
    }
}
