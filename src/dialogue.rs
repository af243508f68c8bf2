//! Conversation dialogue module: per-chat session state and its transition function.
//!
//! [`transition`] is pure. It decides the next [`Session`] and the list of
//! [`Reply`] values to produce; the bot layer executes those replies and stores
//! the session.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::commands::MenuAction;
use crate::recipe_model::{Query, QueryKind};

/// Longest accepted name or ingredient query
pub const MAX_QUERY_CHARS: usize = 100;

/// Searches that need one more piece of text from the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchMode {
    Name,
    Letter,
    Ingredient,
    DrinksByIngredient,
}

impl SearchMode {
    pub const ALL: [SearchMode; 4] = [
        SearchMode::Name,
        SearchMode::Letter,
        SearchMode::Ingredient,
        SearchMode::DrinksByIngredient,
    ];

    pub fn query_kind(self) -> QueryKind {
        match self {
            SearchMode::Name => QueryKind::SearchByName,
            SearchMode::Letter => QueryKind::SearchByLetter,
            SearchMode::Ingredient => QueryKind::SearchByIngredient,
            SearchMode::DrinksByIngredient => QueryKind::DrinksByIngredient,
        }
    }

    pub fn awaiting_state(self) -> ConversationState {
        match self {
            SearchMode::Name => ConversationState::AwaitingNameQuery,
            SearchMode::Letter => ConversationState::AwaitingLetterQuery,
            SearchMode::Ingredient => ConversationState::AwaitingIngredientQuery,
            SearchMode::DrinksByIngredient => ConversationState::AwaitingIngredientForDrinks,
        }
    }

    /// Localization key of the input prompt
    pub fn prompt_key(self) -> &'static str {
        match self {
            SearchMode::Name => "prompt-name",
            SearchMode::Letter => "prompt-letter",
            SearchMode::Ingredient => "prompt-ingredient",
            SearchMode::DrinksByIngredient => "prompt-drinks",
        }
    }
}

/// Represents the conversation state of one chat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingNameQuery,
    AwaitingLetterQuery,
    AwaitingIngredientQuery,
    AwaitingIngredientForDrinks,
}

impl ConversationState {
    /// The search this state is collecting input for, `None` when idle
    pub fn awaiting(self) -> Option<SearchMode> {
        match self {
            ConversationState::Idle => None,
            ConversationState::AwaitingNameQuery => Some(SearchMode::Name),
            ConversationState::AwaitingLetterQuery => Some(SearchMode::Letter),
            ConversationState::AwaitingIngredientQuery => Some(SearchMode::Ingredient),
            ConversationState::AwaitingIngredientForDrinks => Some(SearchMode::DrinksByIngredient),
        }
    }

    pub fn is_idle(self) -> bool {
        self == ConversationState::Idle
    }
}

/// Per-chat conversational state record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub state: ConversationState,
    /// When the current state was entered
    pub entered_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::idle(Utc::now())
    }
}

impl Session {
    pub fn idle(now: DateTime<Utc>) -> Self {
        Self {
            state: ConversationState::Idle,
            entered_at: now,
        }
    }

    pub fn awaiting(mode: SearchMode, now: DateTime<Utc>) -> Self {
        Self {
            state: mode.awaiting_state(),
            entered_at: now,
        }
    }

    /// An awaiting session older than `ttl` no longer accepts input
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: Option<Duration>) -> bool {
        match ttl {
            Some(ttl) if !self.state.is_idle() => now - self.entered_at > ttl,
            _ => false,
        }
    }
}

/// Type alias for our session dialogue
pub type SessionDialogue = Dialogue<Session, InMemStorage<Session>>;

/// Why a piece of user input was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputError {
    Empty,
    NotSingleLetter,
    TooLong,
}

impl InputError {
    pub fn message_key(self) -> &'static str {
        match self {
            InputError::Empty => "invalid-empty",
            InputError::NotSingleLetter => "invalid-letter",
            InputError::TooLong => "invalid-too-long",
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Empty => write!(f, "Input is empty"),
            InputError::NotSingleLetter => write!(f, "Input is not a single letter"),
            InputError::TooLong => write!(f, "Input is longer than {MAX_QUERY_CHARS} characters"),
        }
    }
}

impl std::error::Error for InputError {}

/// Validates a name or ingredient query
pub fn validate_query(input: &str) -> Result<String, InputError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    if trimmed.chars().count() > MAX_QUERY_CHARS {
        return Err(InputError::TooLong);
    }

    Ok(trimmed.to_string())
}

/// Validates a first-letter query and normalizes it to uppercase
pub fn validate_letter(input: &str) -> Result<String, InputError> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();

    match (chars.next(), chars.next()) {
        (None, _) => Err(InputError::Empty),
        (Some(letter), None) if letter.is_alphabetic() => Ok(letter.to_uppercase().collect()),
        _ => Err(InputError::NotSingleLetter),
    }
}

pub fn validate_input(mode: SearchMode, input: &str) -> Result<String, InputError> {
    match mode {
        SearchMode::Letter => validate_letter(input),
        SearchMode::Name | SearchMode::Ingredient | SearchMode::DrinksByIngredient => {
            validate_query(input)
        }
    }
}

/// Inbound event after commands and buttons have been resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Action(MenuAction),
    Text(String),
    /// A message without text (photo, sticker, ...)
    Unsupported,
}

/// Static messages the conversation can show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Welcome,
    Help,
    About,
    Cancelled,
    Expired,
    UnknownCommand,
    IdleText,
    Unsupported,
}

/// One thing to send back to the chat
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Notice(Notice),
    Prompt(SearchMode),
    Reprompt(SearchMode, InputError),
    Run(Query),
    Menu,
}

/// Result of feeding one event to a session
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub session: Session,
    pub replies: Vec<Reply>,
}

impl Step {
    fn idle(now: DateTime<Utc>, replies: Vec<Reply>) -> Self {
        Self {
            session: Session::idle(now),
            replies,
        }
    }

    fn stay(session: &Session, replies: Vec<Reply>) -> Self {
        Self {
            session: session.clone(),
            replies,
        }
    }
}

/// Compute the next session and replies for an event
pub fn transition(
    session: &Session,
    event: Event,
    now: DateTime<Utc>,
    ttl: Option<Duration>,
) -> Step {
    let awaiting = session.state.awaiting();

    match event {
        Event::Action(MenuAction::Start) => {
            Step::idle(now, vec![Reply::Notice(Notice::Welcome), Reply::Menu])
        }
        Event::Action(MenuAction::Help) => {
            Step::idle(now, vec![Reply::Notice(Notice::Help), Reply::Menu])
        }
        Event::Action(MenuAction::About) => {
            Step::idle(now, vec![Reply::Notice(Notice::About), Reply::Menu])
        }
        Event::Action(MenuAction::Random) => {
            Step::idle(now, vec![Reply::Run(Query::random()), Reply::Menu])
        }
        Event::Action(MenuAction::Search(mode)) => Step {
            session: Session::awaiting(mode, now),
            replies: vec![Reply::Prompt(mode)],
        },
        Event::Action(MenuAction::Cancel) => match awaiting {
            Some(_) => Step::idle(now, vec![Reply::Notice(Notice::Cancelled), Reply::Menu]),
            None => Step::idle(now, vec![Reply::Menu]),
        },
        Event::Action(MenuAction::Unknown) => match awaiting {
            Some(mode) => Step::stay(
                session,
                vec![Reply::Notice(Notice::UnknownCommand), Reply::Prompt(mode)],
            ),
            None => Step::idle(now, vec![Reply::Notice(Notice::UnknownCommand), Reply::Menu]),
        },
        Event::Unsupported => match awaiting {
            Some(mode) => Step::stay(
                session,
                vec![Reply::Notice(Notice::Unsupported), Reply::Prompt(mode)],
            ),
            None => Step::idle(now, vec![Reply::Notice(Notice::Unsupported), Reply::Menu]),
        },
        Event::Text(text) => match awaiting {
            None => Step::idle(now, vec![Reply::Notice(Notice::IdleText), Reply::Menu]),
            Some(_) if session.is_stale(now, ttl) => {
                Step::idle(now, vec![Reply::Notice(Notice::Expired), Reply::Menu])
            }
            Some(mode) => match validate_input(mode, &text) {
                Ok(parameter) => Step::idle(
                    now,
                    vec![
                        Reply::Run(Query::new(mode.query_kind(), parameter)),
                        Reply::Menu,
                    ],
                ),
                Err(error) => Step::stay(session, vec![Reply::Reprompt(mode, error)]),
            },
        },
    }
}
