//! # Cocktail Telegram Bot
//!
//! A Telegram bot that looks up cocktail recipes, ingredients and drinks made
//! with an ingredient in TheCocktailDB, driven by a small per-chat dialogue.

pub mod api_errors;
pub mod bot;
pub mod cocktail_api;
pub mod commands;
pub mod config;
pub mod dialogue;
pub mod localization;
pub mod logging;
pub mod recipe_formatter;
pub mod recipe_model;
