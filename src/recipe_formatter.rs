//! Response formatting: turns lookup results into Telegram HTML messages.
//!
//! Everything here is a pure function of its inputs, so the same result always
//! renders to the same messages.

use teloxide::utils::html::escape;

use crate::cocktail_api::title_case;
use crate::localization::{t_args_lang, t_lang};
use crate::recipe_model::{
    DrinkSummary, IngredientRecord, Query, QueryKind, QueryResult, RecipeRecord,
};

/// Longest ingredient description shown before truncation
pub const MAX_DESCRIPTION_CHARS: usize = 900;

/// One outgoing chat message, optionally sent as a photo with `text` as caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub image_ref: Option<String>,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_ref: None,
        }
    }
}

/// All messages produced for one lookup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedReply {
    pub messages: Vec<OutgoingMessage>,
    /// Sent after every message has been delivered
    pub footer: Option<String>,
}

/// Render the outcome of a successful lookup
pub fn render_result(
    query: &Query,
    result: &QueryResult,
    chunk_limit: usize,
    language_code: Option<&str>,
) -> RenderedReply {
    if result.is_empty() {
        return RenderedReply {
            messages: vec![OutgoingMessage::text(no_results_text(query, language_code))],
            footer: None,
        };
    }

    match result {
        QueryResult::Recipes(records) if query.kind == QueryKind::SearchByLetter => {
            RenderedReply {
                messages: format_letter_listing(
                    query.parameter_or_empty(),
                    records,
                    chunk_limit,
                    language_code,
                )
                .into_iter()
                .map(OutgoingMessage::text)
                .collect(),
                footer: None,
            }
        }
        QueryResult::Recipes(records) => RenderedReply {
            messages: records
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    format_recipe(record, position(i, records.len()), language_code)
                })
                .collect(),
            footer: None,
        },
        QueryResult::Ingredients(records) => RenderedReply {
            messages: records
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    format_ingredient(record, position(i, records.len()), language_code)
                })
                .collect(),
            footer: None,
        },
        QueryResult::Drinks(drinks) => RenderedReply {
            messages: drinks
                .iter()
                .enumerate()
                .map(|(i, drink)| format_drink_summary(drink, i + 1, drinks.len(), language_code))
                .collect(),
            footer: Some(t_args_lang(
                "drinks-complete",
                &[
                    ("count", &drinks.len().to_string()),
                    ("ingredient", &escape(&title_case(query.parameter_or_empty()))),
                ],
                language_code,
            )),
        },
    }
}

/// Friendly text for a lookup that could not be completed
pub fn render_failure(language_code: Option<&str>) -> String {
    t_lang("fetch-failed", language_code)
}

/// "No matches" text for the query kind
pub fn no_results_text(query: &Query, language_code: Option<&str>) -> String {
    let parameter = escape(query.parameter_or_empty());
    match query.kind {
        QueryKind::RandomDrink => t_lang("no-results-random", language_code),
        QueryKind::SearchByName => {
            t_args_lang("no-results-name", &[("query", &parameter)], language_code)
        }
        QueryKind::SearchByLetter => {
            t_args_lang("no-results-letter", &[("letter", &parameter)], language_code)
        }
        QueryKind::SearchByIngredient => {
            t_args_lang("no-ingredients", &[("query", &parameter)], language_code)
        }
        QueryKind::DrinksByIngredient => {
            t_args_lang("no-drinks", &[("ingredient", &parameter)], language_code)
        }
    }
}

/// Numbering is only shown for multi-record results
fn position(index: usize, total: usize) -> Option<(usize, usize)> {
    (total > 1).then_some((index + 1, total))
}

fn position_line(position: (usize, usize), language_code: Option<&str>) -> String {
    let (index, total) = position;
    format!(
        "<i>{}</i>",
        t_args_lang(
            "result-position",
            &[("index", &index.to_string()), ("total", &total.to_string())],
            language_code,
        )
    )
}

/// Format a full recipe
pub fn format_recipe(
    record: &RecipeRecord,
    position: Option<(usize, usize)>,
    language_code: Option<&str>,
) -> OutgoingMessage {
    let mut lines = Vec::new();

    if let Some(position) = position {
        lines.push(position_line(position, language_code));
    }
    lines.push(format!("🍸 <b>{}</b>", escape(&record.name)));

    if let Some(category) = &record.category {
        let category = match &record.alcoholic {
            Some(alcoholic) => format!("{} ({})", escape(category), escape(alcoholic)),
            None => escape(category),
        };
        lines.push(format!(
            "<b>{}:</b> {}",
            t_lang("label-category", language_code),
            category
        ));
    }
    if let Some(glass) = &record.glass {
        lines.push(format!(
            "<b>{}:</b> {}",
            t_lang("label-glass", language_code),
            escape(glass)
        ));
    }

    if !record.ingredients.is_empty() {
        lines.push(String::new());
        lines.push(format!("<b>{}:</b>", t_lang("label-ingredients", language_code)));
        for ingredient in &record.ingredients {
            let line = match &ingredient.measure {
                Some(measure) => format!("• {} {}", escape(measure), escape(&ingredient.name)),
                None => format!("• {}", escape(&ingredient.name)),
            };
            lines.push(line);
        }
    }

    if let Some(instructions) = &record.instructions {
        lines.push(String::new());
        lines.push(format!("<b>{}:</b>", t_lang("label-instructions", language_code)));
        lines.push(escape(instructions));
    }

    OutgoingMessage {
        text: lines.join("\n"),
        image_ref: record.image_ref.clone(),
    }
}

/// Format ingredient details
pub fn format_ingredient(
    record: &IngredientRecord,
    position: Option<(usize, usize)>,
    language_code: Option<&str>,
) -> OutgoingMessage {
    let mut lines = Vec::new();

    if let Some(position) = position {
        lines.push(position_line(position, language_code));
    }
    lines.push(format!("🧪 <b>{}</b>", escape(&record.name)));

    if let Some(kind) = &record.kind {
        lines.push(format!(
            "<b>{}:</b> {}",
            t_lang("label-type", language_code),
            escape(kind)
        ));
    }
    if let Some(is_alcoholic) = record.is_alcoholic {
        let value = if is_alcoholic { "value-yes" } else { "value-no" };
        lines.push(format!(
            "<b>{}:</b> {}",
            t_lang("label-alcohol", language_code),
            t_lang(value, language_code)
        ));
    }
    if let Some(abv) = &record.abv {
        lines.push(format!(
            "<b>{}:</b> {}%",
            t_lang("label-abv", language_code),
            escape(abv)
        ));
    }
    if let Some(description) = &record.description {
        lines.push(String::new());
        lines.push(format!("<b>{}:</b>", t_lang("label-description", language_code)));
        lines.push(escape(&truncate_chars(description, MAX_DESCRIPTION_CHARS)));
    }

    OutgoingMessage::text(lines.join("\n"))
}

/// Format one entry of a drinks-by-ingredient listing
pub fn format_drink_summary(
    drink: &DrinkSummary,
    index: usize,
    total: usize,
    language_code: Option<&str>,
) -> OutgoingMessage {
    OutgoingMessage {
        text: format!(
            "{}\n🍹 <b>{}</b>",
            position_line((index, total), language_code),
            escape(&drink.name)
        ),
        image_ref: drink.image_ref.clone(),
    }
}

/// Name-only listing for a first-letter search, split into messages of at most
/// `limit` characters without breaking a line
pub fn format_letter_listing(
    letter: &str,
    records: &[RecipeRecord],
    limit: usize,
    language_code: Option<&str>,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(format!(
        "<b>{}</b>",
        t_args_lang(
            "letter-header",
            &[("letter", &escape(letter)), ("count", &records.len().to_string())],
            language_code,
        )
    ));
    lines.push(String::new());
    lines.extend(records.iter().map(|record| format!("🍸 {}", escape(&record.name))));

    chunk_lines(&lines, limit)
}

/// Pack lines into chunks no longer than `limit` characters. Lines are never
/// split; a single line over the limit is truncated.
pub fn chunk_lines(lines: &[String], limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in lines {
        let line = truncate_chars(line, limit);
        let line_len = line.chars().count();
        let needed = if current.is_empty() { line_len } else { line_len + 1 };

        if !current.is_empty() && current_len + needed > limit {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(&line);
        current_len += line_len;
    }

    if !current.trim().is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}
