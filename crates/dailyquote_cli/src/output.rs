//! Output formatting for quote commands.
//!
//! Provides human-readable text and JSON output.

use anyhow::Result;
use dailyquote_core::{Quote, ShareOutcome};
use serde::Serialize;
use std::fmt::Display;

const NO_QUOTE_MESSAGE: &str = "No quote available. Try refreshing.";
const NO_FAVORITES_MESSAGE: &str =
    "No favorites yet. Add one with `dailyquote favorite` when you see a quote you love.";

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {s}. Use 'text' or 'json'")),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct QuoteView<'a> {
    #[serde(flatten)]
    quote: &'a Quote,
    favorite: bool,
}

#[derive(Debug, Serialize)]
struct ShareView<'a> {
    id: &'a str,
    text: String,
    outcome: &'static str,
}

pub fn print_current(quote: Option<&Quote>, is_favorite: bool, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => match quote {
            Some(quote) => println!("{}", render_quote(quote, is_favorite)),
            None => println!("{NO_QUOTE_MESSAGE}"),
        },
        OutputFormat::Json => {
            let view = quote.map(|quote| QuoteView {
                quote,
                favorite: is_favorite,
            });
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }
    Ok(())
}

pub fn print_favorites(favorites: &[Quote], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if favorites.is_empty() {
                println!("{NO_FAVORITES_MESSAGE}");
            }
            for (index, quote) in favorites.iter().enumerate() {
                if index > 0 {
                    println!();
                }
                println!("[{}] {}", quote.id, render_quote(quote, false));
            }
        }
        OutputFormat::Json => {
            let views: Vec<QuoteView<'_>> = favorites
                .iter()
                .map(|quote| QuoteView {
                    quote,
                    favorite: true,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
    }
    Ok(())
}

pub fn print_favorite_change(quote: &Quote, is_favorite: bool, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let view = QuoteView {
            quote,
            favorite: is_favorite,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
    }
    Ok(())
}

pub fn print_share(quote: &Quote, outcome: ShareOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", quote.share_text()),
        OutputFormat::Json => {
            let view = ShareView {
                id: &quote.id,
                text: quote.share_text(),
                outcome: outcome_label(outcome),
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }
    Ok(())
}

fn outcome_label(outcome: ShareOutcome) -> &'static str {
    match outcome {
        ShareOutcome::Shared => "shared",
        ShareOutcome::CopiedToClipboard => "copied_to_clipboard",
        ShareOutcome::Failed => "failed",
    }
}

fn render_quote(quote: &Quote, is_favorite: bool) -> String {
    let mut rendered = format!("\u{201c}{}\u{201d}\n  \u{2014} {}", quote.text, quote.author);
    if let Some(source) = &quote.source {
        rendered.push_str(&format!(", {source}"));
    }
    if is_favorite {
        rendered.push_str("\n  \u{2665} favorite");
    }
    rendered
}
