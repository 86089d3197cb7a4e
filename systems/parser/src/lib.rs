#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Program parsing system that validates player-authored command
//! sequences.
//!
//! Programs arrive either as an ordered list of block tokens assembled in
//! the shell, or as raw text expected to deserialize to a JSON array of
//! command tokens. Both paths resolve every token against the closed
//! [`Command`] vocabulary before the replay system ever sees the program:
//! unknown tokens are rejected eagerly as [`ParseError::UnknownCommand`]
//! rather than skipped silently mid-run.

use std::{error::Error, fmt};

use code_quest_core::Command;
use serde_json::Value;

/// Parses a program from block tokens or raw JSON text.
///
/// Raw text that is non-empty after trimming takes precedence over the
/// block list for the run; blank text falls back to the blocks. Parse
/// failures carry the single narration line the shell appends to the log,
/// and leave the world untouched so another run can start immediately.
pub fn parse(blocks: &[String], raw_text: &str) -> Result<Vec<Command>, ParseError> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return blocks.iter().map(|token| resolve_token(token)).collect();
    }

    let value: Value = serde_json::from_str(trimmed).map_err(ParseError::MalformedInput)?;
    let Value::Array(items) = value else {
        return Err(ParseError::NotASequence);
    };

    items.iter().map(resolve_item).collect()
}

fn resolve_item(item: &Value) -> Result<Command, ParseError> {
    match item {
        Value::String(token) => resolve_token(token),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn resolve_token(token: &str) -> Result<Command, ParseError> {
    Command::from_token(token).ok_or_else(|| ParseError::UnknownCommand(token.to_owned()))
}

/// Errors that can occur while parsing a player program.
#[derive(Debug)]
pub enum ParseError {
    /// The raw text was not valid JSON.
    MalformedInput(serde_json::Error),
    /// The text parsed but did not yield an ordered sequence.
    NotASequence,
    /// A token does not name a command in the vocabulary.
    UnknownCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput(_) => write!(f, "Invalid JSON format."),
            Self::NotASequence => write!(f, "Code must be an array of commands."),
            Self::UnknownCommand(token) => write!(f, "Unknown command '{token}'."),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedInput(error) => Some(error),
            Self::NotASequence | Self::UnknownCommand(_) => None,
        }
    }
}
