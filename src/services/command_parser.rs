//! Classifies chat text into a [`Command`].
//!
//! Matching is case-sensitive and anchored to the whole trimmed text. Patterns
//! are tried in a fixed order (add, delete, list) and the first hit wins, so
//! text starting with the delete keyword can never parse as an add.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::models::Command;

/// Keyword that starts an add command.
pub const ADD_KEYWORD: &str = "追加";
/// Keyword that starts a delete command.
pub const DELETE_KEYWORD: &str = "削除";
/// Exact text of the list command.
pub const LIST_KEYWORD: &str = "一覧";

static ADD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^追加\s+(.+)$").expect("add pattern is valid"));
static DELETE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^削除\s+(.+)$").expect("delete pattern is valid"));

/// Parse raw message text into a command.
///
/// Only leading and trailing whitespace is removed before matching; internal
/// whitespace of an item name is preserved.
pub fn parse(text: &str) -> Command {
    let text = text.trim();

    if let Some(item) = capture(&ADD_PATTERN, text) {
        return if item.is_empty() {
            Command::MissingItem
        } else {
            Command::Add(item.to_string())
        };
    }
    // Trimming swallows the separator of "追加   ", leaving the bare keyword.
    if text == ADD_KEYWORD {
        return Command::MissingItem;
    }

    if let Some(item) = capture(&DELETE_PATTERN, text) {
        if !item.is_empty() {
            return Command::Delete(item.to_string());
        }
    }

    if text == LIST_KEYWORD {
        return Command::List;
    }

    Command::Help
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}
