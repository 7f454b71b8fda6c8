//! Commands recognised in chat text and the replies they produce.

use serde::{Deserialize, Serialize};

/// A structured command derived from the text of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "item", rename_all = "snake_case")]
pub enum Command {
    /// Append an item to the list.
    Add(String),
    /// Remove the first occurrence of an item.
    Delete(String),
    /// Show the current list.
    List,
    /// The add keyword was sent without an item name.
    MissingItem,
    /// Anything that matched no other pattern.
    Help,
}

impl Command {
    /// Whether executing this command touches the list store.
    pub const fn needs_store(&self) -> bool {
        matches!(self, Self::Add(_) | Self::Delete(_) | Self::List)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Delete(_) => "delete",
            Self::List => "list",
            Self::MissingItem => "missing_item",
            Self::Help => "help",
        }
    }

    pub fn item(&self) -> Option<&str> {
        match self {
            Self::Add(item) | Self::Delete(item) => Some(item),
            Self::List | Self::MissingItem | Self::Help => None,
        }
    }
}

/// Text reply sent back through the platform for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Self { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_store() {
        assert!(Command::Add("milk".into()).needs_store());
        assert!(Command::Delete("milk".into()).needs_store());
        assert!(Command::List.needs_store());
        assert!(!Command::Help.needs_store());
        assert!(!Command::MissingItem.needs_store());
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_value(Command::Add("牛乳".into())).unwrap();
        assert_eq!(json, serde_json::json!({"command": "add", "item": "牛乳"}));

        let json = serde_json::to_value(Command::List).unwrap();
        assert_eq!(json, serde_json::json!({"command": "list"}));
    }
}
