//! Shopping list snapshot and its chat rendering.

use serde::{Deserialize, Serialize};

/// Rendered in place of the list body when a partition holds no items.
pub const EMPTY_LIST_TEXT: &str = "リストは空です。";

/// A point-in-time copy of one partition's items, in insertion order.
///
/// Snapshots are never written back; by the time a reply reaches the user the
/// stored list may already have moved on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    items: Vec<String>,
}

impl ShoppingList {
    pub const fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the first item equal to `item` (exact, case-sensitive).
    pub fn position(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|existing| existing == item)
    }

    /// Render the list body shown after every list-affecting command.
    pub fn render(&self) -> String {
        if self.items.is_empty() {
            return EMPTY_LIST_TEXT.to_string();
        }
        format!("現在のリスト（{}）:\n- {}", self.items.len(), self.items.join("\n- "))
    }
}

impl From<Vec<String>> for ShoppingList {
    fn from(items: Vec<String>) -> Self {
        Self::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(ShoppingList::default().render(), "リストは空です。");
    }

    #[test]
    fn test_render_items_in_order() {
        let list = ShoppingList::new(vec!["牛乳".into(), "パン".into()]);
        assert_eq!(list.render(), "現在のリスト（2）:\n- 牛乳\n- パン");
    }

    #[test]
    fn test_position_is_exact_match() {
        let list = ShoppingList::new(vec!["Milk".into(), "milk".into(), "milk".into()]);
        assert_eq!(list.position("milk"), Some(1));
        assert_eq!(list.position("MILK"), None);
    }
}
