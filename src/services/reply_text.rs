//! Fixed user-facing texts.
//!
//! Error details never appear here; they go to the log.

use crate::domain::models::ShoppingList;

pub const HELP_TEXT: &str = "コマンド例:\n・追加 りんご\n・一覧\n・削除 りんご\n・ヘルプ";

pub const MISSING_ITEM_TEXT: &str = "追加する品名を入力してください。例: 追加 牛乳";

pub const STORE_UNAVAILABLE_TEXT: &str =
    "現在リストを保存できません。しばらくしてからもう一度お試しください。";

pub const GENERIC_FAILURE_TEXT: &str =
    "エラーが発生しました。しばらくしてからもう一度お試しください。";

/// Welcome sent once when a user adds the bot as a friend.
pub fn welcome() -> String {
    format!("👋 買い物リストBotへようこそ！\n\n{HELP_TEXT}")
}

pub fn added(item: &str, list: &ShoppingList) -> String {
    format!("追加しました：{item}\n{}", list.render())
}

/// Add succeeded but the list could not be read back for display.
pub fn added_without_listing(item: &str) -> String {
    format!("追加しました：{item}")
}

pub fn deleted(item: &str, list: &ShoppingList) -> String {
    format!("削除しました：{item}\n{}", list.render())
}

/// Delete succeeded but the list could not be read back for display.
pub fn deleted_without_listing(item: &str) -> String {
    format!("削除しました：{item}")
}

pub fn not_found(item: &str) -> String {
    format!("リストに見つかりません：{item}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_renders_list() {
        let list = ShoppingList::new(vec!["牛乳".into()]);
        assert_eq!(added("牛乳", &list), "追加しました：牛乳\n現在のリスト（1）:\n- 牛乳");
    }

    #[test]
    fn test_deleted_to_empty() {
        assert_eq!(deleted("牛乳", &ShoppingList::default()), "削除しました：牛乳\nリストは空です。");
    }

    #[test]
    fn test_help_lists_every_command() {
        for keyword in ["追加", "一覧", "削除", "ヘルプ"] {
            assert!(HELP_TEXT.contains(keyword), "missing {keyword}");
        }
        assert!(welcome().ends_with(HELP_TEXT));
    }
}
