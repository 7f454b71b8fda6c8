//! End-to-end webhook tests: signed request in, replies and list state out.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use common::{batch, body_json, signed_post, test_config, text_event, SpySender, SpyStore};
use kaimono::adapters::unavailable::UnavailableListStore;
use kaimono::application::{assemble, build_list_store};
use kaimono::domain::models::{StoreBackend, StoreConfig};
use kaimono::domain::ports::ListStore;
use kaimono::services::reply_text;

fn router(store: Arc<dyn ListStore>, sender: Arc<SpySender>) -> Router {
    assemble(&test_config(), store, sender).build_router()
}

async fn deliver(router: &Router, events: Vec<serde_json::Value>) -> serde_json::Value {
    let response = router.clone().oneshot(signed_post(&batch(events))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_shopping_session() {
    common::setup_test_logging();
    let store = Arc::new(SpyStore::default());
    let sender = Arc::new(SpySender::default());
    let app = router(store, sender.clone());

    deliver(&app, vec![text_event("t1", "U1", "追加 りんご")]).await;
    deliver(&app, vec![text_event("t2", "U1", "追加 牛乳")]).await;
    deliver(&app, vec![text_event("t3", "U1", "追加 りんご")]).await;
    deliver(&app, vec![text_event("t4", "U1", "削除 りんご")]).await;
    deliver(&app, vec![text_event("t5", "U1", "一覧")]).await;
    deliver(&app, vec![text_event("t6", "U1", "削除 バナナ")]).await;
    deliver(&app, vec![text_event("t7", "U1", "おはよう")]).await;

    assert_eq!(
        sender.text_for("t2").unwrap(),
        "追加しました：牛乳\n現在のリスト（2）:\n- りんご\n- 牛乳"
    );
    assert_eq!(
        sender.text_for("t4").unwrap(),
        "削除しました：りんご\n現在のリスト（2）:\n- 牛乳\n- りんご"
    );
    assert_eq!(sender.text_for("t5").unwrap(), "現在のリスト（2）:\n- 牛乳\n- りんご");
    assert_eq!(sender.text_for("t6").unwrap(), "リストに見つかりません：バナナ");
    assert_eq!(sender.text_for("t7").unwrap(), reply_text::HELP_TEXT);
    assert_eq!(sender.sent().len(), 7);
}

#[tokio::test]
async fn test_users_have_separate_lists() {
    let sender = Arc::new(SpySender::default());
    let app = router(Arc::new(SpyStore::default()), sender.clone());

    let outcomes = deliver(
        &app,
        vec![
            text_event("a1", "Ualice", "追加 卵"),
            text_event("b1", "Ubob", "一覧"),
        ],
    )
    .await;

    assert_eq!(outcomes, json!(["replied", "replied"]));
    assert_eq!(sender.text_for("b1").unwrap(), "リストは空です。");
}

#[tokio::test]
async fn test_one_failing_event_does_not_sink_the_batch() {
    let store = Arc::new(SpyStore::failing_for("U2"));
    let sender = Arc::new(SpySender::default());
    let app = router(store, sender.clone());

    let outcomes = deliver(
        &app,
        vec![
            text_event("t1", "U1", "追加 豆腐"),
            text_event("t2", "U2", "追加 豆腐"),
            text_event("t3", "U3", "ヘルプ"),
        ],
    )
    .await;

    assert_eq!(outcomes, json!(["replied", "failed", "replied"]));
    assert!(sender.text_for("t1").unwrap().starts_with("追加しました：豆腐"));
    assert_eq!(sender.text_for("t2").unwrap(), reply_text::GENERIC_FAILURE_TEXT);
    assert_eq!(sender.text_for("t3").unwrap(), reply_text::HELP_TEXT);
}

#[tokio::test]
async fn test_forged_request_has_no_effect() {
    let store = Arc::new(SpyStore::default());
    let sender = Arc::new(SpySender::default());
    let app = router(store.clone(), sender.clone());

    let body = batch(vec![text_event("t1", "U1", "追加 りんご")]);
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("x-line-signature", "c2lnbmF0dXJl")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.calls(), 0);
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_degraded_store_keeps_help_working() {
    let sender = Arc::new(SpySender::default());
    let app = router(Arc::new(UnavailableListStore::new("no credentials")), sender.clone());

    let outcomes = deliver(
        &app,
        vec![
            text_event("t1", "U1", "追加 りんご"),
            text_event("t2", "U1", "ヘルプ"),
            text_event("t3", "U1", "一覧"),
        ],
    )
    .await;

    assert_eq!(outcomes, json!(["replied", "replied", "replied"]));
    assert_eq!(sender.text_for("t1").unwrap(), reply_text::STORE_UNAVAILABLE_TEXT);
    assert_eq!(sender.text_for("t2").unwrap(), reply_text::HELP_TEXT);
    assert_eq!(sender.text_for("t3").unwrap(), reply_text::STORE_UNAVAILABLE_TEXT);
}

#[tokio::test]
async fn test_redelivered_event_is_acknowledged_once() {
    let store = Arc::new(SpyStore::default());
    let sender = Arc::new(SpySender::default());
    let app = router(store.clone(), sender.clone());

    let mut event = text_event("t1", "U1", "追加 パン");
    event["webhookEventId"] = json!("01HZZZREDELIVERY");
    let mut again = event.clone();
    again["replyToken"] = json!("t2");
    again["deliveryContext"] = json!({"isRedelivery": true});

    assert_eq!(deliver(&app, vec![event]).await, json!(["replied"]));
    assert_eq!(deliver(&app, vec![again]).await, json!(["duplicate"]));
    assert_eq!(store.items("U1").await.unwrap(), vec!["パン"]);
    assert_eq!(sender.sent().len(), 1);
}

#[tokio::test]
async fn test_non_message_events() {
    let sender = Arc::new(SpySender::default());
    let app = router(Arc::new(SpyStore::default()), sender.clone());

    let outcomes = deliver(
        &app,
        vec![
            json!({"type": "follow", "replyToken": "f1", "source": {"type": "user", "userId": "U1"}}),
            json!({"type": "unfollow", "source": {"type": "user", "userId": "U1"}}),
            json!({"type": "message", "replyToken": "s1", "source": {"type": "user", "userId": "U1"},
                   "message": {"type": "sticker", "id": "2", "packageId": "1", "stickerId": "1"}}),
            json!({"type": "beacon", "replyToken": "b1"}),
        ],
    )
    .await;

    assert_eq!(outcomes, json!(["replied", "recorded", "ignored", "ignored"]));
    assert_eq!(sender.sent(), vec![("f1".to_string(), reply_text::welcome())]);
}

#[tokio::test]
async fn test_empty_batch_is_acknowledged() {
    let sender = Arc::new(SpySender::default());
    let app = router(Arc::new(SpyStore::default()), sender.clone());

    assert_eq!(deliver(&app, Vec::new()).await, json!([]));
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_group_messages_share_a_list() {
    let sender = Arc::new(SpySender::default());
    let app = router(Arc::new(SpyStore::default()), sender.clone());

    let group_event = |token: &str, text: &str| {
        json!({
            "type": "message",
            "replyToken": token,
            "source": {"type": "group", "groupId": "Cgroup"},
            "message": {"type": "text", "id": "3", "text": text}
        })
    };

    deliver(&app, vec![group_event("g1", "追加 ビール")]).await;
    deliver(&app, vec![group_event("g2", "一覧")]).await;

    assert_eq!(sender.text_for("g2").unwrap(), "現在のリスト（1）:\n- ビール");
}

#[tokio::test]
async fn test_sqlite_backed_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        backend: StoreBackend::Sqlite,
        database_url: Some(format!("sqlite:{}", dir.path().join("lists.db").display())),
        ..StoreConfig::default()
    };

    {
        let sender = Arc::new(SpySender::default());
        let app = router(build_list_store(&config).await, sender);
        deliver(&app, vec![text_event("t1", "U1", "追加 味噌")]).await;
        deliver(&app, vec![text_event("t2", "U1", "追加 醤油")]).await;
        deliver(&app, vec![text_event("t3", "U1", "削除 味噌")]).await;
    }

    let sender = Arc::new(SpySender::default());
    let app = router(build_list_store(&config).await, sender.clone());
    deliver(&app, vec![text_event("t4", "U1", "一覧")]).await;

    assert_eq!(sender.text_for("t4").unwrap(), "現在のリスト（1）:\n- 醤油");
}
