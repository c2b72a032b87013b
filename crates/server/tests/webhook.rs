use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use engine::Engine;
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use server::{ServerState, router};
use telegram_bot::{BotError, ConfigParameters, Dispatcher, Notifier, Outbox};
use teloxide::types::ChatId;
use tower::ServiceExt;

const SECRET: &str = "s3cret";
const USER: i64 = 4242;

#[derive(Clone, Default)]
struct RecordingOutbox {
    sent: Arc<Mutex<Vec<(ChatId, String)>>>,
    fail: bool,
}

impl RecordingOutbox {
    fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Outbox for RecordingOutbox {
    async fn send(&self, chat_id: ChatId, text: String) -> Result<(), BotError> {
        if self.fail {
            return Err(BotError::Config("delivery disabled".to_string()));
        }
        self.sent.lock().unwrap().push((chat_id, text));
        Ok(())
    }
}

struct TestApp {
    router: Router,
    outbox: RecordingOutbox,
    engine: Arc<Engine>,
}

async fn app(outbox: RecordingOutbox, secret_token: Option<&str>) -> TestApp {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Arc::new(Engine::builder().database(db).build().await.unwrap());

    let dispatcher = Dispatcher::new(
        engine.clone(),
        Notifier::new(outbox.clone(), None),
        ConfigParameters::default(),
    );
    let state = ServerState {
        dispatcher: Arc::new(dispatcher),
        secret_token: secret_token.map(str::to_string),
    };

    TestApp {
        router: router(state, "/telegram"),
        outbox,
        engine,
    }
}

fn text_update(text: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": 1,
        "message": {
            "message_id": 1,
            "date": 1_700_000_000,
            "chat": {"id": USER, "type": "private", "first_name": "Ann"},
            "from": {"id": USER, "is_bot": false, "first_name": "Ann"},
            "text": text
        }
    })
}

fn post_update(body: &serde_json::Value, secret: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/telegram")
        .header("content-type", "application/json");
    if let Some(secret) = secret {
        builder = builder.header("X-Telegram-Bot-Api-Secret-Token", secret);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(res: axum::response::Response) -> serde_json::Value {
    let body = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn liveness_routes_return_static_bodies() {
    let app = app(RecordingOutbox::default(), Some(SECRET)).await;

    let res = app
        .router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json_body(res).await,
        serde_json::json!({"message": "Money Management Bot is running!", "status": "healthy"})
    );

    let res = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json_body(res).await,
        serde_json::json!({"status": "healthy", "service": "moneybot"})
    );
}

#[tokio::test]
async fn text_update_stores_transaction_and_replies() {
    let app = app(RecordingOutbox::default(), None).await;

    let res = app
        .router
        .oneshot(post_update(&text_update("-12.50 food pizza"), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, serde_json::json!({"status": "ok"}));

    let sent = app.outbox.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, ChatId(USER));
    assert!(sent[0].1.contains("Amount: $12.50"));

    let stored = app.engine.list_recent(USER, 10).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].description.as_deref(), Some("pizza"));
}

#[tokio::test]
async fn wrong_or_missing_secret_is_unauthorized() {
    let app = app(RecordingOutbox::default(), Some(SECRET)).await;

    let res = app
        .router
        .clone()
        .oneshot(post_update(&text_update("+1 tip"), Some("nope")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .router
        .clone()
        .oneshot(post_update(&text_update("+1 tip"), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    assert!(app.outbox.sent().is_empty());
    assert!(app.engine.list_recent(USER, 10).await.unwrap().is_empty());

    let res = app
        .router
        .oneshot(post_update(&text_update("+1 tip"), Some(SECRET)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(app.engine.list_recent(USER, 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_without_message_is_acknowledged() {
    let app = app(RecordingOutbox::default(), None).await;

    let update = serde_json::json!({
        "update_id": 2,
        "callback_query": {
            "id": "1",
            "from": {"id": USER, "is_bot": false, "first_name": "Ann"},
            "chat_instance": "c"
        }
    });
    let res = app.router.oneshot(post_update(&update, None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(app.outbox.sent().is_empty());
}

#[tokio::test]
async fn delivery_failure_is_still_acknowledged() {
    let outbox = RecordingOutbox {
        fail: true,
        ..RecordingOutbox::default()
    };
    let app = app(outbox, None).await;

    let res = app
        .router
        .oneshot(post_update(&text_update("+100 salary"), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(app.engine.list_recent(USER, 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = app(RecordingOutbox::default(), None).await;

    let res = app
        .router
        .oneshot(
            Request::post("/telegram")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(res.status().is_client_error());
}
