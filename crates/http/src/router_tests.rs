use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use reelsync_core::FeedFilm;
use reelsync_feed::{FeedError, FilmFeed};
use reelsync_service::{FilmService, Reconciler, SyncConfig};
use reelsync_storage::MemoryStorage;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{AppState, create_router};

struct FixedFeed(Option<Vec<FeedFilm>>);

#[async_trait]
impl FilmFeed for FixedFeed {
    async fn fetch_snapshot(&self) -> Result<Vec<FeedFilm>, FeedError> {
        self.0.clone().ok_or_else(|| FeedError::HttpStatus {
            code: 500,
            url: "http://feed.test".to_owned(),
            body: String::new(),
        })
    }

    fn source(&self) -> &str {
        "fixed"
    }
}

fn app(feed: FixedFeed) -> axum::Router {
    let store = Arc::new(MemoryStorage::new());
    let state = AppState {
        film_service: Arc::new(FilmService::new(store.clone())),
        reconciler: Arc::new(Reconciler::new(store, Arc::new(feed), &SyncConfig::default())),
    };
    create_router(Arc::new(state))
}

fn films_feed() -> FixedFeed {
    FixedFeed(Some(vec![FeedFilm::new(4, "A New Hope"), FeedFilm::new(5, "The Empire Strikes Back")]))
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn new_film(title: &str) -> Value {
    json!({
        "title": title,
        "opening_crawl": "A long time ago",
        "director": "A Fan",
        "producer": "Another Fan"
    })
}

#[tokio::test]
async fn health_and_version() {
    let app = app(films_feed());

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/api/version", None).await;
    assert_eq!(json_body(response).await["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn film_crud_round_trip() {
    let app = app(films_feed());

    let response = send(&app, "POST", "/api/films", Some(new_film("Fan Edit"))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    let id = created["id"].as_str().unwrap().to_owned();
    assert_eq!(created["is_external"], false);
    assert_eq!(created["episode_id"], Value::Null);

    let response = send(&app, "GET", &format!("/api/films/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response =
        send(&app, "PUT", &format!("/api/films/{id}"), Some(json!({"director": "Someone"}))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["director"], "Someone");

    let response = send(&app, "DELETE", &format!("/api/films/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &format!("/api/films/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(json_body(response).await["error"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn duplicate_title_is_rejected() {
    let app = app(films_feed());
    send(&app, "POST", "/api/films", Some(new_film("Fan Edit"))).await;

    let response = send(&app, "POST", "/api/films", Some(new_film("Fan Edit"))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn invalid_input_is_bad_request() {
    let app = app(films_feed());

    let response = send(&app, "POST", "/api/films", Some(json!({"title": "Only Title"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_missing_is_not_found() {
    let app = app(films_feed());
    let response = send(&app, "DELETE", "/api/films/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn manual_sync_reports_run_and_status() {
    let app = app(films_feed());

    let response = send(&app, "GET", "/api/sync/status", None).await;
    let status = json_body(response).await;
    assert_eq!(status["running"], false);
    assert_eq!(status["last_run"], Value::Null);

    let response = send(&app, "POST", "/api/sync", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let run = json_body(response).await;
    assert_eq!(run["fetched"], 2);
    assert_eq!(run["inserted"], 2);
    assert_eq!(run["updated"], 0);

    let response = send(&app, "GET", "/api/sync/status", None).await;
    let status = json_body(response).await;
    assert_eq!(status["last_run"]["status"], "completed");
    assert_eq!(status["last_run"]["inserted"], 2);

    let response = send(&app, "GET", "/api/films", None).await;
    let films = json_body(response).await;
    assert_eq!(films.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn manual_sync_with_feed_down_is_bad_gateway() {
    let app = app(FixedFeed(None));

    let response = send(&app, "POST", "/api/sync", None).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let response = send(&app, "GET", "/api/sync/status", None).await;
    assert_eq!(json_body(response).await["last_run"]["status"], "aborted");
}
