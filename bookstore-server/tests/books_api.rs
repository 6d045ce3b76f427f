//! Router tests against the in-process store.
//!
//! These drive the full axum stack (extractors, handlers, error
//! rendering) without a database.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use bookstore_server::http::{build_router, AppState, ServerConfig};
use bookstore_server::{
    Book, BookDraft, BookError, BookStore, MemoryBookStore, Operation, QuantityPolicy,
};

fn app() -> Router {
    app_with(AppState::new(Arc::new(MemoryBookStore::seeded())))
}

fn app_with(state: AppState) -> Router {
    build_router(state, &ServerConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(app: &Router, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_owned()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Store whose every call fails the way an exhausted pool does.
struct FailingBookStore;

fn pool_timeout(operation: Operation, id: Option<i64>) -> BookError {
    BookError::from_sqlx(operation, id, sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl BookStore for FailingBookStore {
    async fn list(&self) -> Result<Vec<Book>, BookError> {
        Err(pool_timeout(Operation::List, None))
    }

    async fn get(&self, id: i64) -> Result<Book, BookError> {
        Err(pool_timeout(Operation::Get, Some(id)))
    }

    async fn create(&self, _draft: BookDraft) -> Result<Book, BookError> {
        Err(pool_timeout(Operation::Create, None))
    }

    async fn update(&self, id: i64, _draft: BookDraft) -> Result<Book, BookError> {
        Err(pool_timeout(Operation::Update, Some(id)))
    }

    async fn delete(&self, id: i64) -> Result<(), BookError> {
        Err(pool_timeout(Operation::Delete, Some(id)))
    }
}

fn ids(books: &Value) -> Vec<i64> {
    books
        .as_array()
        .expect("expected JSON array")
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn fresh_store_lists_seed_rows_in_order() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3]);
    assert_eq!(
        body[0],
        json!({"id": 1, "title": "The Great Gatsby", "author": "F. Scott Fitzgerald", "quantity": 3})
    );
}

#[tokio::test]
async fn empty_store_lists_empty_array() {
    let app = app_with(AppState::new(Arc::new(MemoryBookStore::new())));

    let (status, body) = send(&app, Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_returns_201_with_generated_id() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "Dune", "author": "Herbert", "quantity": 2})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"id": 4, "title": "Dune", "author": "Herbert", "quantity": 2})
    );
}

#[tokio::test]
async fn successive_creates_get_increasing_ids() {
    let app = app();
    let mut last = 3;

    for title in ["A", "B", "C"] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/books",
            Some(json!({"title": title, "author": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_i64().unwrap();
        assert!(id > last, "id {} not greater than {}", id, last);
        assert_eq!(body["quantity"], 0);
        last = id;
    }
}

#[tokio::test]
async fn get_missing_book_is_404() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "Dune", "author": "Herbert", "quantity": 2})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/books/99", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "book not found"}));
}

#[tokio::test]
async fn huge_integer_id_is_not_found_not_error() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/books/9223372036854775807", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let app = app();

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(json!({"title": "X", "author": "Y"}))),
        (Method::DELETE, None),
    ] {
        let (status, body) = send(&app, method, "/books/abc", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "invalid book ID"}));
    }
}

#[tokio::test]
async fn update_is_full_replace() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/1",
        Some(json!({"title": "X", "author": "Y", "quantity": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "title": "X", "author": "Y", "quantity": 0}));

    let (_, fetched) = send(&app, Method::GET, "/books/1", None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn update_missing_book_is_404() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/99",
        Some(json!({"title": "X", "author": "Y", "quantity": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "book not found");
}

#[tokio::test]
async fn delete_twice_is_200_then_404() {
    let app = app();

    let (status, body) = send(&app, Method::DELETE, "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "book deleted successfully"}));

    let (status, body) = send(&app, Method::DELETE, "/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "book not found"}));

    let (_, listed) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(ids(&listed), vec![2, 3]);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = app();

    let (status, body) = send_raw(&app, Method::POST, "/books", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "invalid request"}));

    let (status, body) =
        send_raw(&app, Method::POST, "/books", r#"{"title":"A","author":"B","quantity":"many"}"#)
            .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "invalid request"}));
}

#[tokio::test]
async fn missing_body_is_400() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/books", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "invalid request"}));
}

#[tokio::test]
async fn validation_failures_are_400_and_do_not_write() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "", "author": "Y"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "title cannot be empty"}));

    let (status, body) = send(&app, Method::POST, "/books", Some(json!({"title": "X"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "author is required"}));

    let (_, listed) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(ids(&listed), vec![1, 2, 3]);
}

#[tokio::test]
async fn invalid_id_wins_over_invalid_body() {
    let app = app();

    let (status, body) = send_raw(&app, Method::PUT, "/books/abc", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "invalid book ID"}));
}

#[tokio::test]
async fn negative_quantity_follows_policy() {
    let lenient = app();
    let (status, body) = send(
        &lenient,
        Method::POST,
        "/books",
        Some(json!({"title": "X", "author": "Y", "quantity": -2})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["quantity"], -2);

    let strict = app_with(
        AppState::new(Arc::new(MemoryBookStore::seeded()))
            .with_quantity_policy(QuantityPolicy::RequireNonNegative),
    );
    let (status, body) = send(
        &strict,
        Method::POST,
        "/books",
        Some(json!({"title": "X", "author": "Y", "quantity": -2})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "quantity cannot be negative"}));
}

#[tokio::test]
async fn list_is_ordered_after_mixed_writes() {
    let app = app();

    send(&app, Method::DELETE, "/books/2", None).await;
    send(&app, Method::POST, "/books", Some(json!({"title": "D", "author": "d"}))).await;
    send(
        &app,
        Method::PUT,
        "/books/1",
        Some(json!({"title": "Z", "author": "z"})),
    )
    .await;
    send(&app, Method::POST, "/books", Some(json!({"title": "E", "author": "e"}))).await;

    let (_, listed) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(ids(&listed), vec![1, 3, 4, 5]);
}

#[tokio::test]
async fn create_ignores_content_type() {
    let app = app();
    let payload = r#"{"title":"Dune","author":"Herbert","quantity":2}"#;

    for content_type in [None, Some("text/plain"), Some("application/x-www-form-urlencoded")] {
        let mut builder = Request::builder().method(Method::POST).uri("/books");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(payload)).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "content-type {:?}", content_type);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["title"], "Dune");
    }

    let (_, listed) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(ids(&listed), vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn store_failures_are_500_with_operation_message() {
    let app = app_with(AppState::new(Arc::new(FailingBookStore)));
    let book = json!({"title": "X", "author": "Y", "quantity": 1});

    let cases = [
        (Method::GET, "/books", None, "database error"),
        (Method::GET, "/books/1", None, "failed to fetch book"),
        (Method::POST, "/books", Some(book.clone()), "failed to add book"),
        (Method::PUT, "/books/1", Some(book), "failed to update book"),
        (Method::DELETE, "/books/1", None, "failed to delete book"),
    ];

    for (method, uri, payload, message) in cases {
        let (status, body) = send(&app, method.clone(), uri, payload).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(body, json!({ "message": message }), "{} {}", method, uri);

        let text = body.to_string();
        assert!(!text.contains("pool"), "driver detail leaked: {}", text);
        assert!(!text.contains("timed out"), "driver detail leaked: {}", text);
    }
}
