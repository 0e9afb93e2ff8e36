#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use sqlx::{postgres::PgPoolOptions, PgPool};

use appletree_backend::{api, store::Store, AppState};

/// Spin up a real Axum server on a random port against the database named by
/// TEST_DATABASE_URL, returning its address and the pool. Returns None when
/// the variable is unset so database-backed tests skip on machines without
/// Postgres. Test isolation comes from unique school names/levels per test
/// and cleanup afterwards.
pub async fn setup_test_app() -> Option<(SocketAddr, PgPool)> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set; skipping database-backed test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    // Run migrations to ensure schema is up-to-date
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let state = AppState {
        store: Store::new(pool.clone()),
        environment: "test".to_string(),
    };

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Some((addr, pool))
}

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique label per call so parallel tests never collide on shared data.
pub fn unique(prefix: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", prefix, std::process::id(), n)
}

/// Build a reqwest client (reusable across requests in a test).
pub fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// A request body that passes every validation rule.
pub fn school_body(name: &str, level: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "level": level,
        "contact": "Eda Rowan",
        "phone": "601-4411",
        "email": "admin@appletree.edu",
        "website": "https://apple.tree",
        "address": "14 Apple St",
        "mode": ["Online"],
    })
}

/// POST a school and return its id plus the full response body.
pub async fn create_school(
    addr: SocketAddr,
    body: &serde_json::Value,
) -> (i64, serde_json::Value) {
    let resp = http_client()
        .post(format!("http://{}/v1/schools", addr))
        .json(body)
        .send()
        .await
        .expect("create request failed");
    assert_eq!(resp.status(), 201, "school creation should return 201");

    let body: serde_json::Value = resp.json().await.expect("invalid create response body");
    let id = body["school"]["id"].as_i64().expect("school id missing");
    (id, body)
}

/// Remove rows created by a test.
pub async fn cleanup_schools(pool: &PgPool, ids: &[i64]) {
    for id in ids {
        let _ = sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await;
    }
}
