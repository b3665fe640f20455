#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tower::ServiceExt;

use salon_api::{
    app_router,
    clock::ManualClock,
    config::AppConfig,
    db::{self, DbConfig},
    seed, AppState,
};

/// Harness spinning up the full router over a fresh in-memory SQLite store
/// with a manually driven clock.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
}

/// The instant every test starts at unless it moves the clock.
pub fn test_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

impl TestApp {
    /// Fresh application with empty tables.
    pub async fn new() -> Self {
        Self::build(false).await
    }

    /// Fresh application with the bootstrap seed data loaded.
    pub async fn seeded() -> Self {
        Self::build(true).await
    }

    async fn build(seed_data: bool) -> Self {
        let db_cfg = DbConfig {
            url: "sqlite::memory:".to_string(),
            // A single connection keeps every query on the same in-memory DB.
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("connect to in-memory sqlite");
        db::run_migrations(&pool).await.expect("run migrations");

        let db = Arc::new(pool);
        if seed_data {
            seed::run(&db).await.expect("seed bootstrap data");
        }

        let clock = Arc::new(ManualClock::new(test_epoch()));
        let cfg = AppConfig::new("sqlite::memory:", "test");
        let state = AppState::new(db, cfg, clock.clone());

        Self {
            router: app_router(state.clone()),
            state,
            clock,
        }
    }

    /// Issue a request and return the raw response.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                builder
                    .body(Body::from(json.to_string()))
                    .expect("build request")
            }
            None => builder.body(Body::empty()).expect("build request"),
        };

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("route request")
    }

    /// Issue a request and decode the JSON body alongside the status.
    pub async fn request_json(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse response body")
        };
        (status, json)
    }

    /// Create a catalog service through the API, returning its id.
    pub async fn create_service(&self, name: &str, is_active: bool) -> i64 {
        let (status, body) = self
            .request_json(
                Method::POST,
                "/api/services",
                Some(serde_json::json!({
                    "name": name,
                    "duration": "45 mins",
                    "price": "45.00",
                    "description": "test service",
                    "isActive": is_active,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create service: {body}");
        body["id"].as_i64().expect("service id")
    }

    /// Join the walk-in queue through the API, returning the created entry.
    pub async fn join_queue(&self, customer_name: &str, mobile: &str) -> Value {
        let (status, body) = self
            .request_json(
                Method::POST,
                "/api/queue/join",
                Some(serde_json::json!({
                    "customerName": customer_name,
                    "mobile": mobile,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "join queue: {body}");
        body
    }
}
