//! Shared fixtures for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response};
use backend::db::{Database, DbError, Row};
use backend::state::AppState;
use backend::web::{RouterOptions, create_router};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory stand-in for the Postgres pool.
pub struct FakeDatabase {
    reachable: bool,
    delay: Duration,
    queries: AtomicUsize,
}

impl FakeDatabase {
    pub fn up() -> Self {
        Self {
            reachable: true,
            delay: Duration::ZERO,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn down() -> Self {
        Self {
            reachable: false,
            ..Self::up()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Database for FakeDatabase {
    async fn query(&self, sql: &str) -> Result<Vec<Row>, DbError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if !self.reachable {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        assert_eq!(sql, "SELECT NOW()");
        let row = json!({ "now": "2026-10-16T12:34:56.789Z" });
        Ok(vec![row.as_object().cloned().unwrap_or_default()])
    }

    async fn ping(&self) -> Result<(), DbError> {
        if self.reachable {
            Ok(())
        } else {
            Err(sqlx::Error::PoolTimedOut.into())
        }
    }

    async fn close(&self) {}
}

pub fn router(db: Arc<FakeDatabase>) -> Router {
    router_with(db, RouterOptions::default())
}

pub fn router_with(db: Arc<FakeDatabase>, options: RouterOptions) -> Router {
    create_router(AppState::new(db), &options)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
