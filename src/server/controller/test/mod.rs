use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use test_utils::{builder::TestBuilder, factory};
use tower::ServiceExt;

use crate::server::{
    router::routes,
    service::throttle::{
        rate::{ScopeRates, ThrottleRate, ThrottleRates},
        ThrottleService,
    },
    state::AppState,
};

mod competition;
mod drone;

const APP_URL: &str = "http://testserver";

/// Rates high enough that no test outside the throttle tests ever hits them.
fn unthrottled() -> ThrottleRates {
    let rate = ThrottleRate::new(10_000, Duration::hours(1));
    let scope = ScopeRates {
        anonymous: rate,
        authenticated: rate,
    };
    ThrottleRates {
        default: scope,
        drones: scope,
        pilots: scope,
    }
}

/// Router wired to a fresh in-memory database.
struct TestApp {
    db: DatabaseConnection,
    router: Router,
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_rates(unthrottled()).await
    }

    async fn with_rates(rates: ThrottleRates) -> Self {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.unwrap();

        let state = AppState {
            db: db.clone(),
            throttle: ThrottleService::new(rates),
            app_url: APP_URL.to_string(),
            page_size: 4,
            max_page_size: 100,
        };

        Self {
            db,
            router: routes().with_state(state),
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Token {}", token));
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, token, None).await
    }
}

/// Names of the `results` of a list response, in order.
fn result_names(body: &Value) -> Vec<&str> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect()
}
