#![allow(dead_code)]

//! In-process fake of the link service, served by axum on a random port.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tinylink::domain::entities::Link;
use tinylink::infrastructure::http::HttpLinkRepository;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

#[derive(Default)]
struct FakeState {
    links: Mutex<Vec<Link>>,
    /// Every route answers with this status and an empty body while set.
    failure: Mutex<Option<StatusCode>>,
    delay: Mutex<Duration>,
    generated: Mutex<u32>,
}

impl FakeState {
    async fn gate(&self) -> Option<Response> {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let failure = *self.failure.lock().unwrap();
        failure.map(IntoResponse::into_response)
    }
}

pub struct FakeLinkService {
    pub base: Url,
    state: Arc<FakeState>,
    handle: JoinHandle<()>,
}

impl FakeLinkService {
    pub async fn start() -> Self {
        Self::with_links(Vec::new()).await
    }

    pub async fn with_links(links: Vec<Link>) -> Self {
        let state = Arc::new(FakeState {
            links: Mutex::new(links),
            ..Default::default()
        });

        let app = Router::new()
            .route("/api/links", get(list_links).post(create_link))
            .route("/api/links/{code}", get(get_link).delete(delete_link))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: Url::parse(&format!("http://{addr}")).unwrap(),
            state,
            handle,
        }
    }

    pub fn repository(&self) -> HttpLinkRepository {
        HttpLinkRepository::new(&self.base, Duration::from_secs(5)).unwrap()
    }

    pub fn fail_with(&self, status: StatusCode) {
        *self.state.failure.lock().unwrap() = Some(status);
    }

    pub fn recover(&self) {
        *self.state.failure.lock().unwrap() = None;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.state.delay.lock().unwrap() = delay;
    }

    pub fn codes(&self) -> Vec<String> {
        self.state
            .links
            .lock()
            .unwrap()
            .iter()
            .map(|l| l.code.clone())
            .collect()
    }

    /// Simulates a visit through the redirect endpoint.
    pub fn record_click(&self, code: &str) {
        let mut links = self.state.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.code == code) {
            link.total_clicks += 1;
            link.last_clicked_at = Some(Utc::now());
        }
    }
}

impl Drop for FakeLinkService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_base() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

pub fn link(code: &str, target_url: &str, clicks: u64) -> Link {
    let mut link = Link::new(code, target_url, Utc::now());
    link.total_clicks = clicks;
    link
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn list_links(State(state): State<Arc<FakeState>>) -> Response {
    if let Some(failure) = state.gate().await {
        return failure;
    }
    let links = state.links.lock().unwrap().clone();
    Json(links).into_response()
}

async fn get_link(State(state): State<Arc<FakeState>>, Path(code): Path<String>) -> Response {
    if let Some(failure) = state.gate().await {
        return failure;
    }
    let links = state.links.lock().unwrap();
    match links.iter().find(|l| l.code == code) {
        Some(link) => Json(link.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Link not found"),
    }
}

async fn create_link(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    if let Some(failure) = state.gate().await {
        return failure;
    }

    let Some(target_url) = body.get("targetUrl").and_then(Value::as_str) else {
        return error(StatusCode::BAD_REQUEST, "targetUrl is required");
    };
    if Url::parse(target_url).is_err() {
        return error(StatusCode::BAD_REQUEST, "Invalid URL");
    }

    let mut links = state.links.lock().unwrap();
    let code = match body.get("code").and_then(Value::as_str) {
        Some(code) if links.iter().any(|l| l.code == code) => {
            return error(StatusCode::CONFLICT, "Code already exists");
        }
        Some(code) => code.to_string(),
        None => {
            let mut generated = state.generated.lock().unwrap();
            *generated += 1;
            format!("gen{:03}", *generated)
        }
    };

    let link = Link::new(code, target_url, Utc::now());
    links.push(link.clone());
    (StatusCode::CREATED, Json(link)).into_response()
}

async fn delete_link(State(state): State<Arc<FakeState>>, Path(code): Path<String>) -> Response {
    if let Some(failure) = state.gate().await {
        return failure;
    }
    let mut links = state.links.lock().unwrap();
    let before = links.len();
    links.retain(|l| l.code != code);
    if links.len() == before {
        error(StatusCode::NOT_FOUND, "Link not found")
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
