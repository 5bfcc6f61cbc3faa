//! A fake TFE API served by axum on a background runtime, so the blocking
//! client, the provider and the `tfe-pool` binary can be exercised over
//! real HTTP.
//!
//! Only the agent pool endpoints exist. Requests are recorded in order.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tfe_config::ProviderConfig;

pub const TOKEN: &str = "test-token";
pub const BROKEN_POOL: &str = "apool-broken";
pub const INVALID_WORKSPACE: &str = "ws-invalid";

#[derive(Debug, Clone)]
pub struct FakePool {
    pub organization: String,
    pub organization_scoped: bool,
    pub allowed: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeState {
    pub pools: HashMap<String, FakePool>,
    pub requests: Vec<RecordedRequest>,
}

#[derive(Clone, Default)]
pub struct FakeTfe {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeTfe {
    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_pool(&self, id: &str, organization: &str, scoped: bool, allowed: &[&str]) {
        self.lock().pools.insert(
            id.to_string(),
            FakePool {
                organization: organization.to_string(),
                organization_scoped: scoped,
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
            },
        );
    }

    pub fn pool(&self, id: &str) -> Option<FakePool> {
        self.lock().pools.get(id).cloned()
    }

    pub fn remove_pool(&self, id: &str) -> Option<FakePool> {
        self.lock().pools.remove(id)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }
}

fn api_response(status: StatusCode, body: Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/vnd.api+json")],
        body.to_string(),
    )
        .into_response()
}

fn pool_document(id: &str, pool: &FakePool) -> Value {
    let allowed: Vec<Value> = pool
        .allowed
        .iter()
        .map(|ws| json!({"id": ws, "type": "workspaces"}))
        .collect();
    json!({
        "data": {
            "id": id,
            "type": "agent-pools",
            "attributes": {
                "name": format!("{id}-name"),
                "agent-count": 1,
                "organization-scoped": pool.organization_scoped
            },
            "relationships": {
                "organization": {"data": {"id": pool.organization, "type": "organizations"}},
                "allowed-workspaces": {"data": allowed}
            }
        }
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn not_found() -> Response {
    api_response(
        StatusCode::NOT_FOUND,
        json!({"errors": [{"status": "404", "title": "not found"}]}),
    )
}

async fn get_pool(
    State(fake): State<FakeTfe>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = fake.lock();
    state.requests.push(RecordedRequest {
        method: "GET".to_string(),
        path: format!("/api/v2/agent-pools/{id}"),
        content_type: None,
        body: None,
    });

    if !authorized(&headers) {
        return api_response(
            StatusCode::UNAUTHORIZED,
            json!({"errors": [{"status": "401", "title": "unauthorized"}]}),
        );
    }
    if id == BROKEN_POOL {
        return api_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"errors": [{"status": "500", "title": "internal error", "detail": "database unavailable"}]}),
        );
    }
    match state.pools.get(&id) {
        Some(pool) => api_response(StatusCode::OK, pool_document(&id, pool)),
        None => not_found(),
    }
}

async fn patch_pool(
    State(fake): State<FakeTfe>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let parsed: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let mut state = fake.lock();
    state.requests.push(RecordedRequest {
        method: "PATCH".to_string(),
        path: format!("/api/v2/agent-pools/{id}"),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: Some(parsed.clone()),
    });

    if !authorized(&headers) {
        return api_response(
            StatusCode::UNAUTHORIZED,
            json!({"errors": [{"status": "401", "title": "unauthorized"}]}),
        );
    }
    if parsed["data"]["type"] != "agent-pools" {
        return api_response(
            StatusCode::BAD_REQUEST,
            json!({"errors": [{"status": "400", "title": "bad request", "detail": "wrong resource type"}]}),
        );
    }

    let ids: Vec<String> = parsed["data"]["relationships"]["allowed-workspaces"]["data"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    if ids.iter().any(|ws| ws == INVALID_WORKSPACE) {
        return api_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"errors": [{"status": "422", "title": "invalid attribute", "detail": "Workspace not found"}]}),
        );
    }

    match state.pools.get_mut(&id) {
        Some(pool) => {
            pool.allowed = ids;
            let document = pool_document(&id, pool);
            api_response(StatusCode::OK, document)
        }
        None => not_found(),
    }
}

/// Start the fake API and return it with a config pointing at it.
///
/// The server runs until the process exits.
pub fn spawn_fake_tfe() -> std::io::Result<(FakeTfe, ProviderConfig)> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    listener.set_nonblocking(true)?;
    let addr = listener.local_addr()?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;

    let fake = FakeTfe::default();
    let router = Router::new()
        .route("/api/v2/agent-pools/{id}", get(get_pool).patch(patch_pool))
        .with_state(fake.clone());

    std::thread::spawn(move || {
        runtime.block_on(async move {
            let served = match tokio::net::TcpListener::from_std(listener) {
                Ok(listener) => axum::serve(listener, router).await,
                Err(e) => Err(e),
            };
            if let Err(e) = served {
                eprintln!("fake TFE server stopped: {e}");
            }
        });
    });

    let config = ProviderConfig {
        hostname: format!("http://{addr}"),
        token: Some(TOKEN.to_string()),
        timeout_secs: 5,
        ..Default::default()
    };
    Ok((fake, config))
}
