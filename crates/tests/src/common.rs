use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use resolver::{HttpProfileApi, HttpRoleResolver, RoleResolver};
use serde::Deserialize;
use serde_json::{json, Value};
use shared_types::{ApiConfig, AppConfig, FeatureFlags};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned behaviour of the mock profile backend, keyed by lowercase email.
#[derive(Default)]
pub struct Backend {
    profiles: HashMap<String, Value>,
    raw_bodies: HashMap<String, String>,
    delays: HashMap<String, Duration>,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `profile` as JSON for its `email` field.
    pub fn with_profile(mut self, profile: Value) -> Self {
        let email = profile["email"].as_str().unwrap_or_default().to_lowercase();
        self.profiles.insert(email, profile);
        self
    }

    /// Serve `body` verbatim for `email`, bypassing JSON encoding.
    pub fn with_raw_body(mut self, email: &str, body: &str) -> Self {
        self.raw_bodies.insert(email.to_lowercase(), body.to_string());
        self
    }

    /// Hold the `profile-by-email` response for `email` for `delay`.
    pub fn with_delay(mut self, email: &str, delay: Duration) -> Self {
        self.delays.insert(email.to_lowercase(), delay);
        self
    }
}

#[derive(Clone)]
struct BackendState {
    profiles: Arc<Mutex<HashMap<String, Value>>>,
    raw_bodies: Arc<HashMap<String, String>>,
    delays: Arc<HashMap<String, Duration>>,
    hits: Arc<AtomicUsize>,
    updates: Arc<Mutex<Vec<(String, Value)>>>,
}

/// A running mock backend.
pub struct MockBackend {
    pub base_url: String,
    state: BackendState,
}

impl MockBackend {
    /// Number of `profile-by-email` requests served so far.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Every `update-profile` request received, as `(email, body)`.
    pub fn updates(&self) -> Vec<(String, Value)> {
        self.state.updates.lock().unwrap().clone()
    }

    /// Replace the stored profile, as another session editing it would.
    pub fn set_profile(&self, profile: Value) {
        let email = profile["email"].as_str().unwrap_or_default().to_lowercase();
        self.state.profiles.lock().unwrap().insert(email, profile);
    }

    pub fn resolver(&self) -> HttpRoleResolver {
        self.resolver_with(|_| {})
    }

    pub fn resolver_with(&self, edit: impl FnOnce(&mut AppConfig)) -> HttpRoleResolver {
        resolver_for(&self.base_url, edit)
    }
}

/// Resolver pointed at `base_url`, with a short timeout suitable for tests.
pub fn resolver_for(base_url: &str, edit: impl FnOnce(&mut AppConfig)) -> HttpRoleResolver {
    let mut config = AppConfig {
        api: ApiConfig {
            base_url: base_url.to_string(),
            profile_timeout_ms: 2_000,
            cache_ttl_secs: None,
        },
        features: FeatureFlags::default(),
    };
    edit(&mut config);
    RoleResolver::new(HttpProfileApi::new(&config.api), &config)
}

#[derive(Deserialize)]
struct EmailQuery {
    email: String,
}

async fn profile_by_email(
    State(state): State<BackendState>,
    Query(query): Query<EmailQuery>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let key = query.email.to_lowercase();

    if let Some(delay) = state.delays.get(&key) {
        tokio::time::sleep(*delay).await;
    }
    if let Some(body) = state.raw_bodies.get(&key) {
        return ([(header::CONTENT_TYPE, "application/json")], body.clone()).into_response();
    }

    // The real backend answers `null` for unknown emails rather than 404.
    let profile = state.profiles.lock().unwrap().get(&key).cloned();
    Json(profile.unwrap_or(Value::Null)).into_response()
}

async fn update_profile(
    State(state): State<BackendState>,
    Path(email): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let key = email.to_lowercase();
    state.updates.lock().unwrap().push((key.clone(), body.clone()));

    let mut profiles = state.profiles.lock().unwrap();
    let Some(profile) = profiles.get_mut(&key) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response();
    };
    if let (Some(target), Some(fields)) = (profile.as_object_mut(), body.as_object()) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    Json(json!({ "modifiedCount": 1 })).into_response()
}

/// Bind the mock backend on an ephemeral port and serve it in the background.
pub async fn spawn_backend(backend: Backend) -> MockBackend {
    let state = BackendState {
        profiles: Arc::new(Mutex::new(backend.profiles)),
        raw_bodies: Arc::new(backend.raw_bodies),
        delays: Arc::new(backend.delays),
        hits: Arc::new(AtomicUsize::new(0)),
        updates: Arc::new(Mutex::new(Vec::new())),
    };

    let router = Router::new()
        .route("/profile-by-email", get(profile_by_email))
        .route("/update-profile/{email}", patch(update_profile))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock backend");
    });

    MockBackend {
        base_url: format!("http://{}", addr),
        state,
    }
}

/// Address that refuses connections: bound once, then released.
pub async fn closed_port() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);
    addr
}
