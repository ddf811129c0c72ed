//! End-to-end harness for the FlashFood admin dashboard.
//!
//! Each test gets a [`TestContext`]: a wiremock server standing in for the
//! FlashFood REST API and the admin router served on an ephemeral port
//! against it, driven over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p flashfood-integration-tests
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use flashfood_admin::{
    api::{ApiClient, SessionStore},
    pages::PageSettings,
    routes,
    state::AppState,
};
use flashfood_admin_core::types::Envelope;
use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

/// Path prefix of the mocked backend.
pub const API_PREFIX: &str = "/api/v1";

/// Page settings used by the harness: short debounce, no polling during a test.
#[must_use]
pub const fn test_settings() -> PageSettings {
    PageSettings {
        page_size: 10,
        poll_interval: Duration::from_secs(3600),
        search_debounce: Duration::from_millis(50),
    }
}

/// Success envelope around `data`.
#[must_use]
pub fn ok(data: Value) -> Value {
    serde_json::to_value(Envelope::ok(data)).expect("envelope")
}

/// Application error envelope.
#[must_use]
pub fn rejected(code: i64, message: &str) -> Value {
    serde_json::to_value(Envelope::<Value>::error(code, message)).expect("envelope")
}

/// Paginated success envelope.
#[must_use]
pub fn page(items: &[Value], total_items: u64, total_pages: u32) -> Value {
    ok(json!({
        "items": items,
        "totalItems": total_items,
        "totalPages": total_pages,
    }))
}

/// A backend customer record.
#[must_use]
pub fn customer(id: &str, last_login: i64) -> Value {
    json!({
        "id": id,
        "first_name": "Customer",
        "last_name": id,
        "email": format!("{id}@flashfood.app"),
        "user": {"email": format!("{id}@flashfood.app")},
        "last_login": last_login,
        "is_banned": false,
    })
}

/// A backend order record.
#[must_use]
pub fn order(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "customer_id": "FF_CUS_1",
        "restaurant_id": "FF_RES_1",
        "status": status,
        "total_amount": "12.50",
        "order_time": 1_760_000_000,
    })
}

/// A backend FAQ record.
#[must_use]
pub fn faq(id: &str, question: &str) -> Value {
    json!({
        "id": id,
        "question": question,
        "answer": [{"type": "text", "value": "Answer"}],
        "type": "GENERAL",
        "status": "ACTIVE",
        "target_user": ["CUSTOMER"],
        "created_at": 1_760_000_000,
    })
}

/// Admin server wired to a mocked backend.
pub struct TestContext {
    pub backend: MockServer,
    pub http: reqwest::Client,
    pub admin_addr: SocketAddr,
    pub state: AppState,
}

impl TestContext {
    /// Start the mocked backend and the admin server.
    ///
    /// # Panics
    ///
    /// Panics if either server cannot start.
    pub async fn start() -> Self {
        let backend = MockServer::start().await;
        let base_url = Url::parse(&format!("{}{API_PREFIX}/", backend.uri())).expect("base url");

        let session = SessionStore::new();
        let client = ApiClient::new(&base_url, Duration::from_secs(5), session.clone())
            .expect("api client");
        let state = AppState::with_api(test_settings(), session, std::sync::Arc::new(client));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let admin_addr = listener.local_addr().expect("local addr");
        let app = routes::routes().with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("admin server");
        });

        Self {
            backend,
            http: reqwest::Client::new(),
            admin_addr,
            state,
        }
    }

    /// URL of an admin route.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.admin_addr)
    }

    /// Backend path for an endpoint.
    #[must_use]
    pub fn api_path(endpoint: &str) -> String {
        format!("{API_PREFIX}/{endpoint}")
    }

    /// Sign in as `role`, mounting the pages.
    ///
    /// # Panics
    ///
    /// Panics if the admin server rejects the sign-in.
    pub async fn sign_in(&self, role: &str) -> Value {
        let response = self
            .http
            .post(self.url("/session"))
            .json(&json!({"access_token": "test-token", "logged_in_as": role}))
            .send()
            .await
            .expect("sign in");
        assert!(response.status().is_success(), "sign in failed: {}", response.status());
        response.json().await.expect("navigation json")
    }

    /// GET an admin route, returning status and JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> (u16, Value) {
        let response = self.http.get(self.url(path)).send().await.expect("get");
        Self::read(response).await
    }

    /// Send a JSON request to an admin route.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn send(&self, method: reqwest::Method, path: &str, body: Option<Value>) -> (u16, Value) {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.expect("send");
        Self::read(response).await
    }

    async fn read(response: reqwest::Response) -> (u16, Value) {
        let status = response.status().as_u16();
        let body = response.json().await.unwrap_or(Value::Null);
        (status, body)
    }
}
