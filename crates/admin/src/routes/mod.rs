//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                            - Health check
//!
//! # Session
//! POST   /session                           - Sign in and mount pages
//! DELETE /session                           - Unmount pages and sign out
//! GET    /navigation                        - Sidebar for the signed-in role
//!
//! # Customers
//! GET    /customers                         - Customers view
//! POST   /customers/page                    - Change page
//! POST   /customers/search                  - Update search query
//! POST   /customers/{id}/orders             - Open order history
//! POST   /customers/{id}/complaints         - Open complaint history
//! DELETE /customers/dialogs                 - Close history dialogs
//! POST   /customers/{id}/ban                - Ban with reason
//!
//! # Orders
//! GET    /orders                            - Orders view
//! POST   /orders/page                       - Change page
//! POST   /orders/{id}/details               - Open order dialog
//! DELETE /orders/details                    - Close order dialog
//! DELETE /orders/{id}                       - Delete order
//!
//! # FAQs
//! GET    /faqs                              - FAQs view
//! POST   /faqs/page                         - Change page
//! POST   /faqs/draft                        - Open add draft
//! POST   /faqs/{id}/draft                   - Open edit draft
//! PUT    /faqs/draft                        - Replace draft fields
//! POST   /faqs/draft/latest                 - Copy latest FAQ into draft
//! POST   /faqs/draft/answers/{index}/image  - Upload image into block
//! POST   /faqs/draft/submit                 - Save draft
//! DELETE /faqs/draft                        - Discard draft
//! DELETE /faqs/toasts/{id}                  - Dismiss toast
//!
//! # Customer care
//! GET    /customer-care                     - Customer-care view
//! POST   /customer-care/page                - Change page
//! POST   /customer-care/{id}/availability   - Toggle availability
//! ```

pub mod customer_care;
pub mod customers;
pub mod faqs;
pub mod navigation;
pub mod orders;
pub mod session;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use serde::Deserialize;

use crate::state::AppState;

/// Largest accepted image upload.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Body of the page-change routes.
#[derive(Debug, Deserialize)]
pub struct PageBody {
    pub page: u32,
}

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Session
        .route("/session", post(session::sign_in).delete(session::sign_out))
        .route("/navigation", get(navigation::show))
        // Customers
        .route("/customers", get(customers::index))
        .route("/customers/page", post(customers::page))
        .route("/customers/search", post(customers::search))
        .route("/customers/dialogs", delete(customers::close_dialogs))
        .route("/customers/{id}/orders", post(customers::order_history))
        .route("/customers/{id}/complaints", post(customers::complaint_history))
        .route("/customers/{id}/ban", post(customers::ban))
        // Orders
        .route("/orders", get(orders::index))
        .route("/orders/page", post(orders::page))
        .route("/orders/details", delete(orders::close_details))
        .route("/orders/{id}/details", post(orders::details))
        .route("/orders/{id}", delete(orders::delete))
        // FAQs
        .route("/faqs", get(faqs::index))
        .route("/faqs/page", post(faqs::page))
        .route(
            "/faqs/draft",
            post(faqs::open_add).put(faqs::update).delete(faqs::close),
        )
        .route("/faqs/draft/latest", post(faqs::apply_latest))
        .route(
            "/faqs/draft/answers/{index}/image",
            post(faqs::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/faqs/draft/submit", post(faqs::submit))
        .route("/faqs/toasts/{id}", delete(faqs::dismiss_toast))
        .route("/faqs/{id}/draft", post(faqs::open_edit))
        // Customer care
        .route("/customer-care", get(customer_care::index))
        .route("/customer-care/page", post(customer_care::page))
        .route(
            "/customer-care/{id}/availability",
            post(customer_care::availability),
        )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use flashfood_admin_core::ImageRef;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::api::{DashboardApi, SessionStore};
    use crate::pages::PageSettings;
    use crate::pages::fake::{self, FakeApi};

    fn app(api: &Arc<FakeApi>) -> (Router, AppState) {
        let state = AppState::with_api(
            PageSettings::default(),
            SessionStore::new(),
            Arc::clone(api) as Arc<dyn DashboardApi>,
        );
        (routes().with_state(state.clone()), state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn signed_in(app: &Router, role: &str) -> Value {
        let (status, body) = send(
            app,
            "POST",
            "/session",
            Some(json!({"access_token": "token-abc", "logged_in_as": role})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app(&Arc::new(FakeApi::default()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_pages_require_session() {
        let (app, _) = app(&Arc::new(FakeApi::default()));

        for uri in ["/customers", "/orders", "/faqs", "/customer-care"] {
            let (status, body) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert!(body["error"].is_string());
        }

        let (status, body) = send(&app, "GET", "/navigation", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["menu"], json!([]));
        assert_eq!(body["landing_route"], Value::Null);
    }

    #[tokio::test]
    async fn test_sign_in_mounts_pages_and_returns_menu() {
        let api = Arc::new(FakeApi::default());
        *api.customers.lock().expect("lock") = (1..=42)
            .map(|n| fake::customer(&format!("FF_CUS_{n}"), false, 0))
            .collect();
        let (app, state) = app(&api);

        let nav = signed_in(&app, "FINANCE_ADMIN").await;
        assert_eq!(
            nav["valid_routes"],
            json!(["/", "/manage/service-fee", "/manage/balance-activity"])
        );
        assert_eq!(nav["landing_route"], "/");

        let (status, body) = send(&app, "GET", "/customers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(10));
        assert_eq!(body["pagination"]["total_items"], 42);
        assert_eq!(body["pagination"]["total_pages"], 5);
        assert!(state.session().is_signed_in().await);

        let (status, body) = send(&app, "POST", "/customers/page", Some(json!({"page": 5}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["current_page"], 5);
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_sign_out_unmounts_pages() {
        let (app, state) = app(&Arc::new(FakeApi::default()));
        signed_in(&app, "SUPER_ADMIN").await;

        let (status, _) = send(&app, "DELETE", "/session", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(!state.session().is_signed_in().await);

        let (status, _) = send(&app, "GET", "/orders", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_revoked_session_unmounts_pages() {
        let (app, state) = app(&Arc::new(FakeApi::default()));
        signed_in(&app, "SUPER_ADMIN").await;

        // What the client does on a 401.
        state.session().clear().await;

        let (status, _) = send(&app, "GET", "/customers", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(state.dashboard().await.is_none());
    }

    #[tokio::test]
    async fn test_blank_token_is_rejected() {
        let (app, _) = app(&Arc::new(FakeApi::default()));
        let (status, _) = send(
            &app,
            "POST",
            "/session",
            Some(json!({"access_token": " ", "logged_in_as": "SUPER_ADMIN"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ban_route_flips_row_without_refetch() {
        let api = Arc::new(FakeApi::default());
        let now = crate::pages::now_epoch_secs();
        *api.customers.lock().expect("lock") = vec![fake::customer("FF_CUS_1", false, now)];
        let (app, _) = app(&api);
        signed_in(&app, "SUPER_ADMIN").await;

        let (status, _) = send(&app, "POST", "/customers/FF_CUS_1/ban", Some(json!({"reason": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(api.count("ban:"), 0);

        let (status, body) =
            send(&app, "POST", "/customers/FF_CUS_1/ban", Some(json!({"reason": "fraud"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"][0]["status"], "banned");
        assert_eq!(body["stats"]["banned"], 1);
        assert_eq!(body["ban_dialog"]["open"], false);
        assert!(api.calls().contains(&"ban:FF_CUS_1:fraud".to_string()));
        assert_eq!(api.count("customers_page"), 1);
    }

    #[tokio::test]
    async fn test_order_details_and_delete() {
        let api = Arc::new(FakeApi::default());
        *api.orders.lock().expect("lock") = vec![
            fake::order("FF_ORD_1", "PENDING"),
            fake::order("FF_ORD_2", "DELIVERED"),
        ];
        let (app, _) = app(&api);
        signed_in(&app, "SUPER_ADMIN").await;

        let (status, body) = send(&app, "POST", "/orders/FF_ORD_1/details", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["details"]["open"], true);
        assert_eq!(body["details"]["data"]["id"], "FF_ORD_1");

        let (status, body) = send(&app, "DELETE", "/orders/details", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["details"]["open"], false);

        let (status, _) = send(&app, "DELETE", "/orders/FF_ORD_2", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "DELETE", "/orders/FF_ORD_1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["rows"][0]["id"], "FF_ORD_2");
    }

    #[tokio::test]
    async fn test_faq_add_flow_refetches_list() {
        let api = Arc::new(FakeApi::default());
        let (app, _) = app(&api);
        signed_in(&app, "COMPANION_ADMIN").await;

        let (status, _) = send(&app, "POST", "/faqs/draft/submit", None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(&app, "POST", "/faqs/draft", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["draft"]["mode"], "add");

        let (status, _) = send(
            &app,
            "PUT",
            "/faqs/draft",
            Some(json!({
                "question": "How do I pay?",
                "answer": [{"type": "text", "value": "Hi"}],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "POST", "/faqs/draft/submit", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["draft"], Value::Null);
        assert_eq!(body["rows"][0]["question"], "How do I pay?");
        assert_eq!(body["toasts"][0]["description"], "FAQ created successfully.");
        assert_eq!(api.count("faqs_page"), 2);

        let id = body["toasts"][0]["id"].as_u64().expect("toast id");
        let (status, body) = send(&app, "DELETE", &format!("/faqs/toasts/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["toasts"], json!([]));
    }

    #[tokio::test]
    async fn test_faq_image_upload_multipart() {
        let api = Arc::new(FakeApi::default());
        *api.upload.lock().expect("lock") = Some(ImageRef::new("https://cdn/x.png", "faq/x"));
        let (app, _) = app(&api);
        signed_in(&app, "SUPER_ADMIN").await;
        send(&app, "POST", "/faqs/draft", None).await;

        let boundary = "flashfood-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"menu.png\"\r\n\
             Content-Type: image/png\r\n\r\nPNGDATA\r\n--{boundary}--\r\n"
        );
        let request = Request::post("/faqs/draft/answers/0/image")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request");

        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let view: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(
            view["draft"]["answer"][0],
            json!({"type": "image", "value": {"url": "https://cdn/x.png", "key": "faq/x"}})
        );
        assert!(api.calls().contains(&"upload:menu.png".to_string()));
    }

    #[tokio::test]
    async fn test_customer_care_availability() {
        let api = Arc::new(FakeApi::default());
        *api.reps.lock().expect("lock") = vec![fake::rep("FF_CC_1", false)];
        let (app, _) = app(&api);
        signed_in(&app, "SUPER_ADMIN").await;

        let (status, body) = send(
            &app,
            "POST",
            "/customer-care/FF_CC_1/availability",
            Some(json!({"available_for_work": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"][0]["available"], true);
    }
}
