//! HTTP transport for the FlashFood backend REST API.
//!
//! Every request carries a fresh `x-request-id` and, when a session is
//! present, `Authorization: Bearer <token>`. Responses are unwrapped from the
//! `{EC, EM, data}` envelope; a 401 signs the operator out.

use std::sync::Arc;
use std::time::Duration;

use flashfood_admin_core::{Envelope, PageRequest};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use super::{ApiError, SessionStore};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// FlashFood backend API client.
///
/// Cheap to clone; clones share the connection pool and the session store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    /// Create a new client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &Url, timeout: Duration, session: SessionStore) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: with_trailing_slash(base_url),
                session,
            }),
        })
    }

    /// Session store consulted on every request.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Execute a GET request with query parameters.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, ApiError> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let request = self.request(Method::GET, url).await?;
        self.execute(path, request).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        let url = self.endpoint(path)?;
        let request = self.request(Method::POST, url).await?.json(body);
        self.execute(path, request).await
    }

    /// Execute a PATCH request with a JSON body.
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        let url = self.endpoint(path)?;
        let request = self.request(Method::PATCH, url).await?.json(body);
        self.execute(path, request).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ApiError> {
        let url = self.endpoint(path)?;
        let request = self.request(Method::DELETE, url).await?;
        self.execute(path, request).await
    }

    /// Execute a multipart POST request.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<Option<T>, ApiError> {
        let url = self.endpoint(path)?;
        let request = self.request(Method::POST, url).await?.multipart(form);
        self.execute(path, request).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Config(format!("Invalid endpoint path {path}: {e}")))
    }

    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, ApiError> {
        let mut request = self
            .inner
            .client
            .request(method, url)
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());

        if let Some(session) = self.inner.session.current().await {
            let mut value = HeaderValue::from_str(&session.bearer())
                .map_err(|e| ApiError::Config(format!("Invalid access token format: {e}")))?;
            value.set_sensitive(true);
            request = request.header(AUTHORIZATION, value);
        }

        Ok(request)
    }

    /// Send the request and unwrap the envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let response = request.send().await?;
        let response = self.check_status(path, response).await?;

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("Failed to parse response from {path}: {e}")))?;

        Ok(envelope.into_result()?)
    }

    async fn check_status(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => {
                tracing::warn!(path, "Backend rejected the session token, signing out");
                self.inner.session.clear().await;
                Err(ApiError::Unauthorized)
            }
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string())),
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// `limit`/`page` query parameters for a paginated listing.
pub(crate) fn page_query(request: PageRequest) -> [(&'static str, String); 2] {
    [
        ("limit", request.limit.to_string()),
        ("page", request.page.to_string()),
    ]
}

/// `Url::join` drops the last path segment unless the base ends in `/`.
fn with_trailing_slash(base_url: &Url) -> Url {
    let mut url = base_url.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
