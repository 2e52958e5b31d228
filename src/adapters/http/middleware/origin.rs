//! Origin allowlist for the `/api` routes.
//!
//! `CorsLayer` only decides which response headers to emit; it never refuses
//! a request. [`origin_guard`] does the refusing: a request whose `Origin` is
//! not on the list gets 403 before any handler runs. Requests without an
//! `Origin` header (curl, server-to-server) pass.
//!
//! ```text
//! Request → CorsLayer → origin_guard → 403 | handler
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::adapters::http::prompt::ErrorResponse;

/// Body text of a refused request.
pub const CORS_REJECTION: &str = "Not allowed by CORS";

/// Origins allowed to call the API.
#[derive(Debug, Clone)]
pub struct OriginAllowlist {
    origins: Vec<HeaderValue>,
}

impl OriginAllowlist {
    /// Builds the list, skipping entries that are not valid header values.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let origins = origins
            .into_iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.as_ref()) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = origin.as_ref(), "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        Self { origins }
    }

    /// Whether a request with this `Origin` header may proceed.
    pub fn allows(&self, origin: Option<&HeaderValue>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.origins.iter().any(|allowed| allowed == origin),
        }
    }

    /// Response-header side of CORS for the same list.
    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.origins.clone()))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }
}

/// Refuses requests whose `Origin` is not allowlisted.
pub async fn origin_guard(
    State(allowlist): State<Arc<OriginAllowlist>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(header::ORIGIN);
    if allowlist.allows(origin) {
        return next.run(request).await;
    }

    tracing::warn!(
        origin = ?origin,
        path = %request.uri().path(),
        "Rejected request from disallowed origin"
    );
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse::new(CORS_REJECTION)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn allowlist() -> OriginAllowlist {
        OriginAllowlist::new(["https://sinergiagdl.com"])
    }

    #[test]
    fn missing_origin_is_allowed() {
        assert!(allowlist().allows(None));
    }

    #[test]
    fn listed_origin_is_allowed() {
        let origin = HeaderValue::from_static("https://sinergiagdl.com");
        assert!(allowlist().allows(Some(&origin)));
    }

    #[test]
    fn unlisted_origin_is_refused() {
        let origin = HeaderValue::from_static("https://evil.example");
        assert!(!allowlist().allows(Some(&origin)));
    }

    #[test]
    fn invalid_entries_are_skipped() {
        let list = OriginAllowlist::new(["bad\norigin", "https://ok.example"]);
        let origin = HeaderValue::from_static("https://ok.example");
        assert!(list.allows(Some(&origin)));
    }

    fn guarded() -> Router {
        Router::new()
            .route("/probe", get(|| async { "ok" }))
            .route_layer(middleware::from_fn_with_state(
                Arc::new(allowlist()),
                origin_guard,
            ))
    }

    #[tokio::test]
    async fn guard_returns_403_for_unlisted_origin() {
        let response = guarded()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/probe")
                    .header(header::ORIGIN, "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], CORS_REJECTION);
    }

    #[tokio::test]
    async fn guard_passes_listed_origin() {
        let response = guarded()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/probe")
                    .header(header::ORIGIN, "https://sinergiagdl.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
