//! Authentication Middleware
//!
//! Bearer token validation for the protected candidate endpoints.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::handlers::AppState;
use crate::utils::error::AppError;

/// Extension type carrying the authenticated subject's email
#[derive(Debug, Clone)]
pub struct AuthSubject(pub String);

/// Authentication middleware for protected routes
///
/// Extracts the bearer token from the Authorization header, validates its
/// signature and expiry, and confirms the subject identity still exists.
/// The subject email is inserted into request extensions for handlers that
/// need it. Any failure produces the same opaque 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let subject = state.token_service.validate(token)?;

    // A revoked or deleted identity loses access before its token expires.
    let identity = state.identity_service.authorize(&subject).await?;

    request.extensions_mut().insert(AuthSubject(identity.email));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{state_with_stores, token_for};
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn ok_handler() -> &'static str {
        "ok"
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/protected", get(ok_handler))
            .route_layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    fn get_with_auth(value: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/protected");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_unauthorized() {
        let (state, _) = state_with_stores().await;
        let response = app(state).oneshot(get_with_auth(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get("www-authenticate").unwrap(),
            "Bearer"
        );
    }

    #[tokio::test]
    async fn test_non_bearer_header_unauthorized() {
        let (state, _) = state_with_stores().await;
        let response = app(state)
            .oneshot(get_with_auth(Some("Basic dXNlcjpwYXNz")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_unauthorized() {
        let (state, _) = state_with_stores().await;
        let response = app(state)
            .oneshot(get_with_auth(Some("Bearer garbage")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let (state, _) = state_with_stores().await;
        let token = token_for(&state, "user@example.com").await;
        let response = app(state)
            .oneshot(get_with_auth(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_deleted_identity_loses_access() {
        let (state, identity_store) = state_with_stores().await;
        let token = token_for(&state, "user@example.com").await;
        identity_store.remove("user@example.com").unwrap();

        let response = app(state)
            .oneshot(get_with_auth(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
