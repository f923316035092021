//! Bearer-token middleware
//!
//! Rejects requests without a valid signed session token before they reach
//! any handler. Verified claims are inserted into request extensions for
//! handlers that care who is calling.

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Request};
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use super::AppState;
use crate::auth;
use crate::error::ApiError;

/// Layer requiring a valid bearer token
#[derive(Clone)]
pub struct RequireAuthLayer {
    state: Arc<AppState>,
}

impl RequireAuthLayer {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl<S> Layer<S> for RequireAuthLayer {
    type Service = RequireAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequireAuth {
            inner,
            state: self.state.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RequireAuth<S> {
    inner: S,
    state: Arc<AppState>,
}

impl<S> Service<Request<Body>> for RequireAuth<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let state = self.state.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(token) = bearer_token(request.headers()) else {
                return Ok(ApiError::MissingToken.into_response());
            };

            match auth::verify_token(&state.config.auth.token_secret, &token) {
                Some(claims) => {
                    request.extensions_mut().insert(claims);
                    inner.call(request).await
                }
                None => Ok(ApiError::InvalidToken.into_response()),
            }
        })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(
            bearer_token(&headers_with("Bearer abc.def")).as_deref(),
            Some("abc.def")
        );
    }

    #[test]
    fn rejects_missing_or_blank_tokens() {
        assert!(bearer_token(&HeaderMap::new()).is_none());
        assert!(bearer_token(&headers_with("Bearer   ")).is_none());
        assert!(bearer_token(&headers_with("Basic abc")).is_none());
    }
}
