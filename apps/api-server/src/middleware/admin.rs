//! Admin access extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use subtle::ConstantTimeEq;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Proof that the request may use the admin API.
///
/// Add it as a handler argument to guard the route:
/// ```ignore
/// async fn stats(_admin: AdminGuard, state: web::Data<AppState>) -> AppResult<HttpResponse> { .. }
/// ```
/// When no admin token is configured every request passes.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

impl FromRequest for AdminGuard {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AppError::Internal(
                "Server configuration error".to_string(),
            )));
        };

        let Some(expected) = state.admin_token.as_deref() else {
            return ready(Ok(AdminGuard));
        };

        // Parse "Bearer <token>"
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);

        match token {
            Some(token) if token_matches(token, expected) => ready(Ok(AdminGuard)),
            Some(_) => {
                tracing::warn!(path = %req.path(), "Rejected admin request with wrong token");
                ready(Err(AppError::Unauthorized))
            }
            None => ready(Err(AppError::Unauthorized)),
        }
    }
}

/// Compare a presented token with the configured one in constant time.
fn token_matches(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
