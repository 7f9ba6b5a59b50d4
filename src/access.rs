//! Session extraction for the HTTP layer.
//!
//! Authentication happens upstream; a trusted proxy forwards the signed-in
//! user as `x-user-id` and `x-user-role` headers. Requests without a user id
//! are anonymous.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
};
use common::{AccessDecision, Role, Session, SessionState, access::LOGIN_PATH, authorize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::helpers::errors::{ApiError, api_error};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Derive the session from the forwarded identity headers.
///
/// A user id without a role header is an operator. Malformed headers are
/// treated as no session at all.
pub fn session_from_headers(headers: &HeaderMap) -> SessionState {
    let Some(raw_id) = headers.get(USER_ID_HEADER) else {
        return SessionState::Anonymous;
    };
    let user_id = match raw_id.to_str().ok().and_then(|v| Uuid::parse_str(v.trim()).ok()) {
        Some(id) => id,
        None => {
            warn!("Ignoring malformed {} header", USER_ID_HEADER);
            return SessionState::Anonymous;
        }
    };

    let role = match headers.get(USER_ROLE_HEADER) {
        None => Role::Operator,
        Some(raw_role) => match raw_role.to_str().ok().map(str::parse::<Role>) {
            Some(Ok(role)) => role,
            _ => {
                warn!("Ignoring session with malformed {} header", USER_ROLE_HEADER);
                return SessionState::Anonymous;
            }
        },
    };

    SessionState::Authenticated(Session { user_id, role })
}

/// The caller's session, available to every handler as an extractor.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionState);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(session_from_headers(&parts.headers)))
    }
}

impl CurrentSession {
    /// Evaluate the guard before any data access. Redirect decisions become
    /// 401 (to the login page) or 403 (to the home page).
    pub fn require(&self, required_role: Option<Role>) -> Result<Option<&Session>, ApiError> {
        match authorize(&self.0, required_role) {
            AccessDecision::Render => Ok(self.session()),
            AccessDecision::Pending => Err(api_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "SESSION_PENDING",
                "Session is still being resolved, retry shortly",
            )),
            AccessDecision::RedirectTo(path) if path == LOGIN_PATH => {
                debug!("Anonymous request denied");
                Err(api_error(
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHENTICATED",
                    format!("Sign in at {}", path),
                ))
            }
            AccessDecision::RedirectTo(path) => {
                debug!(?required_role, "Request denied for insufficient role");
                Err(api_error(
                    StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    format!("Insufficient role, continue at {}", path),
                ))
            }
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.0 {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}
