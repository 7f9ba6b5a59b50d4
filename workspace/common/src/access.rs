//! Route guard for protected pages and endpoints.
//!
//! The guard only decides; it never fetches. Callers evaluate it before any
//! page-level data access and act on the returned [`AccessDecision`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

/// Where anonymous sessions are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where authenticated sessions lacking the required role are sent.
pub const HOME_PATH: &str = "/";

/// User roles, ordered by privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Operator,
    Manager,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Operator => "operator",
            Role::Manager => "manager",
            Role::Admin => "admin",
        };
        f.write_str(name)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "operator" => Ok(Role::Operator),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub role: Role,
}

/// What is known about the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The session is still being resolved.
    Loading,
    Anonymous,
    Authenticated(Session),
}

/// Outcome of [`authorize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Not decided yet; show a placeholder and ask again once the session resolves.
    Pending,
    Render,
    RedirectTo(String),
}

/// Decide whether protected content may be rendered for `session`.
///
/// `required_role` is a minimum: higher roles pass too.
pub fn authorize(session: &SessionState, required_role: Option<Role>) -> AccessDecision {
    let decision = match session {
        SessionState::Loading => AccessDecision::Pending,
        SessionState::Anonymous => AccessDecision::RedirectTo(LOGIN_PATH.to_string()),
        SessionState::Authenticated(session) => match required_role {
            Some(required) if session.role < required => {
                AccessDecision::RedirectTo(HOME_PATH.to_string())
            }
            _ => AccessDecision::Render,
        },
    };
    debug!(?session, ?required_role, ?decision, "Access decision");
    decision
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in(role: Role) -> SessionState {
        SessionState::Authenticated(Session {
            user_id: Uuid::new_v4(),
            role,
        })
    }

    #[test]
    fn test_loading_is_pending() {
        assert_eq!(authorize(&SessionState::Loading, None), AccessDecision::Pending);
        assert_eq!(
            authorize(&SessionState::Loading, Some(Role::Admin)),
            AccessDecision::Pending
        );
    }

    #[test]
    fn test_anonymous_goes_to_login() {
        assert_eq!(
            authorize(&SessionState::Anonymous, None),
            AccessDecision::RedirectTo("/login".to_string())
        );
    }

    #[test]
    fn test_role_hierarchy() {
        assert_eq!(authorize(&signed_in(Role::Operator), None), AccessDecision::Render);
        assert_eq!(
            authorize(&signed_in(Role::Operator), Some(Role::Manager)),
            AccessDecision::RedirectTo("/".to_string())
        );
        assert_eq!(
            authorize(&signed_in(Role::Manager), Some(Role::Manager)),
            AccessDecision::Render
        );
        assert_eq!(
            authorize(&signed_in(Role::Admin), Some(Role::Manager)),
            AccessDecision::Render
        );
        assert_eq!(
            authorize(&signed_in(Role::Manager), Some(Role::Admin)),
            AccessDecision::RedirectTo("/".to_string())
        );
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" manager ".parse::<Role>(), Ok(Role::Manager));
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Operator.to_string(), "operator");
    }
}
