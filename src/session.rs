//! Cookie-based session restoration
//!
//! The auth state lives in a single `pb_auth` cookie holding the token and
//! user record as JSON. The host framework extracts and transports cookie
//! values; this module only parses and builds them. A malformed cookie is
//! ignored, not deleted.

use crate::models::AuthUser;
use crate::pocketbase::PbClient;
use serde::{Deserialize, Serialize};

pub const AUTH_COOKIE: &str = "pb_auth";

const COOKIE_MAX_AGE_SECONDS: i64 = 60 * 60 * 24 * 30;

/// ---------------------------------------------------------------------------
/// Session State
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
  pub token: String,
  pub model: AuthUser,
}

/// Parse a cookie value back into a session.
pub fn restore(raw: &str) -> Option<Session> {
  serde_json::from_str(raw).ok()
}

/// Restore auth state onto a client from an optional cookie value. Returns
/// the session when the cookie was present and well-formed; otherwise the
/// client is left unauthenticated.
pub fn restore_client(pb: &mut PbClient, cookie: Option<&str>) -> Option<Session> {
  match cookie.and_then(restore) {
    Some(session) => {
      pb.set_token(session.token.clone());
      Some(session)
    }
    None => {
      pb.clear_token();
      None
    }
  }
}

/// ---------------------------------------------------------------------------
/// Cookie Construction
/// ---------------------------------------------------------------------------

/// Description of a Set-Cookie operation; serialization onto the response
/// is the host framework's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
  pub name: &'static str,
  pub value: String,
  pub path: &'static str,
  pub http_only: bool,
  pub same_site: &'static str,
  pub secure: bool,
  pub max_age: i64,
}

/// Cookie persisting an authenticated session for 30 days.
pub fn auth_cookie(session: &Session) -> SetCookie {
  SetCookie {
    name: AUTH_COOKIE,
    value: serde_json::to_string(session).unwrap_or_default(),
    path: "/",
    http_only: true,
    same_site: "Lax",
    secure: true,
    max_age: COOKIE_MAX_AGE_SECONDS,
  }
}

/// Cookie deleting the stored session.
pub fn clear_cookie() -> SetCookie {
  SetCookie {
    name: AUTH_COOKIE,
    value: String::new(),
    path: "/",
    http_only: true,
    same_site: "Lax",
    secure: true,
    max_age: 0,
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
