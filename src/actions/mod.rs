//! Operation boundary: page loads and form actions
//!
//! Every action takes the user id and store client explicitly; there is no
//! ambient request state. Store errors are converted to a structured
//! failure here and never propagate unhandled.

pub mod auth;
pub mod counter;

use crate::forms::ValidationError;
use crate::models::AuthUser;
use crate::pocketbase::PbError;
use crate::session::Session;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
  #[error("{0}")]
  Validation(#[from] ValidationError),

  #[error("{0}")]
  Store(#[from] PbError),

  #[error("Not authenticated")]
  NotAuthenticated,
}

impl ActionError {
  /// HTTP status the host framework should respond with.
  pub fn http_status(&self) -> u16 {
    match self {
      ActionError::Validation(_) => 400,
      ActionError::Store(_) => 500,
      ActionError::NotAuthenticated => 401,
    }
  }
}

impl Serialize for ActionError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// Guard for authenticated pages: the user from the restored session, or
/// `NotAuthenticated` for the framework to turn into a login redirect.
pub fn require_user(session: Option<&Session>) -> Result<&AuthUser, ActionError> {
  session
    .map(|s| &s.model)
    .ok_or(ActionError::NotAuthenticated)
}
