use serde::{Deserialize, Serialize};

/// Authenticated user record as returned by the auth endpoint and carried
/// in the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
  pub id: String,
  #[serde(default)]
  pub email: String,
}

/// Registration payload for the users collection
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
  pub email: String,
  pub password: String,
  #[serde(rename = "passwordConfirm")]
  pub password_confirm: String,
}
