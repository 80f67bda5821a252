//! Login, registration, and logout actions

use crate::forms::{FormFields, LoginForm, RegisterForm, ValidationError};
use crate::models::{AuthUser, NewUser};
use crate::pocketbase::PbClient;
use crate::session::{self, Session, SetCookie};

use super::ActionError;

const USERS: &str = "users";

/// Authenticate with email and password. Failures surface as a generic
/// message; the store's detail is deliberately not leaked to the login form.
pub async fn login(
  pb: &mut PbClient,
  fields: &FormFields,
) -> Result<(Session, SetCookie), ActionError> {
  let form = LoginForm::from_fields(fields);

  let auth = pb
    .auth_with_password(USERS, &form.email, &form.password)
    .await
    .map_err(|_| ValidationError::new("credentials", "Invalid email or password"))?;

  let session = Session {
    token: auth.token,
    model: auth.record,
  };
  let cookie = session::auth_cookie(&session);

  Ok((session, cookie))
}

/// Create an account, then authenticate it. Creation failures carry the
/// message extracted from the store error.
pub async fn register(
  pb: &mut PbClient,
  fields: &FormFields,
) -> Result<(Session, SetCookie), ActionError> {
  let form = RegisterForm::from_fields(fields);

  let new_user = NewUser {
    email: form.email.clone(),
    password: form.password.clone(),
    password_confirm: form.password_confirm,
  };
  let _created: AuthUser = pb.create(USERS, &new_user).await?;

  let auth = pb
    .auth_with_password(USERS, &form.email, &form.password)
    .await?;

  let session = Session {
    token: auth.token,
    model: auth.record,
  };
  let cookie = session::auth_cookie(&session);

  Ok((session, cookie))
}

/// Drop the client's auth state and expire the session cookie.
pub fn logout(pb: &mut PbClient) -> SetCookie {
  pb.clear_token();
  session::clear_cookie()
}
