//! Form-field coercion and validation
//!
//! Form data arrives as untyped strings. Everything is converted into a
//! typed request struct here, before any store access; a field that fails
//! to coerce never reaches the store. Pushup counts are whole numbers,
//! run distances may be fractional.

use crate::week;
use std::collections::HashMap;

pub type FormFields = HashMap<String, String>;

/// ---------------------------------------------------------------------------
/// Validation Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
  pub field: String,
  pub message: String,
}

impl ValidationError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }

  fn non_negative(field: &str, label: &str) -> Self {
    Self::new(field, format!("{} must be a non-negative number.", label))
  }

  fn whole_number(field: &str, label: &str) -> Self {
    Self::new(field, format!("{} must be a non-negative whole number.", label))
  }

  fn missing(field: &str, label: &str) -> Self {
    Self::new(field, format!("{} is required.", label))
  }

  pub(crate) fn invalid_date(field: &str) -> Self {
    Self::new(field, "Date must be formatted as YYYY-MM-DD.")
  }
}

/// ---------------------------------------------------------------------------
/// Field Coercion
/// ---------------------------------------------------------------------------

fn raw<'a>(fields: &'a FormFields, name: &str) -> Option<&'a str> {
  fields
    .get(name)
    .map(|value| value.trim())
    .filter(|value| !value.is_empty())
}

fn coerce_number(text: &str) -> Option<f64> {
  text
    .parse::<f64>()
    .ok()
    .filter(|value| value.is_finite() && *value >= 0.0)
}

/// Absent field coerces to zero, matching the counter form's hidden inputs.
fn number_or_zero(fields: &FormFields, name: &str, label: &str) -> Result<f64, ValidationError> {
  match raw(fields, name) {
    None => Ok(0.0),
    Some(text) => coerce_number(text).ok_or_else(|| ValidationError::non_negative(name, label)),
  }
}

fn count_or_zero(fields: &FormFields, name: &str, label: &str) -> Result<i64, ValidationError> {
  match raw(fields, name) {
    None => Ok(0),
    Some(text) => coerce_count(text).ok_or_else(|| ValidationError::whole_number(name, label)),
  }
}

fn coerce_count(text: &str) -> Option<i64> {
  let value = coerce_number(text)?;
  if value.fract() == 0.0 {
    Some(value as i64)
  } else {
    None
  }
}

fn required_number(fields: &FormFields, name: &str, label: &str) -> Result<f64, ValidationError> {
  let text = raw(fields, name).ok_or_else(|| ValidationError::missing(name, label))?;
  coerce_number(text).ok_or_else(|| ValidationError::non_negative(name, label))
}

fn required_count(fields: &FormFields, name: &str, label: &str) -> Result<i64, ValidationError> {
  let text = raw(fields, name).ok_or_else(|| ValidationError::missing(name, label))?;
  coerce_count(text).ok_or_else(|| ValidationError::whole_number(name, label))
}

fn optional_number(
  fields: &FormFields,
  name: &str,
  label: &str,
) -> Result<Option<f64>, ValidationError> {
  match raw(fields, name) {
    None => Ok(None),
    Some(text) => coerce_number(text)
      .map(Some)
      .ok_or_else(|| ValidationError::non_negative(name, label)),
  }
}

fn string_or_empty(fields: &FormFields, name: &str) -> String {
  fields.get(name).cloned().unwrap_or_default()
}

/// ---------------------------------------------------------------------------
/// Counter Forms
/// ---------------------------------------------------------------------------

/// Increment request from the one-tap buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickAddForm {
  pub pushups_delta: i64,
  pub run_km_delta: f64,
}

impl QuickAddForm {
  pub fn from_fields(fields: &FormFields) -> Result<Self, ValidationError> {
    Ok(Self {
      pushups_delta: count_or_zero(fields, "pushupsDelta", "Pushups delta")?,
      run_km_delta: number_or_zero(fields, "runKmDelta", "Run km delta")?,
    })
  }

  pub fn is_noop(&self) -> bool {
    self.pushups_delta == 0 && self.run_km_delta == 0.0
  }
}

/// Increment request from the typed-amount inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct AddTypedForm {
  pub pushups: i64,
  pub run_km: f64,
}

impl AddTypedForm {
  pub fn from_fields(fields: &FormFields) -> Result<Self, ValidationError> {
    Ok(Self {
      pushups: count_or_zero(fields, "pushups", "Pushups")?,
      run_km: number_or_zero(fields, "runKm", "Run km")?,
    })
  }

  pub fn is_noop(&self) -> bool {
    self.pushups == 0 && self.run_km == 0.0
  }
}

/// Absolute replacement of today's totals.
#[derive(Debug, Clone, PartialEq)]
pub struct SetTotalsForm {
  pub pushups_total: i64,
  pub run_km_total: f64,
}

impl SetTotalsForm {
  pub fn from_fields(fields: &FormFields) -> Result<Self, ValidationError> {
    Ok(Self {
      pushups_total: required_count(fields, "pushupsTotal", "Pushups total")?,
      run_km_total: required_number(fields, "runKmTotal", "Run km total")?,
    })
  }
}

/// Absolute set for an arbitrary day (defaults to today). An absent run-km
/// field means "leave the stored value alone".
#[derive(Debug, Clone, PartialEq)]
pub struct SaveForm {
  pub ymd: Option<String>,
  pub pushups: i64,
  pub run_km: Option<f64>,
}

impl SaveForm {
  pub fn from_fields(fields: &FormFields) -> Result<Self, ValidationError> {
    let ymd = match raw(fields, "ymd") {
      None => None,
      Some(text) => {
        if week::parse_ymd(text).is_none() {
          return Err(ValidationError::invalid_date("ymd"));
        }
        Some(text.to_string())
      }
    };

    Ok(Self {
      ymd,
      pushups: count_or_zero(fields, "pushups", "Pushups")?,
      run_km: optional_number(fields, "runKm", "Run km")?,
    })
  }
}

/// ---------------------------------------------------------------------------
/// Auth Forms
/// ---------------------------------------------------------------------------

// Credential fields are passed through as-is; the auth backend owns their
// validation.

#[derive(Debug, Clone, PartialEq)]
pub struct LoginForm {
  pub email: String,
  pub password: String,
}

impl LoginForm {
  pub fn from_fields(fields: &FormFields) -> Self {
    Self {
      email: string_or_empty(fields, "email"),
      password: string_or_empty(fields, "password"),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterForm {
  pub email: String,
  pub password: String,
  pub password_confirm: String,
}

impl RegisterForm {
  pub fn from_fields(fields: &FormFields) -> Self {
    Self {
      email: string_or_empty(fields, "email"),
      password: string_or_empty(fields, "password"),
      password_confirm: string_or_empty(fields, "passwordConfirm"),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  fn fields(pairs: &[(&str, &str)]) -> FormFields {
    pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect()
  }

  #[test]
  fn test_quick_add_parses_deltas() {
    let form = QuickAddForm::from_fields(&fields(&[
      ("pushupsDelta", "10"),
      ("runKmDelta", "2.5"),
    ]))
    .unwrap();

    assert_eq!(form.pushups_delta, 10);
    assert_eq!(form.run_km_delta, 2.5);
    assert!(!form.is_noop());
  }

  #[test]
  fn test_quick_add_missing_fields_are_zero_deltas() {
    let form = QuickAddForm::from_fields(&fields(&[])).unwrap();
    assert!(form.is_noop());
  }

  #[test]
  fn test_quick_add_rejects_negative_delta() {
    let err = QuickAddForm::from_fields(&fields(&[("pushupsDelta", "-1")])).unwrap_err();
    assert_eq!(err.field, "pushupsDelta");
    assert!(err.message.contains("non-negative"));
  }

  #[test]
  fn test_quick_add_rejects_non_numeric_and_non_finite() {
    assert!(QuickAddForm::from_fields(&fields(&[("runKmDelta", "abc")])).is_err());
    assert!(QuickAddForm::from_fields(&fields(&[("runKmDelta", "inf")])).is_err());
    assert!(QuickAddForm::from_fields(&fields(&[("runKmDelta", "NaN")])).is_err());
  }

  #[test]
  fn test_pushup_counts_must_be_whole() {
    let err = AddTypedForm::from_fields(&fields(&[("pushups", "1.5")])).unwrap_err();
    assert_eq!(err.field, "pushups");
    assert!(err.message.contains("whole number"));
  }

  #[test]
  fn test_fractional_run_km_is_fine() {
    let form = AddTypedForm::from_fields(&fields(&[("runKm", "3.7")])).unwrap();
    assert_eq!(form.run_km, 3.7);
  }

  #[test]
  fn test_set_totals_requires_both_fields() {
    let err = SetTotalsForm::from_fields(&fields(&[("pushupsTotal", "20")])).unwrap_err();
    assert_eq!(err.field, "runKmTotal");

    let form = SetTotalsForm::from_fields(&fields(&[
      ("pushupsTotal", "20"),
      ("runKmTotal", "3.5"),
    ]))
    .unwrap();
    assert_eq!(form.pushups_total, 20);
    assert_eq!(form.run_km_total, 3.5);
  }

  #[test]
  fn test_save_validates_ymd() {
    let err = SaveForm::from_fields(&fields(&[("ymd", "01/05/2026")])).unwrap_err();
    assert_eq!(err.field, "ymd");

    let form = SaveForm::from_fields(&fields(&[("ymd", "2026-01-05"), ("pushups", "12")])).unwrap();
    assert_eq!(form.ymd.as_deref(), Some("2026-01-05"));
    assert_eq!(form.pushups, 12);
    assert_eq!(form.run_km, None);
  }

  #[test]
  fn test_save_defaults() {
    let form = SaveForm::from_fields(&fields(&[])).unwrap();
    assert_eq!(form.ymd, None);
    assert_eq!(form.pushups, 0);
    assert_eq!(form.run_km, None);
  }

  #[test]
  fn test_empty_string_field_treated_as_absent() {
    let form = SaveForm::from_fields(&fields(&[("runKm", "")])).unwrap();
    assert_eq!(form.run_km, None);
  }

  #[test]
  fn test_login_form_defaults_to_empty_strings() {
    let form = LoginForm::from_fields(&fields(&[("email", "a@b.c")]));
    assert_eq!(form.email, "a@b.c");
    assert_eq!(form.password, "");
  }
}
