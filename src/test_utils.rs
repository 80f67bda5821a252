//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Mock data factories
//! - JSON fixtures for the mocked PocketBase API

use crate::models::{AuthUser, DailyEntry, GoalSettings};
use crate::week;

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a daily entry for testing; `date` is derived from `ymd` the same
/// way production writes do.
pub fn mock_entry(id: &str, ymd: &str, pushups: i64, run_km: f64) -> DailyEntry {
  DailyEntry {
    id: id.to_string(),
    user: "u1".to_string(),
    ymd: ymd.to_string(),
    date: week::ymd_to_stored_date(ymd).expect("valid test date"),
    pushups,
    run_km,
  }
}

/// Create goal settings for testing
pub fn mock_settings(user_id: &str, pushups_goal: f64, run_km_goal: f64) -> GoalSettings {
  GoalSettings {
    id: "s1".to_string(),
    user: user_id.to_string(),
    pushups_goal,
    run_km_goal,
  }
}

pub fn mock_user(id: &str) -> AuthUser {
  AuthUser {
    id: id.to_string(),
    email: format!("{}@example.com", id),
  }
}

/// ---------------------------------------------------------------------------
/// PocketBase Response Fixtures
/// ---------------------------------------------------------------------------

/// A records-list response body holding the given items
pub fn list_body(items: &[serde_json::Value]) -> String {
  serde_json::json!({
    "page": 1,
    "perPage": 200,
    "totalItems": -1,
    "items": items,
  })
  .to_string()
}

pub fn empty_list_body() -> String {
  list_body(&[])
}

pub fn entry_json(entry: &DailyEntry) -> serde_json::Value {
  serde_json::json!({
    "id": entry.id,
    "user": entry.user,
    "ymd": entry.ymd,
    "date": entry.date,
    "pushups": entry.pushups,
    "runKm": entry.run_km,
  })
}

pub fn settings_json(settings: &GoalSettings) -> serde_json::Value {
  serde_json::json!({
    "id": settings.id,
    "user": settings.user,
    "pushupsGoal": settings.pushups_goal,
    "runKmGoal": settings.run_km_goal,
  })
}

/// Auth endpoint response for the given user
pub fn auth_body(token: &str, user: &AuthUser) -> String {
  serde_json::json!({
    "token": token,
    "record": { "id": user.id, "email": user.email },
  })
  .to_string()
}

/// PocketBase error response body
pub fn error_body(code: u16, message: &str) -> String {
  serde_json::json!({ "code": code, "message": message, "data": {} }).to_string()
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------
