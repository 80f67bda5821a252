use serde::{Deserialize, Serialize};

/// One logged day for one user. The store enforces uniqueness of
/// (user, ymd); this crate never deletes entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEntry {
  pub id: String,
  pub user: String,
  /// Calendar date, `YYYY-MM-DD`
  pub ymd: String,
  /// Midnight-UTC instant derived from `ymd`, used for week-window queries
  pub date: String,
  #[serde(default)]
  pub pushups: i64,
  #[serde(rename = "runKm", default)]
  pub run_km: f64,
}

/// For creating new entries (without id)
#[derive(Debug, Clone, Serialize)]
pub struct NewEntry {
  pub user: String,
  pub ymd: String,
  pub date: String,
  pub pushups: i64,
  #[serde(rename = "runKm")]
  pub run_km: f64,
}

/// Partial update payload; absent fields are left untouched by the store
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntryUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pushups: Option<i64>,
  #[serde(rename = "runKm", skip_serializing_if = "Option::is_none")]
  pub run_km: Option<f64>,
}
