use crate::progress::{DEFAULT_PUSHUPS_GOAL, DEFAULT_RUN_KM_GOAL};
use serde::{Deserialize, Serialize};

/// Per-user weekly goals. Created once on first access; read-mostly after.
/// Raw stored values may be zero or negative and are normalized at read
/// time, see `progress::normalize_goal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSettings {
  pub id: String,
  pub user: String,
  #[serde(rename = "pushupsGoal", default)]
  pub pushups_goal: f64,
  #[serde(rename = "runKmGoal", default)]
  pub run_km_goal: f64,
}

/// For creating settings (without id)
#[derive(Debug, Clone, Serialize)]
pub struct NewSettings {
  pub user: String,
  #[serde(rename = "pushupsGoal")]
  pub pushups_goal: f64,
  #[serde(rename = "runKmGoal")]
  pub run_km_goal: f64,
}

impl NewSettings {
  /// Default goals for a user seen for the first time: 100 pushups and
  /// 50 run-km per week.
  pub fn defaults(user_id: &str) -> Self {
    Self {
      user: user_id.to_string(),
      pushups_goal: DEFAULT_PUSHUPS_GOAL,
      run_km_goal: DEFAULT_RUN_KM_GOAL,
    }
  }
}
