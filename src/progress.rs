//! Weekly aggregation and goal-progress computation
//!
//! The one piece of deterministic logic in this crate: summing a user's
//! daily entries over the current Monday-aligned week and expressing the
//! totals as percent-of-goal.

use crate::models::{DailyEntry, GoalSettings};
use crate::week::{self, WeekWindow};
use serde::Serialize;

pub const DEFAULT_PUSHUPS_GOAL: f64 = 100.0;
pub const DEFAULT_RUN_KM_GOAL: f64 = 50.0;

/// ---------------------------------------------------------------------------
/// Goal Normalizer
/// ---------------------------------------------------------------------------

/// A goal must be a positive finite number; anything else falls back.
pub fn normalize_goal(value: f64, fallback: f64) -> f64 {
  if value.is_finite() && value > 0.0 {
    value
  } else {
    fallback
  }
}

/// ---------------------------------------------------------------------------
/// Percent Calculator
/// ---------------------------------------------------------------------------

/// Percent of goal achieved, rounded and clamped into [0, 100].
/// A non-positive or non-finite goal yields 0.
pub fn percent(achieved: f64, goal: f64) -> i64 {
  if !goal.is_finite() || goal <= 0.0 {
    return 0;
  }

  let pct = achieved / goal * 100.0;
  if !pct.is_finite() {
    return 0;
  }

  pct.round().clamp(0.0, 100.0) as i64
}

/// ---------------------------------------------------------------------------
/// Weekly Aggregator
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeeklyTotals {
  pub pushups: i64,
  pub run_km: f64,
}

/// Sum pushups and run-km across entries whose stored timestamp falls in
/// the window. Entry order is irrelevant; an entry exactly at the window
/// start is included, one exactly at the end is excluded. Entries with an
/// unparseable timestamp contribute nothing.
pub fn aggregate_week(entries: &[DailyEntry], window: &WeekWindow) -> WeeklyTotals {
  let mut totals = WeeklyTotals::default();

  for entry in entries {
    if let Some(ts) = week::parse_stored_date(&entry.date) {
      if window.contains(ts) {
        totals.pushups += entry.pushups;
        totals.run_km += entry.run_km;
      }
    }
  }

  totals
}

/// ---------------------------------------------------------------------------
/// Weekly Progress (totals + goals + percents)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
  pub week_pushups: i64,
  pub week_run_km: f64,
  pub pushups_goal: f64,
  pub run_km_goal: f64,
  pub pushups_percent: i64,
  pub run_km_percent: i64,
}

impl WeeklyProgress {
  pub fn compute(entries: &[DailyEntry], settings: &GoalSettings, window: &WeekWindow) -> Self {
    let totals = aggregate_week(entries, window);
    let pushups_goal = normalize_goal(settings.pushups_goal, DEFAULT_PUSHUPS_GOAL);
    let run_km_goal = normalize_goal(settings.run_km_goal, DEFAULT_RUN_KM_GOAL);

    Self {
      week_pushups: totals.pushups,
      week_run_km: totals.run_km,
      pushups_goal,
      run_km_goal,
      pushups_percent: percent(totals.pushups as f64, pushups_goal),
      run_km_percent: percent(totals.run_km, run_km_goal),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{mock_entry, mock_settings};
  use chrono::{TimeZone, Utc};

  fn window() -> WeekWindow {
    // Week of Monday 2026-01-05 .. Monday 2026-01-12
    WeekWindow::containing(Utc.with_ymd_and_hms(2026, 1, 7, 12, 0, 0).unwrap())
  }

  #[test]
  fn test_normalize_goal_positive_passes_through() {
    assert_eq!(normalize_goal(75.0, 100.0), 75.0);
    assert_eq!(normalize_goal(0.5, 100.0), 0.5);
  }

  #[test]
  fn test_normalize_goal_falls_back() {
    assert_eq!(normalize_goal(0.0, 100.0), 100.0);
    assert_eq!(normalize_goal(-5.0, 100.0), 100.0);
    assert_eq!(normalize_goal(f64::NAN, 50.0), 50.0);
    assert_eq!(normalize_goal(f64::INFINITY, 50.0), 50.0);
  }

  #[test]
  fn test_percent_rounds() {
    assert_eq!(percent(50.0, 100.0), 50);
    // 1/3 -> 33.33 -> 33; 2/3 -> 66.67 -> 67
    assert_eq!(percent(1.0, 3.0), 33);
    assert_eq!(percent(2.0, 3.0), 67);
  }

  #[test]
  fn test_percent_clamps_to_hundred() {
    assert_eq!(percent(250.0, 100.0), 100);
  }

  #[test]
  fn test_percent_zero_or_invalid_goal_is_zero() {
    assert_eq!(percent(10.0, 0.0), 0);
    assert_eq!(percent(10.0, -5.0), 0);
    assert_eq!(percent(10.0, f64::NAN), 0);
    assert_eq!(percent(f64::NAN, 100.0), 0);
  }

  #[test]
  fn test_percent_stays_in_range() {
    for achieved in [0.0, 0.4, 1.0, 99.9, 100.0, 1000.0] {
      for goal in [-1.0, 0.0, 0.1, 50.0, f64::INFINITY] {
        let p = percent(achieved, goal);
        assert!((0..=100).contains(&p), "percent({}, {}) = {}", achieved, goal, p);
      }
    }
  }

  #[test]
  fn test_aggregate_week_half_open_boundaries() {
    let entries = vec![
      mock_entry("e1", "2026-01-04", 10, 1.0), // Sunday before the window
      mock_entry("e2", "2026-01-05", 20, 2.0), // exactly at weekStart
      mock_entry("e3", "2026-01-12", 40, 4.0), // exactly at weekEnd
    ];

    let totals = aggregate_week(&entries, &window());
    assert_eq!(totals.pushups, 20);
    assert_eq!(totals.run_km, 2.0);
  }

  #[test]
  fn test_aggregate_week_sums_in_window_entries() {
    let entries = vec![
      mock_entry("e1", "2026-01-05", 15, 2.5),
      mock_entry("e2", "2026-01-07", 30, 0.0),
      mock_entry("e3", "2026-01-11", 5, 7.5),
    ];

    let totals = aggregate_week(&entries, &window());
    assert_eq!(totals.pushups, 50);
    assert_eq!(totals.run_km, 10.0);
  }

  #[test]
  fn test_aggregate_week_skips_unparseable_dates() {
    let mut entry = mock_entry("e1", "2026-01-07", 10, 1.0);
    entry.date = "not a timestamp".to_string();

    let totals = aggregate_week(&[entry], &window());
    assert_eq!(totals, WeeklyTotals::default());
  }

  #[test]
  fn test_aggregate_week_accepts_space_separated_dates() {
    let mut entry = mock_entry("e1", "2026-01-07", 10, 1.0);
    entry.date = "2026-01-07 00:00:00.000Z".to_string();

    let totals = aggregate_week(&[entry], &window());
    assert_eq!(totals.pushups, 10);
  }

  #[test]
  fn test_weekly_progress_with_defaults() {
    let entries = vec![mock_entry("e1", "2026-01-06", 50, 10.0)];
    // Zeroed settings normalize to the 100 / 50 defaults
    let settings = mock_settings("u1", 0.0, 0.0);

    let progress = WeeklyProgress::compute(&entries, &settings, &window());
    assert_eq!(progress.pushups_goal, DEFAULT_PUSHUPS_GOAL);
    assert_eq!(progress.run_km_goal, DEFAULT_RUN_KM_GOAL);
    assert_eq!(progress.pushups_percent, 50);
    assert_eq!(progress.run_km_percent, 20);
  }

  #[test]
  fn test_weekly_progress_empty_history() {
    let settings = mock_settings("u1", 100.0, 50.0);

    let progress = WeeklyProgress::compute(&[], &settings, &window());
    assert_eq!(progress.week_pushups, 0);
    assert_eq!(progress.week_run_km, 0.0);
    assert_eq!(progress.pushups_percent, 0);
    assert_eq!(progress.run_km_percent, 0);
  }
}
