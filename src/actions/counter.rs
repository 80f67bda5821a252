//! Page load and form actions for the daily counter

use crate::forms::{
  AddTypedForm, FormFields, QuickAddForm, SaveForm, SetTotalsForm, ValidationError,
};
use crate::models::{DailyEntry, EntryUpdate, GoalSettings, NewEntry, NewSettings};
use crate::pocketbase::PbClient;
use crate::progress::WeeklyProgress;
use crate::store;
use crate::week::{self, WeekWindow};
use chrono::Utc;
use serde::Serialize;

use super::ActionError;

/// ---------------------------------------------------------------------------
/// Page Payload
/// ---------------------------------------------------------------------------

/// Today's counts as shown on the page; a zero sentinel when nothing has
/// been logged yet.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodayEntry {
  pub ymd: String,
  pub pushups: i64,
  pub run_km: f64,
}

impl TodayEntry {
  fn zeroed(ymd: &str) -> Self {
    Self {
      ymd: ymd.to_string(),
      pushups: 0,
      run_km: 0.0,
    }
  }

  fn from_entry(entry: &DailyEntry) -> Self {
    Self {
      ymd: entry.ymd.clone(),
      pushups: entry.pushups,
      run_km: entry.run_km,
    }
  }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CounterPage {
  pub ymd: String,
  pub today: TodayEntry,
  pub week: WeeklyProgress,
}

/// ---------------------------------------------------------------------------
/// Load
/// ---------------------------------------------------------------------------

/// Assemble the counter page: today's entry (zero sentinel when absent) and
/// this week's totals against the user's goals. Settings are created with
/// defaults on first access; a missing today entry is not persisted here.
pub async fn load(pb: &PbClient, user_id: &str) -> Result<CounterPage, ActionError> {
  let ymd = week::today_ymd();

  let settings = get_or_create_settings(pb, user_id).await?;
  let entries = store::list_entries(pb, user_id).await?;

  let window = WeekWindow::containing(Utc::now());
  let week = WeeklyProgress::compute(&entries, &settings, &window);

  let today = entries
    .iter()
    .find(|entry| entry.ymd == ymd)
    .map(TodayEntry::from_entry)
    .unwrap_or_else(|| TodayEntry::zeroed(&ymd));

  Ok(CounterPage { ymd, today, week })
}

/// ---------------------------------------------------------------------------
/// Get-or-Create Resolvers
/// ---------------------------------------------------------------------------

/// The unique entry for (user, ymd); created zeroed when absent. Duplicate
/// concurrent creation is left to the store's (user, ymd) uniqueness rule.
pub async fn get_or_create_entry(
  pb: &PbClient,
  user_id: &str,
  ymd: &str,
) -> Result<DailyEntry, ActionError> {
  if let Some(existing) = store::find_entry(pb, user_id, ymd).await? {
    return Ok(existing);
  }

  let date = week::ymd_to_stored_date(ymd).ok_or_else(|| ValidationError::invalid_date("ymd"))?;
  let entry = NewEntry {
    user: user_id.to_string(),
    ymd: ymd.to_string(),
    date,
    pushups: 0,
    run_km: 0.0,
  };

  Ok(store::create_entry(pb, &entry).await?)
}

async fn get_or_create_settings(
  pb: &PbClient,
  user_id: &str,
) -> Result<GoalSettings, ActionError> {
  if let Some(existing) = store::find_settings(pb, user_id).await? {
    return Ok(existing);
  }

  Ok(store::create_settings(pb, &NewSettings::defaults(user_id)).await?)
}

/// ---------------------------------------------------------------------------
/// Mutating Actions
/// ---------------------------------------------------------------------------

/// One-tap increment of today's counts.
pub async fn quick_add(
  pb: &PbClient,
  user_id: &str,
  fields: &FormFields,
) -> Result<DailyEntry, ActionError> {
  let form = QuickAddForm::from_fields(fields)?;
  apply_delta(pb, user_id, form.pushups_delta, form.run_km_delta).await
}

/// Typed-amount increment of today's counts.
pub async fn add_typed(
  pb: &PbClient,
  user_id: &str,
  fields: &FormFields,
) -> Result<DailyEntry, ActionError> {
  let form = AddTypedForm::from_fields(fields)?;
  apply_delta(pb, user_id, form.pushups, form.run_km).await
}

async fn apply_delta(
  pb: &PbClient,
  user_id: &str,
  pushups_delta: i64,
  run_km_delta: f64,
) -> Result<DailyEntry, ActionError> {
  let ymd = week::today_ymd();
  let entry = get_or_create_entry(pb, user_id, &ymd).await?;

  // Zero deltas succeed without a write beyond the get-or-create read.
  if pushups_delta == 0 && run_km_delta == 0.0 {
    return Ok(entry);
  }

  // Read-modify-write: two concurrent increments for the same day can lose
  // an update. Known limitation; the store offers no compare-and-swap.
  let update = EntryUpdate {
    pushups: Some(entry.pushups + pushups_delta),
    run_km: Some(entry.run_km + run_km_delta),
  };

  Ok(store::update_entry(pb, &entry.id, &update).await?)
}

/// Replace today's totals outright.
pub async fn set_totals(
  pb: &PbClient,
  user_id: &str,
  fields: &FormFields,
) -> Result<DailyEntry, ActionError> {
  let form = SetTotalsForm::from_fields(fields)?;

  let ymd = week::today_ymd();
  let entry = get_or_create_entry(pb, user_id, &ymd).await?;

  let update = EntryUpdate {
    pushups: Some(form.pushups_total),
    run_km: Some(form.run_km_total),
  };

  Ok(store::update_entry(pb, &entry.id, &update).await?)
}

/// Absolute set for a given day (defaults to today); creates the entry when
/// it does not exist yet.
pub async fn save(
  pb: &PbClient,
  user_id: &str,
  fields: &FormFields,
) -> Result<DailyEntry, ActionError> {
  let form = SaveForm::from_fields(fields)?;
  let ymd = form.ymd.unwrap_or_else(week::today_ymd);

  match store::find_entry(pb, user_id, &ymd).await? {
    Some(existing) => {
      let update = EntryUpdate {
        pushups: Some(form.pushups),
        run_km: form.run_km,
      };
      Ok(store::update_entry(pb, &existing.id, &update).await?)
    }
    None => {
      let date =
        week::ymd_to_stored_date(&ymd).ok_or_else(|| ValidationError::invalid_date("ymd"))?;
      let entry = NewEntry {
        user: user_id.to_string(),
        ymd,
        date,
        pushups: form.pushups,
        run_km: form.run_km.unwrap_or(0.0),
      };
      Ok(store::create_entry(pb, &entry).await?)
    }
  }
}
