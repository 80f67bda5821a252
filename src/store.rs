//! Typed access to the `entries` and `settings` collections
//!
//! These are the only store operations the core needs: findOne, findAll,
//! create, and partial update. Sort order of `list_entries` is cosmetic;
//! the aggregation does not depend on it.

use crate::models::{DailyEntry, EntryUpdate, GoalSettings, NewEntry, NewSettings};
use crate::pocketbase::{PbClient, PbError};

const ENTRIES: &str = "entries";
const SETTINGS: &str = "settings";

/// Escape a value for interpolation into a PocketBase filter expression.
fn quote(value: &str) -> String {
  value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// ---------------------------------------------------------------------------
/// Entries
/// ---------------------------------------------------------------------------

/// The unique entry for (user, ymd), if any.
pub async fn find_entry(
  pb: &PbClient,
  user_id: &str,
  ymd: &str,
) -> Result<Option<DailyEntry>, PbError> {
  let filter = format!("user='{}' && ymd='{}'", quote(user_id), quote(ymd));
  pb.first_matching(ENTRIES, &filter).await
}

/// Every entry the user has ever logged.
pub async fn list_entries(pb: &PbClient, user_id: &str) -> Result<Vec<DailyEntry>, PbError> {
  let filter = format!("user='{}'", quote(user_id));
  pb.full_list(ENTRIES, &filter).await
}

pub async fn create_entry(pb: &PbClient, entry: &NewEntry) -> Result<DailyEntry, PbError> {
  pb.create(ENTRIES, entry).await
}

pub async fn update_entry(
  pb: &PbClient,
  id: &str,
  fields: &EntryUpdate,
) -> Result<DailyEntry, PbError> {
  pb.update(ENTRIES, id, fields).await
}

/// ---------------------------------------------------------------------------
/// Settings
/// ---------------------------------------------------------------------------

pub async fn find_settings(pb: &PbClient, user_id: &str) -> Result<Option<GoalSettings>, PbError> {
  let filter = format!("user='{}'", quote(user_id));
  pb.first_matching(SETTINGS, &filter).await
}

pub async fn create_settings(
  pb: &PbClient,
  settings: &NewSettings,
) -> Result<GoalSettings, PbError> {
  pb.create(SETTINGS, settings).await
}
