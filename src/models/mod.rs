pub mod entry;
pub mod settings;
pub mod user;

pub use entry::{DailyEntry, EntryUpdate, NewEntry};
pub use settings::{GoalSettings, NewSettings};
pub use user::{AuthUser, NewUser};
