//! Request-handling core for a personal fitness counter
//!
//! Users log daily pushup counts and run distances and see weekly progress
//! against their goals. Persistence, authentication, and querying live in
//! an external PocketBase instance; this crate holds the page-load and
//! form-action logic, cookie session restoration, and the weekly
//! aggregation math. HTTP routing and rendering belong to the host
//! framework.

pub mod actions;
pub mod forms;
pub mod models;
pub mod pocketbase;
pub mod progress;
pub mod session;
pub mod store;
pub mod test_utils;
pub mod week;

pub use actions::ActionError;
pub use pocketbase::{PbClient, PbConfig, PbError};
pub use session::Session;
