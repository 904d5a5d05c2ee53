//! Persistent learner state: preferences, progress and saved scripts

pub mod prefs;
pub mod repository;
pub mod scripts;

pub use prefs::{PrefValue, Preferences};
pub use repository::UserProgress;
pub use scripts::{deserialize_scripts, serialize_scripts};
