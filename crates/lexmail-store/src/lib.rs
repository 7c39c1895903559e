//! Persistence for client-side preferences: a small key/value file that plays
//! the role of browser local storage.

mod error;
mod prefs;

pub use error::StoreError;
pub use prefs::{KEY_CONTRACT_SNIPPET, KEY_EMAIL_TEXT, KEY_THEME_MODE, PrefStore, default_path};
