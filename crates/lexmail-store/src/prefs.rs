//! JSON key/value preference file.
//!
//! The file is read once when opened and rewritten on every change, so a
//! later `open` sees exactly what the last `set` stored.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use lexmail_core::ThemeMode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::StoreError;

pub const KEY_EMAIL_TEXT: &str = "emailText";
pub const KEY_CONTRACT_SNIPPET: &str = "contractSnippet";
pub const KEY_THEME_MODE: &str = "theme-mode";

const STATE_DIR_ENV: &str = "LEXMAIL_STATE_DIR";
const FILE_NAME: &str = "prefs.json";

/// Location of the preference file: `$LEXMAIL_STATE_DIR/prefs.json`, or
/// `.lexmail/prefs.json` under the working directory.
pub fn default_path() -> PathBuf {
    std::env::var_os(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".lexmail"))
        .join(FILE_NAME)
}

/// String key/value store persisted to a single JSON file.
#[derive(Debug)]
pub struct PrefStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PrefStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => parse_values(&path, &raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = values.len(), "opened preference store");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store `value` under `key` and write the file.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.get(key) == Some(value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    /// Stored theme; anything unrecognised reads as light.
    pub fn theme(&self) -> ThemeMode {
        match self.get(KEY_THEME_MODE) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring stored theme");
                ThemeMode::default()
            }),
            None => ThemeMode::default(),
        }
    }

    pub fn set_theme(&mut self, mode: ThemeMode) -> Result<(), StoreError> {
        self.set(KEY_THEME_MODE, mode.as_str())
    }

    fn flush(&self) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let body = serde_json::to_vec_pretty(&self.values)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&body)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;
        debug!(path = %self.path.display(), "preferences written");
        Ok(())
    }
}

fn parse_values(path: &Path, raw: &str) -> Result<BTreeMap<String, String>, StoreError> {
    let Value::Object(map) = serde_json::from_str::<Value>(raw)? else {
        return Err(StoreError::Corrupt(path.to_path_buf()));
    };
    Ok(map
        .into_iter()
        .map(|(k, v)| match v {
            Value::String(s) => (k, s),
            other => (k, other.to_string()),
        })
        .collect())
}
