//! # Session Crate
//!
//! A per-session key-value store for the genex front ends.
//!
//! A [`Session`] is an ordinary value owned by whoever drives a user session.
//! Nothing in it is global; two sessions never observe each other. Values are
//! stored as JSON so that heterogeneous front-end state (preferences, chat
//! transcripts, simulation parameters and results) can live side by side,
//! and are converted to and from typed values through serde.
//!
//! # Example
//!
//! ```
//! use genex_session::{keys, Session};
//!
//! let mut session = Session::new();
//! assert_eq!(session.get(keys::THEME, String::new()).unwrap(), "light");
//!
//! session.set("favourite_base", 'G').unwrap();
//! assert_eq!(session.get("favourite_base", 'A').unwrap(), 'G');
//! assert_eq!(session.get("missing", 7u32).unwrap(), 7);
//! ```

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

/// Well-known session keys.
pub mod keys {
    pub const THEME: &str = "theme";
    pub const CURRENT_GENOME: &str = "current_genome";
    pub const GENOME_HISTORY: &str = "genome_history";
    pub const CHAT_HISTORY: &str = "chat_history";
    pub const MODEL_CACHE: &str = "model_cache";
    pub const SIMULATION_PARAMS: &str = "simulation_params";
    pub const SIMULATION_RESULTS: &str = "simulation_results";
    pub const COMPLETED_MODULES: &str = "completed_modules";
    pub const QUIZ_SCORES: &str = "quiz_scores";
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Value stored under key '{key}' has an unexpected shape: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value store scoped to one user session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    values: HashMap<String, Value>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session holding the default keys.
    pub fn new() -> Self {
        let mut values = HashMap::new();
        values.insert(keys::THEME.to_string(), json!("light"));
        values.insert(keys::CURRENT_GENOME.to_string(), Value::Null);
        values.insert(keys::GENOME_HISTORY.to_string(), json!([]));
        values.insert(keys::CHAT_HISTORY.to_string(), json!([]));
        values.insert(keys::MODEL_CACHE.to_string(), json!({}));
        values.insert(
            keys::SIMULATION_PARAMS.to_string(),
            json!({
                "mutation_rate": 0.001,
                "population_size": 100,
                "generations": 10,
            }),
        );
        values.insert(keys::COMPLETED_MODULES.to_string(), json!([]));
        values.insert(keys::QUIZ_SCORES.to_string(), json!({}));
        Self { values }
    }

    /// A session with no keys at all.
    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Read `key` as a `T`, or return `default` when the key is absent.
    ///
    /// A present key whose value cannot be read as `T` is an error rather
    /// than a silent fallback.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, SessionError> {
        match self.values.get(key) {
            Some(value) => {
                T::deserialize(value).map_err(|source| SessionError::Deserialize {
                    key: key.to_string(),
                    source,
                })
            }
            None => Ok(default),
        }
    }

    /// Raw JSON value under `key`.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> Result<(), SessionError> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|source| SessionError::Serialize {
            key: key.clone(),
            source,
        })?;
        debug!(%key, "session value set");
        self.values.insert(key, value);
        Ok(())
    }

    /// Store several values at once.
    ///
    /// Pairs are applied in order. On a serialization failure the pairs
    /// before the failing one stay applied.
    pub fn update<K, T, I>(&mut self, pairs: I) -> Result<(), SessionError>
    where
        K: Into<String>,
        T: Serialize,
        I: IntoIterator<Item = (K, T)>,
    {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove the given keys, or every key except the theme when `selected` is
    /// `None`. Absent keys are ignored.
    pub fn clear(&mut self, selected: Option<&[&str]>) {
        match selected {
            Some(selected) => {
                for key in selected {
                    self.values.remove(*key);
                }
            }
            None => {
                let theme = self.values.remove(keys::THEME);
                self.values.clear();
                if let Some(theme) = theme {
                    self.values.insert(keys::THEME.to_string(), theme);
                }
            }
        }
        debug!(remaining = self.values.len(), "session cleared");
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
