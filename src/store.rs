use crate::types::StoreError;
use serde::{de::DeserializeOwned, Serialize};

pub const SESSION_KEY: &str = "auth_user";
pub const POSTS_KEY: &str = "grooming_posts";
pub const REPORTS_KEY: &str = "community_reports";
pub const VOTES_KEY: &str = "post_votes";

pub const ALL_KEYS: [&str; 4] = [SESSION_KEY, POSTS_KEY, REPORTS_KEY, VOTES_KEY];

pub struct Slot<T> {
    tree: sled::Tree,
    key: &'static str,
    value: T,
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn load(tree: &sled::Tree, key: &'static str, default: T) -> Self {
        let value = match tree.get(key) {
            Ok(Some(bytes)) => match serde_json::from_slice::<T>(&bytes) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key, error = %e, "malformed stored value, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored value, using default");
                default
            }
        };

        Self {
            tree: tree.clone(),
            key,
            value,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.write();
    }

    /// Mutates the value in place and writes the result back.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value);
        self.write();
        out
    }

    fn write(&self) {
        if let Err(e) = self.persist() {
            tracing::error!(key = self.key, error = %e, "failed to persist value");
        }
    }

    fn persist(&self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&self.value)?;
        self.tree.insert(self.key, bytes)?;
        self.tree.flush()?;
        Ok(())
    }
}

/// Reads a raw stored value for diagnostics, without falling back to a default.
pub fn read_raw(tree: &sled::Tree, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
    match tree.get(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

pub fn clear(tree: &sled::Tree) -> Result<(), StoreError> {
    for key in ALL_KEYS {
        tree.remove(key)?;
    }
    tree.flush()?;
    Ok(())
}
