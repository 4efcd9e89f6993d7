//! Persistence side channel.
//!
//! Each collection is kept as one JSON blob under its own key and rewritten
//! in full whenever it changes. The blobs are a reload cache for the
//! in-memory state, not a durability guarantee: a crash between a state swap
//! and the write leaves the stored copy one step behind.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::EventDeskResult;
use crate::event::Event;
use crate::ids;
use crate::notification::Notification;
use crate::seed;
use crate::state::AppState;
use crate::user::User;

pub const USERS_KEY: &str = "users";
pub const EVENTS_KEY: &str = "events";
pub const NOTIFICATIONS_KEY: &str = "notifications";
pub const SESSION_KEY: &str = "session";

/// A string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> EventDeskResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> EventDeskResult<()>;
    fn remove(&mut self, key: &str) -> EventDeskResult<()>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> EventDeskResult<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> EventDeskResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path(key);
        let temp = self.dir.join(format!("{}.json.tmp", key));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> EventDeskResult<()> {
        let path = self.path(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> EventDeskResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> EventDeskResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> EventDeskResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Loads and mirrors [`AppState`] collections through a [`KeyValueStore`].
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Storage { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load all collections. A missing or unreadable blob falls back to the
    /// seed data (empty for notifications) and the fallback is written back,
    /// so ids stay stable across reloads. The session is not restored here.
    pub fn load(&mut self) -> EventDeskResult<AppState> {
        let (users, users_fresh) = self.load_or(USERS_KEY, seed::users)?;
        let (events, events_fresh) = self.load_or(EVENTS_KEY, seed::events)?;
        let (notifications, notifications_fresh) =
            self.load_or(NOTIFICATIONS_KEY, Vec::<Notification>::new)?;

        let (events, backfilled) = backfill_public_tokens(events);

        if users_fresh {
            self.write(USERS_KEY, &users)?;
        }
        if events_fresh || backfilled {
            self.write(EVENTS_KEY, &events)?;
        }
        if notifications_fresh {
            self.write(NOTIFICATIONS_KEY, &notifications)?;
        }

        Ok(AppState::new(users, events, notifications))
    }

    /// Rewrite every collection that differs between `old` and `new`.
    pub fn persist_changes(&mut self, old: &AppState, new: &AppState) -> EventDeskResult<()> {
        if old.users != new.users {
            self.write(USERS_KEY, &new.users)?;
        }
        if old.events != new.events {
            self.write(EVENTS_KEY, &new.events)?;
        }
        if old.notifications != new.notifications {
            self.write(NOTIFICATIONS_KEY, &new.notifications)?;
        }
        Ok(())
    }

    pub fn load_session(&self) -> EventDeskResult<Option<String>> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        Ok(serde_json::from_str::<Option<String>>(&raw).unwrap_or(None))
    }

    pub fn save_session(&mut self, session: Option<&str>) -> EventDeskResult<()> {
        match session {
            Some(id) => self.write(SESSION_KEY, &id),
            None => self.store.remove(SESSION_KEY),
        }
    }

    /// Returns the value and whether it came from the fallback.
    fn load_or<T, F>(&self, key: &str, fallback: F) -> EventDeskResult<(T, bool)>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let Some(raw) = self.store.get(key)? else {
            debug!(key, "no stored collection, using defaults");
            return Ok((fallback(), true));
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok((value, false)),
            Err(e) => {
                warn!(key, error = %e, "stored collection is unreadable, using defaults");
                Ok((fallback(), true))
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> EventDeskResult<()> {
        let content = serde_json::to_string_pretty(value)?;
        debug!(key, bytes = content.len(), "writing collection");
        self.store.set(key, &content)
    }
}

/// Events stored before public links existed get a token on load.
fn backfill_public_tokens(mut events: Vec<Event>) -> (Vec<Event>, bool) {
    let mut changed = false;
    for event in events.iter_mut().filter(|e| e.public_token.is_empty()) {
        event.public_token = ids::public_token();
        changed = true;
    }
    (events, changed)
}
