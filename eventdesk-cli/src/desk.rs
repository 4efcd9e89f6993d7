//! The loaded application: configuration, storage and current state.

use anyhow::{Context, Result};
use eventdesk_core::config::DeskConfig;
use eventdesk_core::event::Event;
use eventdesk_core::storage::{FileStore, Storage};
use eventdesk_core::user::User;
use eventdesk_core::{Action, AppState, Outcome};
use tracing::debug;

pub struct Desk {
    pub config: DeskConfig,
    storage: Storage<FileStore>,
    state: AppState,
}

impl Desk {
    /// Load every collection and restore the saved session. A session
    /// pointing at a user that no longer exists is dropped.
    pub fn open(config: DeskConfig) -> Result<Self> {
        let data_dir = config.data_path();
        let mut storage = Storage::new(FileStore::new(&data_dir));

        let mut state = storage
            .load()
            .with_context(|| format!("Could not load data from {}", data_dir.display()))?;

        let session = storage
            .load_session()?
            .filter(|id| state.find_user(id).is_some());
        state.session = session;
        debug!(session = ?state.session, "desk opened");

        Ok(Desk { config, storage, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an action, then mirror whatever changed to disk.
    pub fn apply(&mut self, action: Action) -> Result<Outcome> {
        let transition = self.state.apply(action)?;

        self.storage
            .persist_changes(&self.state, &transition.state)
            .context("Could not save changes")?;
        if transition.state.session != self.state.session {
            self.storage.save_session(transition.state.session.as_deref())?;
        }

        self.state = transition.state;
        Ok(transition.outcome)
    }

    pub fn current_user(&self) -> Result<&User> {
        self.state.current_user().ok_or_else(|| {
            anyhow::anyhow!("Not logged in.\n\nLog in with:\n  eventdesk login --email <email>")
        })
    }

    pub fn event(&self, event_id: &str) -> Result<&Event> {
        self.state
            .find_event(event_id)
            .ok_or_else(|| anyhow::anyhow!("Event '{}' not found", event_id))
    }

    /// The event, if the logged-in user may manage it.
    pub fn managed_event(&self, event_id: &str) -> Result<&Event> {
        let user = self.current_user()?;
        let event = self.event(event_id)?;
        if !self.state.can_manage(user, event) {
            anyhow::bail!("Only the creator of '{}' or an admin can do that", event.title);
        }
        Ok(event)
    }
}
