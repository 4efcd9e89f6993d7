//! Application state and its transitions.
//!
//! `AppState` holds the current session and the three collections. Every
//! mutation is an [`Action`] applied with [`AppState::apply`], which leaves
//! the receiver untouched and returns a new state. On error nothing changes.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{EventDeskError, EventDeskResult};
use crate::event::{
    Event, EventDraft, Participant, ParticipantDraft, PublicRegistration, Schedule, ScheduleDraft,
};
use crate::ids;
use crate::notification::Notification;
use crate::registration;
use crate::trigger;
use crate::user::{NewUser, Role, User, UserUpdate};
use crate::validation::{require, require_email, validate_event_draft, validate_password};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Id of the logged-in user, if any.
    pub session: Option<String>,
    pub users: Vec<User>,
    pub events: Vec<Event>,
    /// Most recent first.
    pub notifications: Vec<Notification>,
}

/// A state transition requested by the user.
#[derive(Debug, Clone)]
pub enum Action {
    Login { email: String, password: String },
    Logout,
    /// Self-service sign-up. Creates a regular user and logs them in.
    Register { name: String, email: String, password: String },
    AddUser(NewUser),
    UpdateUser(UserUpdate),
    RemoveUser { user_id: String },
    AddEvent(EventDraft),
    EditEvent { event_id: String, draft: EventDraft },
    /// Replace a whole event. Fires the registration notifications.
    UpdateEvent(Event),
    RemoveEvent { event_id: String },
    AddParticipant { event_id: String, draft: ParticipantDraft },
    EditParticipant { event_id: String, participant_id: String, draft: ParticipantDraft },
    RemoveParticipant { event_id: String, participant_id: String },
    PublicRegister { public_token: String, registration: PublicRegistration },
    MarkNotificationRead { notification_id: String },
    MarkAllNotificationsRead,
}

impl Action {
    /// Variant name, for logs. Never includes field values.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Login { .. } => "login",
            Action::Logout => "logout",
            Action::Register { .. } => "register",
            Action::AddUser(_) => "add_user",
            Action::UpdateUser(_) => "update_user",
            Action::RemoveUser { .. } => "remove_user",
            Action::AddEvent(_) => "add_event",
            Action::EditEvent { .. } => "edit_event",
            Action::UpdateEvent(_) => "update_event",
            Action::RemoveEvent { .. } => "remove_event",
            Action::AddParticipant { .. } => "add_participant",
            Action::EditParticipant { .. } => "edit_participant",
            Action::RemoveParticipant { .. } => "remove_participant",
            Action::PublicRegister { .. } => "public_register",
            Action::MarkNotificationRead { .. } => "mark_notification_read",
            Action::MarkAllNotificationsRead => "mark_all_notifications_read",
        }
    }
}

/// The entity an action produced or touched, for the caller to display.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Done,
    User(User),
    Event(Event),
    Participant(Participant),
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: AppState,
    pub outcome: Outcome,
}

impl AppState {
    pub fn new(users: Vec<User>, events: Vec<Event>, notifications: Vec<Notification>) -> Self {
        AppState {
            session: None,
            users,
            events,
            notifications,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn current_user(&self) -> Option<&User> {
        let id = self.session.as_ref()?;
        self.find_user(id)
    }

    pub fn find_user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn find_event(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// Exact-match lookup used by the public link.
    pub fn find_event_by_token(&self, public_token: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.public_token == public_token)
    }

    pub fn admins(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.is_admin())
    }

    /// Admins see every event, everyone else only the ones they created.
    pub fn events_visible_to<'a>(&'a self, user: &'a User) -> impl Iterator<Item = &'a Event> {
        self.events
            .iter()
            .filter(move |e| user.is_admin() || e.is_owned_by(&user.id))
    }

    pub fn can_manage(&self, user: &User, event: &Event) -> bool {
        user.is_admin() || event.is_owned_by(&user.id)
    }

    /// A user's notifications, most recent first.
    pub fn notifications_for<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Notification> {
        self.notifications.iter().filter(move |n| n.user_id == user_id)
    }

    pub fn unread_count(&self, user_id: &str) -> usize {
        self.notifications_for(user_id).filter(|n| !n.is_read).count()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    pub fn apply(&self, action: Action) -> EventDeskResult<Transition> {
        debug!(action = action.name(), "applying action");

        match action {
            Action::Login { email, password } => self.login(&email, &password),
            Action::Logout => Ok(self.done(AppState {
                session: None,
                ..self.clone()
            })),
            Action::Register { name, email, password } => self.register(name, email, password),
            Action::AddUser(new_user) => {
                self.require_admin()?;
                let (state, user) = self.insert_user(new_user)?;
                Ok(Transition { state, outcome: Outcome::User(user) })
            }
            Action::UpdateUser(update) => self.update_user(update),
            Action::RemoveUser { user_id } => self.remove_user(&user_id),
            Action::AddEvent(draft) => self.add_event(draft),
            Action::EditEvent { event_id, draft } => self.edit_event(&event_id, draft),
            Action::UpdateEvent(event) => {
                let existing = self.managed_event(&event.id)?;
                let id = existing.id.clone();
                self.replace_event(&id, event)
            }
            Action::RemoveEvent { event_id } => {
                self.managed_event(&event_id)?;
                let mut state = self.clone();
                state.events.retain(|e| e.id != event_id);
                Ok(self.done(state))
            }
            Action::AddParticipant { event_id, draft } => {
                let event = self.managed_event(&event_id)?;
                let (updated, participant) = registration::add_participant(event, draft)?;
                let transition = self.replace_event(&event_id, updated)?;
                Ok(Transition {
                    state: transition.state,
                    outcome: Outcome::Participant(participant),
                })
            }
            Action::EditParticipant { event_id, participant_id, draft } => {
                let event = self.managed_event(&event_id)?;
                let updated = registration::edit_participant(event, &participant_id, draft)?;
                self.replace_event(&event_id, updated)
            }
            Action::RemoveParticipant { event_id, participant_id } => {
                let event = self.managed_event(&event_id)?;
                let updated = registration::remove_participant(event, &participant_id)?;
                self.replace_event(&event_id, updated)
            }
            Action::PublicRegister { public_token, registration: submitted } => {
                let event = self.find_event_by_token(&public_token).ok_or_else(|| {
                    EventDeskError::NotFound(format!("event with public token '{}'", public_token))
                })?;
                let event_id = event.id.clone();
                let (updated, participant) = registration::public_register(event, submitted)?;
                let transition = self.replace_event(&event_id, updated)?;
                Ok(Transition {
                    state: transition.state,
                    outcome: Outcome::Participant(participant),
                })
            }
            Action::MarkNotificationRead { notification_id } => {
                let user_id = self.require_user()?.id.clone();
                let mut state = self.clone();
                let notification = state
                    .notifications
                    .iter_mut()
                    .find(|n| n.id == notification_id && n.user_id == user_id)
                    .ok_or_else(|| {
                        EventDeskError::NotFound(format!("notification '{}'", notification_id))
                    })?;
                notification.is_read = true;
                Ok(self.done(state))
            }
            Action::MarkAllNotificationsRead => {
                let user_id = self.require_user()?.id.clone();
                let mut state = self.clone();
                state
                    .notifications
                    .iter_mut()
                    .filter(|n| n.user_id == user_id)
                    .for_each(|n| n.is_read = true);
                Ok(self.done(state))
            }
        }
    }

    fn done(&self, state: AppState) -> Transition {
        Transition { state, outcome: Outcome::Done }
    }

    fn require_user(&self) -> EventDeskResult<&User> {
        self.current_user().ok_or(EventDeskError::NotAuthenticated)
    }

    fn require_admin(&self) -> EventDeskResult<&User> {
        let user = self.require_user()?;
        if !user.is_admin() {
            return Err(EventDeskError::Forbidden("only admins can manage users".into()));
        }
        Ok(user)
    }

    /// The event, if it exists and the current user may change it.
    fn managed_event(&self, event_id: &str) -> EventDeskResult<&Event> {
        let user = self.require_user()?;
        let event = self
            .find_event(event_id)
            .ok_or_else(|| EventDeskError::NotFound(format!("event '{}'", event_id)))?;
        if !self.can_manage(user, event) {
            return Err(EventDeskError::Forbidden(format!(
                "only the creator or an admin can change '{}'",
                event.title
            )));
        }
        Ok(event)
    }

    fn login(&self, email: &str, password: &str) -> EventDeskResult<Transition> {
        let user = self
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or(EventDeskError::InvalidCredentials)?;

        let state = AppState {
            session: Some(user.id.clone()),
            ..self.clone()
        };
        Ok(Transition {
            state,
            outcome: Outcome::User(user.clone()),
        })
    }

    fn register(&self, name: String, email: String, password: String) -> EventDeskResult<Transition> {
        validate_password(&password)?;

        let (mut state, user) = self.insert_user(NewUser {
            name,
            email,
            password,
            role: Role::User,
        })?;

        let mut fresh = trigger::on_user_registered(&self.users, &user);
        fresh.append(&mut state.notifications);
        state.notifications = fresh;
        state.session = Some(user.id.clone());

        Ok(Transition { state, outcome: Outcome::User(user) })
    }

    fn insert_user(&self, new_user: NewUser) -> EventDeskResult<(AppState, User)> {
        require(&new_user.name, "Name")?;
        require_email(&new_user.email)?;
        require(&new_user.password, "Password")?;

        let email = new_user.email.trim().to_string();
        if self.find_user_by_email(&email).is_some() {
            return Err(EventDeskError::DuplicateEmail(email));
        }

        let user = User {
            id: ids::user_id(),
            name: new_user.name.trim().to_string(),
            email,
            password: new_user.password,
            role: new_user.role,
        };

        let mut state = self.clone();
        state.users.push(user.clone());
        Ok((state, user))
    }

    fn update_user(&self, update: UserUpdate) -> EventDeskResult<Transition> {
        self.require_admin()?;
        require(&update.name, "Name")?;
        require_email(&update.email)?;

        let email = update.email.trim().to_string();
        if self
            .users
            .iter()
            .any(|u| u.email == email && u.id != update.id)
        {
            return Err(EventDeskError::DuplicateEmail(email));
        }

        let mut state = self.clone();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == update.id)
            .ok_or_else(|| EventDeskError::NotFound(format!("user '{}'", update.id)))?;

        user.name = update.name.trim().to_string();
        user.email = email;
        user.role = update.role;
        if !update.password.is_empty() {
            user.password = update.password;
        }
        let user = user.clone();

        Ok(Transition { state, outcome: Outcome::User(user) })
    }

    fn remove_user(&self, user_id: &str) -> EventDeskResult<Transition> {
        let admin = self.require_admin()?;
        if admin.id == user_id {
            return Err(EventDeskError::Forbidden("you cannot remove your own account".into()));
        }
        if self.find_user(user_id).is_none() {
            return Err(EventDeskError::NotFound(format!("user '{}'", user_id)));
        }

        // Events created by the removed user are kept.
        let mut state = self.clone();
        state.users.retain(|u| u.id != user_id);
        Ok(self.done(state))
    }

    fn add_event(&self, draft: EventDraft) -> EventDeskResult<Transition> {
        let creator = self.require_user()?;
        validate_event_draft(&draft)?;

        let mut schedules = schedules_from_drafts(draft.schedules);
        assign_schedule_ids(&[], &mut schedules)?;

        let event = Event {
            id: ids::event_id(),
            public_token: self.unused_public_token(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            location: draft.location.trim().to_string(),
            image_url: draft.image_url.filter(|u| !u.trim().is_empty()),
            schedules,
            participants: Vec::new(),
            creator_id: creator.id.clone(),
        };

        let mut state = self.clone();
        state.events.push(event.clone());

        let mut fresh = trigger::on_event_created(&self.users, creator, &event);
        fresh.append(&mut state.notifications);
        state.notifications = fresh;

        Ok(Transition { state, outcome: Outcome::Event(event) })
    }

    fn edit_event(&self, event_id: &str, draft: EventDraft) -> EventDeskResult<Transition> {
        let existing = self.managed_event(event_id)?;
        validate_event_draft(&draft)?;

        let updated = Event {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            location: draft.location.trim().to_string(),
            image_url: draft.image_url.filter(|u| !u.trim().is_empty()),
            schedules: schedules_from_drafts(draft.schedules),
            ..existing.clone()
        };

        self.replace_event(event_id, updated)
    }

    /// Swap in a new version of an event and deliver the notifications the
    /// change triggers. Public token and creator always come from the stored
    /// event.
    fn replace_event(&self, event_id: &str, mut updated: Event) -> EventDeskResult<Transition> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == event_id)
            .ok_or_else(|| EventDeskError::NotFound(format!("event '{}'", event_id)))?;
        let old = &self.events[index];

        updated.id = old.id.clone();
        updated.public_token = old.public_token.clone();
        updated.creator_id = old.creator_id.clone();
        assign_schedule_ids(&old.schedules, &mut updated.schedules)?;

        let mut fresh = trigger::on_event_replaced(old, &updated);
        debug!(event = %updated.id, notifications = fresh.len(), "event replaced");

        let mut state = self.clone();
        state.events[index] = updated.clone();
        fresh.append(&mut state.notifications);
        state.notifications = fresh;

        Ok(Transition { state, outcome: Outcome::Event(updated) })
    }

    fn unused_public_token(&self) -> String {
        let taken: HashSet<&str> = self.events.iter().map(|e| e.public_token.as_str()).collect();
        loop {
            let token = ids::public_token();
            if !taken.contains(token.as_str()) {
                return token;
            }
        }
    }
}

fn schedules_from_drafts(drafts: Vec<ScheduleDraft>) -> Vec<Schedule> {
    drafts
        .into_iter()
        .map(|d| Schedule {
            id: d.id.unwrap_or_default(),
            start_time: d.start_time.trim().to_string(),
            end_time: d.end_time.trim().to_string(),
            payment_per_hour: d.payment_per_hour,
            capacity: u32::try_from(d.capacity).unwrap_or(0),
        })
        .collect()
}

/// Keep the ids of schedules that already belong to the event and give every
/// other schedule a fresh one. The same kept id may not appear twice.
fn assign_schedule_ids(known: &[Schedule], schedules: &mut [Schedule]) -> EventDeskResult<()> {
    let mut seen = HashSet::new();
    for schedule in schedules.iter_mut() {
        if !known.iter().any(|k| k.id == schedule.id) {
            schedule.id = ids::schedule_id();
        } else if !seen.insert(schedule.id.clone()) {
            return Err(EventDeskError::Validation(format!(
                "Schedule '{}' appears more than once",
                schedule.id
            )));
        }
    }
    Ok(())
}
