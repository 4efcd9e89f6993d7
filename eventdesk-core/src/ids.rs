//! Identifier generation.
//!
//! Every entity id is a short type prefix followed by a v4 UUID, so ids from
//! different collections can never collide and are recognisable in exported
//! data. Public tokens are bare UUIDs.

use uuid::Uuid;

pub const USER_PREFIX: &str = "user";
pub const EVENT_PREFIX: &str = "evt";
pub const SCHEDULE_PREFIX: &str = "sch";
pub const PARTICIPANT_PREFIX: &str = "part";
pub const NOTIFICATION_PREFIX: &str = "notif";

fn prefixed(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

pub fn user_id() -> String {
    prefixed(USER_PREFIX)
}

pub fn event_id() -> String {
    prefixed(EVENT_PREFIX)
}

pub fn schedule_id() -> String {
    prefixed(SCHEDULE_PREFIX)
}

pub fn participant_id() -> String {
    prefixed(PARTICIPANT_PREFIX)
}

pub fn notification_id() -> String {
    prefixed(NOTIFICATION_PREFIX)
}

/// Unguessable token granting public access to a single event.
pub fn public_token() -> String {
    Uuid::new_v4().to_string()
}
