//! Dashboard figures.

use crate::capacity::{confirmed_count, is_event_full, occupancy_percent, total_capacity};
use crate::event::Event;
use crate::state::AppState;
use crate::user::User;

#[derive(Debug, Clone, PartialEq)]
pub struct AdminStats {
    pub total_events: usize,
    pub total_participants: usize,
    pub confirmed_participants: u32,
    pub total_users: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats<'a> {
    pub my_events: usize,
    pub my_participants: usize,
    /// First of the user's events in stored order.
    pub next_event: Option<&'a Event>,
}

/// Per-event occupancy, as shown above the participant list.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub participants: usize,
    pub confirmed: u32,
    pub total_capacity: u64,
    pub occupancy_percent: f64,
    pub is_full: bool,
}

pub fn admin_stats(state: &AppState) -> AdminStats {
    AdminStats {
        total_events: state.events.len(),
        total_participants: state.events.iter().map(|e| e.participants.len()).sum(),
        confirmed_participants: state.events.iter().map(|e| confirmed_count(e, None)).sum(),
        total_users: state.users.len(),
    }
}

pub fn user_stats<'a>(state: &'a AppState, user: &User) -> UserStats<'a> {
    let mine: Vec<&Event> = state
        .events
        .iter()
        .filter(|e| e.is_owned_by(&user.id))
        .collect();

    UserStats {
        my_events: mine.len(),
        my_participants: mine.iter().map(|e| e.participants.len()).sum(),
        next_event: mine.first().copied(),
    }
}

pub fn event_summary(event: &Event) -> EventSummary {
    EventSummary {
        participants: event.participants.len(),
        confirmed: confirmed_count(event, None),
        total_capacity: total_capacity(event),
        occupancy_percent: occupancy_percent(event),
        is_full: is_event_full(event),
    }
}
