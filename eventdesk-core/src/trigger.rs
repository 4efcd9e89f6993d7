//! Notifications derived from state transitions.
//!
//! These are plain projections: given the before/after of a mutation they
//! return the notifications to deliver, one instance per recipient. The
//! caller decides where they go.

use std::collections::HashSet;

use crate::capacity::{confirmed_count, total_capacity};
use crate::event::Event;
use crate::notification::{Notification, NotificationKind};
use crate::user::User;

fn notify_admins(users: &[User], message: &str) -> Vec<Notification> {
    users
        .iter()
        .filter(|u| u.is_admin())
        .map(|admin| Notification::new(&admin.id, message, NotificationKind::Info))
        .collect()
}

/// Notifications for the creator when an event is replaced.
///
/// Only fires when the participant list grew. The first participant whose id
/// was not in the old list is announced, and a second notification follows
/// when the confirmed count reached total capacity with this change.
pub fn on_event_replaced(old: &Event, new: &Event) -> Vec<Notification> {
    let mut out = Vec::new();

    if old.participants.len() >= new.participants.len() {
        return out;
    }

    let old_ids: HashSet<&str> = old.participants.iter().map(|p| p.id.as_str()).collect();
    if let Some(newcomer) = new
        .participants
        .iter()
        .find(|p| !old_ids.contains(p.id.as_str()))
    {
        out.push(Notification::new(
            &new.creator_id,
            format!("{} registered for {}.", newcomer.name, new.title),
            NotificationKind::Info,
        ));
    }

    let total = total_capacity(new);
    let before = u64::from(confirmed_count(old, None));
    let after = u64::from(confirmed_count(new, None));
    if before < total && after >= total {
        out.push(Notification::new(
            &new.creator_id,
            format!("Your event {} has reached full capacity.", new.title),
            NotificationKind::Info,
        ));
    }

    out
}

/// One notification per admin announcing a new event.
pub fn on_event_created(users: &[User], creator: &User, event: &Event) -> Vec<Notification> {
    notify_admins(
        users,
        &format!("New event created by {}: {}.", creator.name, event.title),
    )
}

/// One notification per admin announcing a self-registered user.
pub fn on_user_registered(users: &[User], new_user: &User) -> Vec<Notification> {
    notify_admins(
        users,
        &format!("New user registered: {} ({}).", new_user.name, new_user.email),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::tests::{make_participant, make_schedule, make_test_event};
    use crate::event::ParticipantStatus;
    use crate::user::Role;

    fn make_user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            name: format!("Name {}", id),
            email: format!("{}@example.com", id),
            password: "secret".to_string(),
            role,
        }
    }

    #[test]
    fn test_new_participant_notifies_creator() {
        let old = make_test_event(vec![make_schedule("a", 10)], vec![]);
        let mut new = old.clone();
        new.participants.push(make_participant("p1", "a", ParticipantStatus::Confirmed));

        let out = on_event_replaced(&old, &new);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].user_id, "user-owner");
        assert_eq!(out[0].kind, NotificationKind::Info);
        assert_eq!(out[0].message, "Participant p1 registered for Test Event.");
    }

    #[test]
    fn test_reaching_capacity_adds_second_notification() {
        let old = make_test_event(
            vec![make_schedule("a", 2)],
            vec![make_participant("p1", "a", ParticipantStatus::Confirmed)],
        );
        let mut new = old.clone();
        new.participants.push(make_participant("p2", "a", ParticipantStatus::Confirmed));

        let out = on_event_replaced(&old, &new);
        assert_eq!(out.len(), 2);
        assert!(out[1].message.contains("reached full capacity"));
    }

    #[test]
    fn test_pending_signup_does_not_reach_capacity() {
        let old = make_test_event(
            vec![make_schedule("a", 2)],
            vec![make_participant("p1", "a", ParticipantStatus::Confirmed)],
        );
        let mut new = old.clone();
        new.participants.push(make_participant("p2", "a", ParticipantStatus::Pending));

        let out = on_event_replaced(&old, &new);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_already_full_event_does_not_renotify() {
        let old = make_test_event(
            vec![make_schedule("a", 1)],
            vec![make_participant("p1", "a", ParticipantStatus::Confirmed)],
        );
        let mut new = old.clone();
        new.participants.push(make_participant("p2", "a", ParticipantStatus::Confirmed));

        let out = on_event_replaced(&old, &new);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_status_edit_without_growth_is_silent() {
        let old = make_test_event(
            vec![make_schedule("a", 1)],
            vec![make_participant("p1", "a", ParticipantStatus::Pending)],
        );
        let mut new = old.clone();
        new.participants[0].status = ParticipantStatus::Confirmed;

        assert!(on_event_replaced(&old, &new).is_empty());
    }

    #[test]
    fn test_event_created_fans_out_to_each_admin() {
        let users = vec![
            make_user("admin-1", Role::Admin),
            make_user("plain", Role::User),
            make_user("admin-2", Role::Admin),
        ];
        let event = make_test_event(vec![make_schedule("a", 1)], vec![]);

        let out = on_event_created(&users, &users[1], &event);
        let recipients: Vec<_> = out.iter().map(|n| n.user_id.as_str()).collect();
        assert_eq!(recipients, vec!["admin-1", "admin-2"]);
        assert_ne!(out[0].id, out[1].id);
        assert_eq!(out[0].message, "New event created by Name plain: Test Event.");
    }

    #[test]
    fn test_user_registered_without_admins_is_empty() {
        let users = vec![make_user("plain", Role::User)];
        let new_user = make_user("fresh", Role::User);
        assert!(on_user_registered(&users, &new_user).is_empty());
    }
}
