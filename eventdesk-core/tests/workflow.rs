//! End-to-end flows through `AppState` and `Storage`.

use eventdesk_core::capacity::{confirmed_count, remaining, schedule_availability, total_capacity};
use eventdesk_core::event::{EventDraft, ParticipantDraft, ParticipantStatus, PublicRegistration, ScheduleDraft};
use eventdesk_core::export::{CSV_HEADER, ParticipantFilter, participants_csv};
use eventdesk_core::notification::NotificationKind;
use eventdesk_core::public_link::{parse_public_token, public_url};
use eventdesk_core::storage::{FileStore, MemoryStore, Storage};
use eventdesk_core::user::Role;
use eventdesk_core::{Action, AppState, EventDeskError, Outcome};

fn apply(state: &AppState, action: Action) -> AppState {
    state.apply(action).expect("action should succeed").state
}

fn login(state: &AppState, email: &str, password: &str) -> AppState {
    apply(
        state,
        Action::Login {
            email: email.to_string(),
            password: password.to_string(),
        },
    )
}

fn workshop_draft(capacities: &[i64]) -> EventDraft {
    EventDraft {
        title: "Taller de Rust".to_string(),
        description: "Ownership y borrowing".to_string(),
        location: "Sala 3".to_string(),
        image_url: None,
        schedules: capacities
            .iter()
            .map(|&capacity| ScheduleDraft {
                capacity,
                ..ScheduleDraft::default()
            })
            .collect(),
    }
}

fn visitor(name: &str, email: &str, schedule_id: &str) -> PublicRegistration {
    PublicRegistration {
        name: name.to_string(),
        email: email.to_string(),
        phone: String::new(),
        schedule_id: schedule_id.to_string(),
    }
}

#[test]
fn test_full_lifecycle_persists_across_reloads() {
    let mut storage = Storage::new(MemoryStore::new());
    let initial = storage.load().unwrap();

    // A new user signs up: the seeded admin hears about it
    let t = initial
        .apply(Action::Register {
            name: "Lucía".to_string(),
            email: "lucia@example.com".to_string(),
            password: "lucia".to_string(),
        })
        .unwrap();
    storage.persist_changes(&initial, &t.state).unwrap();
    let state = t.state;
    let Outcome::User(lucia) = t.outcome else {
        panic!("expected user");
    };
    assert_eq!(state.unread_count("user-1"), 1);

    // She creates an event: the admin is told again, she is not
    let t = state.apply(Action::AddEvent(workshop_draft(&[2, 3]))).unwrap();
    storage.persist_changes(&state, &t.state).unwrap();
    let state = t.state;
    let Outcome::Event(event) = t.outcome else {
        panic!("expected event");
    };
    assert_eq!(state.unread_count("user-1"), 2);
    assert_eq!(state.unread_count(&lucia.id), 0);

    // Two visitors use the public link
    let link = public_url("https://events.example.com/", &event);
    let token = parse_public_token(&link).unwrap();
    let first_schedule = event.schedules[0].id.clone();

    let anonymous = apply(&state, Action::Logout);
    let mut current = anonymous.clone();
    for (name, email) in [("Ana", "ana@example.com"), ("Ana", "ana@example.com")] {
        let next = apply(
            &current,
            Action::PublicRegister {
                public_token: token.clone(),
                registration: visitor(name, email, &first_schedule),
            },
        );
        storage.persist_changes(&current, &next).unwrap();
        current = next;
    }

    let stored = current.find_event(&event.id).unwrap();
    assert_eq!(stored.participants.len(), 2);
    assert_ne!(stored.participants[0].id, stored.participants[1].id);
    assert_eq!(remaining(&stored.schedules[0], &stored.participants), 0);
    assert_eq!(remaining(&stored.schedules[1], &stored.participants), 3);

    let options = schedule_availability(stored);
    assert!(!options[0].is_selectable());
    assert!(options[1].is_selectable());

    // Two sign-up notifications for the creator, no capacity notice yet
    assert_eq!(current.unread_count(&lucia.id), 2);
    assert!(
        current
            .notifications_for(&lucia.id)
            .all(|n| n.kind == NotificationKind::Info && n.message.contains("registered for"))
    );

    // Reload from the store: everything survives, tokens and ids included
    let reloaded = storage.load().unwrap();
    assert_eq!(reloaded.users, current.users);
    assert_eq!(reloaded.events, current.events);
    assert_eq!(reloaded.notifications, current.notifications);
    assert_eq!(reloaded.find_event(&event.id).unwrap().public_token, event.public_token);
}

#[test]
fn test_capacity_two_example() {
    let state = AppState::new(eventdesk_core::seed::users(), vec![], vec![]);
    let state = login(&state, "user@example.com", "user");

    let t = state.apply(Action::AddEvent(workshop_draft(&[2]))).unwrap();
    let Outcome::Event(event) = t.outcome else {
        panic!("expected event");
    };
    let schedule_id = event.schedules[0].id.clone();
    let mut state = t.state;

    for i in 0..2 {
        state = apply(
            &state,
            Action::PublicRegister {
                public_token: event.public_token.clone(),
                registration: visitor("Guest", &format!("guest{}@example.com", i), &schedule_id),
            },
        );
        let stored = state.find_event(&event.id).unwrap();
        assert!(u64::from(confirmed_count(stored, None)) <= total_capacity(stored));
    }

    let third = state.apply(Action::PublicRegister {
        public_token: event.public_token.clone(),
        registration: visitor("Late", "late@example.com", &schedule_id),
    });
    assert!(matches!(third, Err(EventDeskError::Validation(_))));

    let forced = state.apply(Action::AddParticipant {
        event_id: event.id.clone(),
        draft: ParticipantDraft {
            name: "Late".to_string(),
            email: "late@example.com".to_string(),
            phone: "555-0199".to_string(),
            schedule_id: schedule_id.clone(),
            status: ParticipantStatus::Confirmed,
            notes: None,
        },
    });
    assert!(matches!(forced, Err(EventDeskError::CapacityExceeded { .. })));

    // Waitlisting as pending still works and is reported
    let waitlisted = apply(
        &state,
        Action::AddParticipant {
            event_id: event.id.clone(),
            draft: ParticipantDraft {
                name: "Late".to_string(),
                email: "late@example.com".to_string(),
                phone: "555-0199".to_string(),
                schedule_id,
                status: ParticipantStatus::Pending,
                notes: Some("waitlist".to_string()),
            },
        },
    );
    let stored = waitlisted.find_event(&event.id).unwrap();
    assert_eq!(stored.participants.len(), 3);
    assert_eq!(confirmed_count(stored, None), 2);
}

#[test]
fn test_event_creation_fans_out_to_admins_only() {
    let mut state = AppState::new(eventdesk_core::seed::users(), vec![], vec![]);
    state = login(&state, "admin@example.com", "admin");
    state = apply(
        &state,
        Action::AddUser(eventdesk_core::user::NewUser {
            name: "Second Admin".to_string(),
            email: "admin2@example.com".to_string(),
            password: "admin2".to_string(),
            role: Role::Admin,
        }),
    );
    assert!(state.notifications.is_empty());

    let state = login(&state, "user@example.com", "user");
    let state = apply(&state, Action::AddEvent(workshop_draft(&[10])));

    let admin_ids: Vec<_> = state.admins().map(|u| u.id.clone()).collect();
    assert_eq!(admin_ids.len(), 2);
    assert_eq!(state.notifications.len(), 2);
    for admin_id in &admin_ids {
        assert_eq!(state.notifications_for(admin_id).count(), 1);
    }
    assert_eq!(state.notifications_for("user-2").count(), 0);
}

#[test]
fn test_export_of_filtered_list() {
    let mut storage = Storage::new(MemoryStore::new());
    let state = storage.load().unwrap();
    let event = &state.events[0];

    let filter = ParticipantFilter {
        schedule_id: None,
        status: Some(ParticipantStatus::Confirmed),
    };
    let rows = filter.apply(event);
    let csv = participants_csv(event, &rows);

    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 1 + confirmed_count(event, None) as usize);
    assert!(lines[1..].iter().all(|l| l.contains("\"CONFIRMADO\"")));

    let nobody = ParticipantFilter {
        schedule_id: Some("sch-none".to_string()),
        status: None,
    };
    assert_eq!(participants_csv(event, &nobody.apply(event)), CSV_HEADER);
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = Storage::new(FileStore::new(dir.path().join("data")));
    let state = storage.load().unwrap();

    let state = login(&state, "admin@example.com", "admin");
    let next = apply(&state, Action::AddEvent(workshop_draft(&[4])));
    storage.persist_changes(&state, &next).unwrap();
    storage.save_session(next.session.as_deref()).unwrap();

    let mut reopened = Storage::new(FileStore::new(dir.path().join("data")));
    let mut reloaded = reopened.load().unwrap();
    reloaded.session = reopened.load_session().unwrap();

    assert_eq!(reloaded, next);
}
