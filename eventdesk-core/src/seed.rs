//! Demo data used when nothing has been stored yet.

use chrono::{Duration, Utc};

use crate::event::{Event, Participant, ParticipantStatus, Schedule};
use crate::ids;
use crate::user::{Role, User};

pub const ADMIN_ID: &str = "user-1";
pub const DEMO_USER_ID: &str = "user-2";

pub fn users() -> Vec<User> {
    vec![
        User {
            id: ADMIN_ID.to_string(),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password: "admin".to_string(),
            role: Role::Admin,
        },
        User {
            id: DEMO_USER_ID.to_string(),
            name: "Usuario Demo".to_string(),
            email: "user@example.com".to_string(),
            password: "user".to_string(),
            role: Role::User,
        },
    ]
}

fn schedule(start: &str, end: &str, rate: f64, capacity: u32) -> Schedule {
    Schedule {
        id: ids::schedule_id(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        payment_per_hour: rate,
        capacity,
    }
}

fn schedules() -> Vec<Schedule> {
    vec![
        schedule("10:00 AM", "12:00 PM", 20.0, 25),
        schedule("02:00 PM", "04:00 PM", 20.0, 25),
        schedule("06:00 PM", "07:00 PM", 35.0, 20),
    ]
}

/// `count` participants spread round-robin over the schedules, with status
/// cycling Pending, Cancelled, Confirmed and one day between registrations.
fn participants(schedules: &[Schedule], count: usize) -> Vec<Participant> {
    let now = Utc::now();

    (1..=count)
        .map(|i| Participant {
            id: ids::participant_id(),
            name: format!("Participante {}", i),
            email: format!("participante{}@email.com", i),
            phone: format!("555-010{}", i),
            schedule_id: schedules[i % schedules.len()].id.clone(),
            status: ParticipantStatus::ALL[i % ParticipantStatus::ALL.len()],
            notes: Some("Sin notas adicionales.".to_string()),
            registration_date: now - Duration::days(i as i64),
        })
        .collect()
}

pub fn events() -> Vec<Event> {
    let conference = schedules();
    let meetup = schedules();

    vec![
        Event {
            id: "event-1".to_string(),
            public_token: ids::public_token(),
            title: "Conferencia Anual de Tecnología".to_string(),
            description: "Un evento para explorar las últimas tendencias en desarrollo de software, IA y computación en la nube.".to_string(),
            location: "Centro de Convenciones Metropolitano".to_string(),
            image_url: Some("https://images.unsplash.com/photo-1511578314322-379afb476865?q=80&w=2069&auto=format&fit=crop".to_string()),
            participants: participants(&conference, 30),
            schedules: conference,
            creator_id: ADMIN_ID.to_string(),
        },
        Event {
            id: "event-3".to_string(),
            public_token: ids::public_token(),
            title: "Meetup de React Avanzado".to_string(),
            description: "Una reunión para desarrolladores de React para discutir patrones avanzados y gestión de estado.".to_string(),
            location: "Oficinas de Tech Solutions, Piso 12".to_string(),
            image_url: Some("https://images.unsplash.com/photo-1633356122544-f134324a6cee?q=80&w=2070&auto=format&fit=crop".to_string()),
            participants: participants(&meetup, 45),
            schedules: meetup,
            creator_id: DEMO_USER_ID.to_string(),
        },
    ]
}
