//! Events, their schedules and participants.
//!
//! Field names serialize in camelCase so collections written by earlier
//! versions of the application load unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An event with bookable time-slots and the people signed up for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    /// Opaque token for unauthenticated access. Assigned once, never changed.
    #[serde(default)]
    pub public_token: String,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    pub creator_id: String,
}

impl Event {
    pub fn schedule(&self, schedule_id: &str) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == schedule_id)
    }

    pub fn participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    /// Display label of a participant's schedule, `N/A` when it no longer exists.
    pub fn schedule_label(&self, schedule_id: &str) -> String {
        self.schedule(schedule_id)
            .map(|s| s.label())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.creator_id == user_id
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// A bookable time-slot within an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub payment_per_hour: f64,
    /// Maximum number of Confirmed participants.
    pub capacity: u32,
}

impl Schedule {
    /// `"start - end"`, as shown in option lists and exports.
    pub fn label(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantStatus {
    #[serde(rename = "CONFIRMADO")]
    Confirmed,
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

impl ParticipantStatus {
    pub const ALL: [ParticipantStatus; 3] = [
        ParticipantStatus::Confirmed,
        ParticipantStatus::Pending,
        ParticipantStatus::Cancelled,
    ];

    /// The stored representation, also used in CSV exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Confirmed => "CONFIRMADO",
            ParticipantStatus::Pending => "PENDIENTE",
            ParticipantStatus::Cancelled => "CANCELADO",
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParticipantStatus {
    type Err = String;

    /// Accepts the stored value or the English name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" | "confirmado" => Ok(ParticipantStatus::Confirmed),
            "pending" | "pendiente" => Ok(ParticipantStatus::Pending),
            "cancelled" | "canceled" | "cancelado" => Ok(ParticipantStatus::Cancelled),
            other => Err(format!(
                "Unknown participant status '{}'. Expected confirmed, pending or cancelled",
                other
            )),
        }
    }
}

/// A registrant against one schedule of one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub schedule_id: String,
    pub status: ParticipantStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub registration_date: DateTime<Utc>,
}

impl Participant {
    pub fn is_confirmed(&self) -> bool {
        self.status == ParticipantStatus::Confirmed
    }
}

// =============================================================================
// Drafts (form input before ids are assigned)
// =============================================================================

/// Schedule fields from the event form. `id` is set when editing an
/// existing schedule and left empty for new ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDraft {
    pub id: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub payment_per_hour: f64,
    pub capacity: i64,
}

impl Default for ScheduleDraft {
    fn default() -> Self {
        ScheduleDraft {
            id: None,
            start_time: "10:00".to_string(),
            end_time: "12:00".to_string(),
            payment_per_hour: 25.0,
            capacity: 50,
        }
    }
}

impl From<&Schedule> for ScheduleDraft {
    fn from(schedule: &Schedule) -> Self {
        ScheduleDraft {
            id: Some(schedule.id.clone()),
            start_time: schedule.start_time.clone(),
            end_time: schedule.end_time.clone(),
            payment_per_hour: schedule.payment_per_hour,
            capacity: i64::from(schedule.capacity),
        }
    }
}

/// Event fields from the create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub image_url: Option<String>,
    pub schedules: Vec<ScheduleDraft>,
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            image_url: event.image_url.clone(),
            schedules: event.schedules.iter().map(ScheduleDraft::from).collect(),
        }
    }
}

/// Participant fields from the owner-managed form.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub schedule_id: String,
    pub status: ParticipantStatus,
    pub notes: Option<String>,
}

impl From<&Participant> for ParticipantDraft {
    fn from(p: &Participant) -> Self {
        ParticipantDraft {
            name: p.name.clone(),
            email: p.email.clone(),
            phone: p.phone.clone(),
            schedule_id: p.schedule_id.clone(),
            status: p.status,
            notes: p.notes.clone(),
        }
    }
}

/// What a visitor submits on the public registration page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub schedule_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_both_languages() {
        assert_eq!("confirmed".parse::<ParticipantStatus>().unwrap(), ParticipantStatus::Confirmed);
        assert_eq!("PENDIENTE".parse::<ParticipantStatus>().unwrap(), ParticipantStatus::Pending);
        assert_eq!("Canceled".parse::<ParticipantStatus>().unwrap(), ParticipantStatus::Cancelled);
        assert!("maybe".parse::<ParticipantStatus>().is_err());
    }

    #[test]
    fn test_event_reads_original_field_names() {
        let json = r#"{
            "id": "event-1",
            "publicToken": "tok",
            "title": "Meetup",
            "description": "d",
            "location": "l",
            "schedules": [
                {"id": "sch-1", "startTime": "10:00 AM", "endTime": "12:00 PM", "paymentPerHour": 20, "capacity": 25}
            ],
            "participants": [
                {"id": "part-1", "name": "P", "email": "p@e.com", "phone": "555",
                 "scheduleId": "sch-1", "status": "CONFIRMADO",
                 "registrationDate": "2025-01-02T03:04:05.000Z"}
            ],
            "creatorId": "user-1"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.public_token, "tok");
        assert_eq!(event.schedules[0].capacity, 25);
        assert_eq!(event.participants[0].status, ParticipantStatus::Confirmed);
        assert_eq!(event.participants[0].notes, None);
        assert_eq!(event.schedule_label("sch-1"), "10:00 AM - 12:00 PM");
        assert_eq!(event.schedule_label("sch-gone"), "N/A");
    }
}
