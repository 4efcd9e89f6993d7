//! Participant registration workflow.
//!
//! Each function takes the current event and returns a new copy with the
//! change applied. Writing the copy back (and firing notifications) is done
//! by [`crate::state::AppState`].

use chrono::Utc;

use crate::capacity::{is_event_full, schedule_availability, total_capacity};
use crate::error::{EventDeskError, EventDeskResult};
use crate::event::{Event, Participant, ParticipantDraft, ParticipantStatus, PublicRegistration};
use crate::ids;
use crate::validation::{is_valid_email, validate_participant_draft};

fn require_schedule(event: &Event, schedule_id: &str) -> EventDeskResult<()> {
    if event.schedule(schedule_id).is_none() {
        return Err(EventDeskError::NotFound(format!(
            "schedule '{}' in event '{}'",
            schedule_id, event.title
        )));
    }
    Ok(())
}

fn none_if_blank(notes: Option<String>) -> Option<String> {
    notes.filter(|n| !n.trim().is_empty())
}

/// Owner-managed add. A Confirmed participant is refused once the event is
/// full; Pending and Cancelled entries are always accepted.
pub fn add_participant(
    event: &Event,
    draft: ParticipantDraft,
) -> EventDeskResult<(Event, Participant)> {
    validate_participant_draft(&draft)?;
    require_schedule(event, &draft.schedule_id)?;

    if draft.status == ParticipantStatus::Confirmed && is_event_full(event) {
        return Err(EventDeskError::CapacityExceeded {
            event: event.title.clone(),
            capacity: total_capacity(event),
        });
    }

    let participant = Participant {
        id: ids::participant_id(),
        name: draft.name.trim().to_string(),
        email: draft.email.trim().to_string(),
        phone: draft.phone.trim().to_string(),
        schedule_id: draft.schedule_id,
        status: draft.status,
        notes: none_if_blank(draft.notes),
        registration_date: Utc::now(),
    };

    let mut updated = event.clone();
    updated.participants.push(participant.clone());
    Ok((updated, participant))
}

/// Owner-managed edit. The operator is trusted: no capacity check. Id and
/// registration date are kept.
pub fn edit_participant(
    event: &Event,
    participant_id: &str,
    draft: ParticipantDraft,
) -> EventDeskResult<Event> {
    validate_participant_draft(&draft)?;
    require_schedule(event, &draft.schedule_id)?;

    let mut updated = event.clone();
    let participant = updated
        .participants
        .iter_mut()
        .find(|p| p.id == participant_id)
        .ok_or_else(|| EventDeskError::NotFound(format!("participant '{}'", participant_id)))?;

    participant.name = draft.name.trim().to_string();
    participant.email = draft.email.trim().to_string();
    participant.phone = draft.phone.trim().to_string();
    participant.schedule_id = draft.schedule_id;
    participant.status = draft.status;
    participant.notes = none_if_blank(draft.notes);

    Ok(updated)
}

pub fn remove_participant(event: &Event, participant_id: &str) -> EventDeskResult<Event> {
    if event.participant(participant_id).is_none() {
        return Err(EventDeskError::NotFound(format!("participant '{}'", participant_id)));
    }

    let mut updated = event.clone();
    updated.participants.retain(|p| p.id != participant_id);
    Ok(updated)
}

/// Self-registration from the public page.
///
/// Only schedules that still had room are offered on the page, so a sold-out
/// schedule is refused here the same way an unselectable option would be.
/// The new participant is always Confirmed.
pub fn public_register(
    event: &Event,
    registration: PublicRegistration,
) -> EventDeskResult<(Event, Participant)> {
    if registration.name.trim().is_empty()
        || registration.email.trim().is_empty()
        || registration.schedule_id.trim().is_empty()
    {
        return Err(EventDeskError::Validation(
            "Please fill in your name, email and choose a schedule".into(),
        ));
    }
    if !is_valid_email(&registration.email) {
        return Err(EventDeskError::Validation("The email format is not valid".into()));
    }

    require_schedule(event, &registration.schedule_id)?;
    let selectable = schedule_availability(event)
        .iter()
        .any(|a| a.schedule.id == registration.schedule_id && a.is_selectable());
    if !selectable {
        return Err(EventDeskError::Validation(
            "The selected schedule is sold out".into(),
        ));
    }

    let participant = Participant {
        id: ids::participant_id(),
        name: registration.name.trim().to_string(),
        email: registration.email.trim().to_string(),
        phone: registration.phone.trim().to_string(),
        schedule_id: registration.schedule_id,
        status: ParticipantStatus::Confirmed,
        notes: None,
        registration_date: Utc::now(),
    };

    let mut updated = event.clone();
    updated.participants.push(participant.clone());
    Ok((updated, participant))
}
