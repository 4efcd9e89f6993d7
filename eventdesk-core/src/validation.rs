//! Form field validation.

use crate::error::{EventDeskError, EventDeskResult};
use crate::event::{EventDraft, ParticipantDraft};

/// Shortest password accepted on self-service registration.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Loose syntactic email check: a non-empty local part, an `@`, and a domain
/// with a dot that has text on both sides. No whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }

    domain
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

pub fn require(value: &str, field: &str) -> EventDeskResult<()> {
    if value.trim().is_empty() {
        return Err(EventDeskError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

pub fn require_email(email: &str) -> EventDeskResult<()> {
    require(email, "Email")?;
    if !is_valid_email(email) {
        return Err(EventDeskError::Validation(format!("'{}' is not a valid email", email)));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> EventDeskResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(EventDeskError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub fn validate_event_draft(draft: &EventDraft) -> EventDeskResult<()> {
    require(&draft.title, "Title")?;
    require(&draft.description, "Description")?;
    require(&draft.location, "Location")?;

    if draft.schedules.is_empty() {
        return Err(EventDeskError::Validation(
            "An event needs at least one schedule".into(),
        ));
    }

    for (i, schedule) in draft.schedules.iter().enumerate() {
        let n = i + 1;
        require(&schedule.start_time, &format!("Start time of schedule {}", n))?;
        require(&schedule.end_time, &format!("End time of schedule {}", n))?;
        if schedule.capacity <= 0 {
            return Err(EventDeskError::Validation(format!(
                "Capacity of schedule {} must be greater than 0",
                n
            )));
        }
        if schedule.capacity > i64::from(u32::MAX) {
            return Err(EventDeskError::Validation(format!(
                "Capacity of schedule {} is too large",
                n
            )));
        }
        if schedule.payment_per_hour.is_nan() || schedule.payment_per_hour < 0.0 {
            return Err(EventDeskError::Validation(format!(
                "Hourly rate of schedule {} cannot be negative",
                n
            )));
        }
    }

    Ok(())
}

/// Field checks of the owner-managed participant form. Whether the schedule
/// belongs to the event is checked by the registration workflow.
pub fn validate_participant_draft(draft: &ParticipantDraft) -> EventDeskResult<()> {
    require(&draft.name, "Name")?;
    require_email(&draft.email)?;
    require(&draft.phone, "Phone")?;
    if draft.schedule_id.trim().is_empty() {
        return Err(EventDeskError::Validation("A schedule must be selected".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ParticipantStatus, ScheduleDraft};

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(is_valid_email("  padded@example.com  "));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@localhost"));
        assert!(!is_valid_email("ana@.com"));
        assert!(!is_valid_email("ana@example."));
        assert!(!is_valid_email("an a@example.com"));
    }

    fn make_test_draft() -> EventDraft {
        EventDraft {
            title: "Workshop".to_string(),
            description: "Hands-on".to_string(),
            location: "Lab".to_string(),
            image_url: None,
            schedules: vec![ScheduleDraft::default()],
        }
    }

    #[test]
    fn test_event_draft_ok() {
        assert!(validate_event_draft(&make_test_draft()).is_ok());
    }

    #[test]
    fn test_event_draft_rejects_blank_title() {
        let mut draft = make_test_draft();
        draft.title = "   ".to_string();
        let err = validate_event_draft(&draft).unwrap_err();
        assert!(matches!(err, EventDeskError::Validation(msg) if msg.contains("Title")));
    }

    #[test]
    fn test_event_draft_rejects_zero_capacity_and_negative_rate() {
        let mut draft = make_test_draft();
        draft.schedules[0].capacity = 0;
        assert!(validate_event_draft(&draft).is_err());

        let mut draft = make_test_draft();
        draft.schedules[0].payment_per_hour = -1.0;
        assert!(validate_event_draft(&draft).is_err());

        let mut draft = make_test_draft();
        draft.schedules[0].payment_per_hour = 0.0;
        assert!(validate_event_draft(&draft).is_ok());
    }

    #[test]
    fn test_event_draft_requires_a_schedule() {
        let mut draft = make_test_draft();
        draft.schedules.clear();
        assert!(validate_event_draft(&draft).is_err());
    }

    #[test]
    fn test_participant_draft_requires_phone() {
        let draft = ParticipantDraft {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "".to_string(),
            schedule_id: "sch-1".to_string(),
            status: ParticipantStatus::Confirmed,
            notes: None,
        };
        let err = validate_participant_draft(&draft).unwrap_err();
        assert!(matches!(err, EventDeskError::Validation(msg) if msg.contains("Phone")));
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("abc").is_err());
        assert!(validate_password("abcd").is_ok());
    }
}
