//! Occupancy calculations over events.
//!
//! Everything here is recomputed from the participant list on every call.
//! Nothing is cached in the data model, so the numbers are always in step
//! with the latest participant mutation.

use crate::event::{Event, Participant, Schedule};

/// Sum of capacities over all schedules of the event. Widened so that any
/// number of `u32` capacities fits.
pub fn total_capacity(event: &Event) -> u64 {
    event.schedules.iter().map(|s| u64::from(s.capacity)).sum()
}

/// Confirmed participants, optionally restricted to one schedule.
pub fn confirmed_count(event: &Event, schedule_id: Option<&str>) -> u32 {
    count_confirmed(&event.participants, schedule_id)
}

fn count_confirmed(participants: &[Participant], schedule_id: Option<&str>) -> u32 {
    participants
        .iter()
        .filter(|p| p.is_confirmed())
        .filter(|p| schedule_id.is_none_or(|id| p.schedule_id == id))
        .count() as u32
}

/// Places left in a schedule. Negative when the capacity was lowered after
/// more confirmations than the new capacity had already been accepted.
pub fn remaining(schedule: &Schedule, participants: &[Participant]) -> i64 {
    i64::from(schedule.capacity) - i64::from(count_confirmed(participants, Some(&schedule.id)))
}

pub fn is_event_full(event: &Event) -> bool {
    u64::from(confirmed_count(event, None)) >= total_capacity(event)
}

/// Confirmed share of total capacity, in percent. Zero when the event has
/// no capacity at all.
pub fn occupancy_percent(event: &Event) -> f64 {
    let total = total_capacity(event);
    if total == 0 {
        return 0.0;
    }
    f64::from(confirmed_count(event, None)) / total as f64 * 100.0
}

/// A schedule as offered on the public registration page.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleAvailability<'a> {
    pub schedule: &'a Schedule,
    pub remaining: i64,
}

impl ScheduleAvailability<'_> {
    /// Sold-out schedules are listed but cannot be chosen.
    pub fn is_selectable(&self) -> bool {
        self.remaining > 0
    }
}

/// Availability of every schedule, in schedule order.
pub fn schedule_availability(event: &Event) -> Vec<ScheduleAvailability<'_>> {
    event
        .schedules
        .iter()
        .map(|schedule| ScheduleAvailability {
            schedule,
            remaining: remaining(schedule, &event.participants),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::event::ParticipantStatus;
    use chrono::Utc;

    pub(crate) fn make_schedule(id: &str, capacity: u32) -> Schedule {
        Schedule {
            id: id.to_string(),
            start_time: "10:00".to_string(),
            end_time: "12:00".to_string(),
            payment_per_hour: 20.0,
            capacity,
        }
    }

    pub(crate) fn make_participant(id: &str, schedule_id: &str, status: ParticipantStatus) -> Participant {
        Participant {
            id: id.to_string(),
            name: format!("Participant {}", id),
            email: format!("{}@example.com", id),
            phone: "555-0100".to_string(),
            schedule_id: schedule_id.to_string(),
            status,
            notes: None,
            registration_date: Utc::now(),
        }
    }

    pub(crate) fn make_test_event(schedules: Vec<Schedule>, participants: Vec<Participant>) -> Event {
        Event {
            id: "evt-test".to_string(),
            public_token: "token-test".to_string(),
            title: "Test Event".to_string(),
            description: "A test event".to_string(),
            location: "Room 1".to_string(),
            image_url: None,
            schedules,
            participants,
            creator_id: "user-owner".to_string(),
        }
    }

    #[test]
    fn test_total_capacity_sums_schedules() {
        let event = make_test_event(vec![make_schedule("a", 25), make_schedule("b", 20)], vec![]);
        assert_eq!(total_capacity(&event), 45);
    }

    #[test]
    fn test_total_capacity_of_maximal_schedules() {
        let event = make_test_event(
            vec![make_schedule("a", u32::MAX), make_schedule("b", u32::MAX)],
            vec![make_participant("1", "a", ParticipantStatus::Confirmed)],
        );

        assert_eq!(total_capacity(&event), 2 * u64::from(u32::MAX));
        assert!(!is_event_full(&event));
        assert!(occupancy_percent(&event) < 1.0);
    }

    #[test]
    fn test_only_confirmed_participants_count() {
        let event = make_test_event(
            vec![make_schedule("a", 5), make_schedule("b", 5)],
            vec![
                make_participant("1", "a", ParticipantStatus::Confirmed),
                make_participant("2", "a", ParticipantStatus::Pending),
                make_participant("3", "b", ParticipantStatus::Confirmed),
                make_participant("4", "b", ParticipantStatus::Cancelled),
            ],
        );

        assert_eq!(confirmed_count(&event, None), 2);
        assert_eq!(confirmed_count(&event, Some("a")), 1);
        assert_eq!(confirmed_count(&event, Some("missing")), 0);
    }

    #[test]
    fn test_remaining_can_go_negative_after_capacity_cut() {
        let schedule = make_schedule("a", 1);
        let participants = vec![
            make_participant("1", "a", ParticipantStatus::Confirmed),
            make_participant("2", "a", ParticipantStatus::Confirmed),
        ];
        assert_eq!(remaining(&schedule, &participants), -1);
    }

    #[test]
    fn test_event_full_at_exact_capacity() {
        let mut event = make_test_event(
            vec![make_schedule("a", 2)],
            vec![make_participant("1", "a", ParticipantStatus::Confirmed)],
        );
        assert!(!is_event_full(&event));

        event.participants.push(make_participant("2", "a", ParticipantStatus::Confirmed));
        assert!(is_event_full(&event));
    }

    #[test]
    fn test_event_without_schedules_is_full() {
        let event = make_test_event(vec![], vec![]);
        assert!(is_event_full(&event));
        assert_eq!(occupancy_percent(&event), 0.0);
    }

    #[test]
    fn test_occupancy_percent() {
        let event = make_test_event(
            vec![make_schedule("a", 4)],
            vec![make_participant("1", "a", ParticipantStatus::Confirmed)],
        );
        assert_eq!(occupancy_percent(&event), 25.0);
    }

    #[test]
    fn test_sold_out_schedule_not_selectable() {
        let event = make_test_event(
            vec![make_schedule("a", 1), make_schedule("b", 3)],
            vec![make_participant("1", "a", ParticipantStatus::Confirmed)],
        );

        let options = schedule_availability(&event);
        assert_eq!(options.len(), 2);
        assert!(!options[0].is_selectable());
        assert_eq!(options[1].remaining, 3);
        assert!(options[1].is_selectable());
    }
}
