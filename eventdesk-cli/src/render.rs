//! Terminal rendering for eventdesk types.
//!
//! Extension traits that add colored output to eventdesk-core types using
//! owo_colors.

use eventdesk_core::capacity::ScheduleAvailability;
use eventdesk_core::event::{Event, Participant, ParticipantStatus};
use eventdesk_core::notification::{Notification, NotificationKind};
use eventdesk_core::stats::event_summary;
use eventdesk_core::user::{Role, User};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for ParticipantStatus {
    fn render(&self) -> String {
        match self {
            ParticipantStatus::Confirmed => self.as_str().green().to_string(),
            ParticipantStatus::Pending => self.as_str().yellow().to_string(),
            ParticipantStatus::Cancelled => self.as_str().red().to_string(),
        }
    }
}

impl Render for Role {
    fn render(&self) -> String {
        match self {
            Role::Admin => self.as_str().magenta().to_string(),
            Role::User => self.as_str().dimmed().to_string(),
        }
    }
}

impl Render for User {
    fn render(&self) -> String {
        format!("{} {} {} {}", self.name.bold(), self.email, self.role.render(), self.id.dimmed())
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let summary = event_summary(self);
        let occupancy = format!(
            "{}/{} confirmed ({:.1}%)",
            summary.confirmed, summary.total_capacity, summary.occupancy_percent
        );
        let occupancy = if summary.is_full {
            format!("{} {}", occupancy.red(), "FULL".red().bold())
        } else {
            occupancy.green().to_string()
        };

        format!(
            "{}  {}\n   📍 {}  {}  {}",
            self.title.bold(),
            self.id.dimmed(),
            self.location,
            occupancy,
            format!("{} participants", summary.participants).dimmed()
        )
    }
}

/// One participant row, with the schedule resolved against its event.
pub fn render_participant(event: &Event, p: &Participant) -> String {
    let notes = p
        .notes
        .as_deref()
        .map(|n| format!("  {}", n.dimmed()))
        .unwrap_or_default();

    format!(
        "{} {} <{}> {}  [{}]  {}{}",
        p.status.render(),
        p.name.bold(),
        p.email,
        p.phone,
        event.schedule_label(&p.schedule_id),
        p.id.dimmed(),
        notes
    )
}

impl Render for ScheduleAvailability<'_> {
    fn render(&self) -> String {
        let schedule = self.schedule;
        let room = if self.is_selectable() {
            format!("{} places left", self.remaining).green().to_string()
        } else {
            "Sold out".red().to_string()
        };
        format!(
            "{} (${}/hr) - {}",
            schedule.label(),
            schedule.payment_per_hour,
            room
        )
    }
}

impl Render for Notification {
    fn render(&self) -> String {
        let marker = if self.is_read { " " } else { "●" };
        let marker = match self.kind {
            NotificationKind::Success => marker.green().to_string(),
            NotificationKind::Info => marker.blue().to_string(),
            NotificationKind::Warning => marker.yellow().to_string(),
            NotificationKind::Error => marker.red().to_string(),
        };
        let timestamp = self
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M");

        format!(
            "{} {}  {} {}",
            marker,
            self.message,
            timestamp.to_string().dimmed(),
            self.id.dimmed()
        )
    }
}
