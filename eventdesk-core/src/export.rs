//! CSV export of an event's participant list.

use crate::event::{Event, Participant, ParticipantStatus};

pub const CSV_HEADER: &str = "Nombre,Email,Teléfono,Horario,Estado,Notas,Fecha de Registro";

const DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Which participants of an event to list. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantFilter {
    pub schedule_id: Option<String>,
    pub status: Option<ParticipantStatus>,
}

impl ParticipantFilter {
    pub fn matches(&self, participant: &Participant) -> bool {
        let schedule_ok = self
            .schedule_id
            .as_ref()
            .is_none_or(|id| &participant.schedule_id == id);
        let status_ok = self.status.is_none_or(|s| participant.status == s);
        schedule_ok && status_ok
    }

    pub fn apply<'a>(&self, event: &'a Event) -> Vec<&'a Participant> {
        event.participants.iter().filter(|p| self.matches(p)).collect()
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render the given participants of `event` as CSV. Rows are separated by
/// `\n`; an empty list yields only the header.
pub fn participants_csv(event: &Event, participants: &[&Participant]) -> String {
    let mut lines = Vec::with_capacity(participants.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for p in participants {
        let schedule = event.schedule_label(&p.schedule_id);
        let date = p.registration_date.format(DATE_FORMAT).to_string();
        let fields: [&str; 7] = [
            &p.name,
            &p.email,
            &p.phone,
            &schedule,
            p.status.as_str(),
            p.notes.as_deref().unwrap_or(""),
            &date,
        ];
        lines.push(fields.iter().map(|f| quote(f)).collect::<Vec<_>>().join(","));
    }

    lines.join("\n")
}

/// Suggested file name: the title with whitespace and path separators
/// replaced by underscores, so the name never points into a directory.
pub fn export_filename(event: &Event) -> String {
    let title: String = event
        .title
        .chars()
        .map(|c| if c.is_whitespace() || matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}_participantes.csv", title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::tests::{make_participant, make_schedule, make_test_event};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_list_is_header_only() {
        let event = make_test_event(vec![make_schedule("a", 2)], vec![]);
        assert_eq!(participants_csv(&event, &[]), CSV_HEADER);
    }

    #[test]
    fn test_row_format() {
        let mut p = make_participant("1", "a", ParticipantStatus::Pending);
        p.name = "Ana \"La Jefa\" Ruiz".to_string();
        p.notes = Some("Trae laptop".to_string());
        p.registration_date = Utc.with_ymd_and_hms(2025, 3, 20, 15, 4, 5).unwrap();
        let event = make_test_event(vec![make_schedule("a", 2)], vec![p]);

        let csv = participants_csv(&event, &event.participants.iter().collect::<Vec<_>>());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "\"Ana \"\"La Jefa\"\" Ruiz\",\"1@example.com\",\"555-0100\",\"10:00 - 12:00\",\"PENDIENTE\",\"Trae laptop\",\"20/03/2025, 15:04:05\""
        );
    }

    #[test]
    fn test_unknown_schedule_renders_na_and_missing_notes_empty() {
        let p = make_participant("1", "gone", ParticipantStatus::Confirmed);
        let event = make_test_event(vec![make_schedule("a", 2)], vec![p]);

        let csv = participants_csv(&event, &event.participants.iter().collect::<Vec<_>>());
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"N/A\""));
        assert!(row.contains("\"CONFIRMADO\",\"\","));
    }

    #[test]
    fn test_filter_by_schedule_and_status() {
        let event = make_test_event(
            vec![make_schedule("a", 5), make_schedule("b", 5)],
            vec![
                make_participant("1", "a", ParticipantStatus::Confirmed),
                make_participant("2", "a", ParticipantStatus::Pending),
                make_participant("3", "b", ParticipantStatus::Confirmed),
            ],
        );

        let all = ParticipantFilter::default().apply(&event);
        assert_eq!(all.len(), 3);

        let filter = ParticipantFilter {
            schedule_id: Some("a".to_string()),
            status: Some(ParticipantStatus::Confirmed),
        };
        let matched = filter.apply(&event);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "1");
    }

    #[test]
    fn test_export_filename() {
        let event = make_test_event(vec![], vec![]);
        assert_eq!(export_filename(&event), "Test_Event_participantes.csv");
    }

    #[test]
    fn test_export_filename_has_no_path_separators() {
        let mut event = make_test_event(vec![], vec![]);
        event.title = "Q1/Q2 review\\final".to_string();

        let name = export_filename(&event);
        assert_eq!(name, "Q1_Q2_review_final_participantes.csv");
        assert_eq!(std::path::Path::new(&name).components().count(), 1);
    }
}
