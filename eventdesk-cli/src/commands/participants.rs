use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use dialoguer::Confirm;
use eventdesk_core::capacity::confirmed_count;
use eventdesk_core::event::{ParticipantDraft, ParticipantStatus};
use eventdesk_core::export::{ParticipantFilter, export_filename, participants_csv};
use eventdesk_core::{Action, Outcome};
use owo_colors::OwoColorize;
use tracing::info;

use crate::desk::Desk;
use crate::render::render_participant;

#[derive(Subcommand)]
pub enum ParticipantsCommand {
    /// List the participants of an event
    List {
        event_id: String,

        /// Only this schedule
        #[arg(long)]
        schedule: Option<String>,

        /// Only this status (confirmed, pending, cancelled)
        #[arg(long)]
        status: Option<ParticipantStatus>,
    },
    /// Add a participant by hand
    Add {
        event_id: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        phone: String,

        /// Schedule id (see `eventdesk events show`)
        #[arg(short, long)]
        schedule: String,

        #[arg(long, default_value = "confirmed")]
        status: ParticipantStatus,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Change a participant. Omitted fields keep their value
    Edit {
        event_id: String,
        participant_id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        phone: Option<String>,

        #[arg(short, long)]
        schedule: Option<String>,

        #[arg(long)]
        status: Option<ParticipantStatus>,

        /// Pass an empty string to clear
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a participant from an event
    Remove {
        event_id: String,
        participant_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the (filtered) participant list as CSV
    Export {
        event_id: String,

        #[arg(long)]
        schedule: Option<String>,

        #[arg(long)]
        status: Option<ParticipantStatus>,

        /// Defaults to <title>_participantes.csv in the current directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(desk: &mut Desk, command: ParticipantsCommand) -> Result<()> {
    match command {
        ParticipantsCommand::List {
            event_id,
            schedule,
            status,
        } => {
            let event = desk.managed_event(&event_id)?;
            let filter = ParticipantFilter {
                schedule_id: schedule,
                status,
            };
            let rows = filter.apply(event);

            println!(
                "{}  {}",
                event.title.bold(),
                format!(
                    "{} shown, {} of {} confirmed",
                    rows.len(),
                    confirmed_count(event, None),
                    event.participants.len()
                )
                .dimmed()
            );
            for p in rows {
                println!("{}", render_participant(event, p));
            }
            Ok(())
        }
        ParticipantsCommand::Add {
            event_id,
            name,
            email,
            phone,
            schedule,
            status,
            notes,
        } => {
            let draft = ParticipantDraft {
                name,
                email,
                phone,
                schedule_id: schedule,
                status,
                notes,
            };
            let outcome = desk.apply(Action::AddParticipant {
                event_id: event_id.clone(),
                draft,
            })?;

            if let Outcome::Participant(p) = outcome {
                let event = desk.event(&event_id)?;
                println!("{} {}", "Added:".green(), render_participant(event, &p));
            }
            Ok(())
        }
        ParticipantsCommand::Edit {
            event_id,
            participant_id,
            name,
            email,
            phone,
            schedule,
            status,
            notes,
        } => {
            let event = desk.managed_event(&event_id)?;
            let existing = event.participant(&participant_id).ok_or_else(|| {
                anyhow::anyhow!("Participant '{}' not found in '{}'", participant_id, event.title)
            })?;

            let mut draft = ParticipantDraft::from(existing);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(email) = email {
                draft.email = email;
            }
            if let Some(phone) = phone {
                draft.phone = phone;
            }
            if let Some(schedule) = schedule {
                draft.schedule_id = schedule;
            }
            if let Some(status) = status {
                draft.status = status;
            }
            if let Some(notes) = notes {
                draft.notes = Some(notes);
            }

            desk.apply(Action::EditParticipant {
                event_id: event_id.clone(),
                participant_id: participant_id.clone(),
                draft,
            })?;

            let event = desk.event(&event_id)?;
            if let Some(p) = event.participant(&participant_id) {
                println!("{} {}", "Updated:".green(), render_participant(event, p));
            }
            Ok(())
        }
        ParticipantsCommand::Remove {
            event_id,
            participant_id,
            yes,
        } => {
            let event = desk.managed_event(&event_id)?;
            let name = event
                .participant(&participant_id)
                .map(|p| p.name.clone())
                .ok_or_else(|| anyhow::anyhow!("Participant '{}' not found", participant_id))?;

            if !yes
                && !Confirm::new()
                    .with_prompt(format!("Remove {} from '{}'?", name, event.title))
                    .default(false)
                    .interact()?
            {
                println!("{}", "Cancelled.".dimmed());
                return Ok(());
            }

            desk.apply(Action::RemoveParticipant {
                event_id,
                participant_id,
            })?;
            println!("{} {}", "Removed:".green(), name);
            Ok(())
        }
        ParticipantsCommand::Export {
            event_id,
            schedule,
            status,
            output,
        } => {
            let event = desk.managed_event(&event_id)?;
            let filter = ParticipantFilter {
                schedule_id: schedule,
                status,
            };
            let rows = filter.apply(event);
            let csv = participants_csv(event, &rows);

            let path = output.unwrap_or_else(|| PathBuf::from(export_filename(event)));
            std::fs::write(&path, csv)
                .with_context(|| format!("Could not write {}", path.display()))?;

            info!(event = %event.id, rows = rows.len(), path = %path.display(), "exported participants");
            println!(
                "{} {} row(s) to {}",
                "Exported".green(),
                rows.len(),
                path.display()
            );
            Ok(())
        }
    }
}
