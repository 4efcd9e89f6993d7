use anyhow::{Context, Result};
use clap::Subcommand;
use dialoguer::{Confirm, Input};
use eventdesk_core::capacity::schedule_availability;
use eventdesk_core::event::{EventDraft, ScheduleDraft};
use eventdesk_core::public_link::public_url;
use eventdesk_core::{Action, Outcome};
use owo_colors::OwoColorize;

use crate::desk::Desk;
use crate::render::Render;

#[derive(Subcommand)]
pub enum EventsCommand {
    /// List the events you can manage
    List,
    /// Show an event with per-schedule availability
    Show { event_id: String },
    /// Create an event. Missing text fields are prompted for
    New {
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        image_url: Option<String>,

        /// "START,END,RATE,CAPACITY", repeatable (e.g. "10:00,12:00,25,50")
        #[arg(short, long = "schedule")]
        schedules: Vec<String>,
    },
    /// Change an event. Omitted fields keep their value
    Edit {
        event_id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// Pass an empty string to clear
        #[arg(long)]
        image_url: Option<String>,

        /// Replaces all schedules. Prefix with "<schedule-id>=" to keep an
        /// existing schedule's id
        #[arg(short, long = "schedule")]
        schedules: Vec<String>,
    },
    /// Delete an event and its participants
    Remove {
        event_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the public registration link
    Link { event_id: String },
}

pub fn run(desk: &mut Desk, command: EventsCommand) -> Result<()> {
    match command {
        EventsCommand::List => list(desk),
        EventsCommand::Show { event_id } => show(desk, &event_id),
        EventsCommand::New {
            title,
            description,
            location,
            image_url,
            schedules,
        } => {
            desk.current_user()?;

            let schedules = if schedules.is_empty() {
                vec![ScheduleDraft::default()]
            } else {
                parse_schedules(&schedules)?
            };
            let draft = EventDraft {
                title: text_or_prompt(title, "Title")?,
                description: text_or_prompt(description, "Description")?,
                location: text_or_prompt(location, "Location")?,
                image_url: image_url.filter(|u| !u.trim().is_empty()),
                schedules,
            };

            if let Outcome::Event(event) = desk.apply(Action::AddEvent(draft))? {
                println!("{} {}", "Created:".green(), event.render());
                println!("  {}", public_url(&desk.config.public_base_url, &event));
            }
            Ok(())
        }
        EventsCommand::Edit {
            event_id,
            title,
            description,
            location,
            image_url,
            schedules,
        } => {
            let mut draft = EventDraft::from(desk.managed_event(&event_id)?);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(location) = location {
                draft.location = location;
            }
            if let Some(url) = image_url {
                draft.image_url = Some(url).filter(|u| !u.trim().is_empty());
            }
            if !schedules.is_empty() {
                draft.schedules = parse_schedules(&schedules)?;
            }

            if let Outcome::Event(event) = desk.apply(Action::EditEvent { event_id, draft })? {
                println!("{} {}", "Updated:".green(), event.render());
            }
            Ok(())
        }
        EventsCommand::Remove { event_id, yes } => {
            let event = desk.managed_event(&event_id)?;
            let prompt = format!(
                "Delete '{}' and its {} participant(s)?",
                event.title,
                event.participants.len()
            );
            let title = event.title.clone();

            if !yes && !Confirm::new().with_prompt(prompt).default(false).interact()? {
                println!("{}", "Cancelled.".dimmed());
                return Ok(());
            }

            desk.apply(Action::RemoveEvent { event_id })?;
            println!("{} {}", "Deleted:".green(), title);
            Ok(())
        }
        EventsCommand::Link { event_id } => {
            let event = desk.managed_event(&event_id)?;
            println!("{}", public_url(&desk.config.public_base_url, event));
            Ok(())
        }
    }
}

fn list(desk: &Desk) -> Result<()> {
    let user = desk.current_user()?;
    let mut any = false;

    for event in desk.state().events_visible_to(user) {
        println!("{}", event.render());
        any = true;
    }
    if !any {
        println!("{}", "No events yet. Create one with `eventdesk events new`".dimmed());
    }
    Ok(())
}

fn show(desk: &Desk, event_id: &str) -> Result<()> {
    let event = desk.managed_event(event_id)?;

    println!("{}", event.render());
    println!("\n{}", event.description);
    if let Some(url) = &event.image_url {
        println!("{}", url.dimmed());
    }

    println!("\n{}", "Schedules".bold());
    for availability in schedule_availability(event) {
        println!(
            "  {}  {}",
            availability.render(),
            availability.schedule.id.dimmed()
        );
    }

    println!(
        "\n{} {}",
        "Public link:".bold(),
        public_url(&desk.config.public_base_url, event)
    );
    Ok(())
}

fn text_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(label).interact_text()?),
    }
}

fn parse_schedules(inputs: &[String]) -> Result<Vec<ScheduleDraft>> {
    inputs.iter().map(|s| parse_schedule(s)).collect()
}

/// Parse `[ID=]START,END,RATE,CAPACITY`.
///
/// Range checks (positive capacity, non-negative rate) are left to the
/// event validation so the messages stay in one place.
pub fn parse_schedule(input: &str) -> Result<ScheduleDraft> {
    let (id, rest) = match input.split_once('=') {
        Some((id, rest)) => (Some(id.trim().to_string()), rest),
        None => (None, input),
    };

    let parts: Vec<&str> = rest.split(',').map(str::trim).collect();
    let [start, end, rate, capacity] = parts.as_slice() else {
        anyhow::bail!(
            "Invalid schedule '{}'. Expected START,END,RATE,CAPACITY (e.g. 10:00,12:00,25,50)",
            input
        );
    };

    let payment_per_hour = rate
        .parse::<f64>()
        .with_context(|| format!("Invalid rate '{}' in schedule '{}'", rate, input))?;
    let capacity = capacity
        .parse::<i64>()
        .with_context(|| format!("Invalid capacity '{}' in schedule '{}'", capacity, input))?;

    Ok(ScheduleDraft {
        id: id.filter(|id| !id.is_empty()),
        start_time: start.to_string(),
        end_time: end.to_string(),
        payment_per_hour,
        capacity,
    })
}
