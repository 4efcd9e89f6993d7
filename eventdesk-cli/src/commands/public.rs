use anyhow::Result;
use clap::Subcommand;
use dialoguer::Select;
use eventdesk_core::capacity::schedule_availability;
use eventdesk_core::event::{Event, PublicRegistration};
use eventdesk_core::public_link::parse_public_token;
use eventdesk_core::{Action, Outcome};
use owo_colors::OwoColorize;

use crate::desk::Desk;
use crate::render::Render;

#[derive(Subcommand)]
pub enum PublicCommand {
    /// Show what a shared link offers
    Show {
        /// The shared link, or just its token
        link: String,
    },
    /// Sign up through a shared link
    Register {
        /// The shared link, or just its token
        link: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, default_value = "")]
        phone: String,

        /// Schedule id. Chosen interactively when omitted
        #[arg(short, long)]
        schedule: Option<String>,
    },
}

pub fn run(desk: &mut Desk, command: PublicCommand) -> Result<()> {
    match command {
        PublicCommand::Show { link } => {
            let event = event_for_link(desk, &link)?;

            println!("{}", event.title.bold());
            println!("{}", event.description);
            println!("📍 {}\n", event.location);
            for availability in schedule_availability(event) {
                println!("  {}  {}", availability.render(), availability.schedule.id.dimmed());
            }
            Ok(())
        }
        PublicCommand::Register {
            link,
            name,
            email,
            phone,
            schedule,
        } => {
            let event = event_for_link(desk, &link)?;
            let public_token = event.public_token.clone();
            let title = event.title.clone();

            let schedule_id = match schedule {
                Some(id) => id,
                None => choose_schedule(event)?,
            };

            let outcome = desk.apply(Action::PublicRegister {
                public_token,
                registration: PublicRegistration {
                    name,
                    email,
                    phone,
                    schedule_id,
                },
            })?;

            if let Outcome::Participant(p) = outcome {
                println!(
                    "{} {} is registered for {}.",
                    "Done!".green().bold(),
                    p.name,
                    title.bold()
                );
            }
            Ok(())
        }
    }
}

fn event_for_link<'a>(desk: &'a Desk, link: &str) -> Result<&'a Event> {
    let token = parse_public_token(link)
        .ok_or_else(|| anyhow::anyhow!("'{}' is not a registration link", link))?;

    desk.state()
        .find_event_by_token(&token)
        .ok_or_else(|| anyhow::anyhow!("This registration link is no longer valid"))
}

/// Sold-out schedules are listed but cannot be picked.
fn choose_schedule(event: &Event) -> Result<String> {
    let options = schedule_availability(event);
    let selectable: Vec<_> = options.iter().filter(|a| a.is_selectable()).collect();

    for sold_out in options.iter().filter(|a| !a.is_selectable()) {
        println!("  {}", sold_out.render().dimmed());
    }
    if selectable.is_empty() {
        anyhow::bail!("Every schedule of '{}' is sold out", event.title);
    }

    let items: Vec<String> = selectable.iter().map(|a| a.render()).collect();
    let selection = Select::new()
        .with_prompt("Schedule")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(selectable[selection].schedule.id.clone())
}
