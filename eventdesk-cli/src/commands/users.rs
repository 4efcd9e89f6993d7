use anyhow::Result;
use clap::Subcommand;
use dialoguer::Confirm;
use eventdesk_core::user::{NewUser, Role, UserUpdate};
use eventdesk_core::{Action, Outcome};
use owo_colors::OwoColorize;

use crate::commands::password_or_prompt;
use crate::desk::Desk;
use crate::render::Render;

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List every account
    List,
    /// Create an account
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,

        /// Give the account the admin role
        #[arg(long)]
        admin: bool,
    },
    /// Change an account. Omitted fields keep their value
    Edit {
        user_id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        password: Option<String>,

        /// Set the role to admin (true) or user (false)
        #[arg(long)]
        admin: Option<bool>,
    },
    /// Delete an account
    Remove {
        user_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn role_for(admin: bool) -> Role {
    if admin { Role::Admin } else { Role::User }
}

pub fn run(desk: &mut Desk, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::List => list(desk),
        UsersCommand::Add {
            name,
            email,
            password,
            admin,
        } => {
            let password = password_or_prompt(password, "Password")?;
            let outcome = desk.apply(Action::AddUser(NewUser {
                name,
                email,
                password,
                role: role_for(admin),
            }))?;
            if let Outcome::User(user) = outcome {
                println!("{} {}", "Created:".green(), user.render());
            }
            Ok(())
        }
        UsersCommand::Edit {
            user_id,
            name,
            email,
            password,
            admin,
        } => {
            let existing = desk
                .state()
                .find_user(&user_id)
                .ok_or_else(|| anyhow::anyhow!("User '{}' not found", user_id))?;

            let update = UserUpdate {
                id: existing.id.clone(),
                name: name.unwrap_or_else(|| existing.name.clone()),
                email: email.unwrap_or_else(|| existing.email.clone()),
                password: password.unwrap_or_default(),
                role: admin.map(role_for).unwrap_or(existing.role),
            };
            if let Outcome::User(user) = desk.apply(Action::UpdateUser(update))? {
                println!("{} {}", "Updated:".green(), user.render());
            }
            Ok(())
        }
        UsersCommand::Remove { user_id, yes } => {
            let user = desk
                .state()
                .find_user(&user_id)
                .ok_or_else(|| anyhow::anyhow!("User '{}' not found", user_id))?;
            let label = format!("{} <{}>", user.name, user.email);

            if !yes
                && !Confirm::new()
                    .with_prompt(format!("Delete {}?", label))
                    .default(false)
                    .interact()?
            {
                println!("{}", "Cancelled.".dimmed());
                return Ok(());
            }

            desk.apply(Action::RemoveUser { user_id })?;
            println!("{} {}", "Deleted:".green(), label);
            Ok(())
        }
    }
}

fn list(desk: &Desk) -> Result<()> {
    let me = desk.current_user()?;
    if !me.is_admin() {
        anyhow::bail!("Only admins can list users");
    }

    for user in &desk.state().users {
        println!("{}", user.render());
    }
    Ok(())
}
