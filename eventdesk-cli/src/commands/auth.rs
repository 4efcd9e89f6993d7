use anyhow::Result;
use dialoguer::Input;
use eventdesk_core::{Action, Outcome};
use owo_colors::OwoColorize;

use crate::commands::password_or_prompt;
use crate::desk::Desk;
use crate::render::Render;

pub fn login(desk: &mut Desk, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = match email {
        Some(e) => e,
        None => Input::<String>::new().with_prompt("Email").interact_text()?,
    };
    let password = password_or_prompt(password, "Password")?;

    desk.apply(Action::Login { email, password })?;

    let user = desk.current_user()?;
    println!("{} {}", "Logged in as".green(), user.name.bold());
    let unread = desk.state().unread_count(&user.id);
    if unread > 0 {
        println!("{}", format!("{} unread notification(s)", unread).dimmed());
    }
    Ok(())
}

pub fn logout(desk: &mut Desk) -> Result<()> {
    if desk.state().session.is_none() {
        println!("{}", "Not logged in.".dimmed());
        return Ok(());
    }

    desk.apply(Action::Logout)?;
    println!("{}", "Logged out.".green());
    Ok(())
}

pub fn register(
    desk: &mut Desk,
    name: String,
    email: String,
    password: Option<String>,
) -> Result<()> {
    let password = password_or_prompt(password, "Choose a password")?;

    let outcome = desk.apply(Action::Register { name, email, password })?;
    if let Outcome::User(user) = outcome {
        println!("{} {}", "Welcome,".green(), user.name.bold());
    }
    Ok(())
}

pub fn whoami(desk: &Desk) -> Result<()> {
    let user = desk.current_user()?;
    println!("{}", user.render());
    Ok(())
}
