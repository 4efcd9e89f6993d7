use anyhow::Result;
use eventdesk_core::stats::{admin_stats, user_stats};
use owo_colors::OwoColorize;

use crate::desk::Desk;
use crate::render::Render;

pub fn run(desk: &Desk) -> Result<()> {
    let user = desk.current_user()?;
    let state = desk.state();

    println!("{} {}\n", "Dashboard for".bold(), user.name.bold());

    if user.is_admin() {
        let stats = admin_stats(state);
        println!("  Events:        {}", stats.total_events);
        println!("  Participants:  {}", stats.total_participants);
        println!("  Confirmed:     {}", stats.confirmed_participants.green());
        println!("  Users:         {}", stats.total_users);
    } else {
        let stats = user_stats(state, user);
        println!("  My events:        {}", stats.my_events);
        println!("  My participants:  {}", stats.my_participants);
        if let Some(event) = stats.next_event {
            println!("\n{}", "Next event".bold());
            println!("{}", event.render());
        }
    }

    let unread = state.unread_count(&user.id);
    if unread > 0 {
        println!(
            "\n{}",
            format!("{} unread notification(s). Run `eventdesk notifications list`", unread)
                .yellow()
        );
    }

    Ok(())
}
