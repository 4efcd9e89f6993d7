use anyhow::Result;
use clap::Subcommand;
use eventdesk_core::Action;
use owo_colors::OwoColorize;

use crate::desk::Desk;
use crate::render::Render;

#[derive(Subcommand)]
pub enum NotificationsCommand {
    /// Show your notifications, newest first
    List {
        /// Only unread ones
        #[arg(short, long)]
        unread: bool,
    },
    /// Mark one notification as read, or all of them when no id is given
    Read { notification_id: Option<String> },
}

pub fn run(desk: &mut Desk, command: NotificationsCommand) -> Result<()> {
    match command {
        NotificationsCommand::List { unread } => {
            let user = desk.current_user()?;
            let state = desk.state();
            let mut shown = 0;

            for n in state.notifications_for(&user.id).filter(|n| !unread || !n.is_read) {
                println!("{}", n.render());
                shown += 1;
            }
            if shown == 0 {
                println!("{}", "Nothing here.".dimmed());
            }
            Ok(())
        }
        NotificationsCommand::Read { notification_id } => {
            match notification_id {
                Some(notification_id) => {
                    desk.apply(Action::MarkNotificationRead { notification_id })?;
                    println!("{}", "Marked as read.".green());
                }
                None => {
                    desk.apply(Action::MarkAllNotificationsRead)?;
                    println!("{}", "All notifications marked as read.".green());
                }
            }
            Ok(())
        }
    }
}
