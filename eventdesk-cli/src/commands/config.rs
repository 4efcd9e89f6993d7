use anyhow::Result;
use eventdesk_core::config::DeskConfig;
use owo_colors::OwoColorize;

use crate::desk::Desk;

pub fn run(desk: &Desk) -> Result<()> {
    let config_path = DeskConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", desk.config.data_path().display());

    println!("\n{}", "Settings".bold());
    println!("  public_base_url  {}", desk.config.public_base_url);
    println!("  log              {}", desk.config.log);

    match desk.state().current_user() {
        Some(user) => println!("\n{} {}", "Session:".bold(), user.email),
        None => println!("\n{} {}", "Session:".bold(), "none".dimmed()),
    }

    Ok(())
}
