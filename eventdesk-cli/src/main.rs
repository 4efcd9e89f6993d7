mod commands;
mod desk;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventdesk_core::config::DeskConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::desk::Desk;

#[derive(Parser)]
#[command(name = "eventdesk")]
#[command(about = "Manage events, their schedules and participant sign-ups")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: Option<String>,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// End the current session
    Logout,
    /// Create an account and log in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Show the logged-in user
    Whoami,
    /// Overview figures for the logged-in user
    #[command(alias = "stats")]
    Dashboard,
    /// Manage user accounts (admins only)
    Users {
        #[command(subcommand)]
        command: commands::users::UsersCommand,
    },
    /// Create, edit and share events
    Events {
        #[command(subcommand)]
        command: commands::events::EventsCommand,
    },
    /// Manage the participants of an event
    Participants {
        #[command(subcommand)]
        command: commands::participants::ParticipantsCommand,
    },
    /// Public registration through a shared link (no login needed)
    Public {
        #[command(subcommand)]
        command: commands::public::PublicCommand,
    },
    /// Read your notifications
    Notifications {
        #[command(subcommand)]
        command: commands::notifications::NotificationsCommand,
    },
    /// Show the configuration in use
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DeskConfig::load()?;
    init_logging(&config);

    let mut desk = Desk::open(config)?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&mut desk, email, password),
        Commands::Logout => commands::auth::logout(&mut desk),
        Commands::Register { name, email, password } => {
            commands::auth::register(&mut desk, name, email, password)
        }
        Commands::Whoami => commands::auth::whoami(&desk),
        Commands::Dashboard => commands::dashboard::run(&desk),
        Commands::Users { command } => commands::users::run(&mut desk, command),
        Commands::Events { command } => commands::events::run(&mut desk, command),
        Commands::Participants { command } => commands::participants::run(&mut desk, command),
        Commands::Public { command } => commands::public::run(&mut desk, command),
        Commands::Notifications { command } => commands::notifications::run(&mut desk, command),
        Commands::Config => commands::config::run(&desk),
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_logging(config: &DeskConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
