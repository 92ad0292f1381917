mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rsvp_core::record::{GolfInput, RsvpInput};
use rsvp_core::settings::RsvpConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "rsvp")]
#[command(about = "Submit, list and export RSVPs and golf signups for an event")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "RSVP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send an RSVP
    Submit(SubmitArgs),
    /// Sign up for the golf outing
    Golf(GolfArgs),
    /// Show submissions and a summary
    List {
        /// Show golf signups instead of RSVPs
        #[arg(long)]
        golf: bool,
    },
    /// Replace the cached list with the remote copy
    Refresh {
        #[arg(long)]
        golf: bool,
    },
    /// Export submissions as CSV
    Export {
        #[arg(long)]
        golf: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the event as an .ics file
    Ics {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print an "add to Google Calendar" link for the event
    CalendarLink,
    /// Show time left until the event
    Countdown,
    /// Show configuration paths, optionally setting the endpoint
    Config {
        /// Sheet web-app URL to store submissions at
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    /// yes, no or maybe
    #[arg(long)]
    attending: String,

    #[arg(long)]
    organization: Option<String>,

    /// Party size including yourself
    #[arg(long)]
    guests: Option<String>,

    #[arg(long)]
    message: Option<String>,

    #[arg(long, hide = true)]
    company: Option<String>,
}

#[derive(Args)]
struct GolfArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    handicap: Option<String>,

    /// Players in your group including yourself
    #[arg(long)]
    party_size: Option<String>,

    /// Who you'd like to be paired with
    #[arg(long)]
    pairing: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    #[arg(long, hide = true)]
    company: Option<String>,
}

impl From<SubmitArgs> for RsvpInput {
    fn from(args: SubmitArgs) -> Self {
        RsvpInput {
            name: args.name,
            email: args.email,
            organization: args.organization,
            attending: args.attending,
            guests: args.guests,
            message: args.message,
            company: args.company,
        }
    }
}

impl From<GolfArgs> for GolfInput {
    fn from(args: GolfArgs) -> Self {
        GolfInput {
            name: args.name,
            email: args.email,
            handicap: args.handicap,
            party_size: args.party_size,
            pairing_pref: args.pairing,
            notes: args.notes,
            company: args.company,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => RsvpConfig::config_path()?,
    };

    let load = || RsvpConfig::load(Some(&config_path));

    match cli.command {
        Commands::Submit(args) => commands::submit::rsvp(&load()?, args.into()).await,
        Commands::Golf(args) => commands::submit::golf(&load()?, args.into()).await,
        Commands::List { golf: false } => commands::list::rsvps(&load()?).await,
        Commands::List { golf: true } => commands::list::golf(&load()?).await,
        Commands::Refresh { golf } => commands::refresh::run(&load()?, golf).await,
        Commands::Export { golf, output } => commands::export::run(&load()?, golf, output).await,
        Commands::Ics { output } => commands::event::ics(&load()?, output),
        Commands::CalendarLink => commands::event::calendar_link(&load()?),
        Commands::Countdown => commands::event::countdown(&load()?),
        Commands::Config { endpoint } => commands::config::run(&config_path, endpoint),
    }
}

/// Log to stderr so exports on stdout stay clean.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rsvp=warn,rsvp_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
