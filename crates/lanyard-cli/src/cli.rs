use std::path::PathBuf;

use clap::Parser;

/// lanyard: follow a Discord user's live presence from the terminal.
#[derive(Parser, Debug)]
#[command(name = "lanyard", version, about)]
pub struct Args {
    /// Subject (user id) to track. Overrides `[subject] id` in the config.
    #[arg(short, long)]
    pub subject: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. `debug` or `lanyard_client=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print each snapshot as a JSON line instead of a summary.
    #[arg(long)]
    pub json: bool,

    /// Exit after the first snapshot.
    #[arg(long)]
    pub once: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
