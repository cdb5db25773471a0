//! lanyard: terminal viewer for a subject's live presence.
//!
//! Connects to the presence gateway, prints a placeholder until the first
//! snapshot arrives, then a summary (or a JSON line with `--json`) on every
//! update. Ctrl-C disposes the client and exits cleanly.

mod cli;
mod render;
mod settings;

use std::process::ExitCode;
use std::sync::Arc;

use lanyard_client::view::now_millis;
use lanyard_client::{PresenceClient, PresenceSnapshot};
use lanyard_config::LogLevel;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "lanyard failed");
            eprintln!("lanyard: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `--log-level` wins, then `RUST_LOG`, then the config file's level.
fn init_logging(flag: Option<&str>, config_level: LogLevel) {
    let filter = match flag {
        Some(directive) => EnvFilter::try_new(directive)
            .unwrap_or_else(|_| EnvFilter::new(LogLevel::default().directive())),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config_level.directive())),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> lanyard_common::Result<ExitCode> {
    let loaded = lanyard_config::load_config(args.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|config| config.logging.level)
        .unwrap_or_default();
    init_logging(args.log_level.as_deref(), level);

    tracing::info!("lanyard v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!(path = %path.display(), "Using config override");
    }
    let config = loaded?;

    let subject = settings::resolve_subject(args.subject.as_deref(), &config);
    let client = PresenceClient::connect(subject, settings::client_config(&config))?;
    tracing::info!(subject = %client.subject_id(), "Tracking presence");

    let code = watch(&client, &args).await;

    client.dispose();
    client.closed().await;
    tracing::info!("Shutdown complete");
    Ok(code)
}

/// Print updates until Ctrl-C, `--once` is satisfied, or the client gives up.
async fn watch(client: &PresenceClient, args: &Args) -> ExitCode {
    let mut rx = client.subscribe();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut last: Option<Arc<PresenceSnapshot>> = None;
    let mut placeholder_shown = false;

    loop {
        let state = rx.borrow_and_update().clone();

        match &state.snapshot {
            Some(snapshot) if !last.as_ref().is_some_and(|prev| Arc::ptr_eq(prev, snapshot)) => {
                print_snapshot(snapshot, args.json);
                last = Some(Arc::clone(snapshot));
                if args.once {
                    return ExitCode::SUCCESS;
                }
            }
            None if !placeholder_shown => {
                if !args.json {
                    println!("{}", render::PLACEHOLDER);
                }
                placeholder_shown = true;
            }
            _ => {}
        }

        if state.exhausted {
            eprintln!("lanyard: gave up reconnecting to {}", client.subject_id());
            return ExitCode::FAILURE;
        }

        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted");
                return ExitCode::SUCCESS;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    return ExitCode::SUCCESS;
                }
            }
        }
    }
}

fn print_snapshot(snapshot: &PresenceSnapshot, json: bool) {
    if json {
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize snapshot"),
        }
    } else {
        println!("{}\n", render::render(snapshot, now_millis()));
    }
}
