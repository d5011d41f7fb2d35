//! calview - displays iCalendar/VCAL meeting invitations as plain text.
//!
//! Suitable as a mailcap viewer for `text/calendar` attachments:
//!
//! ```text
//! text/calendar; calview '%s'; copiousoutput
//! ```

mod render;

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use calview_ical::TzResolver;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::render::Format;

#[derive(Parser, Debug)]
#[command(name = "calview", about = "Display a calendar invitation as readable text")]
struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value = "human")]
    format: Format,

    /// Also print the event UID.
    #[arg(short, long)]
    verbose: bool,

    /// Calendar file to read; standard input when omitted.
    file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let blob = read_input(cli.file.as_deref())?;

    let tz = TzResolver::new();
    let event = match calview_ical::parse(&blob, &tz) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(error = %e, "Parse rejected the input");
            eprintln!("Error: Invalid or empty calendar file");
            std::process::exit(1);
        }
    };

    println!("{}", render::render(&event, cli.format, cli.verbose)?);
    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut blob = String::new();
            std::io::stdin()
                .read_to_string(&mut blob)
                .context("failed to read standard input")?;
            Ok(blob)
        }
    }
}
