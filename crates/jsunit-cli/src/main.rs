use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::EnvFilter;

use jsunit::{Harness, HarnessConfig, OutputFormat};

mod demo;

#[derive(Parser, Debug)]
#[command(name = "jsunit")]
#[command(version, about = "Run the bundled JSUnit demo suite")]
struct Args {
    /// Config file path (defaults to ./jsunit.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format: text, json or html
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Show passing assertions and debug logs
    #[arg(short, long)]
    verbose: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let directive = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .init();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

/// Run the suite; `Ok(false)` means some test failed.
fn run(args: Args) -> Result<bool> {
    let mut config = HarnessConfig::load_or_default(args.config.as_deref());
    if let Some(format) = args.format {
        config.format = format;
    }
    if args.verbose {
        config.verbose = true;
    }
    if args.no_color {
        config.color = false;
    }
    config.validate()?;

    if config.format == OutputFormat::Text {
        let banner = "JSUnit Runner";
        if config.color {
            println!("{}", banner.bold().cyan());
        } else {
            println!("{}", banner);
        }
    }

    let mut jsunit = Harness::stdout(&config);
    demo::register(&mut jsunit)?;
    let summary = jsunit.finish()?;

    Ok(summary.all_passed())
}
