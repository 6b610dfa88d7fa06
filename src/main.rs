use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gestation_lib::app::{load_config, App, OutputFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file; defaults are used when it does not exist
    #[arg(short, long, default_value = "gestation.toml")]
    config: PathBuf,

    /// Weeks to simulate (defaults to the configured total)
    #[arg(short, long)]
    weeks: Option<u32>,

    /// Override the RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ticks stepped per batch
    #[arg(long, default_value_t = 1)]
    speed: u32,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut config = load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.params.seed = seed;
    }
    if args.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }
    let weeks = args.weeks.unwrap_or(config.params.total_weeks);

    let mut app = App::new(config)?;
    app.sim.set_speed(args.speed);
    app.run_weeks(weeks, |report| {
        println!("{}", report.render(args.format)?);
        Ok(())
    })?;

    tracing::info!(
        ticks = app.sim.tick(),
        organs = app.sim.metrics().organs_developed,
        elapsed_ms = app.sim.counters().elapsed().as_millis() as u64,
        "Run finished"
    );
    Ok(())
}
