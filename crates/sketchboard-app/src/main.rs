//! Sketchboard command-line entry point.

use clap::Parser;
use sketchboard_app::{AppError, board_json, load_config, load_script, run_script};
use sketchboard_core::{Canvas, EngineConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input script (JSON array of steps)
    #[arg(short, long)]
    script: PathBuf,
    /// Engine configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Pretty-print the resulting board
    #[arg(long)]
    pretty: bool,
}

fn run(args: &Args) -> Result<String, AppError> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    let mut canvas = Canvas::with_config(config)?;
    let steps = load_script(&args.script)?;
    log::info!("Replaying {} steps from {}", steps.len(), args.script.display());
    let applied = run_script(&mut canvas, &steps);
    log::info!("Applied {applied} steps, board has {} nodes", canvas.store.len());
    board_json(&canvas, args.pretty)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("sketchboard: {err}");
            ExitCode::FAILURE
        }
    }
}
