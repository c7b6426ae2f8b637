mod logger;
mod scheduler;

use clap::Parser;
use crossterm::tty::IsTty;
use log::info;
use scheduler::{DisplayTerminal, ProcessRunner};
use std::io;

/// Simulates FCFS, SJF, priority and round robin CPU scheduling over a
/// process set entered at the prompt.
#[derive(Parser, Debug)]
#[command(name = "cpu-scheduling-simulator", version)]
struct Args {
    /// Always print reports as plain text instead of the full-screen view
    #[arg(long, default_value_t = false)]
    plain: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose)?;

    let stdout = io::stdout();
    let terminal = if args.plain || !stdout.is_tty() {
        None
    } else {
        Some(DisplayTerminal::new()?)
    };

    let mut runner = ProcessRunner::new(io::stdin().lock(), stdout, terminal);
    runner.load_processes()?;
    info!("loaded {} processes", runner.processes().len());

    while runner.run()? {}
    Ok(())
}
