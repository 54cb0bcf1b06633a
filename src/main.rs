use anyhow::Result;
use clap::Parser;

use salmon_rules::console::ConsoleHandler;

/// Play chess against yourself or the built-in negamax opponent from the terminal.
#[derive(Parser)]
#[command(name = "salmon-rules")]
#[command(about = "Chess rules engine with undo/redo and a negamax opponent")]
#[command(version = "0.1.0")]
struct Args {
    /// Search depth used by the `ai` command when none is given
    #[arg(short, long, default_value_t = 3)]
    depth: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut console = ConsoleHandler::new(args.depth);
    console.run()
}
