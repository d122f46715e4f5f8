//! MinimaxChess - UCI Chess Engine
//!
//! Usage:
//!     minimax_chess [--depth N] [--threads N]
//!
//! The engine reads UCI commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr, filtered by `RUST_LOG`.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use minimax_chess::config::{EngineConfig, DEFAULT_DEPTH};
use minimax_chess::uci::UCIProtocol;

#[derive(Parser, Debug)]
#[command(name = "minimax_chess", version, about = "Material minimax chess engine speaking UCI")]
struct Args {
    /// Search depth in plies (1-6)
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Worker threads, defaults to the number of CPUs
    #[arg(short, long)]
    threads: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = EngineConfig::new(args.depth, args.threads.unwrap_or_else(num_cpus::get));
    info!("starting with depth {} and {} threads", config.depth, config.threads);

    let mut uci = UCIProtocol::new(io::stdout().lock(), config);
    match uci.run(io::stdin().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("protocol loop failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
