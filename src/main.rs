//! CLI entry point for `nanocas`.
//!
//! Parses arguments with `clap` and dispatches into [`nanocas::cli`].

use clap::Parser;
use nanocas::cli::{self, Args};

fn main() {
    let args = Args::parse();
    std::process::exit(cli::run(&args));
}
