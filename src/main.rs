mod cli;
mod global;
mod hex2file;

use clap::Parser;
use log::debug;
use std::process;

fn main() {
	// Initialize the logger
	pretty_env_logger::init();

	let cli = crate::cli::Cli::parse();
	debug!("Parsed arguments: {:?}", cli);

	if let Err(e) = cli.run() {
		eprintln!("ERROR: {}", e);
		process::exit(1);
	}
}
