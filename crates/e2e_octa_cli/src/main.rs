#![allow(missing_docs)]

use clap::{Args, Parser, Subcommand};

mod cmd;
mod logging;

#[derive(Parser)]
#[command(name = "e2e-octa", version, about = "OCTA image extraction from E2E export containers")]
struct Cli {
	#[command(flatten)]
	log: LogArgs,
	#[command(subcommand)]
	command: Commands,
}

/// Log filter flags shared by every subcommand.
#[derive(Args)]
pub struct LogArgs {
	/// Increase log verbosity (-v debug, -vv trace).
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	pub verbose: u8,
	/// Only log errors.
	#[arg(short, long, global = true)]
	pub quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Print header fields and directory statistics.
	Info(cmd::info::Args),
	/// List valid directory entries in chain order.
	Entries(cmd::entries::Args),
	/// Extract images from one container into a directory.
	Extract(cmd::extract::Args),
	/// Extract every container found in a folder.
	Batch(cmd::batch::Args),
}

fn main() {
	let cli = Cli::parse();
	logging::init(&cli.log);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> e2e_octa::e2e::Result<()> {
	match command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Entries(args) => cmd::entries::run(args),
		Commands::Extract(args) => cmd::extract::run(args),
		Commands::Batch(args) => cmd::batch::run(args),
	}
}
