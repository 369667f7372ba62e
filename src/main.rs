#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "stcodec", about = "Canonical ledger binary codec tools")]
struct Cli {
	/// Log filter used when RUST_LOG is unset.
	#[arg(long, global = true, default_value = "warn")]
	log_level: String,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Encode a JSON transaction or ledger object.
	Encode(cmd::encode::Args),
	/// Decode canonical binary into JSON.
	Decode(cmd::decode::Args),
	/// Compute a transaction identifier.
	Hash(cmd::hash::Args),
	/// List registry fields.
	Fields(cmd::fields::Args),
}

fn main() {
	let cli = Cli::parse();

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> stcodec::codec::Result<()> {
	match command {
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Hash(args) => cmd::hash::run(args),
		Commands::Fields(args) => cmd::fields::run(args),
	}
}
