use serde::Serialize;
use stcodec::codec::{Result, transaction_id};

use crate::cmd::util::{emit_json, read_json};

#[derive(clap::Args)]
pub struct Args {
	/// JSON file, or `-` for stdin.
	pub input: String,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct HashJson {
	hash: String,
}

/// Print the identifier of a signed transaction.
pub fn run(args: Args) -> Result<()> {
	let hash = transaction_id(&read_json(&args.input)?)?.to_string();
	if args.json {
		return emit_json(&HashJson { hash });
	}
	println!("{hash}");
	Ok(())
}
