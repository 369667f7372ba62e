use stcodec::codec::{Codec, CodecOptions, DecodeOptions, Result};

use crate::cmd::util::{emit_json, read_hex};

#[derive(clap::Args)]
pub struct Args {
	/// Hex text, a file holding hex, or `-` for stdin.
	pub input: String,
	/// Reject fields that are not in canonical order.
	#[arg(long)]
	pub strict: bool,
	/// Maximum object/array nesting depth.
	#[arg(long, default_value_t = 16)]
	pub max_depth: u32,
}

/// Decode hex input and print the JSON tree.
pub fn run(args: Args) -> Result<()> {
	let Args { input, strict, max_depth } = args;

	let base = if strict { DecodeOptions::strict() } else { DecodeOptions::default() };
	let codec = Codec::builtin().with_options(CodecOptions {
		decode: DecodeOptions { max_depth, ..base },
		..CodecOptions::default()
	});

	let tree = codec.decode_hex(&read_hex(&input)?)?;
	emit_json(&tree)
}
