use serde::Serialize;
use stcodec::codec::{Codec, CodecOptions, EncodeOptions, Result, SigningMode, encode_hex};

use crate::cmd::util::{emit_json, read_json};

#[derive(clap::Args)]
pub struct Args {
	/// JSON file, or `-` for stdin.
	pub input: String,
	/// Emit the single-signer signing payload.
	#[arg(long, conflicts_with = "multi_signer")]
	pub signing: bool,
	/// Emit the multi-signing payload for this signer address.
	#[arg(long, value_name = "ADDRESS")]
	pub multi_signer: Option<String>,
	/// Drop fields the registry does not know instead of failing.
	#[arg(long)]
	pub skip_unknown: bool,
	/// Maximum object/array nesting depth.
	#[arg(long, default_value_t = 16)]
	pub max_depth: u32,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct EncodeJson {
	mode: &'static str,
	len: usize,
	hex: String,
}

/// Encode a JSON document and print the bytes as hex.
pub fn run(args: Args) -> Result<()> {
	let Args {
		input,
		signing,
		multi_signer,
		skip_unknown,
		max_depth,
		json,
	} = args;

	let tx = read_json(&input)?;
	let codec = Codec::builtin().with_options(CodecOptions {
		encode: EncodeOptions {
			max_depth,
			skip_unknown_fields: skip_unknown,
		},
		..CodecOptions::default()
	});

	let (mode, bytes) = match (signing, multi_signer) {
		(_, Some(signer)) => ("multisigning", codec.encode_for_multisigning(&tx, &signer)?),
		(true, None) => ("signing", codec.encode_for_signing(&tx, SigningMode::Single)?),
		(false, None) => ("full", codec.encode(&tx)?),
	};

	if json {
		return emit_json(&EncodeJson {
			mode,
			len: bytes.len(),
			hex: encode_hex(&bytes),
		});
	}

	println!("{}", encode_hex(&bytes));
	Ok(())
}
