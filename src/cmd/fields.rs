use serde::Serialize;
use stcodec::codec::{Definitions, FieldInfo, Result};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	/// Show only this field.
	#[arg(long)]
	pub name: Option<String>,
	/// Include fields that never reach the wire.
	#[arg(long)]
	pub all: bool,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct FieldJson<'a> {
	name: &'a str,
	#[serde(rename = "type")]
	type_name: &'a str,
	type_code: u16,
	nth: u16,
	vl_encoded: bool,
	serialized: bool,
	signing: bool,
}

impl<'a> From<&'a FieldInfo> for FieldJson<'a> {
	fn from(field: &'a FieldInfo) -> Self {
		Self {
			name: &field.name,
			type_name: &field.type_name,
			type_code: field.type_code,
			nth: field.nth,
			vl_encoded: field.is_vl_encoded,
			serialized: field.is_serialized,
			signing: field.is_signing_field,
		}
	}
}

/// Print registry fields in canonical order.
pub fn run(args: Args) -> Result<()> {
	let defs = Definitions::builtin();

	let mut rows: Vec<&FieldInfo> = match &args.name {
		Some(name) => vec![defs.lookup_by_name(name)?],
		None => defs.fields().filter(|field| args.all || field.is_serialized).collect(),
	};
	rows.sort_by_key(|field| field.sort_key());

	if args.json {
		let payload: Vec<FieldJson<'_>> = rows.into_iter().map(FieldJson::from).collect();
		return emit_json(&payload);
	}

	println!("fields: {}", rows.len());
	println!("type\tnth\tname\ttype_name\tvl\tsigning");
	for field in rows {
		println!(
			"{}\t{}\t{}\t{}\t{}\t{}",
			field.type_code, field.nth, field.name, field.type_name, field.is_vl_encoded, field.is_signing_field
		);
	}
	Ok(())
}
