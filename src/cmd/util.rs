use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde_json::Value as Json;
use stcodec::codec::Result;

/// Read a whole input: `-` is stdin, anything else a file path.
pub(crate) fn read_source(source: &str) -> Result<String> {
	if source == "-" {
		let mut text = String::new();
		std::io::stdin().read_to_string(&mut text)?;
		return Ok(text);
	}
	Ok(std::fs::read_to_string(source)?)
}

/// Read a JSON document from a file or stdin.
pub(crate) fn read_json(source: &str) -> Result<Json> {
	Ok(serde_json::from_str(&read_source(source)?)?)
}

/// Read hex from stdin, a file, or the argument itself when no such file exists.
pub(crate) fn read_hex(source: &str) -> Result<String> {
	let text = if source == "-" || Path::new(source).is_file() { read_source(source)? } else { source.to_owned() };
	Ok(text.split_whitespace().collect())
}

/// Pretty-print a payload as JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}
