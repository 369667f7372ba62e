//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

/// Golden vector: a JSON document and the bytes it must produce.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenFixture {
	/// Transaction or ledger object JSON.
	pub json: Value,
	/// Full canonical encoding, uppercase hex.
	pub encoded: String,
	/// Single-signer signing payload, when the document is a transaction.
	#[serde(default)]
	pub signing: Option<String>,
	/// Multi-signing payload for `multi_signer`.
	#[serde(default)]
	pub multisigning: Option<String>,
	/// Signer address used for `multisigning`.
	#[serde(default)]
	pub multi_signer: Option<String>,
	/// Transaction identifier.
	#[serde(default)]
	pub hash: Option<String>,
}

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Load and parse a golden fixture by file name.
///
/// Panics with the fixture name when the file is missing or malformed.
pub fn load_fixture(name: &str) -> GoldenFixture {
	let path = fixture_path(name);
	let text = std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
	serde_json::from_str(&text).unwrap_or_else(|err| panic!("parse {}: {err}", path.display()))
}

/// Every golden fixture file name, sorted.
pub fn fixture_names() -> Vec<String> {
	let mut names: Vec<String> = std::fs::read_dir(workspace_root().join("fixtures"))
		.map(|entries| {
			entries
				.filter_map(|entry| entry.ok())
				.filter_map(|entry| entry.file_name().into_string().ok())
				.filter(|name| name.ends_with(".json"))
				.collect()
		})
		.unwrap_or_default();
	names.sort();
	names
}
