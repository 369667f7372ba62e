use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::codec::header::FieldHeader;
use crate::codec::types::TypeKind;
use crate::codec::{CodecError, Result};


const BUILTIN_SOURCE: &str = include_str!("definitions.json");

static BUILTIN: OnceLock<Definitions> = OnceLock::new();

/// Canonical sort key of a field: `(type_code, nth)`.
pub type SortKey = (u16, u16);

/// Immutable description of one protocol field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
	/// Protocol field name, exact casing.
	pub name: Box<str>,
	/// Declared type name from the definitions source.
	pub type_name: Box<str>,
	/// Codec selected for the type.
	pub kind: TypeKind,
	/// Serialized type code.
	pub type_code: u16,
	/// Field number within the type.
	pub nth: u16,
	/// Value is framed with a VL prefix.
	pub is_vl_encoded: bool,
	/// Field appears in the binary encoding at all.
	pub is_serialized: bool,
	/// Field is covered by signatures.
	pub is_signing_field: bool,
}

impl FieldInfo {
	/// Canonical ordering key.
	pub fn sort_key(&self) -> SortKey {
		(self.type_code, self.nth)
	}

	/// Packed wire header. Only meaningful for serialized fields, whose codes the registry
	/// has checked to fit in one byte each.
	pub fn header(&self) -> FieldHeader {
		FieldHeader {
			type_code: self.type_code as u8,
			nth: self.nth as u8,
		}
	}
}

/// Bidirectional name/code table for enum-valued fields.
#[derive(Debug, Default)]
pub struct EnumTable {
	by_name: HashMap<Box<str>, i32>,
	by_code: HashMap<i32, Box<str>>,
}

impl EnumTable {
	fn build(kind: &'static str, raw: BTreeMap<String, i32>) -> Result<Self> {
		let mut table = Self::default();
		for (name, code) in raw {
			if let Some(first) = table.by_code.insert(code, name.clone().into_boxed_str()) {
				return Err(CodecError::InvalidDefinitions {
					reason: format!("{kind} code {code} shared by {first} and {name}"),
				});
			}
			table.by_name.insert(name.into_boxed_str(), code);
		}
		Ok(table)
	}

	/// Look up the numeric code for a symbolic name.
	pub fn code(&self, name: &str) -> Option<i32> {
		self.by_name.get(name).copied()
	}

	/// Look up the symbolic name for a numeric code.
	pub fn name(&self, code: i32) -> Option<&str> {
		self.by_code.get(&code).map(AsRef::as_ref)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	/// Whether the table is empty.
	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}
}

/// Field definitions registry.
///
/// Built once from a definitions source and never mutated afterwards, so shared references
/// can be read from any thread without synchronization.
#[derive(Debug)]
pub struct Definitions {
	fields: Vec<FieldInfo>,
	by_name: HashMap<Box<str>, usize>,
	by_code: HashMap<SortKey, usize>,
	/// `TransactionType` names.
	pub transaction_types: EnumTable,
	/// `LedgerEntryType` names.
	pub ledger_entry_types: EnumTable,
	/// `TransactionResult` names.
	pub transaction_results: EnumTable,
}

#[derive(Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawDefinitions {
	types: BTreeMap<String, i32>,
	fields: Vec<(String, RawField)>,
	#[serde(default)]
	transaction_types: BTreeMap<String, i32>,
	#[serde(default)]
	ledger_entry_types: BTreeMap<String, i32>,
	#[serde(default)]
	transaction_results: BTreeMap<String, i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
	nth: i32,
	#[serde(rename = "isVLEncoded")]
	is_vl_encoded: bool,
	is_serialized: bool,
	is_signing_field: bool,
	#[serde(rename = "type")]
	type_name: String,
}

impl Definitions {
	/// Registry built from the embedded definitions source.
	///
	/// # Panics
	///
	/// Panics on first use if the embedded source is malformed. An incomplete registry
	/// would silently miscategorize fields, so this is treated as a fatal startup error.
	pub fn builtin() -> &'static Self {
		BUILTIN.get_or_init(|| match Self::from_json(BUILTIN_SOURCE) {
			Ok(defs) => defs,
			Err(err) => panic!("embedded field definitions are malformed: {err}"),
		})
	}

	/// Parse and validate a definitions source in the standard JSON layout.
	pub fn from_json(source: &str) -> Result<Self> {
		let raw: RawDefinitions = serde_json::from_str(source).map_err(|err| CodecError::InvalidDefinitions { reason: err.to_string() })?;

		let mut fields = Vec::with_capacity(raw.fields.len());
		let mut by_name = HashMap::with_capacity(raw.fields.len());
		let mut by_code = HashMap::with_capacity(raw.fields.len());

		for (name, item) in raw.fields {
			let Some(info) = build_field(&raw.types, name, item)? else {
				continue;
			};

			let idx = fields.len();
			if by_name.insert(info.name.clone(), idx).is_some() {
				return Err(CodecError::InvalidDefinitions {
					reason: format!("duplicate field name {}", info.name),
				});
			}
			if info.is_serialized
				&& let Some(first) = by_code.insert(info.sort_key(), idx)
			{
				let first: &FieldInfo = &fields[first];
				return Err(CodecError::InvalidDefinitions {
					reason: format!("fields {} and {} share code {:?}", first.name, info.name, info.sort_key()),
				});
			}
			fields.push(info);
		}

		let defs = Self {
			fields,
			by_name,
			by_code,
			transaction_types: EnumTable::build("TRANSACTION_TYPES", raw.transaction_types)?,
			ledger_entry_types: EnumTable::build("LEDGER_ENTRY_TYPES", raw.ledger_entry_types)?,
			transaction_results: EnumTable::build("TRANSACTION_RESULTS", raw.transaction_results)?,
		};
		defs.check_markers()?;
		Ok(defs)
	}

	/// Look up a field by protocol name.
	pub fn lookup_by_name(&self, name: &str) -> Result<&FieldInfo> {
		self.by_name
			.get(name)
			.map(|idx| &self.fields[*idx])
			.ok_or_else(|| CodecError::UnknownField { name: name.to_owned() })
	}

	/// Look up a serialized field by its `(type_code, nth)` pair.
	pub fn lookup_by_code(&self, type_code: u16, nth: u16) -> Result<&FieldInfo> {
		self.by_code
			.get(&(type_code, nth))
			.map(|idx| &self.fields[*idx])
			.ok_or(CodecError::UnknownFieldCode { type_code, nth })
	}

	/// Look up the field a decoded wire header refers to.
	pub fn lookup_by_header(&self, header: FieldHeader) -> Result<&FieldInfo> {
		self.lookup_by_code(u16::from(header.type_code), u16::from(header.nth))
	}

	/// Canonical ordering key of `field`.
	pub fn sort_key(field: &FieldInfo) -> SortKey {
		field.sort_key()
	}

	/// All fields in source order.
	pub fn fields(&self) -> impl Iterator<Item = &FieldInfo> {
		self.fields.iter()
	}

	/// Symbolic-name table for an enum-valued field, if the field has one.
	pub fn enum_table(&self, field: &FieldInfo) -> Option<&EnumTable> {
		match (field.kind, field.name.as_ref()) {
			(TypeKind::UInt16, "TransactionType") => Some(&self.transaction_types),
			(TypeKind::UInt16, "LedgerEntryType") => Some(&self.ledger_entry_types),
			(TypeKind::UInt8, "TransactionResult") => Some(&self.transaction_results),
			_ => None,
		}
	}

	fn check_markers(&self) -> Result<()> {
		for (marker, kind) in [(FieldHeader::OBJECT_END, TypeKind::Object), (FieldHeader::ARRAY_END, TypeKind::Array)] {
			let found = self.lookup_by_header(marker).map_err(|_| CodecError::InvalidDefinitions {
				reason: format!("missing end marker field {marker:?}"),
			})?;
			if found.kind != kind {
				return Err(CodecError::InvalidDefinitions {
					reason: format!("end marker {} has type {}", found.name, found.type_name),
				});
			}
		}
		Ok(())
	}
}

fn build_field(types: &BTreeMap<String, i32>, name: String, raw: RawField) -> Result<Option<FieldInfo>> {
	let invalid = |reason: String| CodecError::InvalidDefinitions { reason };

	let kind = TypeKind::from_type_name(&raw.type_name);
	if !raw.is_serialized {
		// Non-serialized fields only need a name for the JSON side to skip them.
		let Some(kind) = kind else {
			return Ok(None);
		};
		let type_code = types.get(&raw.type_name).copied().unwrap_or_default().clamp(0, i32::from(u16::MAX)) as u16;
		return Ok(Some(FieldInfo {
			name: name.into_boxed_str(),
			type_name: raw.type_name.into_boxed_str(),
			kind,
			type_code,
			nth: raw.nth.clamp(0, i32::from(u16::MAX)) as u16,
			is_vl_encoded: raw.is_vl_encoded,
			is_serialized: false,
			is_signing_field: raw.is_signing_field,
		}));
	}

	let kind = kind.ok_or_else(|| invalid(format!("field {name} has unsupported type {}", raw.type_name)))?;
	let type_code = *types
		.get(&raw.type_name)
		.ok_or_else(|| invalid(format!("field {name} references unknown type {}", raw.type_name)))?;
	if !(1..=255).contains(&type_code) {
		return Err(invalid(format!("field {name} type code {type_code} does not fit one byte")));
	}
	if !(1..=255).contains(&raw.nth) {
		return Err(invalid(format!("field {name} nth {} does not fit one byte", raw.nth)));
	}
	if raw.is_vl_encoded && !kind.allows_vl() {
		return Err(invalid(format!("field {name} of type {} cannot be VL encoded", raw.type_name)));
	}
	if !raw.is_vl_encoded && kind.requires_vl() {
		return Err(invalid(format!("field {name} of type {} must be VL encoded", raw.type_name)));
	}

	Ok(Some(FieldInfo {
		name: name.into_boxed_str(),
		type_name: raw.type_name.into_boxed_str(),
		kind,
		type_code: type_code as u16,
		nth: raw.nth as u16,
		is_vl_encoded: raw.is_vl_encoded,
		is_serialized: true,
		is_signing_field: raw.is_signing_field,
	}))
}
