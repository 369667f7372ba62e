use serde_json::Value as Json;

use crate::codec::definitions::{Definitions, FieldInfo};
use crate::codec::types::TypeKind;
use crate::codec::{CodecError, Result};

/// Largest value the field's integer width can hold.
pub(crate) fn max_for(kind: TypeKind) -> u64 {
	match kind {
		TypeKind::UInt8 => u64::from(u8::MAX),
		TypeKind::UInt16 => u64::from(u16::MAX),
		TypeKind::UInt32 => u64::from(u32::MAX),
		_ => u64::MAX,
	}
}

/// Parse an integer field from JSON.
///
/// UInt64 takes up to 16 hex digits (or a JSON integer). Narrower widths take a JSON
/// integer, a decimal string, or a symbolic name when the field has an enum table.
pub(crate) fn from_json(defs: &Definitions, field: &FieldInfo, json: &Json) -> Result<u64> {
	let mismatch = || CodecError::TypeMismatch {
		field: field.name.to_string(),
		expected: json_shape(field.kind),
	};

	let value = match json {
		Json::Number(number) => number.as_u64().ok_or_else(mismatch)?,
		Json::String(text) if field.kind == TypeKind::UInt64 => {
			if text.is_empty() || text.len() > 16 || !text.bytes().all(|byte| byte.is_ascii_hexdigit()) {
				return Err(mismatch());
			}
			u64::from_str_radix(text, 16).map_err(|_| mismatch())?
		}
		Json::String(text) if !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit()) => text.parse().map_err(|_| mismatch())?,
		Json::String(text) => {
			let table = defs.enum_table(field).ok_or_else(mismatch)?;
			let code = table.code(text).ok_or_else(|| CodecError::UnknownEnumName {
				field: field.name.to_string(),
				name: text.clone(),
			})?;
			u64::try_from(code).map_err(|_| mismatch())?
		}
		_ => return Err(mismatch()),
	};

	if value > max_for(field.kind) {
		return Err(mismatch());
	}
	Ok(value)
}

/// Render an integer field as JSON.
pub(crate) fn to_json(defs: &Definitions, field: &FieldInfo, value: u64) -> Json {
	if field.kind == TypeKind::UInt64 {
		return Json::String(format!("{value:016X}"));
	}

	let name = defs
		.enum_table(field)
		.and_then(|table| i32::try_from(value).ok().and_then(|code| table.name(code)));
	match name {
		Some(name) => Json::String(name.to_owned()),
		None => Json::from(value),
	}
}

fn json_shape(kind: TypeKind) -> &'static str {
	match kind {
		TypeKind::UInt8 => "integer in 0..=255",
		TypeKind::UInt16 => "integer in 0..=65535 or a type name",
		TypeKind::UInt32 => "integer in 0..=4294967295",
		_ => "hex string of at most 16 digits",
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::{from_json, to_json};
	use crate::codec::{CodecError, Definitions};

	#[test]
	fn uint64_is_sixteen_hex_digits() {
		let defs = Definitions::builtin();
		let field = defs.lookup_by_name("OwnerNode").expect("OwnerNode");
		assert_eq!(from_json(defs, field, &json!("00000000000000FF")).expect("hex parses"), 255);
		assert_eq!(from_json(defs, field, &json!(16)).expect("integer accepted"), 16);
		assert_eq!(to_json(defs, field, 255), json!("00000000000000FF"));
	}

	#[test]
	fn transaction_type_maps_names_both_ways() {
		let defs = Definitions::builtin();
		let field = defs.lookup_by_name("TransactionType").expect("TransactionType");
		assert_eq!(from_json(defs, field, &json!("TrustSet")).expect("name parses"), 20);
		assert_eq!(from_json(defs, field, &json!(20)).expect("code parses"), 20);
		assert_eq!(to_json(defs, field, 20), json!("TrustSet"));
		assert_eq!(to_json(defs, field, 9999), json!(9999));

		let err = from_json(defs, field, &json!("NoSuchTx")).expect_err("unknown name");
		assert!(matches!(err, CodecError::UnknownEnumName { .. }));
	}

	#[test]
	fn narrow_widths_reject_overflow_and_negatives() {
		let defs = Definitions::builtin();
		let flags = defs.lookup_by_name("Flags").expect("Flags");
		assert_eq!(from_json(defs, flags, &json!("2147483648")).expect("numeric string"), 2_147_483_648);
		assert!(matches!(from_json(defs, flags, &json!(4_294_967_296_u64)), Err(CodecError::TypeMismatch { .. })));
		assert!(matches!(from_json(defs, flags, &json!(-1)), Err(CodecError::TypeMismatch { .. })));
		assert!(matches!(from_json(defs, flags, &json!(true)), Err(CodecError::TypeMismatch { .. })));
	}
}
