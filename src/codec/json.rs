//! Conversion between JSON trees and typed objects.

use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::codec::definitions::FieldInfo;
use crate::codec::types::{Context, TypeKind, value_from_json, value_to_json};
use crate::codec::value::{ArrayElement, FieldValue, StArray, StObject};
use crate::codec::{CodecError, Result, sort, template};

/// Limits and switches for JSON-to-binary conversion.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
	/// Maximum object/array nesting depth.
	pub max_depth: u32,
	/// Drop members whose names the registry does not know instead of failing.
	pub skip_unknown_fields: bool,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 16,
			skip_unknown_fields: false,
		}
	}
}

impl EncodeOptions {
	/// Preset that tolerates members from newer protocol versions.
	pub fn lenient() -> Self {
		Self {
			skip_unknown_fields: true,
			..Self::default()
		}
	}
}

/// Convert a JSON object into canonically sorted members.
///
/// `container` is the wrapping object field, or `None` at the top level. Non-serialized
/// fields such as `hash` are dropped.
pub fn object_from_json<'d>(ctx: &Context<'d>, container: Option<&'d FieldInfo>, json: &Json, opt: &EncodeOptions, depth: u32) -> Result<StObject<'d>> {
	check_depth(opt, depth)?;
	let map = json.as_object().ok_or_else(|| CodecError::TypeMismatch {
		field: container.map_or_else(|| "top level".to_owned(), |field| field.name.to_string()),
		expected: "object",
	})?;

	let mut fields = Vec::with_capacity(map.len());
	for (name, item) in map {
		let field = match ctx.defs.lookup_by_name(name) {
			Ok(field) => field,
			Err(CodecError::UnknownField { .. }) if opt.skip_unknown_fields => {
				debug!(field = %name, "skipping unknown field");
				continue;
			}
			Err(err) => return Err(err),
		};
		if !field.is_serialized {
			continue;
		}
		if field.header().is_end_marker() {
			return Err(CodecError::IllegalField {
				field: field.name.to_string(),
				container: container.map_or_else(|| "top level".to_owned(), |field| field.name.to_string()),
			});
		}
		template::check_member(container, field)?;

		let value = value_from_json(ctx, field, item, opt, depth)?;
		fields.push(FieldValue { field, value });
	}

	sort::canonicalize(&mut fields)?;
	Ok(StObject { fields })
}

/// Convert a JSON array of single-member wrapper objects (`[{"Memo": {...}}, ...]`).
pub fn array_from_json<'d>(ctx: &Context<'d>, array: &'d FieldInfo, json: &Json, opt: &EncodeOptions, depth: u32) -> Result<StArray<'d>> {
	check_depth(opt, depth)?;
	let elements = json.as_array().ok_or_else(|| CodecError::TypeMismatch {
		field: array.name.to_string(),
		expected: "array",
	})?;

	let mut items = Vec::with_capacity(elements.len());
	for element in elements {
		let invalid = |field: &str| CodecError::InvalidArrayElement {
			array: array.name.to_string(),
			field: field.to_owned(),
		};

		let wrapper = element.as_object().ok_or_else(|| invalid("<non-object>"))?;
		let mut members = wrapper.iter();
		let (Some((name, inner)), None) = (members.next(), members.next()) else {
			return Err(invalid("<not a single-member object>"));
		};

		let field = ctx.defs.lookup_by_name(name)?;
		if field.kind != TypeKind::Object || field.header().is_end_marker() {
			return Err(invalid(name.as_str()));
		}
		template::check_member(Some(array), field)?;

		let object = object_from_json(ctx, Some(field), inner, opt, depth + 1)?;
		items.push(ArrayElement { field, object });
	}
	Ok(StArray { items })
}

/// Render members as a JSON object, in stored order.
pub fn object_to_json(ctx: &Context<'_>, object: &StObject<'_>) -> Result<Json> {
	let mut map = Map::with_capacity(object.fields.len());
	for member in &object.fields {
		map.insert(member.field.name.to_string(), value_to_json(ctx, member.field, &member.value)?);
	}
	Ok(Json::Object(map))
}

/// Render array elements as single-member wrapper objects.
pub fn array_to_json(ctx: &Context<'_>, array: &StArray<'_>) -> Result<Json> {
	let mut out = Vec::with_capacity(array.items.len());
	for element in &array.items {
		let mut wrapper = Map::with_capacity(1);
		wrapper.insert(element.field.name.to_string(), object_to_json(ctx, &element.object)?);
		out.push(Json::Object(wrapper));
	}
	Ok(Json::Array(out))
}

fn check_depth(opt: &EncodeOptions, depth: u32) -> Result<()> {
	if depth >= opt.max_depth {
		return Err(CodecError::DepthExceeded { max_depth: opt.max_depth });
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::{EncodeOptions, object_from_json, object_to_json};
	use crate::codec::types::{ClassicAddressCodec, Context};
	use crate::codec::{CodecError, Definitions};

	fn ctx() -> Context<'static> {
		Context {
			defs: Definitions::builtin(),
			address: &ClassicAddressCodec,
		}
	}

	fn member_names(json: &serde_json::Value, opt: &EncodeOptions) -> Vec<String> {
		let object = object_from_json(&ctx(), None, json, opt, 0).expect("object converts");
		object.fields.iter().map(|item| item.field.name.to_string()).collect()
	}

	#[test]
	fn members_come_out_sorted() {
		let names = member_names(&json!({ "Sequence": 1, "Fee": "10", "Flags": 0, "TransactionType": "Payment" }), &EncodeOptions::default());
		assert_eq!(names, ["TransactionType", "Flags", "Sequence", "Fee"]);
	}

	#[test]
	fn non_serialized_fields_are_dropped() {
		let names = member_names(&json!({ "Sequence": 1, "hash": "ABCD" }), &EncodeOptions::default());
		assert_eq!(names, ["Sequence"]);
	}

	#[test]
	fn unknown_fields_fail_unless_skipped() {
		let input = json!({ "Sequence": 1, "FancyNewField": 3 });
		let err = object_from_json(&ctx(), None, &input, &EncodeOptions::default(), 0).expect_err("unknown field");
		assert!(matches!(err, CodecError::UnknownField { name } if name == "FancyNewField"));
		assert_eq!(member_names(&input, &EncodeOptions::lenient()), ["Sequence"]);
	}

	#[test]
	fn end_marker_names_are_not_members() {
		let err = object_from_json(&ctx(), None, &json!({ "ObjectEndMarker": {} }), &EncodeOptions::default(), 0).expect_err("marker");
		assert!(matches!(err, CodecError::IllegalField { .. }));
	}

	#[test]
	fn array_elements_need_a_single_wrapper() {
		let err = object_from_json(&ctx(), None, &json!({ "Memos": [{ "Memo": {}, "Signer": {} }] }), &EncodeOptions::default(), 0)
			.expect_err("two wrappers");
		assert!(matches!(err, CodecError::InvalidArrayElement { .. }));

		let err = object_from_json(&ctx(), None, &json!({ "Memos": [{ "Sequence": 1 }] }), &EncodeOptions::default(), 0).expect_err("not an object field");
		assert!(matches!(err, CodecError::InvalidArrayElement { .. }));
	}

	#[test]
	fn template_violations_fail_encode() {
		let input = json!({ "Memos": [{ "Memo": { "MemoData": "AB", "Fee": "10" } }] });
		let err = object_from_json(&ctx(), None, &input, &EncodeOptions::default(), 0).expect_err("Fee in a memo");
		assert!(matches!(err, CodecError::IllegalField { field, container } if field == "Fee" && container == "Memo"));
	}

	#[test]
	fn depth_limit_applies() {
		let input = json!({ "Memos": [{ "Memo": { "MemoData": "AB" } }] });
		let opt = EncodeOptions {
			max_depth: 2,
			..EncodeOptions::default()
		};
		let err = object_from_json(&ctx(), None, &input, &opt, 0).expect_err("three levels");
		assert!(matches!(err, CodecError::DepthExceeded { max_depth: 2 }));
	}

	#[test]
	fn renders_in_stored_order() {
		let ctx = ctx();
		let input = json!({ "Fee": "12", "Account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh", "Sequence": 7 });
		let object = object_from_json(&ctx, None, &input, &EncodeOptions::default(), 0).expect("object converts");
		let rendered = object_to_json(&ctx, &object).expect("object renders");
		let keys: Vec<&str> = rendered.as_object().expect("object").keys().map(String::as_str).collect();
		assert_eq!(keys, ["Sequence", "Fee", "Account"]);
	}
}
