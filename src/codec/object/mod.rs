use std::collections::HashSet;

use tracing::trace;

use crate::codec::bytes::Cursor;
use crate::codec::definitions::{Definitions, FieldInfo, SortKey};
use crate::codec::header::FieldHeader;
use crate::codec::types::{TypeKind, read_value, write_value};
use crate::codec::value::{ArrayElement, FieldValue, StArray, StObject};
use crate::codec::vl::MAX_VL_LEN;
use crate::codec::{CodecError, Result, sort, template};


/// Runtime limits and behavior switches for binary decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum object/array nesting depth.
	pub max_depth: u32,
	/// Maximum accepted VL payload length.
	pub max_field_len: usize,
	/// Reject members that do not follow canonical order.
	pub strict_canonical: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 16,
			max_field_len: MAX_VL_LEN,
			strict_canonical: false,
		}
	}
}

impl DecodeOptions {
	/// Preset that only accepts canonically ordered input.
	pub fn strict() -> Self {
		Self {
			strict_canonical: true,
			..Self::default()
		}
	}
}

/// Write the members of `object` in canonical order followed by the object end marker.
pub fn encode_container(container: &FieldInfo, object: &StObject<'_>, out: &mut Vec<u8>) -> Result<()> {
	encode_members(Some(container), object, None, out)?;
	FieldHeader::OBJECT_END.write(out);
	Ok(())
}

/// Write each element (wrapper header, members, object end) followed by the array end marker.
pub fn encode_array(array: &FieldInfo, items: &StArray<'_>, out: &mut Vec<u8>) -> Result<()> {
	for element in &items.items {
		check_element(array, element.field)?;
		element.field.header().write(out);
		encode_container(element.field, &element.object, out)?;
	}
	FieldHeader::ARRAY_END.write(out);
	Ok(())
}

/// Write the members of a top-level object without an end marker.
///
/// With a `filter`, only top-level members it accepts are written; nested members are
/// always written in full.
pub fn encode_top_level(object: &StObject<'_>, filter: Option<fn(&FieldInfo) -> bool>, out: &mut Vec<u8>) -> Result<()> {
	encode_members(None, object, filter, out)
}

/// Read members up to and including the object end marker.
pub fn decode_container<'d>(
	cursor: &mut Cursor<'_>,
	defs: &'d Definitions,
	container: &'d FieldInfo,
	opt: &DecodeOptions,
	depth: u32,
) -> Result<StObject<'d>> {
	check_depth(opt, depth)?;
	decode_members(cursor, defs, Some(container), opt, depth)
}

/// Read wrapped elements up to and including the array end marker.
pub fn decode_array<'d>(cursor: &mut Cursor<'_>, defs: &'d Definitions, array: &'d FieldInfo, opt: &DecodeOptions, depth: u32) -> Result<StArray<'d>> {
	check_depth(opt, depth)?;

	let mut items = Vec::new();
	loop {
		if cursor.is_empty() {
			return Err(CodecError::TruncatedContainer {
				container: array.name.to_string(),
			});
		}

		let at = cursor.pos();
		let header = FieldHeader::read(cursor)?;
		if header == FieldHeader::ARRAY_END {
			break;
		}
		if header == FieldHeader::OBJECT_END {
			return Err(CodecError::UnbalancedContainer { marker: 0xE1, at });
		}

		let field = defs.lookup_by_header(header)?;
		check_element(array, field)?;
		let object = decode_container(cursor, defs, field, opt, depth + 1)?;
		items.push(ArrayElement { field, object });
	}

	trace!(array = %array.name, items = items.len(), "decoded array");
	Ok(StArray { items })
}

/// Read members until the input is exhausted. A stray end marker is an error.
pub fn decode_top_level<'d>(cursor: &mut Cursor<'_>, defs: &'d Definitions, opt: &DecodeOptions) -> Result<StObject<'d>> {
	decode_members(cursor, defs, None, opt, 0)
}

fn encode_members(container: Option<&FieldInfo>, object: &StObject<'_>, filter: Option<fn(&FieldInfo) -> bool>, out: &mut Vec<u8>) -> Result<()> {
	for member in sort::canonical_order(&object.fields)? {
		let field = member.field;
		if filter.is_some_and(|keep| !keep(field)) {
			continue;
		}
		if !field.is_serialized || field.header().is_end_marker() {
			return Err(CodecError::IllegalField {
				field: field.name.to_string(),
				container: container_name(container),
			});
		}
		template::check_member(container, field)?;

		field.header().write(out);
		write_value(field, &member.value, out)?;
	}
	Ok(())
}

fn decode_members<'d>(
	cursor: &mut Cursor<'_>,
	defs: &'d Definitions,
	container: Option<&'d FieldInfo>,
	opt: &DecodeOptions,
	depth: u32,
) -> Result<StObject<'d>> {
	let mut fields: Vec<FieldValue<'d>> = Vec::new();
	let mut seen: HashSet<SortKey> = HashSet::new();

	loop {
		if cursor.is_empty() {
			if let Some(container) = container {
				return Err(CodecError::TruncatedContainer {
					container: container.name.to_string(),
				});
			}
			break;
		}

		let at = cursor.pos();
		let header = FieldHeader::read(cursor)?;
		if header == FieldHeader::OBJECT_END && container.is_some() {
			break;
		}
		if header.is_end_marker() {
			let marker = if header == FieldHeader::OBJECT_END { 0xE1 } else { 0xF1 };
			return Err(CodecError::UnbalancedContainer { marker, at });
		}

		let field = defs.lookup_by_header(header)?;
		template::check_member(container, field)?;
		if opt.strict_canonical
			&& let Some(prev) = fields.last()
		{
			sort::check_order(prev.field, field)?;
		}
		if !seen.insert(field.sort_key()) {
			return Err(CodecError::DuplicateField {
				field: field.name.to_string(),
			});
		}

		let value = read_value(cursor, defs, field, opt, depth)?;
		fields.push(FieldValue { field, value });
	}

	trace!(container = %container_name(container), fields = fields.len(), "decoded object");
	Ok(StObject { fields })
}

fn check_element(array: &FieldInfo, element: &FieldInfo) -> Result<()> {
	if element.kind != TypeKind::Object || element.header().is_end_marker() {
		return Err(CodecError::InvalidArrayElement {
			array: array.name.to_string(),
			field: element.name.to_string(),
		});
	}
	template::check_member(Some(array), element)
}

fn check_depth(opt: &DecodeOptions, depth: u32) -> Result<()> {
	if depth >= opt.max_depth {
		return Err(CodecError::DepthExceeded { max_depth: opt.max_depth });
	}
	Ok(())
}

fn container_name(container: Option<&FieldInfo>) -> String {
	container.map_or_else(|| "top level".to_owned(), |field| field.name.to_string())
}
