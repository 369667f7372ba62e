//! Field type system.
//!
//! Every field maps to one closed [`TypeKind`]; the four dispatch functions below are the
//! only place that matches on it.

mod account;
mod blob;
mod currency;
mod hash;
mod path;
mod uint;
mod vector;

use serde_json::Value as Json;

use crate::codec::amount::Amount;
use crate::codec::bytes::Cursor;
use crate::codec::definitions::{Definitions, FieldInfo};
use crate::codec::json::{self, EncodeOptions};
use crate::codec::object::{self, DecodeOptions};
use crate::codec::value::Value;
use crate::codec::vl::{read_vl, write_vl};
use crate::codec::{CodecError, Result};

/// Account identifiers and the address seam.
pub use account::{ACCOUNT_ID_VERSION, AccountId, AddressCodec, ClassicAddressCodec};
/// Variable-length bytes.
pub use blob::Blob;
/// Currency codes.
pub use currency::Currency;
/// Fixed-width hashes.
pub use hash::{Hash, Hash128, Hash160, Hash256};
/// Payment paths.
pub use path::{PATH_SEPARATOR, PATHSET_END, Path, PathSet, PathStep, STEP_ACCOUNT, STEP_CURRENCY, STEP_ISSUER};

use vector::{read_vector256, write_vector256};

/// Closed set of field codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
	/// Big-endian `u8`.
	UInt8,
	/// Big-endian `u16`.
	UInt16,
	/// Big-endian `u32`.
	UInt32,
	/// Big-endian `u64`.
	UInt64,
	/// 16 raw bytes.
	Hash128,
	/// 20 raw bytes.
	Hash160,
	/// 32 raw bytes.
	Hash256,
	/// Native or issued amount.
	Amount,
	/// VL-framed bytes.
	Blob,
	/// 20-byte account, VL-framed per field.
	AccountId,
	/// 20-byte currency code.
	Currency,
	/// Payment path set.
	PathSet,
	/// VL-framed list of 256-bit hashes.
	Vector256,
	/// Nested object, closed by `0xE1`.
	Object,
	/// Array of wrapped objects, closed by `0xF1`.
	Array,
}

impl TypeKind {
	/// Map a definitions-source type name to its codec.
	pub fn from_type_name(name: &str) -> Option<Self> {
		Some(match name {
			"UInt8" => Self::UInt8,
			"UInt16" => Self::UInt16,
			"UInt32" => Self::UInt32,
			"UInt64" => Self::UInt64,
			"Hash128" => Self::Hash128,
			"Hash160" => Self::Hash160,
			"Hash256" => Self::Hash256,
			"Amount" => Self::Amount,
			"Blob" => Self::Blob,
			"AccountID" => Self::AccountId,
			"Currency" => Self::Currency,
			"PathSet" => Self::PathSet,
			"Vector256" => Self::Vector256,
			"STObject" => Self::Object,
			"STArray" => Self::Array,
			_ => return None,
		})
	}

	/// Whether a field of this kind may carry a VL prefix.
	pub fn allows_vl(self) -> bool {
		matches!(self, Self::Blob | Self::AccountId | Self::Vector256)
	}

	/// Whether a field of this kind must carry a VL prefix.
	pub fn requires_vl(self) -> bool {
		matches!(self, Self::Blob | Self::Vector256)
	}

	/// Short human label.
	pub fn label(self) -> &'static str {
		match self {
			Self::UInt8 => "UInt8",
			Self::UInt16 => "UInt16",
			Self::UInt32 => "UInt32",
			Self::UInt64 => "UInt64",
			Self::Hash128 => "Hash128",
			Self::Hash160 => "Hash160",
			Self::Hash256 => "Hash256",
			Self::Amount => "Amount",
			Self::Blob => "Blob",
			Self::AccountId => "AccountID",
			Self::Currency => "Currency",
			Self::PathSet => "PathSet",
			Self::Vector256 => "Vector256",
			Self::Object => "STObject",
			Self::Array => "STArray",
		}
	}
}

/// Collaborators shared by JSON conversion.
#[derive(Clone, Copy)]
pub struct Context<'d> {
	/// Field registry.
	pub defs: &'d Definitions,
	/// Address rendering.
	pub address: &'d dyn AddressCodec,
}

/// Parse hex text (either case).
pub fn decode_hex(field: &str, text: &str) -> Result<Vec<u8>> {
	hex::decode(text).map_err(|_| CodecError::InvalidHex { field: field.to_owned() })
}

/// Render bytes as uppercase hex.
pub fn encode_hex(bytes: &[u8]) -> String {
	hex::encode_upper(bytes)
}

/// Read one field value; the header has already been consumed.
pub fn read_value<'d>(cursor: &mut Cursor<'_>, defs: &'d Definitions, field: &'d FieldInfo, opt: &DecodeOptions, depth: u32) -> Result<Value<'d>> {
	let name = field.name.as_ref();
	Ok(match field.kind {
		TypeKind::UInt8 => Value::UInt8(cursor.read_u8()?),
		TypeKind::UInt16 => Value::UInt16(cursor.read_u16()?),
		TypeKind::UInt32 => Value::UInt32(cursor.read_u32()?),
		TypeKind::UInt64 => Value::UInt64(cursor.read_u64()?),
		TypeKind::Hash128 => Value::Hash128(Hash::read(cursor)?),
		TypeKind::Hash160 => Value::Hash160(Hash::read(cursor)?),
		TypeKind::Hash256 => Value::Hash256(Hash::read(cursor)?),
		TypeKind::Amount => Value::Amount(Amount::read(cursor)?),
		TypeKind::Blob => Value::Blob(Blob::new(vl_payload(cursor, field, opt)?.to_vec())?),
		TypeKind::AccountId if field.is_vl_encoded => Value::AccountId(AccountId::from_slice(name, vl_payload(cursor, field, opt)?)?),
		TypeKind::AccountId => Value::AccountId(AccountId::read(cursor)?),
		TypeKind::Currency => Value::Currency(Currency::read(cursor)?),
		TypeKind::PathSet => Value::PathSet(PathSet::read(cursor)?),
		TypeKind::Vector256 => Value::Vector256(read_vector256(name, vl_payload(cursor, field, opt)?)?),
		TypeKind::Object => Value::Object(object::decode_container(cursor, defs, field, opt, depth + 1)?),
		TypeKind::Array => Value::Array(object::decode_array(cursor, defs, field, opt, depth + 1)?),
	})
}

/// Write one field value (without its header).
pub fn write_value(field: &FieldInfo, value: &Value<'_>, out: &mut Vec<u8>) -> Result<()> {
	match (field.kind, value) {
		(TypeKind::UInt8, Value::UInt8(item)) => out.push(*item),
		(TypeKind::UInt16, Value::UInt16(item)) => out.extend_from_slice(&item.to_be_bytes()),
		(TypeKind::UInt32, Value::UInt32(item)) => out.extend_from_slice(&item.to_be_bytes()),
		(TypeKind::UInt64, Value::UInt64(item)) => out.extend_from_slice(&item.to_be_bytes()),
		(TypeKind::Hash128, Value::Hash128(item)) => item.write(out),
		(TypeKind::Hash160, Value::Hash160(item)) => item.write(out),
		(TypeKind::Hash256, Value::Hash256(item)) => item.write(out),
		(TypeKind::Amount, Value::Amount(item)) => item.write(out)?,
		(TypeKind::Blob, Value::Blob(item)) => {
			write_vl(item.len(), out)?;
			out.extend_from_slice(item.as_bytes());
		}
		(TypeKind::AccountId, Value::AccountId(item)) => {
			if field.is_vl_encoded {
				write_vl(AccountId::LEN, out)?;
			}
			item.write(out);
		}
		(TypeKind::Currency, Value::Currency(item)) => item.write(out),
		(TypeKind::PathSet, Value::PathSet(item)) => item.write(out)?,
		(TypeKind::Vector256, Value::Vector256(items)) => {
			write_vl(items.len() * Hash256::LEN, out)?;
			write_vector256(items, out);
		}
		(TypeKind::Object, Value::Object(item)) => object::encode_container(field, item, out)?,
		(TypeKind::Array, Value::Array(item)) => object::encode_array(field, item, out)?,
		(kind, _) => {
			return Err(CodecError::TypeMismatch {
				field: field.name.to_string(),
				expected: kind.label(),
			});
		}
	}
	Ok(())
}

/// Convert a JSON member into a field value.
pub fn value_from_json<'d>(ctx: &Context<'d>, field: &'d FieldInfo, json: &Json, opt: &EncodeOptions, depth: u32) -> Result<Value<'d>> {
	let name = field.name.as_ref();
	let mismatch = || CodecError::TypeMismatch {
		field: name.to_owned(),
		expected: field.kind.label(),
	};
	let text = || json.as_str().ok_or_else(mismatch);

	Ok(match field.kind {
		TypeKind::UInt8 => Value::UInt8(uint::from_json(ctx.defs, field, json)? as u8),
		TypeKind::UInt16 => Value::UInt16(uint::from_json(ctx.defs, field, json)? as u16),
		TypeKind::UInt32 => Value::UInt32(uint::from_json(ctx.defs, field, json)? as u32),
		TypeKind::UInt64 => Value::UInt64(uint::from_json(ctx.defs, field, json)?),
		TypeKind::Hash128 => Value::Hash128(Hash::from_hex(name, text()?)?),
		TypeKind::Hash160 => Value::Hash160(Hash::from_hex(name, text()?)?),
		TypeKind::Hash256 => Value::Hash256(Hash::from_hex(name, text()?)?),
		TypeKind::Amount => Value::Amount(Amount::from_json(name, json, ctx.address)?),
		TypeKind::Blob => Value::Blob(Blob::from_hex(name, text()?)?),
		TypeKind::AccountId => Value::AccountId(ctx.address.parse_account(name, text()?)?),
		TypeKind::Currency => Value::Currency(Currency::from_code(text()?)?),
		TypeKind::PathSet => Value::PathSet(PathSet::from_json(name, json, ctx.address)?),
		TypeKind::Vector256 => {
			let items = json.as_array().ok_or_else(mismatch)?;
			let hashes = items
				.iter()
				.map(|item| Hash256::from_hex(name, item.as_str().ok_or_else(mismatch)?))
				.collect::<Result<Vec<_>>>()?;
			Value::Vector256(hashes)
		}
		TypeKind::Object => Value::Object(json::object_from_json(ctx, Some(field), json, opt, depth + 1)?),
		TypeKind::Array => Value::Array(json::array_from_json(ctx, field, json, opt, depth + 1)?),
	})
}

/// Convert a field value into its JSON form.
pub fn value_to_json(ctx: &Context<'_>, field: &FieldInfo, value: &Value<'_>) -> Result<Json> {
	Ok(match (field.kind, value) {
		(TypeKind::UInt8, Value::UInt8(item)) => uint::to_json(ctx.defs, field, u64::from(*item)),
		(TypeKind::UInt16, Value::UInt16(item)) => uint::to_json(ctx.defs, field, u64::from(*item)),
		(TypeKind::UInt32, Value::UInt32(item)) => uint::to_json(ctx.defs, field, u64::from(*item)),
		(TypeKind::UInt64, Value::UInt64(item)) => uint::to_json(ctx.defs, field, *item),
		(TypeKind::Hash128, Value::Hash128(item)) => Json::String(item.to_string()),
		(TypeKind::Hash160, Value::Hash160(item)) => Json::String(item.to_string()),
		(TypeKind::Hash256, Value::Hash256(item)) => Json::String(item.to_string()),
		(TypeKind::Amount, Value::Amount(item)) => item.to_json(ctx.address),
		(TypeKind::Blob, Value::Blob(item)) => Json::String(item.to_string()),
		(TypeKind::AccountId, Value::AccountId(item)) => Json::String(ctx.address.encode_account_id(item)),
		(TypeKind::Currency, Value::Currency(item)) => Json::String(item.to_string()),
		(TypeKind::PathSet, Value::PathSet(item)) => item.to_json(ctx.address),
		(TypeKind::Vector256, Value::Vector256(items)) => Json::Array(items.iter().map(|item| Json::String(item.to_string())).collect()),
		(TypeKind::Object, Value::Object(item)) => json::object_to_json(ctx, item)?,
		(TypeKind::Array, Value::Array(item)) => json::array_to_json(ctx, item)?,
		(kind, _) => {
			return Err(CodecError::TypeMismatch {
				field: field.name.to_string(),
				expected: kind.label(),
			});
		}
	})
}

fn vl_payload<'a>(cursor: &mut Cursor<'a>, field: &FieldInfo, opt: &DecodeOptions) -> Result<&'a [u8]> {
	let len = read_vl(cursor)?;
	if len > opt.max_field_len {
		return Err(CodecError::FieldTooLong {
			field: field.name.to_string(),
			len,
			max: opt.max_field_len,
		});
	}
	cursor.read_exact(len)
}
