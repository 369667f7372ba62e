use crate::codec::amount::Amount;
use crate::codec::definitions::FieldInfo;
use crate::codec::types::{AccountId, Blob, Currency, Hash128, Hash160, Hash256, PathSet};

/// Decoded or to-be-encoded value of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'d> {
	/// 8-bit unsigned integer.
	UInt8(u8),
	/// 16-bit unsigned integer.
	UInt16(u16),
	/// 32-bit unsigned integer.
	UInt32(u32),
	/// 64-bit unsigned integer.
	UInt64(u64),
	/// 128-bit hash.
	Hash128(Hash128),
	/// 160-bit hash.
	Hash160(Hash160),
	/// 256-bit hash.
	Hash256(Hash256),
	/// Native or issued amount.
	Amount(Amount),
	/// Opaque bytes.
	Blob(Blob),
	/// Account identifier.
	AccountId(AccountId),
	/// Currency code.
	Currency(Currency),
	/// Payment paths.
	PathSet(PathSet),
	/// List of 256-bit hashes.
	Vector256(Vec<Hash256>),
	/// Nested object.
	Object(StObject<'d>),
	/// Array of wrapped objects.
	Array(StArray<'d>),
}

/// Field paired with its value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue<'d> {
	/// Registry entry.
	pub field: &'d FieldInfo,
	/// Typed value.
	pub value: Value<'d>,
}

/// Ordered object members.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StObject<'d> {
	/// Members in canonical order when built from JSON, wire order when decoded.
	pub fields: Vec<FieldValue<'d>>,
}

impl<'d> StObject<'d> {
	/// Member by protocol name.
	pub fn get(&self, name: &str) -> Option<&Value<'d>> {
		self.fields.iter().find(|item| item.field.name.as_ref() == name).map(|item| &item.value)
	}
}

/// Ordered array elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StArray<'d> {
	/// Elements in array order.
	pub items: Vec<ArrayElement<'d>>,
}

/// One array element: an object wrapped in a named object field (`{"Memo": {...}}`).
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayElement<'d> {
	/// Wrapping object field.
	pub field: &'d FieldInfo,
	/// Wrapped members.
	pub object: StObject<'d>,
}
