mod amount;
mod bytes;
mod definitions;
mod error;
mod header;
mod json;
mod object;
pub mod quality;
mod sort;
mod template;
mod transaction;
mod types;
mod value;
mod vl;

/// Amount value codec and field-level amount type.
pub use amount::{Amount, AmountValue, IssuedValue, MAX_DROPS, MAX_EXPONENT, MAX_MANTISSA, MIN_EXPONENT, MIN_MANTISSA, decode_amount, encode_amount, parse_drops};
/// Bounded byte cursor.
pub use bytes::Cursor;
/// Field definitions registry.
pub use definitions::{Definitions, EnumTable, FieldInfo, SortKey};
/// Error and result aliases.
pub use error::{CodecError, Result};
/// Packed field header.
pub use header::FieldHeader;
/// JSON tree conversion and its options.
pub use json::{EncodeOptions, array_from_json, array_to_json, object_from_json, object_to_json};
/// Object and array binary codec and its options.
pub use object::{DecodeOptions, decode_array, decode_container, decode_top_level, encode_array, encode_container, encode_top_level};
/// Canonical member ordering.
pub use sort::{canonical_order, canonicalize, check_order};
/// Inner-object membership rules.
pub use template::{allowed_members, check_member};
/// Transaction and ledger-object façade.
pub use transaction::{
	Codec, CodecOptions, HashPrefix, SigningMode, decode, encode, encode_for_multisigning, encode_for_signing, encode_for_signing_claim, sha512_half,
	transaction_id,
};
/// Field type system and per-type values.
pub use types::{
	ACCOUNT_ID_VERSION, AccountId, AddressCodec, Blob, ClassicAddressCodec, Context, Currency, Hash, Hash128, Hash160, Hash256, PATH_SEPARATOR, PATHSET_END,
	Path, PathSet, PathStep, STEP_ACCOUNT, STEP_CURRENCY, STEP_ISSUER, TypeKind, decode_hex, encode_hex, read_value, value_from_json, value_to_json,
	write_value,
};
/// Decoded runtime value types.
pub use value::{ArrayElement, FieldValue, StArray, StObject, Value};
/// Variable-length prefix codec.
pub use vl::{MAX_DOUBLE_BYTE, MAX_SINGLE_BYTE, MAX_VL_LEN, decode_vl, encode_vl, read_vl, write_vl};
