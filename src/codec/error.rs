use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors produced while encoding or decoding canonical ledger binary data.
#[derive(Debug, Error)]
pub enum CodecError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Input text was not valid JSON.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Field definitions source is malformed.
	#[error("invalid field definitions: {reason}")]
	InvalidDefinitions {
		/// What failed validation.
		reason: String,
	},
	/// Field name is not present in the registry.
	#[error("unknown field: {name}")]
	UnknownField {
		/// Requested field name.
		name: String,
	},
	/// Field code pair is not present in the registry.
	#[error("unknown field code: type={type_code}, nth={nth}")]
	UnknownFieldCode {
		/// Wire type code.
		type_code: u16,
		/// Wire field number.
		nth: u16,
	},
	/// Field header used an extended form for a code below 16.
	#[error("invalid field header at offset {at}")]
	InvalidFieldHeader {
		/// Cursor offset of the header.
		at: usize,
	},
	/// Length does not fit the three-tier VL scheme.
	#[error("vl length {len} out of range (max={max})")]
	VlOutOfRange {
		/// Offending length.
		len: usize,
		/// Largest encodable length.
		max: usize,
	},
	/// VL-framed field exceeded the configured decode limit.
	#[error("field {field} too long: len={len}, max={max}")]
	FieldTooLong {
		/// Field name.
		field: String,
		/// Declared payload length.
		len: usize,
		/// Configured ceiling.
		max: usize,
	},
	/// Amount magnitude or exponent is outside the protocol range.
	#[error("amount out of range: {value}")]
	AmountOutOfRange {
		/// Offending amount text or wire rendering.
		value: String,
	},
	/// Native amount is negative.
	#[error("negative native amount: {value}")]
	NegativeDrops {
		/// Offending amount text or wire rendering.
		value: String,
	},
	/// Amount needs more than 16 significant digits.
	#[error("amount precision loss: {value}")]
	PrecisionLoss {
		/// Offending amount text.
		value: String,
	},
	/// Amount text is not a decimal number.
	#[error("invalid amount {value:?}: {reason}")]
	InvalidAmount {
		/// Offending amount text.
		value: String,
		/// Short parse failure description.
		reason: &'static str,
	},
	/// Currency code is neither a valid 3-character code nor 40 hex digits.
	#[error("invalid currency: {code}")]
	InvalidCurrency {
		/// Offending currency text.
		code: String,
	},
	/// Account address could not be decoded.
	#[error("invalid address: {address}")]
	InvalidAddress {
		/// Offending address text.
		address: String,
	},
	/// Hex text for a field is malformed.
	#[error("invalid hex in {field}")]
	InvalidHex {
		/// Field name or logical input name.
		field: String,
	},
	/// Fixed-width value had the wrong byte length.
	#[error("invalid length for {field}: expected {expected}, got {got}")]
	InvalidLength {
		/// Field name or logical input name.
		field: String,
		/// Required byte length.
		expected: usize,
		/// Provided byte length.
		got: usize,
	},
	/// Path step is empty or carries unknown type bits.
	#[error("invalid path step type 0x{flags:02x}")]
	InvalidPathStep {
		/// Step type byte.
		flags: u8,
	},
	/// JSON value or decoded value does not match the field type.
	#[error("type mismatch for {field}: expected {expected}")]
	TypeMismatch {
		/// Field name.
		field: String,
		/// Expected logical kind.
		expected: &'static str,
	},
	/// Symbolic name is not in the matching enum table.
	#[error("unknown {field} name: {name}")]
	UnknownEnumName {
		/// Field name (`TransactionType`, ...).
		field: String,
		/// Offending symbolic name.
		name: String,
	},
	/// Container ended without its end marker.
	#[error("container {container} truncated: missing end marker")]
	TruncatedContainer {
		/// Name of the unterminated container field.
		container: String,
	},
	/// End marker does not close the current container.
	#[error("unbalanced end marker 0x{marker:02x} at offset {at}")]
	UnbalancedContainer {
		/// Marker byte read.
		marker: u8,
		/// Cursor offset of the marker.
		at: usize,
	},
	/// Array element is not wrapped in an object field.
	#[error("array {array} holds non-object element {field}")]
	InvalidArrayElement {
		/// Array field name.
		array: String,
		/// Offending element field name.
		field: String,
	},
	/// Field is not legal inside this container.
	#[error("field {field} not allowed in {container}")]
	IllegalField {
		/// Offending field name.
		field: String,
		/// Enclosing container name.
		container: String,
	},
	/// Same field appears twice in one container.
	#[error("duplicate field {field}")]
	DuplicateField {
		/// Duplicated field name.
		field: String,
	},
	/// Not enough bytes remained for a requested read.
	#[error("truncated buffer at offset {at}, need {need} bytes, remaining {rem}")]
	TruncatedBuffer {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Strict decode found fields out of canonical order.
	#[error("non-canonical field order: {field} after {previous}")]
	NonCanonicalOrder {
		/// Field read out of order.
		field: String,
		/// Field that preceded it.
		previous: String,
	},
	/// Nesting exceeded the configured limit.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Multi-signing input is not a multi-signable transaction.
	#[error("invalid multisign input: {reason}")]
	InvalidMultisign {
		/// What was wrong.
		reason: &'static str,
	},
}
