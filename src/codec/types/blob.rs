use std::fmt;

use crate::codec::types::{decode_hex, encode_hex};
use crate::codec::vl::MAX_VL_LEN;
use crate::codec::{CodecError, Result};

/// Variable-length opaque bytes, bounded by the VL scheme.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Wrap bytes, rejecting lengths no VL prefix can carry.
	pub fn new(bytes: Vec<u8>) -> Result<Self> {
		if bytes.len() > MAX_VL_LEN {
			return Err(CodecError::VlOutOfRange {
				len: bytes.len(),
				max: MAX_VL_LEN,
			});
		}
		Ok(Self(bytes))
	}

	/// Parse hex text.
	pub fn from_hex(field: &str, text: &str) -> Result<Self> {
		Self::new(decode_hex(field, text)?)
	}

	/// Raw bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Byte length.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the blob is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for Blob {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&encode_hex(&self.0))
	}
}

impl fmt::Debug for Blob {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Blob({self})")
	}
}
