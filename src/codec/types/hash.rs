use std::fmt;

use crate::codec::bytes::Cursor;
use crate::codec::types::{decode_hex, encode_hex};
use crate::codec::{CodecError, Result};

/// Fixed-width opaque hash value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash<const N: usize>(pub [u8; N]);

/// 128-bit hash.
pub type Hash128 = Hash<16>;
/// 160-bit hash.
pub type Hash160 = Hash<20>;
/// 256-bit hash.
pub type Hash256 = Hash<32>;

impl<const N: usize> Hash<N> {
	/// All-zero value.
	pub const ZERO: Self = Self([0; N]);

	/// Byte width.
	pub const LEN: usize = N;

	/// Build from a slice of exactly `N` bytes.
	pub fn from_slice(field: &str, bytes: &[u8]) -> Result<Self> {
		let arr: [u8; N] = bytes.try_into().map_err(|_| CodecError::InvalidLength {
			field: field.to_owned(),
			expected: N,
			got: bytes.len(),
		})?;
		Ok(Self(arr))
	}

	/// Parse `2 * N` hex digits.
	pub fn from_hex(field: &str, text: &str) -> Result<Self> {
		Self::from_slice(field, &decode_hex(field, text)?)
	}

	/// Raw bytes.
	pub fn as_bytes(&self) -> &[u8; N] {
		&self.0
	}

	pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self(cursor.read_array()?))
	}

	pub(crate) fn write(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.0);
	}
}

impl<const N: usize> fmt::Display for Hash<N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&encode_hex(&self.0))
	}
}

impl<const N: usize> fmt::Debug for Hash<N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Hash{}({self})", N * 8)
	}
}
