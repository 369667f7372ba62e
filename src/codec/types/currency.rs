use std::fmt;

use crate::codec::bytes::Cursor;
use crate::codec::types::{decode_hex, encode_hex};
use crate::codec::{CodecError, Result};

const ISO_START: usize = 12;
const ISO_END: usize = 15;

/// 160-bit currency identifier.
///
/// A standard code keeps three ASCII characters in bytes 12..15 with every other byte
/// zero. The all-zero value is the native currency.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Currency(pub [u8; 20]);

impl Currency {
	/// Native currency (all zero bytes).
	pub const XRP: Self = Self([0; 20]);

	/// Byte width.
	pub const LEN: usize = 20;

	/// Parse `"XRP"`, a three-character code, or 40 hex digits.
	pub fn from_code(text: &str) -> Result<Self> {
		if text == "XRP" {
			return Ok(Self::XRP);
		}

		if text.len() == 3 && text.bytes().all(is_iso_char) {
			let mut out = [0_u8; 20];
			out[ISO_START..ISO_END].copy_from_slice(text.as_bytes());
			return Ok(Self(out));
		}

		if text.len() == Self::LEN * 2 {
			let raw = decode_hex("currency", text).map_err(|_| CodecError::InvalidCurrency { code: text.to_owned() })?;
			let mut out = [0_u8; 20];
			out.copy_from_slice(&raw);
			return Ok(Self(out));
		}

		Err(CodecError::InvalidCurrency { code: text.to_owned() })
	}

	/// Whether this is the native currency.
	pub fn is_xrp(&self) -> bool {
		*self == Self::XRP
	}

	/// Three-character code when the standard layout holds.
	pub fn iso_code(&self) -> Option<&str> {
		let bytes = &self.0;
		let padded = bytes[..ISO_START].iter().chain(&bytes[ISO_END..]).all(|byte| *byte == 0);
		let code = &bytes[ISO_START..ISO_END];
		if !padded || !code.iter().copied().all(is_iso_char) || code == b"XRP" {
			return None;
		}
		std::str::from_utf8(code).ok()
	}

	/// Raw bytes.
	pub fn as_bytes(&self) -> &[u8; 20] {
		&self.0
	}

	pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self(cursor.read_array()?))
	}

	pub(crate) fn write(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.0);
	}
}

impl fmt::Display for Currency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_xrp() {
			return f.write_str("XRP");
		}
		match self.iso_code() {
			Some(code) => f.write_str(code),
			None => f.write_str(&encode_hex(&self.0)),
		}
	}
}

impl fmt::Debug for Currency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Currency({self})")
	}
}

fn is_iso_char(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || b"?!@#$%^&*<>(){}[]|".contains(&byte)
}

#[cfg(test)]
mod tests {
	use super::Currency;
	use crate::codec::CodecError;

	#[test]
	fn standard_code_sits_in_the_middle() {
		let usd = Currency::from_code("USD").expect("USD parses");
		assert_eq!(&usd.0[12..15], b"USD");
		assert!(usd.0[..12].iter().chain(&usd.0[15..]).all(|byte| *byte == 0));
		assert_eq!(usd.to_string(), "USD");
	}

	#[test]
	fn native_code_is_all_zero() {
		assert_eq!(Currency::from_code("XRP").expect("XRP parses"), Currency::XRP);
		assert_eq!(Currency::XRP.to_string(), "XRP");
	}

	#[test]
	fn opaque_code_round_trips_as_hex() {
		let text = "0158415500000000C1F76FF6ECB0BAC600000000";
		let code = Currency::from_code(text).expect("hex parses");
		assert_eq!(code.iso_code(), None);
		assert_eq!(code.to_string(), text);
	}

	#[test]
	fn hex_with_standard_layout_renders_as_code() {
		let code = Currency::from_code("0000000000000000000000004555520000000000").expect("hex parses");
		assert_eq!(code.to_string(), "EUR");
	}

	#[test]
	fn rejects_malformed_codes() {
		for text in ["US", "USDX", "U D", "zz58415500000000C1F76FF6ECB0BAC600000000"] {
			assert!(matches!(Currency::from_code(text), Err(CodecError::InvalidCurrency { .. })), "{text}");
		}
	}
}
