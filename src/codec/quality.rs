//! Order-book quality.
//!
//! The last 8 bytes of a book directory index hold the offer quality: `exponent + 100`
//! in the first byte and a 16-digit mantissa in the remaining seven.

use crate::codec::amount::IssuedValue;
use crate::codec::{CodecError, Result};

const EXPONENT_BIAS: i32 = 100;

/// Encode decimal quality text into its 8-byte form.
pub fn encode(quality: &str) -> Result<[u8; 8]> {
	let value = IssuedValue::parse(quality)?;
	if value.is_negative() {
		return Err(CodecError::InvalidAmount {
			value: quality.to_owned(),
			reason: "quality must not be negative",
		});
	}
	if value.is_zero() {
		return Ok([0; 8]);
	}

	let mut out = value.mantissa().to_be_bytes();
	out[0] = (value.exponent() + EXPONENT_BIAS) as u8;
	Ok(out)
}

/// Decode the 8-byte form (or a longer index ending in it) into plain decimal text.
pub fn decode(bytes: &[u8]) -> Result<String> {
	let Some(tail) = bytes.len().checked_sub(8).map(|start| &bytes[start..]) else {
		return Err(CodecError::InvalidLength {
			field: "quality".to_owned(),
			expected: 8,
			got: bytes.len(),
		});
	};

	let exponent = i32::from(tail[0]) - EXPONENT_BIAS;
	let mut raw = [0_u8; 8];
	raw[1..].copy_from_slice(&tail[1..]);
	let mantissa = u64::from_be_bytes(raw);
	Ok(plain_decimal(mantissa, exponent))
}

fn plain_decimal(mantissa: u64, exponent: i32) -> String {
	if mantissa == 0 {
		return "0".to_owned();
	}

	let digits = mantissa.to_string();
	if exponent >= 0 {
		return format!("{digits}{}", "0".repeat(exponent as usize));
	}

	let point = digits.len() as i32 + exponent;
	let (int_part, frac_part) = if point > 0 {
		let (int_part, frac_part) = digits.split_at(point as usize);
		(int_part.to_owned(), frac_part.to_owned())
	} else {
		("0".to_owned(), format!("{}{digits}", "0".repeat((-point) as usize)))
	};

	let frac_part = frac_part.trim_end_matches('0');
	if frac_part.is_empty() { int_part } else { format!("{int_part}.{frac_part}") }
}

#[cfg(test)]
mod tests {
	use super::{decode, encode};
	use crate::codec::CodecError;
	use crate::codec::types::{decode_hex, encode_hex};

	#[test]
	fn encodes_book_directory_suffix() {
		assert_eq!(encode_hex(&encode("195796912.5171664").expect("quality encodes")), "5D06F4C3362FE1D0");
	}

	#[test]
	fn decodes_full_book_directory_index() {
		let index = decode_hex("BookDirectory", "4627DFFCFF8B5A265EDBD8AE8C14A52325DBFEDAF4F5C32E5D06F4C3362FE1D0").expect("hex");
		assert_eq!(decode(&index).expect("quality decodes"), "195796912.5171664");
	}

	#[test]
	fn whole_and_tiny_qualities() {
		for text in ["1", "1000000000000000000000", "0.00000000000000000123"] {
			let bytes = encode(text).expect("quality encodes");
			assert_eq!(decode(&bytes).expect("quality decodes"), text);
		}
	}

	#[test]
	fn rejects_negative_and_short_input() {
		assert!(matches!(encode("-1"), Err(CodecError::InvalidAmount { .. })));
		assert!(matches!(decode(&[0x5D, 0x06]), Err(CodecError::InvalidLength { got: 2, .. })));
	}
}
