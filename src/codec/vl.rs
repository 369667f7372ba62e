//! Variable-length prefix codec.
//!
//! Lengths use a three-tier scheme: one byte up to 192, two bytes up to 12480, and
//! three bytes up to 918744.

use crate::codec::bytes::Cursor;
use crate::codec::{CodecError, Result};

/// Largest length a one-byte prefix can carry.
pub const MAX_SINGLE_BYTE: usize = 192;
/// Largest length a two-byte prefix can carry.
pub const MAX_DOUBLE_BYTE: usize = 12_480;
/// Largest length the scheme can carry at all.
pub const MAX_VL_LEN: usize = 918_744;

/// Append the VL prefix for `len` to `out`.
pub fn write_vl(len: usize, out: &mut Vec<u8>) -> Result<()> {
	if len <= MAX_SINGLE_BYTE {
		out.push(len as u8);
	} else if len <= MAX_DOUBLE_BYTE {
		let rest = len - (MAX_SINGLE_BYTE + 1);
		out.push(193 + (rest >> 8) as u8);
		out.push((rest & 0xFF) as u8);
	} else if len <= MAX_VL_LEN {
		let rest = len - (MAX_DOUBLE_BYTE + 1);
		out.push(241 + (rest >> 16) as u8);
		out.push(((rest >> 8) & 0xFF) as u8);
		out.push((rest & 0xFF) as u8);
	} else {
		return Err(CodecError::VlOutOfRange { len, max: MAX_VL_LEN });
	}
	Ok(())
}

/// Return the VL prefix bytes for `len`.
pub fn encode_vl(len: usize) -> Result<Vec<u8>> {
	let mut out = Vec::with_capacity(3);
	write_vl(len, &mut out)?;
	Ok(out)
}

/// Read a VL prefix and return the payload length it announces.
pub fn read_vl(cursor: &mut Cursor<'_>) -> Result<usize> {
	let b0 = usize::from(cursor.read_u8()?);
	let len = match b0 {
		0..=192 => b0,
		193..=240 => {
			let b1 = usize::from(cursor.read_u8()?);
			MAX_SINGLE_BYTE + 1 + ((b0 - 193) << 8) + b1
		}
		241..=254 => {
			let b1 = usize::from(cursor.read_u8()?);
			let b2 = usize::from(cursor.read_u8()?);
			MAX_DOUBLE_BYTE + 1 + ((b0 - 241) << 16) + (b1 << 8) + b2
		}
		_ => return Err(CodecError::VlOutOfRange { len: usize::MAX, max: MAX_VL_LEN }),
	};

	if len > MAX_VL_LEN {
		return Err(CodecError::VlOutOfRange { len, max: MAX_VL_LEN });
	}
	Ok(len)
}

/// Decode a VL prefix at the start of `bytes`, returning `(len, consumed)`.
pub fn decode_vl(bytes: &[u8]) -> Result<(usize, usize)> {
	let mut cursor = Cursor::new(bytes);
	let len = read_vl(&mut cursor)?;
	Ok((len, cursor.pos()))
}

#[cfg(test)]
mod tests {
	use super::{MAX_VL_LEN, decode_vl, encode_vl};
	use crate::codec::CodecError;

	#[test]
	fn tier_boundaries_use_documented_widths() {
		let cases: [(usize, &[u8]); 6] = [
			(0, &[0x00]),
			(192, &[0xC0]),
			(193, &[0xC1, 0x00]),
			(12_480, &[0xF0, 0xFF]),
			(12_481, &[0xF1, 0x00, 0x00]),
			(918_744, &[0xFE, 0xD4, 0x17]),
		];

		for (len, expected) in cases {
			let prefix = encode_vl(len).expect("length is encodable");
			assert_eq!(prefix, expected, "prefix for {len}");
			assert_eq!(decode_vl(&prefix).expect("prefix decodes"), (len, expected.len()));
		}
	}

	#[test]
	fn rejects_length_above_maximum() {
		let err = encode_vl(MAX_VL_LEN + 1).expect_err("918745 must fail");
		assert!(matches!(err, CodecError::VlOutOfRange { len: 918_745, .. }));
	}

	#[test]
	fn decode_rejects_prefixes_beyond_maximum() {
		assert!(matches!(decode_vl(&[0xFE, 0xD4, 0x18]), Err(CodecError::VlOutOfRange { len: 918_745, .. })));
		assert!(matches!(decode_vl(&[0xFF]), Err(CodecError::VlOutOfRange { .. })));
	}

	#[test]
	fn decode_reports_truncated_prefix() {
		assert!(matches!(decode_vl(&[0xC1]), Err(CodecError::TruncatedBuffer { .. })));
		assert!(matches!(decode_vl(&[0xF1, 0x00]), Err(CodecError::TruncatedBuffer { .. })));
	}
}
