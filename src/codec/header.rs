use crate::codec::bytes::Cursor;
use crate::codec::{CodecError, Result};

/// Wire identifier of one field: `(type_code, nth)` packed into one to three bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldHeader {
	/// Serialized type code.
	pub type_code: u8,
	/// Field number within its type.
	pub nth: u8,
}

impl FieldHeader {
	/// Marker closing a nested object (`0xE1`).
	pub const OBJECT_END: Self = Self { type_code: 14, nth: 1 };
	/// Marker closing an array (`0xF1`).
	pub const ARRAY_END: Self = Self { type_code: 15, nth: 1 };

	/// Append the packed header to `out`.
	pub fn write(self, out: &mut Vec<u8>) {
		let Self { type_code, nth } = self;
		match (type_code < 16, nth < 16) {
			(true, true) => out.push((type_code << 4) | nth),
			(false, true) => out.extend_from_slice(&[nth, type_code]),
			(true, false) => out.extend_from_slice(&[type_code << 4, nth]),
			(false, false) => out.extend_from_slice(&[0, type_code, nth]),
		}
	}

	/// Read one packed header.
	pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let at = cursor.pos();
		let first = cursor.read_u8()?;

		let mut type_code = first >> 4;
		let mut nth = first & 0x0F;
		if type_code == 0 {
			type_code = cursor.read_u8()?;
			if type_code < 16 {
				return Err(CodecError::InvalidFieldHeader { at });
			}
		}
		if nth == 0 {
			nth = cursor.read_u8()?;
			if nth < 16 {
				return Err(CodecError::InvalidFieldHeader { at });
			}
		}

		Ok(Self { type_code, nth })
	}

	/// Whether this header is one of the two container end markers.
	pub fn is_end_marker(self) -> bool {
		self == Self::OBJECT_END || self == Self::ARRAY_END
	}
}

#[cfg(test)]
mod tests {
	use super::FieldHeader;
	use crate::codec::CodecError;
	use crate::codec::bytes::Cursor;

	fn packed(type_code: u8, nth: u8) -> Vec<u8> {
		let mut out = Vec::new();
		FieldHeader { type_code, nth }.write(&mut out);
		out
	}

	#[test]
	fn packs_all_four_layouts() {
		assert_eq!(packed(2, 4), [0x24]);
		assert_eq!(packed(16, 3), [0x03, 0x10]);
		assert_eq!(packed(2, 27), [0x20, 0x1B]);
		assert_eq!(packed(18, 20), [0x00, 0x12, 0x14]);
	}

	#[test]
	fn reads_back_every_layout() {
		for (type_code, nth) in [(2, 4), (16, 3), (2, 27), (18, 20), (15, 1), (14, 1)] {
			let bytes = packed(type_code, nth);
			let mut cursor = Cursor::new(&bytes);
			assert_eq!(FieldHeader::read(&mut cursor).expect("header reads"), FieldHeader { type_code, nth });
			assert!(cursor.is_empty());
		}
	}

	#[test]
	fn end_markers_are_single_bytes() {
		assert_eq!(packed(14, 1), [0xE1]);
		assert_eq!(packed(15, 1), [0xF1]);
		assert!(FieldHeader::OBJECT_END.is_end_marker());
		assert!(!FieldHeader { type_code: 14, nth: 10 }.is_end_marker());
	}

	#[test]
	fn rejects_extended_form_for_small_codes() {
		let err = FieldHeader::read(&mut Cursor::new(&[0x04, 0x02])).expect_err("type 2 must be packed in the nibble");
		assert!(matches!(err, CodecError::InvalidFieldHeader { at: 0 }));
		let err = FieldHeader::read(&mut Cursor::new(&[0x20, 0x04])).expect_err("nth 4 must be packed in the nibble");
		assert!(matches!(err, CodecError::InvalidFieldHeader { at: 0 }));
	}
}
