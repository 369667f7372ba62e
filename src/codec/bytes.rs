use crate::codec::{CodecError, Result};

/// Bounded cursor over an immutable byte slice. All integers are big-endian.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Whether every byte has been consumed.
	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Look at the next byte without consuming it.
	pub fn peek_u8(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(CodecError::TruncatedBuffer {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a fixed-size byte array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read a big-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `u64`.
	pub fn read_u64(&mut self) -> Result<u64> {
		Ok(u64::from_be_bytes(self.read_array()?))
	}
}
