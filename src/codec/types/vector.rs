use crate::codec::types::hash::Hash256;
use crate::codec::{CodecError, Result};

/// Split a VL payload into 32-byte hashes.
pub(crate) fn read_vector256(field: &str, payload: &[u8]) -> Result<Vec<Hash256>> {
	if payload.len() % Hash256::LEN != 0 {
		return Err(CodecError::InvalidLength {
			field: field.to_owned(),
			expected: payload.len().next_multiple_of(Hash256::LEN),
			got: payload.len(),
		});
	}
	payload.chunks_exact(Hash256::LEN).map(|chunk| Hash256::from_slice(field, chunk)).collect()
}

/// Concatenate hashes into a VL payload.
pub(crate) fn write_vector256(items: &[Hash256], out: &mut Vec<u8>) {
	for item in items {
		item.write(out);
	}
}
