use std::fmt;

use crate::codec::bytes::Cursor;
use crate::codec::types::{decode_hex, encode_hex};
use crate::codec::{CodecError, Result};

/// Version byte prefixed to account IDs before base58 encoding.
pub const ACCOUNT_ID_VERSION: u8 = 0x00;

/// 160-bit account identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
	/// Byte width.
	pub const LEN: usize = 20;

	/// Build from exactly 20 bytes.
	pub fn from_slice(field: &str, bytes: &[u8]) -> Result<Self> {
		let arr: [u8; Self::LEN] = bytes.try_into().map_err(|_| CodecError::InvalidLength {
			field: field.to_owned(),
			expected: Self::LEN,
			got: bytes.len(),
		})?;
		Ok(Self(arr))
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

impl fmt::Debug for AccountId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "AccountId({})", encode_hex(&self.0))
	}
}

/// Converts account IDs to and from their human-readable address form.
pub trait AddressCodec: Send + Sync {
	/// Render an account ID as an address.
	fn encode_account_id(&self, id: &AccountId) -> String;

	/// Parse an address back into an account ID.
	fn decode_account_id(&self, address: &str) -> Result<AccountId>;

	/// Parse either an address or 40 hex digits.
	fn parse_account(&self, field: &str, text: &str) -> Result<AccountId> {
		if text.len() == AccountId::LEN * 2
			&& text.bytes().all(|byte| byte.is_ascii_hexdigit())
		{
			return AccountId::from_slice(field, &decode_hex(field, text)?);
		}
		self.decode_account_id(text)
	}
}

/// Base58-with-checksum classic addresses (`r...`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicAddressCodec;

impl AddressCodec for ClassicAddressCodec {
	fn encode_account_id(&self, id: &AccountId) -> String {
		bs58::encode(id.0)
			.with_alphabet(bs58::Alphabet::RIPPLE)
			.with_check_version(ACCOUNT_ID_VERSION)
			.into_string()
	}

	fn decode_account_id(&self, address: &str) -> Result<AccountId> {
		let invalid = || CodecError::InvalidAddress { address: address.to_owned() };
		let raw = bs58::decode(address)
			.with_alphabet(bs58::Alphabet::RIPPLE)
			.with_check(Some(ACCOUNT_ID_VERSION))
			.into_vec()
			.map_err(|_| invalid())?;

		// `raw` keeps the version byte and drops the checksum.
		match raw.split_first() {
			Some((_, payload)) if payload.len() == AccountId::LEN => AccountId::from_slice("address", payload),
			_ => Err(invalid()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{AccountId, AddressCodec, ClassicAddressCodec};
	use crate::codec::CodecError;

	const GENESIS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
	const GENESIS_HEX: [u8; 20] = [
		0xB5, 0xF7, 0x62, 0x79, 0x8A, 0x53, 0xD5, 0x43, 0xA0, 0x14, 0xCA, 0xF8, 0xB2, 0x97, 0xCF, 0xF8, 0xF2, 0xF9, 0x37, 0xE8,
	];

	#[test]
	fn decodes_and_encodes_classic_address() {
		let codec = ClassicAddressCodec;
		let id = codec.decode_account_id(GENESIS).expect("address decodes");
		assert_eq!(id, AccountId(GENESIS_HEX));
		assert_eq!(codec.encode_account_id(&id), GENESIS);
	}

	#[test]
	fn zero_account_renders_as_leading_r_run() {
		let codec = ClassicAddressCodec;
		assert_eq!(codec.encode_account_id(&AccountId::default()), "rrrrrrrrrrrrrrrrrrrrrhoLvTp");
	}

	#[test]
	fn rejects_bad_checksum() {
		let err = ClassicAddressCodec.decode_account_id("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTi").expect_err("checksum must fail");
		assert!(matches!(err, CodecError::InvalidAddress { .. }));
	}

	#[test]
	fn parse_account_accepts_hex() {
		let id = ClassicAddressCodec
			.parse_account("Account", "B5F762798A53D543A014CAF8B297CFF8F2F937E8")
			.expect("hex account parses");
		assert_eq!(id, AccountId(GENESIS_HEX));
	}
}
