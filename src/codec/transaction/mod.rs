use serde_json::Value as Json;
use sha2::{Digest, Sha512};
use tracing::debug;

use crate::codec::amount::parse_drops;
use crate::codec::bytes::Cursor;
use crate::codec::definitions::{Definitions, FieldInfo};
use crate::codec::json::{EncodeOptions, object_from_json, object_to_json};
use crate::codec::object::{DecodeOptions, decode_top_level, encode_top_level};
use crate::codec::types::{AddressCodec, ClassicAddressCodec, Context, Hash, Hash256, decode_hex, encode_hex};
use crate::codec::value::StObject;
use crate::codec::{CodecError, Result};

#[cfg(test)]
mod tests;

static CLASSIC: ClassicAddressCodec = ClassicAddressCodec;

/// Four-byte prefixes that domain-separate hashed and signed payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashPrefix {
	/// `STX\0`, single-signer signing data.
	TransactionSign,
	/// `SMT\0`, multi-signer signing data.
	TransactionMultiSign,
	/// `CLM\0`, payment-channel claim authorization.
	PaymentChannelClaim,
	/// `TXN\0`, transaction identifier.
	TransactionId,
}

impl HashPrefix {
	/// Prefix bytes.
	pub const fn bytes(self) -> [u8; 4] {
		match self {
			Self::TransactionSign => *b"STX\0",
			Self::TransactionMultiSign => *b"SMT\0",
			Self::PaymentChannelClaim => *b"CLM\0",
			Self::TransactionId => *b"TXN\0",
		}
	}
}

/// Which signing payload to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningMode {
	/// Single signer.
	#[default]
	Single,
	/// One signer of a multi-signed transaction, without the signer suffix.
	Multi,
}

impl SigningMode {
	fn prefix(self) -> HashPrefix {
		match self {
			Self::Single => HashPrefix::TransactionSign,
			Self::Multi => HashPrefix::TransactionMultiSign,
		}
	}
}

/// Options for both directions.
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
	/// JSON-to-binary behavior.
	pub encode: EncodeOptions,
	/// Binary-to-JSON behavior.
	pub decode: DecodeOptions,
}

/// Transaction and ledger-object codec.
///
/// Holds only shared references and options, so one instance can serve any number of
/// threads.
pub struct Codec<'d> {
	defs: &'d Definitions,
	address: &'d dyn AddressCodec,
	options: CodecOptions,
}

impl Codec<'static> {
	/// Codec over the embedded registry and classic addresses.
	pub fn builtin() -> Self {
		Self::new(Definitions::builtin(), &CLASSIC)
	}
}

impl<'d> Codec<'d> {
	/// Codec over an explicit registry and address codec.
	pub fn new(defs: &'d Definitions, address: &'d dyn AddressCodec) -> Self {
		Self {
			defs,
			address,
			options: CodecOptions::default(),
		}
	}

	/// Replace the options.
	pub fn with_options(mut self, options: CodecOptions) -> Self {
		self.options = options;
		self
	}

	/// Current options.
	pub fn options(&self) -> &CodecOptions {
		&self.options
	}

	/// Registry in use.
	pub fn definitions(&self) -> &'d Definitions {
		self.defs
	}

	/// Convert a top-level JSON object into sorted members.
	pub fn parse(&self, json: &Json) -> Result<StObject<'d>> {
		object_from_json(&self.context(), None, json, &self.options.encode, 0)
	}

	/// Render members as JSON.
	pub fn render(&self, object: &StObject<'_>) -> Result<Json> {
		object_to_json(&self.context(), object)
	}

	/// Canonical binary encoding of a transaction or ledger object.
	pub fn encode(&self, json: &Json) -> Result<Vec<u8>> {
		let object = self.parse(json)?;
		let mut out = Vec::new();
		encode_top_level(&object, None, &mut out)?;
		debug!(fields = object.fields.len(), bytes = out.len(), "encoded object");
		Ok(out)
	}

	/// [`Self::encode`] rendered as uppercase hex.
	pub fn encode_hex(&self, json: &Json) -> Result<String> {
		Ok(encode_hex(&self.encode(json)?))
	}

	/// Decode binary into typed members, preserving wire order.
	pub fn decode_object(&self, bytes: &[u8]) -> Result<StObject<'d>> {
		let mut cursor = Cursor::new(bytes);
		let object = decode_top_level(&mut cursor, self.defs, &self.options.decode)?;
		debug!(fields = object.fields.len(), bytes = bytes.len(), "decoded object");
		Ok(object)
	}

	/// Decode binary into a JSON tree.
	pub fn decode(&self, bytes: &[u8]) -> Result<Json> {
		self.render(&self.decode_object(bytes)?)
	}

	/// Decode hex text into a JSON tree.
	pub fn decode_hex(&self, text: &str) -> Result<Json> {
		self.decode(&decode_hex("hex input", text)?)
	}

	/// Signing payload: prefix followed by the signing fields only.
	pub fn encode_for_signing(&self, json: &Json, mode: SigningMode) -> Result<Vec<u8>> {
		let object = self.parse(json)?;
		let mut out = mode.prefix().bytes().to_vec();
		encode_top_level(&object, Some(is_signing_field), &mut out)?;
		debug!(?mode, bytes = out.len(), "encoded signing payload");
		Ok(out)
	}

	/// Multi-signing payload for `signer`: `SMT\0`, signing fields, then the signer's account.
	///
	/// The transaction must carry an empty `SigningPubKey`.
	pub fn encode_for_multisigning(&self, json: &Json, signer: &str) -> Result<Vec<u8>> {
		match json.get("SigningPubKey") {
			Some(Json::String(key)) if key.is_empty() => {}
			Some(_) => return Err(CodecError::InvalidMultisign { reason: "SigningPubKey must be empty" }),
			None => return Err(CodecError::InvalidMultisign { reason: "SigningPubKey is missing" }),
		}

		let account = self.address.parse_account("signer", signer)?;
		let mut out = self.encode_for_signing(json, SigningMode::Multi)?;
		account.write(&mut out);
		Ok(out)
	}

	/// Payment-channel claim payload: `CLM\0`, 32-byte channel, 8-byte drop amount.
	pub fn encode_for_signing_claim(&self, json: &Json) -> Result<Vec<u8>> {
		let channel = match json.get("channel") {
			Some(Json::String(text)) => Hash256::from_hex("channel", text)?,
			_ => {
				return Err(CodecError::TypeMismatch {
					field: "channel".to_owned(),
					expected: "Hash256",
				});
			}
		};
		let drops = match json.get("amount") {
			Some(Json::String(text)) => parse_drops(text)?,
			Some(Json::Number(number)) => parse_drops(&number.to_string())?,
			_ => {
				return Err(CodecError::TypeMismatch {
					field: "amount".to_owned(),
					expected: "drops string",
				});
			}
		};

		let mut out = HashPrefix::PaymentChannelClaim.bytes().to_vec();
		channel.write(&mut out);
		out.extend_from_slice(&drops.to_be_bytes());
		Ok(out)
	}

	/// Transaction identifier: SHA-512Half over `TXN\0` and the full encoding.
	pub fn transaction_id(&self, json: &Json) -> Result<Hash256> {
		let body = self.encode(json)?;
		let prefix = HashPrefix::TransactionId.bytes();
		Ok(sha512_half(&[prefix.as_slice(), body.as_slice()]))
	}

	fn context(&self) -> Context<'d> {
		Context {
			defs: self.defs,
			address: self.address,
		}
	}
}

/// First 32 bytes of SHA-512 over the concatenated parts.
pub fn sha512_half(parts: &[&[u8]]) -> Hash256 {
	let mut hasher = Sha512::new();
	for part in parts {
		hasher.update(part);
	}
	let digest = hasher.finalize();

	let mut out = [0_u8; 32];
	out.copy_from_slice(&digest[..32]);
	Hash(out)
}

fn is_signing_field(field: &FieldInfo) -> bool {
	field.is_signing_field
}

/// Encode with the builtin codec.
pub fn encode(json: &Json) -> Result<Vec<u8>> {
	Codec::builtin().encode(json)
}

/// Decode with the builtin codec.
pub fn decode(bytes: &[u8]) -> Result<Json> {
	Codec::builtin().decode(bytes)
}

/// Signing payload with the builtin codec.
pub fn encode_for_signing(json: &Json, mode: SigningMode) -> Result<Vec<u8>> {
	Codec::builtin().encode_for_signing(json, mode)
}

/// Multi-signing payload with the builtin codec.
pub fn encode_for_multisigning(json: &Json, signer: &str) -> Result<Vec<u8>> {
	Codec::builtin().encode_for_multisigning(json, signer)
}

/// Claim payload with the builtin codec.
pub fn encode_for_signing_claim(json: &Json) -> Result<Vec<u8>> {
	Codec::builtin().encode_for_signing_claim(json)
}

/// Transaction identifier with the builtin codec.
pub fn transaction_id(json: &Json) -> Result<Hash256> {
	Codec::builtin().transaction_id(json)
}
