use serde_json::json;

use super::{Codec, CodecOptions, HashPrefix, SigningMode, sha512_half};
use crate::codec::object::DecodeOptions;
use crate::codec::types::encode_hex;
use crate::codec::{CodecError, Definitions};

const ACCOUNT: &str = "r9LqNeG6qHxjeUocjvVki2XR35weJ9mZgQ";
const GENESIS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const PUBKEY: &str = "03EE83BB432547885C219634A1BC407A9DB0474145D69737D09CCDC63E1DEE7FE3";

fn payment() -> serde_json::Value {
	json!({
		"TransactionType": "Payment",
		"Account": ACCOUNT,
		"Destination": GENESIS,
		"Amount": "1000",
		"Fee": "10",
		"Flags": 2147483648_u32,
		"Sequence": 1,
	})
}

#[test]
fn payment_matches_reference_bytes() {
	let hex = Codec::builtin().encode_hex(&payment()).expect("payment encodes");
	assert_eq!(
		hex,
		"120000228000000024000000016140000000000003E868400000000000000A81145B812C9D57731E27A2DA8B1830195F88EF32A3B68314B5F762798A53D543A014CAF8B297CFF8F2F937E8"
	);
}

#[test]
fn member_order_does_not_change_bytes() {
	let reordered = json!({
		"Sequence": 1,
		"Flags": 2147483648_u32,
		"Fee": "10",
		"Amount": "1000",
		"Destination": GENESIS,
		"Account": ACCOUNT,
		"TransactionType": "Payment",
	});
	let codec = Codec::builtin();
	assert_eq!(codec.encode(&payment()).expect("encodes"), codec.encode(&reordered).expect("encodes"));
}

#[test]
fn decode_renders_names_and_addresses() {
	let codec = Codec::builtin();
	let bytes = codec.encode(&payment()).expect("payment encodes");
	let decoded = codec.decode(&bytes).expect("payment decodes");
	assert_eq!(decoded["TransactionType"], json!("Payment"));
	assert_eq!(decoded["Account"], json!(ACCOUNT));
	assert_eq!(decoded["Flags"], json!(2147483648_u32));
	assert_eq!(codec.encode(&decoded).expect("decoded tree re-encodes"), bytes);
}

#[test]
fn signing_drops_signature_fields() {
	let mut tx = payment();
	tx["SigningPubKey"] = json!(PUBKEY);
	tx["TxnSignature"] = json!("3044022000");

	let codec = Codec::builtin();
	let full = codec.encode(&tx).expect("encodes");
	let signing = codec.encode_for_signing(&tx, SigningMode::Single).expect("signing encodes");
	assert_eq!(&signing[..4], b"STX\0");
	assert!(signing.len() < full.len() + 4);

	let mut unsigned = tx.clone();
	unsigned.as_object_mut().expect("object").remove("TxnSignature");
	assert_eq!(signing[4..], codec.encode(&unsigned).expect("encodes")[..]);

	let multi = codec.encode_for_signing(&tx, SigningMode::Multi).expect("multi encodes");
	assert_eq!(&multi[..4], b"SMT\0");
	assert_eq!(multi[4..], signing[4..]);
}

#[test]
fn multisigning_appends_signer_account() {
	let tx = json!({
		"Account": ACCOUNT,
		"Destination": GENESIS,
		"Amount": "1000",
		"Fee": "10",
		"Sequence": 1,
		"SigningPubKey": "",
	});
	let bytes = Codec::builtin().encode_for_multisigning(&tx, GENESIS).expect("multisign encodes");
	assert_eq!(
		encode_hex(&bytes),
		"534D540024000000016140000000000003E868400000000000000A730081145B812C9D57731E27A2DA8B1830195F88EF32A3B68314B5F762798A53D543A014CAF8B297CFF8F2F937E8B5F762798A53D543A014CAF8B297CFF8F2F937E8"
	);
}

#[test]
fn multisigning_requires_empty_signing_key() {
	let codec = Codec::builtin();
	let err = codec.encode_for_multisigning(&payment(), GENESIS).expect_err("key missing");
	assert!(matches!(err, CodecError::InvalidMultisign { .. }));

	let mut tx = payment();
	tx["SigningPubKey"] = json!(PUBKEY);
	let err = codec.encode_for_multisigning(&tx, GENESIS).expect_err("key present");
	assert!(matches!(err, CodecError::InvalidMultisign { .. }));
}

#[test]
fn claim_payload_layout() {
	let claim = json!({
		"channel": "43904CBFCDCEC530B4037871F86EE90BF799DF8D2E0EA564BC8A3F332E4F5FB1",
		"amount": "1000",
	});
	let bytes = Codec::builtin().encode_for_signing_claim(&claim).expect("claim encodes");
	assert_eq!(
		encode_hex(&bytes),
		"434C4D0043904CBFCDCEC530B4037871F86EE90BF799DF8D2E0EA564BC8A3F332E4F5FB100000000000003E8"
	);
}

#[test]
fn transaction_id_hashes_prefixed_encoding() {
	let codec = Codec::builtin();
	let id = codec.transaction_id(&payment()).expect("id computes");
	assert_eq!(id.to_string(), "AE830FF16D9F473F6ED20FA6FA5BB88BFAF97664B04E21F1CE0E5EF6BA832660");

	let body = codec.encode(&payment()).expect("encodes");
	assert_eq!(id, sha512_half(&[&HashPrefix::TransactionId.bytes()[..], &body[..]]));
}

#[test]
fn strict_option_flows_into_decode() {
	// Sequence written before Flags.
	let bytes = [0x24, 0, 0, 0, 1, 0x22, 0, 0, 0, 0];
	Codec::builtin().decode(&bytes).expect("lenient by default");

	let strict = Codec::builtin().with_options(CodecOptions {
		decode: DecodeOptions::strict(),
		..CodecOptions::default()
	});
	assert!(matches!(strict.decode(&bytes), Err(CodecError::NonCanonicalOrder { .. })));
}

#[test]
fn explicit_registry_is_usable() {
	let defs = Definitions::builtin();
	let address = crate::codec::types::ClassicAddressCodec;
	let codec = Codec::new(defs, &address);
	assert_eq!(codec.encode(&json!({ "Sequence": 1 })).expect("encodes"), [0x24, 0, 0, 0, 1]);
}

#[test]
fn codec_is_shareable_across_threads() {
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<Codec<'static>>();
	assert_send_sync::<Definitions>();
}
