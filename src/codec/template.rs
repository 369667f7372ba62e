//! Inner-object and array membership rules.
//!
//! Known wrapper objects only admit their own members, and known arrays only admit their
//! own wrapper objects. Containers without an entry accept any serialized field.

use crate::codec::definitions::FieldInfo;
use crate::codec::{CodecError, Result};

const TEMPLATES: &[(&str, &[&str])] = &[
	("Memo", &["MemoType", "MemoData", "MemoFormat"]),
	("Signer", &["Account", "SigningPubKey", "TxnSignature"]),
	("SignerEntry", &["Account", "SignerWeight", "WalletLocator"]),
	("Majority", &["Amendment", "CloseTime"]),
	("DisabledValidator", &["PublicKey", "FirstLedgerSequence"]),
	("NFToken", &["NFTokenID", "URI"]),
	("HookParameter", &["HookParameterName", "HookParameterValue"]),
	("HookGrant", &["HookHash", "Authorize"]),
	("Memos", &["Memo"]),
	("Signers", &["Signer"]),
	("SignerEntries", &["SignerEntry"]),
	("Majorities", &["Majority"]),
	("DisabledValidators", &["DisabledValidator"]),
	("NFTokens", &["NFToken"]),
	("HookParameters", &["HookParameter"]),
	("HookGrants", &["HookGrant"]),
];

/// Members admitted by `container`, or `None` when it is unrestricted.
pub fn allowed_members(container: &str) -> Option<&'static [&'static str]> {
	TEMPLATES.iter().find(|(name, _)| *name == container).map(|(_, members)| *members)
}

/// Check that `member` may appear directly inside `container` (`None` = top level).
pub fn check_member(container: Option<&FieldInfo>, member: &FieldInfo) -> Result<()> {
	let Some(container) = container else {
		return Ok(());
	};
	match allowed_members(&container.name) {
		Some(members) if !members.contains(&member.name.as_ref()) => Err(CodecError::IllegalField {
			field: member.name.to_string(),
			container: container.name.to_string(),
		}),
		_ => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use super::{allowed_members, check_member};
	use crate::codec::{CodecError, Definitions};

	#[test]
	fn memo_admits_only_memo_members() {
		let defs = Definitions::builtin();
		let memo = defs.lookup_by_name("Memo").expect("Memo");
		check_member(Some(memo), defs.lookup_by_name("MemoData").expect("MemoData")).expect("MemoData is legal");

		let err = check_member(Some(memo), defs.lookup_by_name("Fee").expect("Fee")).expect_err("Fee is not a memo member");
		assert!(matches!(err, CodecError::IllegalField { field, container } if field == "Fee" && container == "Memo"));
	}

	#[test]
	fn arrays_admit_their_wrapper() {
		let defs = Definitions::builtin();
		let memos = defs.lookup_by_name("Memos").expect("Memos");
		check_member(Some(memos), defs.lookup_by_name("Memo").expect("Memo")).expect("Memo belongs in Memos");
		assert!(check_member(Some(memos), defs.lookup_by_name("Signer").expect("Signer")).is_err());
	}

	#[test]
	fn unknown_containers_and_top_level_are_open() {
		let defs = Definitions::builtin();
		assert!(allowed_members("CreatedNode").is_none());
		check_member(None, defs.lookup_by_name("Fee").expect("Fee")).expect("top level is open");
	}
}
