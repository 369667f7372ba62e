use crate::codec::definitions::FieldInfo;
use crate::codec::value::FieldValue;
use crate::codec::{CodecError, Result};

/// Sort members into canonical `(type_code, nth)` order, rejecting duplicates.
pub fn canonicalize(fields: &mut [FieldValue<'_>]) -> Result<()> {
	fields.sort_by_key(|item| item.field.sort_key());
	reject_duplicates(fields.iter().map(|item| item.field))
}

/// Canonical order of borrowed members, leaving the source untouched.
pub fn canonical_order<'a, 'd>(fields: &'a [FieldValue<'d>]) -> Result<Vec<&'a FieldValue<'d>>> {
	let mut sorted: Vec<&FieldValue<'d>> = fields.iter().collect();
	sorted.sort_by_key(|item| item.field.sort_key());
	reject_duplicates(sorted.iter().map(|item| item.field))?;
	Ok(sorted)
}

/// Require `next` to sort strictly after `prev`.
pub fn check_order(prev: &FieldInfo, next: &FieldInfo) -> Result<()> {
	if prev.sort_key() < next.sort_key() {
		return Ok(());
	}
	if prev.sort_key() == next.sort_key() {
		return Err(CodecError::DuplicateField {
			field: next.name.to_string(),
		});
	}
	Err(CodecError::NonCanonicalOrder {
		field: next.name.to_string(),
		previous: prev.name.to_string(),
	})
}

fn reject_duplicates<'d>(mut sorted: impl Iterator<Item = &'d FieldInfo>) -> Result<()> {
	let Some(mut prev) = sorted.next() else {
		return Ok(());
	};
	for next in sorted {
		if prev.sort_key() == next.sort_key() {
			return Err(CodecError::DuplicateField {
				field: next.name.to_string(),
			});
		}
		prev = next;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::{canonical_order, canonicalize, check_order};
	use crate::codec::value::{FieldValue, Value};
	use crate::codec::{CodecError, Definitions};

	fn member(name: &str) -> FieldValue<'static> {
		let field = Definitions::builtin().lookup_by_name(name).expect("field exists");
		let value = match name {
			"TransactionType" => Value::UInt16(0),
			_ => Value::UInt32(1),
		};
		FieldValue { field, value }
	}

	fn names(fields: &[FieldValue<'_>]) -> Vec<String> {
		fields.iter().map(|item| item.field.name.to_string()).collect()
	}

	#[test]
	fn orders_by_type_then_nth() {
		let mut fields = vec![member("Sequence"), member("Flags"), member("TransactionType"), member("LastLedgerSequence")];
		canonicalize(&mut fields).expect("no duplicates");
		assert_eq!(names(&fields), ["TransactionType", "Flags", "Sequence", "LastLedgerSequence"]);
	}

	#[test]
	fn borrowed_order_matches_in_place_order() {
		let fields = vec![member("Sequence"), member("TransactionType"), member("Flags")];
		let order: Vec<_> = canonical_order(&fields)
			.expect("no duplicates")
			.into_iter()
			.map(|item| item.field.name.to_string())
			.collect();
		assert_eq!(order, ["TransactionType", "Flags", "Sequence"]);
		assert_eq!(names(&fields), ["Sequence", "TransactionType", "Flags"]);
	}

	#[test]
	fn duplicates_are_rejected() {
		let mut fields = vec![member("Sequence"), member("Sequence")];
		let err = canonicalize(&mut fields).expect_err("duplicate");
		assert!(matches!(err, CodecError::DuplicateField { field } if field == "Sequence"));
	}

	#[test]
	fn check_order_names_both_fields() {
		let defs = Definitions::builtin();
		let flags = defs.lookup_by_name("Flags").expect("Flags");
		let sequence = defs.lookup_by_name("Sequence").expect("Sequence");
		check_order(flags, sequence).expect("ascending");
		let err = check_order(sequence, flags).expect_err("descending");
		assert!(matches!(err, CodecError::NonCanonicalOrder { field, previous } if field == "Flags" && previous == "Sequence"));
	}
}
