//! Payment path sets.
//!
//! Steps are self-describing: a type byte announces which of account, currency, and issuer
//! follow. Paths are separated by `0xFF` and the set ends with `0x00`.

use serde_json::{Map, Value as Json};

use crate::codec::bytes::Cursor;
use crate::codec::types::account::{AccountId, AddressCodec};
use crate::codec::types::currency::Currency;
use crate::codec::{CodecError, Result};

/// Step carries an account.
pub const STEP_ACCOUNT: u8 = 0x01;
/// Step carries a currency.
pub const STEP_CURRENCY: u8 = 0x10;
/// Step carries an issuer.
pub const STEP_ISSUER: u8 = 0x20;
/// Separator between two paths.
pub const PATH_SEPARATOR: u8 = 0xFF;
/// Terminator of the whole set.
pub const PATHSET_END: u8 = 0x00;

const STEP_MASK: u8 = STEP_ACCOUNT | STEP_CURRENCY | STEP_ISSUER;

/// One hop of a payment path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathStep {
	/// Rippling account.
	pub account: Option<AccountId>,
	/// Currency to convert into.
	pub currency: Option<Currency>,
	/// Issuer of that currency.
	pub issuer: Option<AccountId>,
}

impl PathStep {
	/// Type byte announcing which components follow.
	pub fn type_byte(&self) -> u8 {
		let mut flags = 0;
		if self.account.is_some() {
			flags |= STEP_ACCOUNT;
		}
		if self.currency.is_some() {
			flags |= STEP_CURRENCY;
		}
		if self.issuer.is_some() {
			flags |= STEP_ISSUER;
		}
		flags
	}
}

/// Ordered sequence of steps.
pub type Path = Vec<PathStep>;

/// Ordered sequence of paths.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSet(pub Vec<Path>);

impl PathSet {
	pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let mut paths = Vec::new();
		let mut current = Vec::new();

		loop {
			let flags = cursor.read_u8()?;
			match flags {
				PATHSET_END => {
					if current.is_empty() {
						if !paths.is_empty() {
							return Err(CodecError::InvalidPathStep { flags });
						}
					} else {
						paths.push(current);
					}
					return Ok(Self(paths));
				}
				// Every path between separators holds at least one step.
				PATH_SEPARATOR if current.is_empty() => return Err(CodecError::InvalidPathStep { flags }),
				PATH_SEPARATOR => paths.push(std::mem::take(&mut current)),
				_ if flags & !STEP_MASK != 0 => return Err(CodecError::InvalidPathStep { flags }),
				_ => {
					let account = if flags & STEP_ACCOUNT != 0 { Some(AccountId::read(cursor)?) } else { None };
					let currency = if flags & STEP_CURRENCY != 0 { Some(Currency::read(cursor)?) } else { None };
					let issuer = if flags & STEP_ISSUER != 0 { Some(AccountId::read(cursor)?) } else { None };
					current.push(PathStep { account, currency, issuer });
				}
			}
		}
	}

	pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
		for (idx, path) in self.0.iter().enumerate() {
			if path.is_empty() {
				return Err(CodecError::InvalidPathStep { flags: PATHSET_END });
			}
			if idx > 0 {
				out.push(PATH_SEPARATOR);
			}
			for step in path {
				let flags = step.type_byte();
				if flags == 0 {
					return Err(CodecError::InvalidPathStep { flags });
				}
				out.push(flags);
				if let Some(account) = &step.account {
					account.write(out);
				}
				if let Some(currency) = &step.currency {
					currency.write(out);
				}
				if let Some(issuer) = &step.issuer {
					issuer.write(out);
				}
			}
		}
		out.push(PATHSET_END);
		Ok(())
	}

	/// Parse `[[{"account": ..., "currency": ..., "issuer": ...}, ...], ...]`.
	///
	/// Informational `type`/`type_hex` members are ignored; they are implied by the
	/// components present.
	pub(crate) fn from_json(field: &str, json: &Json, address: &dyn AddressCodec) -> Result<Self> {
		let mismatch = || CodecError::TypeMismatch {
			field: field.to_owned(),
			expected: "array of paths of step objects",
		};

		let paths = json.as_array().ok_or_else(mismatch)?;
		let mut out = Vec::with_capacity(paths.len());
		for path in paths {
			let steps = path.as_array().ok_or_else(mismatch)?;
			let mut parsed = Vec::with_capacity(steps.len());
			for step in steps {
				let step = step.as_object().ok_or_else(mismatch)?;
				parsed.push(PathStep {
					account: step_member(field, step, "account")?.map(|item| address.parse_account(field, item)).transpose()?,
					currency: step_member(field, step, "currency")?.map(Currency::from_code).transpose()?,
					issuer: step_member(field, step, "issuer")?.map(|item| address.parse_account(field, item)).transpose()?,
				});
			}
			out.push(parsed);
		}
		Ok(Self(out))
	}

	pub(crate) fn to_json(&self, address: &dyn AddressCodec) -> Json {
		let paths = self.0.iter().map(|path| {
			let steps = path.iter().map(|step| {
				let mut map = Map::new();
				if let Some(account) = &step.account {
					map.insert("account".to_owned(), Json::String(address.encode_account_id(account)));
				}
				if let Some(currency) = &step.currency {
					map.insert("currency".to_owned(), Json::String(currency.to_string()));
				}
				if let Some(issuer) = &step.issuer {
					map.insert("issuer".to_owned(), Json::String(address.encode_account_id(issuer)));
				}
				Json::Object(map)
			});
			Json::Array(steps.collect())
		});
		Json::Array(paths.collect())
	}
}

fn step_member<'a>(field: &str, step: &'a Map<String, Json>, key: &str) -> Result<Option<&'a str>> {
	match step.get(key) {
		None => Ok(None),
		Some(Json::String(text)) => Ok(Some(text)),
		Some(_) => Err(CodecError::TypeMismatch {
			field: field.to_owned(),
			expected: "path step members as strings",
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::{PathSet, PathStep};
	use crate::codec::CodecError;
	use crate::codec::bytes::Cursor;
	use crate::codec::types::{AccountId, Currency};

	fn sample() -> PathSet {
		let usd = Currency::from_code("USD").expect("USD");
		PathSet(vec![
			vec![PathStep {
				account: Some(AccountId([1; 20])),
				..PathStep::default()
			}],
			vec![
				PathStep {
					currency: Some(usd),
					issuer: Some(AccountId([2; 20])),
					..PathStep::default()
				},
				PathStep {
					currency: Some(Currency::XRP),
					..PathStep::default()
				},
			],
		])
	}

	#[test]
	fn layout_uses_separator_and_terminator() {
		let mut out = Vec::new();
		sample().write(&mut out).expect("path set writes");

		assert_eq!(out[0], 0x01);
		assert_eq!(out[21], 0xFF);
		assert_eq!(out[22], 0x30);
		assert_eq!(out[63], 0x10);
		assert_eq!(out.len(), 1 + 20 + 1 + 1 + 40 + 1 + 20 + 1);
		assert_eq!(out.last(), Some(&0x00));
	}

	#[test]
	fn reads_back_written_set() {
		let mut out = Vec::new();
		sample().write(&mut out).expect("path set writes");
		let mut cursor = Cursor::new(&out);
		assert_eq!(PathSet::read(&mut cursor).expect("path set reads"), sample());
		assert!(cursor.is_empty());
	}

	#[test]
	fn rejects_unknown_step_bits() {
		let err = PathSet::read(&mut Cursor::new(&[0x02, 0x00])).expect_err("0x02 is not a step type");
		assert!(matches!(err, CodecError::InvalidPathStep { flags: 0x02 }));
	}

	#[test]
	fn missing_terminator_is_truncation() {
		let err = PathSet::read(&mut Cursor::new(&[0x01, 0xAA])).expect_err("account is cut short");
		assert!(matches!(err, CodecError::TruncatedBuffer { .. }));
	}

	#[test]
	fn empty_set_is_just_the_terminator() {
		assert_eq!(PathSet::read(&mut Cursor::new(&[0x00])).expect("empty set reads"), PathSet::default());
	}

	#[test]
	fn separators_must_enclose_steps() {
		let step = |bytes: &mut Vec<u8>| {
			bytes.push(0x10);
			bytes.extend_from_slice(&[0; 20]);
		};

		let mut leading = vec![0xFF];
		step(&mut leading);
		leading.push(0x00);

		let mut doubled = Vec::new();
		step(&mut doubled);
		doubled.extend_from_slice(&[0xFF, 0xFF]);
		step(&mut doubled);
		doubled.push(0x00);

		let mut trailing = Vec::new();
		step(&mut trailing);
		trailing.extend_from_slice(&[0xFF, 0x00]);

		for (name, bytes) in [("leading", leading), ("doubled", doubled), ("trailing", trailing), ("bare", vec![0xFF, 0x00])] {
			let err = PathSet::read(&mut Cursor::new(&bytes)).expect_err(name);
			assert!(matches!(err, CodecError::InvalidPathStep { .. }), "{name}: {err}");
		}
	}

	#[test]
	fn rejects_empty_path_and_empty_step() {
		let mut out = Vec::new();
		assert!(PathSet(vec![vec![]]).write(&mut out).is_err());
		assert!(PathSet(vec![vec![PathStep::default()]]).write(&mut out).is_err());
	}
}
