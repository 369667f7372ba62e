//! Currency amounts.
//!
//! An amount starts with a 64-bit value word:
//!
//! - bit 63: issued-currency discriminator (0 = native drops)
//! - bit 62: sign, 1 = non-negative
//! - native: bits 61..0 hold the drop count
//! - issued: bits 61..54 hold `exponent + 97`, bits 53..0 the normalized mantissa
//!
//! Issued amounts are followed by a 20-byte currency and a 20-byte issuer. All decimal
//! handling is exact: sign, integer mantissa, integer exponent.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value as Json};

use crate::codec::bytes::Cursor;
use crate::codec::types::{AccountId, AddressCodec, Currency};
use crate::codec::{CodecError, Result};


/// Total native supply in drops; no native amount may exceed it.
pub const MAX_DROPS: u64 = 100_000_000_000_000_000;
/// Smallest exponent of a normalized issued value.
pub const MIN_EXPONENT: i32 = -96;
/// Largest exponent of a normalized issued value.
pub const MAX_EXPONENT: i32 = 80;
/// Smallest normalized mantissa.
pub const MIN_MANTISSA: u64 = 1_000_000_000_000_000;
/// Largest normalized mantissa.
pub const MAX_MANTISSA: u64 = 9_999_999_999_999_999;

const EXPONENT_BIAS: i32 = 97;
const ISSUED_BIT: u64 = 1 << 63;
const POSITIVE_BIT: u64 = 1 << 62;
const NATIVE_MASK: u64 = POSITIVE_BIT - 1;
const MANTISSA_MASK: u64 = (1 << 54) - 1;
const MAX_SIGNIFICANT_DIGITS: usize = 16;
const EXPONENT_CLAMP: i64 = 1_000_000;

/// Signed decimal value of an issued-currency amount.
///
/// Non-zero values always carry a 16-digit mantissa; zero has a single representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssuedValue {
	negative: bool,
	mantissa: u64,
	exponent: i32,
}

impl IssuedValue {
	/// Canonical zero.
	pub const ZERO: Self = Self {
		negative: false,
		mantissa: 0,
		exponent: 0,
	};

	/// Normalize `(-1)^negative * mantissa * 10^exponent`.
	pub fn new(negative: bool, mantissa: u64, exponent: i32) -> Result<Self> {
		normalize(negative, mantissa, i64::from(exponent), || {
			format!("{}{mantissa}e{exponent}", if negative { "-" } else { "" })
		})
	}

	/// Parse decimal text such as `"-1.25"`, `"100"`, or `"1e-20"`.
	pub fn parse(text: &str) -> Result<Self> {
		let invalid = |reason| CodecError::InvalidAmount {
			value: text.to_owned(),
			reason,
		};

		let (negative, rest) = match text.as_bytes().first() {
			Some(b'-') => (true, &text[1..]),
			Some(b'+') => (false, &text[1..]),
			_ => (false, text),
		};
		let (number, exponent_text) = match rest.find(['e', 'E']) {
			Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
			None => (rest, None),
		};
		let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));

		if int_part.is_empty() && frac_part.is_empty() {
			return Err(invalid("missing digits"));
		}
		if !int_part.bytes().chain(frac_part.bytes()).all(|byte| byte.is_ascii_digit()) {
			return Err(invalid("unexpected character"));
		}

		let mut exponent = match exponent_text {
			Some(item) => parse_exponent(item).ok_or_else(|| invalid("malformed exponent"))?,
			None => 0,
		};
		exponent -= frac_part.len() as i64;

		let digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).skip_while(|byte| *byte == b'0').collect();
		let trailing = digits.iter().rev().take_while(|byte| **byte == b'0').count();
		let significant = &digits[..digits.len() - trailing];
		if significant.is_empty() {
			return Ok(Self::ZERO);
		}
		if significant.len() > MAX_SIGNIFICANT_DIGITS {
			return Err(CodecError::PrecisionLoss { value: text.to_owned() });
		}

		let mantissa = significant.iter().fold(0_u64, |acc, byte| acc * 10 + u64::from(byte - b'0'));
		normalize(negative, mantissa, exponent + trailing as i64, || text.to_owned())
	}

	/// Whether the value is zero.
	pub fn is_zero(&self) -> bool {
		self.mantissa == 0
	}

	/// Whether the value is strictly negative.
	pub fn is_negative(&self) -> bool {
		self.negative
	}

	/// Normalized mantissa (0 for zero).
	pub fn mantissa(&self) -> u64 {
		self.mantissa
	}

	/// Normalized exponent (0 for zero).
	pub fn exponent(&self) -> i32 {
		self.exponent
	}

	/// Pack into the 64-bit value word.
	pub fn to_bits(&self) -> u64 {
		if self.is_zero() {
			return ISSUED_BIT;
		}
		let sign = if self.negative { 0 } else { POSITIVE_BIT };
		ISSUED_BIT | sign | (((self.exponent + EXPONENT_BIAS) as u64) << 54) | self.mantissa
	}

	/// Unpack a 64-bit value word, rejecting non-canonical forms.
	pub fn from_bits(bits: u64) -> Result<Self> {
		let out_of_range = || CodecError::AmountOutOfRange {
			value: format!("0x{bits:016X}"),
		};
		if bits & ISSUED_BIT == 0 {
			return Err(out_of_range());
		}

		let mantissa = bits & MANTISSA_MASK;
		if mantissa == 0 {
			return if bits == ISSUED_BIT { Ok(Self::ZERO) } else { Err(out_of_range()) };
		}

		let exponent = ((bits >> 54) & 0xFF) as i32 - EXPONENT_BIAS;
		if !(MIN_MANTISSA..=MAX_MANTISSA).contains(&mantissa) || !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
			return Err(out_of_range());
		}

		Ok(Self {
			negative: bits & POSITIVE_BIT == 0,
			mantissa,
			exponent,
		})
	}
}

impl FromStr for IssuedValue {
	type Err = CodecError;

	fn from_str(text: &str) -> Result<Self> {
		Self::parse(text)
	}
}

impl fmt::Display for IssuedValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_zero() {
			return f.write_str("0");
		}
		if self.negative {
			f.write_str("-")?;
		}

		if self.exponent != 0 && !(-25..=-5).contains(&self.exponent) {
			let (mut mantissa, mut exponent) = (self.mantissa, self.exponent);
			while mantissa % 10 == 0 {
				mantissa /= 10;
				exponent += 1;
			}
			return write!(f, "{mantissa}e{exponent}");
		}

		let digits = self.mantissa.to_string();
		let point = digits.len() as i32 + self.exponent;
		let (int_part, frac_part) = if point > 0 {
			let (int_part, frac_part) = digits.split_at(point as usize);
			(int_part.to_owned(), frac_part.to_owned())
		} else {
			("0".to_owned(), format!("{}{digits}", "0".repeat((-point) as usize)))
		};

		let frac_part = frac_part.trim_end_matches('0');
		if frac_part.is_empty() {
			f.write_str(&int_part)
		} else {
			write!(f, "{int_part}.{frac_part}")
		}
	}
}

/// The 64-bit value word of an amount, without currency or issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmountValue {
	/// Native currency, in drops.
	NativeDrops(u64),
	/// Issued-currency decimal value.
	Issued(IssuedValue),
}

/// Encode the 64-bit value word.
pub fn encode_amount(value: &AmountValue) -> Result<[u8; 8]> {
	let bits = match value {
		AmountValue::NativeDrops(drops) => {
			if *drops > MAX_DROPS {
				return Err(CodecError::AmountOutOfRange { value: drops.to_string() });
			}
			POSITIVE_BIT | drops
		}
		AmountValue::Issued(value) => value.to_bits(),
	};
	Ok(bits.to_be_bytes())
}

/// Decode the 64-bit value word.
pub fn decode_amount(bits: u64) -> Result<AmountValue> {
	if bits & ISSUED_BIT != 0 {
		return IssuedValue::from_bits(bits).map(AmountValue::Issued);
	}

	let drops = bits & NATIVE_MASK;
	if bits & POSITIVE_BIT == 0 && drops != 0 {
		return Err(CodecError::NegativeDrops { value: format!("-{drops}") });
	}
	if drops > MAX_DROPS {
		return Err(CodecError::AmountOutOfRange { value: drops.to_string() });
	}
	Ok(AmountValue::NativeDrops(drops))
}

/// Parse a native amount given as a decimal drop count.
pub fn parse_drops(text: &str) -> Result<u64> {
	if text.starts_with('-') {
		return Err(CodecError::NegativeDrops { value: text.to_owned() });
	}
	if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
		return Err(CodecError::InvalidAmount {
			value: text.to_owned(),
			reason: "native amounts are whole drops",
		});
	}

	let drops = text.parse::<u64>().map_err(|_| CodecError::AmountOutOfRange { value: text.to_owned() })?;
	if drops > MAX_DROPS {
		return Err(CodecError::AmountOutOfRange { value: text.to_owned() });
	}
	Ok(drops)
}

/// Field-level amount: a native drop count or an issued value with its currency and issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amount {
	/// Native currency, in drops.
	Native(u64),
	/// Issued currency.
	Issued {
		/// Decimal value.
		value: IssuedValue,
		/// Currency code; never the native currency.
		currency: Currency,
		/// Issuing account.
		issuer: AccountId,
	},
}

impl Amount {
	/// The 64-bit value word.
	pub fn value(&self) -> AmountValue {
		match self {
			Self::Native(drops) => AmountValue::NativeDrops(*drops),
			Self::Issued { value, .. } => AmountValue::Issued(*value),
		}
	}

	pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		match decode_amount(cursor.read_u64()?)? {
			AmountValue::NativeDrops(drops) => Ok(Self::Native(drops)),
			AmountValue::Issued(value) => {
				let currency = Currency::read(cursor)?;
				if currency.is_xrp() {
					return Err(CodecError::InvalidCurrency { code: currency.to_string() });
				}
				let issuer = AccountId::read(cursor)?;
				Ok(Self::Issued { value, currency, issuer })
			}
		}
	}

	pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
		out.extend_from_slice(&encode_amount(&self.value())?);
		if let Self::Issued { currency, issuer, .. } = self {
			if currency.is_xrp() {
				return Err(CodecError::InvalidCurrency { code: currency.to_string() });
			}
			currency.write(out);
			issuer.write(out);
		}
		Ok(())
	}

	pub(crate) fn from_json(field: &str, json: &Json, address: &dyn AddressCodec) -> Result<Self> {
		let mismatch = || CodecError::TypeMismatch {
			field: field.to_owned(),
			expected: "drops string or {currency, issuer, value} object",
		};

		match json {
			Json::String(text) => Ok(Self::Native(parse_drops(text)?)),
			Json::Object(map) => {
				if map.len() != 3 {
					return Err(mismatch());
				}
				let member = |key: &str| map.get(key).and_then(Json::as_str).ok_or_else(mismatch);

				let currency = Currency::from_code(member("currency")?)?;
				if currency.is_xrp() {
					return Err(CodecError::InvalidCurrency { code: "XRP".to_owned() });
				}
				Ok(Self::Issued {
					value: IssuedValue::parse(member("value")?)?,
					currency,
					issuer: address.parse_account(field, member("issuer")?)?,
				})
			}
			_ => Err(mismatch()),
		}
	}

	pub(crate) fn to_json(&self, address: &dyn AddressCodec) -> Json {
		match self {
			Self::Native(drops) => Json::String(drops.to_string()),
			Self::Issued { value, currency, issuer } => {
				let mut map = Map::new();
				map.insert("currency".to_owned(), Json::String(currency.to_string()));
				map.insert("issuer".to_owned(), Json::String(address.encode_account_id(issuer)));
				map.insert("value".to_owned(), Json::String(value.to_string()));
				Json::Object(map)
			}
		}
	}
}

fn normalize(negative: bool, mut mantissa: u64, mut exponent: i64, text: impl Fn() -> String) -> Result<IssuedValue> {
	if mantissa == 0 {
		return Ok(IssuedValue::ZERO);
	}

	while mantissa > MAX_MANTISSA {
		if mantissa % 10 != 0 {
			return Err(CodecError::PrecisionLoss { value: text() });
		}
		mantissa /= 10;
		exponent += 1;
	}
	while mantissa < MIN_MANTISSA {
		mantissa *= 10;
		exponent -= 1;
	}

	if !(i64::from(MIN_EXPONENT)..=i64::from(MAX_EXPONENT)).contains(&exponent) {
		return Err(CodecError::AmountOutOfRange { value: text() });
	}

	Ok(IssuedValue {
		negative,
		mantissa,
		exponent: exponent as i32,
	})
}

fn parse_exponent(text: &str) -> Option<i64> {
	let (negative, digits) = match text.as_bytes().first() {
		Some(b'-') => (true, &text[1..]),
		Some(b'+') => (false, &text[1..]),
		_ => (false, text),
	};
	if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}

	// Out of range whatever the mantissa.
	let magnitude = digits.parse::<i64>().unwrap_or(EXPONENT_CLAMP).min(EXPONENT_CLAMP);
	Some(if negative { -magnitude } else { magnitude })
}
