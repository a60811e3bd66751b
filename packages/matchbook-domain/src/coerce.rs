//! Shared value conversions used by every source family.
//!
//! Each source declares its own date format, but the truthy/falsy vocabulary and the tolerant
//! numeric grammar are fixed here and nowhere else.

use std::fmt;

use time::{
	Date,
	error::InvalidFormatDescription,
	format_description::{self, OwnedFormatItem},
};

pub const TRUTHY: [&str; 5] = ["true", "t", "1", "y", "yes"];
pub const FALSY: [&str; 5] = ["false", "f", "0", "n", "no"];

/// A compiled `time` format description.
#[derive(Clone)]
pub struct DateFormat {
	description: String,
	items: OwnedFormatItem,
}
impl DateFormat {
	pub fn parse(description: &str) -> Result<Self, InvalidFormatDescription> {
		let items = format_description::parse_owned::<2>(description)?;

		Ok(Self { description: description.to_string(), items })
	}

	pub fn description(&self) -> &str {
		&self.description
	}
}
impl fmt::Debug for DateFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("DateFormat").field(&self.description).finish()
	}
}

/// Maps the shared vocabulary to a boolean. Anything outside it, including empty text, is null.
pub fn canonical_bool(raw: &str) -> Option<bool> {
	let text = raw.trim();

	if text.is_empty() {
		return None;
	}
	if TRUTHY.iter().any(|token| text.eq_ignore_ascii_case(token)) {
		return Some(true);
	}
	if FALSY.iter().any(|token| text.eq_ignore_ascii_case(token)) {
		return Some(false);
	}

	None
}

/// Parses a calendar date. Time-of-day components in the format are consumed and discarded.
pub fn parse_date(raw: &str, format: &DateFormat) -> Option<Date> {
	let text = raw.trim();

	if text.is_empty() {
		return None;
	}

	Date::parse(text, &format.items).ok()
}

/// Parses money-like text such as `$1,250,000`, ` 3200000.00 ` or `(4,000)`.
pub fn parse_amount(raw: &str) -> Option<f64> {
	let text = raw.trim();
	let (negative, text) = match text.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
		Some(inner) => (true, inner),
		None => (false, text),
	};
	let cleaned: String =
		text.chars().filter(|ch| !matches!(ch, '$' | ',' | '_') && !ch.is_whitespace()).collect();

	if cleaned.is_empty() {
		return None;
	}

	let value = cleaned.parse::<f64>().ok().filter(|value| value.is_finite())?;

	Some(if negative { -value } else { value })
}

/// Like [`parse_amount`], but negative values are treated as unknown.
/// Negative amounts are not meaningful for raises, prices or assets.
pub fn non_negative(value: Option<f64>) -> Option<f64> {
	value.filter(|value| *value >= 0.0)
}

/// Whole, non-negative numbers only.
pub fn count_from(value: Option<f64>) -> Option<i64> {
	let value = value?;

	if value < 0.0 || value.fract() != 0.0 || value > i64::MAX as f64 {
		return None;
	}

	Some(value as i64)
}

pub fn non_empty(raw: &str) -> Option<String> {
	let text = raw.trim();

	if text.is_empty() { None } else { Some(text.to_string()) }
}
