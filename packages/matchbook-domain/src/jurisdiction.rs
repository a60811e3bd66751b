use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// An adviser notice-filed in at least this many jurisdictions is treated as having no state
/// restriction.
pub const NATIONWIDE_MIN_JURISDICTIONS: usize = 45;

const NORTHEAST: [&str; 9] = ["CT", "MA", "ME", "NH", "NJ", "NY", "PA", "RI", "VT"];
const MIDWEST: [&str; 12] =
	["IA", "IL", "IN", "KS", "MI", "MN", "MO", "ND", "NE", "OH", "SD", "WI"];
const SOUTH: [&str; 17] = [
	"AL", "AR", "DC", "DE", "FL", "GA", "KY", "LA", "MD", "MS", "NC", "OK", "SC", "TN", "TX", "VA",
	"WV",
];
const WEST: [&str; 13] =
	["AK", "AZ", "CA", "CO", "HI", "ID", "MT", "NM", "NV", "OR", "UT", "WA", "WY"];
const TERRITORIES: [&str; 5] = ["AS", "GU", "MP", "PR", "VI"];

/// US Census Bureau regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
	Northeast,
	Midwest,
	South,
	West,
}

/// An ordered set of two-letter jurisdiction codes. Serializes as sorted, comma-separated codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct JurisdictionSet(BTreeSet<String>);
impl JurisdictionSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_codes<I, S>(codes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut set = Self::new();

		for code in codes {
			set.insert(code.as_ref());
		}

		set
	}

	/// Inverse of [`JurisdictionSet::to_canonical`]. Unknown codes are dropped.
	pub fn parse_canonical(raw: &str) -> Self {
		Self::from_codes(raw.split(','))
	}

	/// Returns `false` when the code is not a known US jurisdiction.
	pub fn insert(&mut self, code: &str) -> bool {
		match normalize_code(code) {
			Some(code) => {
				self.0.insert(code);

				true
			},
			None => false,
		}
	}

	pub fn contains(&self, code: &str) -> bool {
		normalize_code(code).map(|code| self.0.contains(&code)).unwrap_or(false)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
		self.iter().filter_map(region_of)
	}

	pub fn to_canonical(&self) -> String {
		self.iter().collect::<Vec<_>>().join(",")
	}
}
impl fmt::Display for JurisdictionSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_canonical())
	}
}
impl From<JurisdictionSet> for String {
	fn from(set: JurisdictionSet) -> Self {
		set.to_canonical()
	}
}
impl From<String> for JurisdictionSet {
	fn from(raw: String) -> Self {
		Self::parse_canonical(&raw)
	}
}

/// Uppercases and validates a code against the US state, DC and territory list.
pub fn normalize_code(raw: &str) -> Option<String> {
	let code = raw.trim().to_ascii_uppercase();

	if is_us_jurisdiction(&code) { Some(code) } else { None }
}

pub fn is_us_jurisdiction(code: &str) -> bool {
	region_of(code).is_some() || TERRITORIES.contains(&code)
}

/// Territories have no census region.
pub fn region_of(code: &str) -> Option<Region> {
	if NORTHEAST.contains(&code) {
		Some(Region::Northeast)
	} else if MIDWEST.contains(&code) {
		Some(Region::Midwest)
	} else if SOUTH.contains(&code) {
		Some(Region::South)
	} else if WEST.contains(&code) {
		Some(Region::West)
	} else {
		None
	}
}
