use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that abort one source. Row-level problems are warnings, not errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Source {family} is missing declared columns: {}.", missing.join(", "))]
	SchemaDrift { family: String, missing: Vec<String> },
	#[error("Source {family} repeats natural key {key:?} at line {line}.")]
	DuplicateKey { family: String, key: String, line: u64 },
	#[error("Source {family} has an unusable date format: {message}")]
	DateFormat { family: String, message: String },
	#[error("Failed to open {}: {err}.", path.display())]
	Open {
		path: PathBuf,
		#[source]
		err: std::io::Error,
	},
	#[error(transparent)]
	Csv(#[from] csv::Error),
	#[error(transparent)]
	Pattern(#[from] regex::Error),
}
impl Error {
	/// Stable failure class for load reports.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::SchemaDrift { .. } => "schema_drift",
			Self::DuplicateKey { .. } => "duplicate_key",
			Self::DateFormat { .. } => "date_format",
			Self::Open { .. } => "open",
			Self::Csv(_) => "csv",
			Self::Pattern(_) => "pattern",
		}
	}
}
