use std::{fs::File, marker::PhantomData, path::Path};

use ahash::AHashSet;
use csv::{ByteRecord, ReaderBuilder};
use regex::Regex;
use serde::Serialize;
use time::Date;

use matchbook_config::{Encoding, SourceFile};
use matchbook_domain::{
	coerce::{self, DateFormat},
	jurisdiction::JurisdictionSet,
};

use crate::{
	Error, Result,
	layout::{Column, SourceLayout},
};

pub const MAX_WARNING_SAMPLES: usize = 20;

/// A recovered row-level problem. The offending value is replaced by null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowWarning {
	pub line: u64,
	pub column: String,
	pub value: String,
	pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceStats {
	pub family: String,
	pub table: String,
	pub rows_read: u64,
	pub rows_staged: u64,
	pub rows_skipped: u64,
	pub warnings: u64,
	pub warning_samples: Vec<RowWarning>,
}
impl SourceStats {
	fn record(&mut self, warning: RowWarning) {
		tracing::debug!(
			family = %self.family,
			line = warning.line,
			column = %warning.column,
			value = %warning.value,
			reason = %warning.reason,
			"Row value recovered as null."
		);

		self.warnings += 1;

		if self.warning_samples.len() < MAX_WARNING_SAMPLES {
			self.warning_samples.push(warning);
		}
	}
}

/// One source record, projected onto the declared columns.
pub struct Row<'a> {
	line: u64,
	columns: &'static [Column],
	cells: &'a [String],
	flags: &'a [(String, String)],
	date_format: Option<&'a DateFormat>,
	warnings: Vec<RowWarning>,
}
impl<'a> Row<'a> {
	/// Trimmed cell text; empty for an undeclared column.
	pub fn raw(&self, name: &str) -> &'a str {
		self.columns
			.iter()
			.position(|column| column.name == name)
			.and_then(|index| self.cells.get(index))
			.map(|cell| cell.trim())
			.unwrap_or("")
	}

	pub fn text(&self, name: &str) -> Option<String> {
		coerce::non_empty(self.raw(name))
	}

	/// A required natural-key component. Missing keys skip the row.
	pub fn key(&mut self, name: &str) -> Option<String> {
		let key = self.text(name);

		if key.is_none() {
			self.warn(name, "", "missing natural key");
		}

		key
	}

	pub fn key_integer(&mut self, name: &str) -> Option<i64> {
		let raw = self.raw(name);
		let key = raw.parse::<i64>().ok();

		if key.is_none() {
			self.warn(name, raw, "natural key is not an integer");
		}

		key
	}

	pub fn boolean(&mut self, name: &str) -> Option<bool> {
		let raw = self.raw(name);
		let value = coerce::canonical_bool(raw);

		if value.is_none() && !raw.is_empty() {
			self.warn(name, raw, "not a recognized boolean");
		}

		value
	}

	pub fn date(&mut self, name: &str) -> Option<Date> {
		let raw = self.raw(name);
		let format = self.date_format?;
		let value = coerce::parse_date(raw, format);

		if value.is_none() && !raw.is_empty() {
			let reason = format!("does not match date format {}", format.description());

			self.warn(name, raw, &reason);
		}

		value
	}

	pub fn number(&mut self, name: &str) -> Option<f64> {
		let raw = self.raw(name);
		let value = coerce::parse_amount(raw);

		if value.is_none() && !raw.is_empty() {
			self.warn(name, raw, "not a number");
		}

		value
	}

	/// Folds the wide flag columns into one set; a flag counts when it is truthy.
	pub fn flag_set(&self) -> JurisdictionSet {
		let mut set = JurisdictionSet::new();

		for (code, value) in self.flags {
			if coerce::canonical_bool(value) == Some(true) {
				set.insert(code);
			}
		}

		set
	}

	fn warn(&mut self, column: &str, value: &str, reason: &str) {
		self.warnings.push(RowWarning {
			line: self.line,
			column: column.to_string(),
			value: value.to_string(),
			reason: reason.to_string(),
		});
	}
}

/// Reads one source file in bounded chunks of staging rows.
///
/// Chunking only bounds memory. The rows produced, their order, and every warning are the same
/// for any chunk size.
pub struct SourceReader<R> {
	reader: csv::Reader<File>,
	record: ByteRecord,
	projection: Vec<usize>,
	flag_columns: Vec<(usize, String)>,
	date_format: Option<DateFormat>,
	encoding: Encoding,
	chunk_rows: usize,
	seen: AHashSet<String>,
	stats: SourceStats,
	done: bool,
	_row: PhantomData<fn() -> R>,
}
impl<R> SourceReader<R>
where
	R: SourceLayout,
{
	pub fn open(path: &Path, source: &SourceFile, chunk_rows: usize) -> Result<Self> {
		let layout = R::LAYOUT;
		let family = layout.family.to_string();
		let date_format = match source.date_format.as_deref() {
			Some(description) => Some(DateFormat::parse(description).map_err(|err| {
				Error::DateFormat { family: family.clone(), message: err.to_string() }
			})?),
			None if layout.needs_date_format => {
				return Err(Error::DateFormat {
					family,
					message: "no date_format is configured.".to_string(),
				});
			},
			None => None,
		};
		let file =
			File::open(path).map_err(|err| Error::Open { path: path.to_path_buf(), err })?;
		let mut reader = ReaderBuilder::new()
			.delimiter(source.delimiter_byte())
			.quoting(source.quoted)
			.has_headers(true)
			.flexible(true)
			.from_reader(file);
		let header = reader
			.byte_headers()?
			.iter()
			.enumerate()
			.map(|(index, bytes)| {
				let name = decode(bytes, source.encoding);

				if index == 0 { name.trim_start_matches('\u{feff}').to_string() } else { name }
			})
			.collect::<Vec<_>>();
		let projection = project(&family, layout.columns, &header)?;
		let flag_columns = match layout.flag_pattern {
			Some(pattern) => flag_columns(&Regex::new(pattern)?, &header),
			None => Vec::new(),
		};

		tracing::debug!(
			family = %family,
			path = %path.display(),
			declared = layout.columns.len(),
			present = header.len(),
			flags = flag_columns.len(),
			"Source header projected."
		);

		Ok(Self {
			reader,
			record: ByteRecord::new(),
			projection,
			flag_columns,
			date_format,
			encoding: source.encoding,
			chunk_rows: chunk_rows.max(1),
			seen: AHashSet::new(),
			stats: SourceStats { family, table: R::TABLE.name.to_string(), ..Default::default() },
			done: false,
			_row: PhantomData,
		})
	}

	/// The next chunk of at most `chunk_rows` rows; `None` once the file is exhausted.
	pub fn next_chunk(&mut self) -> Result<Option<Vec<R>>> {
		if self.done {
			return Ok(None);
		}

		let mut rows = Vec::with_capacity(self.chunk_rows.min(4_096));

		while rows.len() < self.chunk_rows {
			if !self.reader.read_byte_record(&mut self.record)? {
				self.done = true;

				break;
			}

			if let Some(row) = self.parse_record()? {
				rows.push(row);
			}
		}

		if rows.is_empty() && self.done {
			return Ok(None);
		}

		Ok(Some(rows))
	}

	pub fn finish(self) -> SourceStats {
		self.stats
	}

	fn parse_record(&mut self) -> Result<Option<R>> {
		let line = self.record.position().map(|position| position.line()).unwrap_or(0);
		let cells = self
			.projection
			.iter()
			.map(|index| self.record.get(*index).map(|bytes| decode(bytes, self.encoding)))
			.map(Option::unwrap_or_default)
			.collect::<Vec<_>>();
		let flags = self
			.flag_columns
			.iter()
			.map(|(index, code)| {
				let value =
					self.record.get(*index).map(|bytes| decode(bytes, self.encoding)).unwrap_or_default();

				(code.clone(), value)
			})
			.collect::<Vec<_>>();
		let mut row = Row {
			line,
			columns: R::LAYOUT.columns,
			cells: &cells,
			flags: &flags,
			date_format: self.date_format.as_ref(),
			warnings: Vec::new(),
		};
		let parsed = <R as SourceLayout>::from_row(&mut row);
		let warnings = row.warnings;

		self.stats.rows_read += 1;

		for warning in warnings {
			self.stats.record(warning);
		}

		let Some(parsed) = parsed else {
			self.stats.rows_skipped += 1;

			return Ok(None);
		};
		let key = parsed.key();

		if !self.seen.insert(key.clone()) {
			return Err(Error::DuplicateKey { family: self.stats.family.clone(), key, line });
		}

		self.stats.rows_staged += 1;

		Ok(Some(parsed))
	}
}

fn decode(bytes: &[u8], encoding: Encoding) -> String {
	match encoding {
		Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
		Encoding::Latin1 => bytes.iter().map(|byte| char::from(*byte)).collect(),
	}
}

/// Maps each declared column to its header position. Unknown header columns are dropped.
fn project(family: &str, columns: &[Column], header: &[String]) -> Result<Vec<usize>> {
	let mut projection = Vec::with_capacity(columns.len());
	let mut missing = Vec::new();

	for column in columns {
		let found = header.iter().position(|name| {
			let name = name.trim();

			name.eq_ignore_ascii_case(column.name)
				|| column.aliases.iter().any(|alias| name.eq_ignore_ascii_case(alias))
		});

		match found {
			Some(index) => projection.push(index),
			None => missing.push(column.name.to_string()),
		}
	}

	if !missing.is_empty() {
		return Err(Error::SchemaDrift { family: family.to_string(), missing });
	}

	Ok(projection)
}

fn flag_columns(pattern: &Regex, header: &[String]) -> Vec<(usize, String)> {
	header
		.iter()
		.enumerate()
		.filter_map(|(index, name)| {
			let code = pattern.captures(name.trim())?.get(1)?.as_str().to_string();

			Some((index, code))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn latin1_maps_each_byte_to_one_char() {
		assert_eq!(decode(b"Soci\xe9t\xe9", Encoding::Latin1), "Société");
	}

	#[test]
	fn aliases_satisfy_declared_columns() {
		let columns = [Column { name: "STATEORPROVINCE", aliases: &["ISSUEJURISDICTIONSECUROFFERING"] }];
		let header = vec!["ACCESSION_NUMBER".to_string(), "ISSUEJURISDICTIONSECUROFFERING".to_string()];

		assert_eq!(project("cf_jurisdictions", &columns, &header).unwrap(), vec![1]);
	}
}
