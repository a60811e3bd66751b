use matchbook_storage::staging::StagingRow;

use crate::reader::Row;

/// A declared source column. Aliases cover renames between dataset vintages.
#[derive(Debug, Clone, Copy)]
pub struct Column {
	pub name: &'static str,
	pub aliases: &'static [&'static str],
}

pub const fn col(name: &'static str) -> Column {
	Column { name, aliases: &[] }
}

pub const fn col_aka(name: &'static str, aliases: &'static [&'static str]) -> Column {
	Column { name, aliases }
}

/// The fixed column schema of one source file.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
	pub family: &'static str,
	pub columns: &'static [Column],
	/// Header pattern for wide per-jurisdiction flag columns; the first capture is the code.
	pub flag_pattern: Option<&'static str>,
	pub needs_date_format: bool,
}

/// Binds a staging row type to its source layout and row parser.
pub trait SourceLayout: StagingRow + Sized {
	const LAYOUT: Layout;

	/// `None` skips the row; the parser records why on `row`.
	fn from_row(row: &mut Row<'_>) -> Option<Self>;
}
