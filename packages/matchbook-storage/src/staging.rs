//! Typed staging tables.
//!
//! Every staging table is declared once, as a [`StagingRow`] implementation, and the same
//! declaration drives table creation, inserts, reads, and the per-table content digest.

use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool, sqlite::SqliteRow};
use time::Date;

use crate::{Result, schema};

/// SQLite caps bound parameters per statement; inserts are split to stay below it.
const MAX_BIND_PARAMS: usize = 32_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
	Text,
	Integer,
	Real,
	Boolean,
	Date,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
	Text(Option<String>),
	Integer(Option<i64>),
	Real(Option<f64>),
	Boolean(Option<bool>),
	Date(Option<Date>),
}
impl SqlValue {
	/// Tagged, length-prefixed bytes; stable across platforms and releases.
	fn encode_into(&self, out: &mut Vec<u8>) {
		let (tag, bytes) = match self {
			Self::Text(value) => (b'T', value.as_ref().map(|v| v.as_bytes().to_vec())),
			Self::Integer(value) => (b'I', value.map(|v| v.to_le_bytes().to_vec())),
			Self::Real(value) => (b'R', value.map(|v| v.to_bits().to_le_bytes().to_vec())),
			Self::Boolean(value) => (b'B', value.map(|v| vec![u8::from(v)])),
			Self::Date(value) => (b'D', value.map(|v| v.to_julian_day().to_le_bytes().to_vec())),
		};

		out.push(tag);

		match bytes {
			Some(bytes) => {
				out.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
				out.extend_from_slice(&bytes);
			},
			None => out.extend_from_slice(&u64::MAX.to_le_bytes()),
		}
	}
}
impl From<String> for SqlValue {
	fn from(value: String) -> Self {
		Self::Text(Some(value))
	}
}
impl From<Option<String>> for SqlValue {
	fn from(value: Option<String>) -> Self {
		Self::Text(value)
	}
}
impl From<i64> for SqlValue {
	fn from(value: i64) -> Self {
		Self::Integer(Some(value))
	}
}
impl From<Option<i64>> for SqlValue {
	fn from(value: Option<i64>) -> Self {
		Self::Integer(value)
	}
}
impl From<Option<f64>> for SqlValue {
	fn from(value: Option<f64>) -> Self {
		Self::Real(value)
	}
}
impl From<Option<bool>> for SqlValue {
	fn from(value: Option<bool>) -> Self {
		Self::Boolean(value)
	}
}
impl From<Option<Date>> for SqlValue {
	fn from(value: Option<Date>) -> Self {
		Self::Date(value)
	}
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
	pub name: &'static str,
	pub sql_type: SqlType,
}

#[derive(Debug, Clone, Copy)]
pub struct TableDef {
	pub name: &'static str,
	pub key: &'static [&'static str],
	pub columns: &'static [ColumnDef],
}
impl TableDef {
	pub fn column_list(&self) -> String {
		self.columns.iter().map(|column| column.name).collect::<Vec<_>>().join(", ")
	}
}

pub trait StagingRow: Send + Unpin + for<'r> FromRow<'r, SqliteRow> {
	const TABLE: TableDef;

	/// The natural key, joined with `|` for composite keys.
	fn key(&self) -> String;

	/// Column values in [`TableDef::columns`] order.
	fn values(&self) -> Vec<SqlValue>;
}

/// Streaming blake3 digest over the canonical encoding of staged rows.
#[derive(Default)]
pub struct StagingDigest {
	hasher: blake3::Hasher,
	buf: Vec<u8>,
}
impl StagingDigest {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn update<R>(&mut self, row: &R)
	where
		R: StagingRow,
	{
		self.buf.clear();

		for value in row.values() {
			value.encode_into(&mut self.buf);
		}

		self.buf.push(b'\n');
		self.hasher.update(&self.buf);
	}

	pub fn finalize(&self) -> String {
		self.hasher.finalize().to_hex().to_string()
	}
}

/// Drops and recreates the table inside the caller's transaction.
pub async fn recreate_table(conn: &mut SqliteConnection, table: &TableDef) -> Result<()> {
	sqlx::query(&schema::drop_table_sql(table)).execute(&mut *conn).await?;
	sqlx::query(&schema::create_table_sql(table)).execute(&mut *conn).await?;

	Ok(())
}

pub async fn insert_rows<R>(conn: &mut SqliteConnection, rows: &[R]) -> Result<()>
where
	R: StagingRow,
{
	let table = R::TABLE;
	let rows_per_statement = (MAX_BIND_PARAMS / table.columns.len().max(1)).max(1);

	for batch in rows.chunks(rows_per_statement) {
		let mut builder: QueryBuilder<'_, Sqlite> =
			QueryBuilder::new(format!("INSERT INTO {} ({}) ", table.name, table.column_list()));

		builder.push_values(batch, |mut bound, row| {
			for value in row.values() {
				match value {
					SqlValue::Text(value) => bound.push_bind(value),
					SqlValue::Integer(value) => bound.push_bind(value),
					SqlValue::Real(value) => bound.push_bind(value),
					SqlValue::Boolean(value) => bound.push_bind(value),
					SqlValue::Date(value) => bound.push_bind(value),
				};
			}
		});
		builder.build().execute(&mut *conn).await?;
	}

	Ok(())
}

/// Reads every row ordered by natural key. A table that was never loaded reads as empty.
pub async fn fetch_all<R>(pool: &SqlitePool) -> Result<Vec<R>>
where
	R: StagingRow,
{
	let table = R::TABLE;

	if !table_exists(pool, table.name).await? {
		return Ok(Vec::new());
	}

	let sql = format!(
		"SELECT {} FROM {} ORDER BY {}",
		table.column_list(),
		table.name,
		table.key.join(", ")
	);
	let rows = sqlx::query_as::<_, R>(&sql).fetch_all(pool).await?;

	Ok(rows)
}

pub async fn table_exists(pool: &SqlitePool, name: &str) -> Result<bool> {
	let found: Option<i64> = sqlx::query_scalar(
		"SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
	)
	.bind(name)
	.fetch_optional(pool)
	.await?;

	Ok(found.is_some())
}

/// Row count for a table or view; `None` when it does not exist.
pub async fn row_count(pool: &SqlitePool, name: &str) -> Result<Option<i64>> {
	if !table_exists(pool, name).await? {
		return Ok(None);
	}

	let count: i64 =
		sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {name}")).fetch_one(pool).await?;

	Ok(Some(count))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn null_and_empty_text_encode_differently() {
		let mut null = Vec::new();
		let mut empty = Vec::new();

		SqlValue::Text(None).encode_into(&mut null);
		SqlValue::Text(Some(String::new())).encode_into(&mut empty);

		assert_ne!(null, empty);
	}
}
