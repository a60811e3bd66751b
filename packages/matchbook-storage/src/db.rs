use std::{
	fs,
	path::{Path, PathBuf},
	time::Duration,
};

use sqlx::{
	SqlitePool,
	sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

use crate::{Result, schema};

/// The store handle. Opened once by the orchestrator and passed to every component.
pub struct Db {
	pub pool: SqlitePool,
	path: PathBuf,
}
impl Db {
	pub async fn connect(cfg: &matchbook_config::Sqlite) -> Result<Self> {
		if let Some(parent) = cfg.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			fs::create_dir_all(parent)?;
		}

		let options = SqliteConnectOptions::new()
			.filename(&cfg.path)
			.create_if_missing(true)
			.journal_mode(SqliteJournalMode::Wal)
			.busy_timeout(Duration::from_secs(30));
		let pool = SqlitePoolOptions::new()
			.max_connections(cfg.pool_max_conns)
			.connect_with(options)
			.await?;

		Ok(Self { pool, path: cfg.path.clone() })
	}

	/// Opens the store for reading only. Nothing is created on disk; connections are made on
	/// first use, so a reader may start before the first load has written the file.
	pub fn connect_read_only(cfg: &matchbook_config::Sqlite) -> Self {
		let options = SqliteConnectOptions::new()
			.filename(&cfg.path)
			.read_only(true)
			.busy_timeout(Duration::from_secs(30));
		let pool = SqlitePoolOptions::new()
			.max_connections(cfg.pool_max_conns)
			.connect_lazy_with(options);

		Self { pool, path: cfg.path.clone() }
	}

	pub fn exists(&self) -> bool {
		self.path.is_file()
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema();
		let mut tx = self.pool.begin().await?;

		for statement in schema::split_statements(&sql) {
			sqlx::query(statement).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}

	pub async fn close(self) {
		self.pool.close().await;
	}
}
