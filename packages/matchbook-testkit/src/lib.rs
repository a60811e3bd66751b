pub mod fixtures;

mod error;

pub use error::{Error, Result};

use std::{
	env, fs,
	path::{Path, PathBuf},
};

use uuid::Uuid;

use matchbook_config::{
	Config, Encoding, Ingest, Matching, Service, SourceFile, Sources, Sqlite, Storage,
};

use crate::fixtures::FixtureFile;

/// A scratch directory holding a SQLite store and source files. Removed on drop.
pub struct TestStore {
	root: PathBuf,
}
impl TestStore {
	pub fn new() -> Result<Self> {
		let root = env::temp_dir().join(format!("matchbook_test_{}", Uuid::new_v4().simple()));

		fs::create_dir_all(root.join("data"))?;

		Ok(Self { root })
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn data_root(&self) -> PathBuf {
		self.root.join("data")
	}

	pub fn store_path(&self) -> PathBuf {
		self.root.join("store").join("matchbook.sqlite")
	}

	pub fn sqlite(&self) -> Sqlite {
		Sqlite { path: self.store_path(), pool_max_conns: 1 }
	}

	/// A config whose sources point at the files written by [`TestStore::write_sample_filings`].
	pub fn config(&self) -> Config {
		let tsv = |path: &str, date_format: Option<&str>| SourceFile {
			path: PathBuf::from(path),
			delimiter: "\t".to_string(),
			quoted: false,
			encoding: Encoding::Utf8,
			date_format: date_format.map(str::to_string),
		};
		let adv = |path: &str, date_format: Option<&str>| SourceFile {
			encoding: Encoding::Latin1,
			date_format: date_format.map(str::to_string),
			..SourceFile::new(path)
		};

		Config {
			service: Service {
				log_level: "debug".to_string(),
				http_bind: "127.0.0.1:0".to_string(),
			},
			storage: Storage { sqlite: self.sqlite() },
			ingest: Ingest { data_root: self.data_root(), chunk_rows: 2 },
			sources: Sources {
				fd_submission: tsv(
					fixtures::FD_SUBMISSION_PATH,
					Some("[day]-[month repr:short case_sensitive:false]-[year]"),
				),
				fd_issuers: tsv(fixtures::FD_ISSUERS_PATH, None),
				fd_offering: tsv(fixtures::FD_OFFERING_PATH, Some("[year]-[month]-[day]")),
				cf_submission: tsv(fixtures::CF_SUBMISSION_PATH, Some("[year][month][day]")),
				cf_issuer: tsv(fixtures::CF_ISSUER_PATH, None),
				cf_disclosure: tsv(fixtures::CF_DISCLOSURE_PATH, Some("[year]-[month]-[day]")),
				cf_jurisdictions: tsv(fixtures::CF_JURISDICTIONS_PATH, None),
				adv_base_a: adv(
					fixtures::ADV_BASE_A_PATH,
					Some(
						"[month padding:none]/[day padding:none]/[year] \
						 [hour repr:12 padding:none]:[minute]:[second] [period]",
					),
				),
				adv_base_b: adv(fixtures::ADV_BASE_B_PATH, None),
			},
			matching: Matching::default(),
		}
	}

	pub fn write_fixture(&self, relative: &str, file: &FixtureFile) -> Result<PathBuf> {
		let path = self.data_root().join(relative);

		file.write(&path)?;

		Ok(path)
	}

	/// Writes the full sample filing set used across the integration tests.
	pub fn write_sample_filings(&self) -> Result<()> {
		for (relative, file) in fixtures::sample_filings() {
			self.write_fixture(relative, &file)?;
		}

		Ok(())
	}
}
impl Drop for TestStore {
	fn drop(&mut self) {
		if let Err(err) = fs::remove_dir_all(&self.root) {
			eprintln!("Test store cleanup failed for {}: {err}.", self.root.display());
		}
	}
}
