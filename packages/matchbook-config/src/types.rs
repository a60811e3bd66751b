use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub ingest: Ingest,
	pub sources: Sources,
	#[serde(default)]
	pub matching: Matching,
}
impl Config {
	/// Source paths are relative to `ingest.data_root` unless they are absolute.
	pub fn source_path(&self, source: &SourceFile) -> PathBuf {
		if source.path.is_absolute() {
			return source.path.clone();
		}

		self.ingest.data_root.join(&source.path)
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
	#[serde(default = "default_http_bind")]
	pub http_bind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub sqlite: Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sqlite {
	pub path: PathBuf,
	#[serde(default = "default_pool_max_conns")]
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ingest {
	pub data_root: PathBuf,
	#[serde(default = "default_chunk_rows")]
	pub chunk_rows: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sources {
	pub fd_submission: SourceFile,
	pub fd_issuers: SourceFile,
	pub fd_offering: SourceFile,
	pub cf_submission: SourceFile,
	pub cf_issuer: SourceFile,
	pub cf_disclosure: SourceFile,
	pub cf_jurisdictions: SourceFile,
	pub adv_base_a: SourceFile,
	pub adv_base_b: SourceFile,
}
impl Sources {
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SourceFile)> {
		[
			("fd_submission", &self.fd_submission),
			("fd_issuers", &self.fd_issuers),
			("fd_offering", &self.fd_offering),
			("cf_submission", &self.cf_submission),
			("cf_issuer", &self.cf_issuer),
			("cf_disclosure", &self.cf_disclosure),
			("cf_jurisdictions", &self.cf_jurisdictions),
			("adv_base_a", &self.adv_base_a),
			("adv_base_b", &self.adv_base_b),
		]
		.into_iter()
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceFile {
	pub path: PathBuf,
	#[serde(default = "default_delimiter")]
	pub delimiter: String,
	#[serde(default = "default_quoted")]
	pub quoted: bool,
	#[serde(default)]
	pub encoding: Encoding,
	/// A `time` format description, e.g. `[year]-[month]-[day]`.
	pub date_format: Option<String>,
}
impl SourceFile {
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			delimiter: default_delimiter(),
			quoted: default_quoted(),
			encoding: Encoding::default(),
			date_format: None,
		}
	}

	/// Validation guarantees a single ASCII byte.
	pub fn delimiter_byte(&self) -> u8 {
		self.delimiter.as_bytes().first().copied().unwrap_or(b',')
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
	#[default]
	Utf8,
	Latin1,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Matching {
	/// How many capital bands an adviser may sit below a deal and still be considered.
	pub max_band_gap: u8,
	pub default_limit: u32,
	pub max_limit: u32,
}
impl Default for Matching {
	fn default() -> Self {
		Self { max_band_gap: 2, default_limit: 5, max_limit: 100 }
	}
}

fn default_http_bind() -> String {
	"127.0.0.1:8090".to_string()
}

fn default_pool_max_conns() -> u32 {
	4
}

fn default_chunk_rows() -> usize {
	50_000
}

fn default_delimiter() -> String {
	",".to_string()
}

fn default_quoted() -> bool {
	true
}
