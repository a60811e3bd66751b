mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Encoding, Ingest, Matching, Service, SourceFile, Sources, Sqlite, Storage};

use std::{env, fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.sqlite.path.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "storage.sqlite.path must be non-empty.".to_string(),
		});
	}
	if cfg.storage.sqlite.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.sqlite.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.ingest.chunk_rows == 0 {
		return Err(Error::Validation {
			message: "ingest.chunk_rows must be greater than zero.".to_string(),
		});
	}

	for (label, source) in cfg.sources.iter() {
		if source.path.as_os_str().is_empty() {
			return Err(Error::Validation {
				message: format!("sources.{label}.path must be non-empty."),
			});
		}
		if source.delimiter.len() != 1 || !source.delimiter.is_ascii() {
			return Err(Error::Validation {
				message: format!("sources.{label}.delimiter must be a single ASCII character."),
			});
		}
		if let Some(format) = source.date_format.as_deref()
			&& format.trim().is_empty()
		{
			return Err(Error::Validation {
				message: format!("sources.{label}.date_format must be non-empty when set."),
			});
		}
	}

	if cfg.matching.default_limit == 0 {
		return Err(Error::Validation {
			message: "matching.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.matching.default_limit > cfg.matching.max_limit {
		return Err(Error::Validation {
			message: "matching.default_limit must not exceed matching.max_limit.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if let Ok(home) = env::var("HOME")
		&& let Ok(rest) = cfg.ingest.data_root.strip_prefix("~")
	{
		cfg.ingest.data_root = Path::new(&home).join(rest);
	}

	for source in [
		&mut cfg.sources.fd_submission,
		&mut cfg.sources.fd_issuers,
		&mut cfg.sources.fd_offering,
		&mut cfg.sources.cf_submission,
		&mut cfg.sources.cf_issuer,
		&mut cfg.sources.cf_disclosure,
		&mut cfg.sources.cf_jurisdictions,
		&mut cfg.sources.adv_base_a,
		&mut cfg.sources.adv_base_b,
	] {
		if source.delimiter == "\\t" || source.delimiter.eq_ignore_ascii_case("tab") {
			source.delimiter = "\t".to_string();
		}
		if source.date_format.as_deref().map(|format| format.trim().is_empty()).unwrap_or(false) {
			source.date_format = None;
		}
	}
}
