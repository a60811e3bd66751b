use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use matchbook_config::{Config, Encoding, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let mut table = root.as_table_mut().expect("Template config must be a table.");

	for part in section.split('.') {
		table = table
			.get_mut(part)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Template config must include [{section}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("matchbook_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> Result<Config, Error> {
	let path = write_temp_config(payload);
	let result = matchbook_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn template_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Template config must be valid.");

	assert_eq!(cfg.sources.fd_submission.delimiter_byte(), b'\t');
	assert!(!cfg.sources.fd_submission.quoted);
	assert_eq!(cfg.sources.adv_base_a.encoding, Encoding::Latin1);
	assert_eq!(cfg.sources.adv_base_b.delimiter_byte(), b',');
	assert!(cfg.sources.fd_issuers.date_format.is_none());
	assert_eq!(cfg.matching.max_band_gap, 2);
	assert_eq!(cfg.sources.iter().count(), 9);
}

#[test]
fn home_prefix_expands_in_data_root() {
	let Ok(home) = env::var("HOME") else {
		eprintln!("Skipping home_prefix_expands_in_data_root; HOME is not set.");

		return;
	};
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Template config must be valid.");

	assert_eq!(cfg.ingest.data_root, PathBuf::from(home).join("Downloads/data"));
}

#[test]
fn relative_source_paths_join_data_root() {
	let cfg: Config =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.");
	let path = cfg.source_path(&cfg.sources.cf_issuer);

	assert!(path.ends_with("2025Q1_cf/FORM_C_ISSUER_INFORMATION.tsv"));
	assert!(path.starts_with(&cfg.ingest.data_root));
}

#[test]
fn tab_keyword_is_accepted_as_delimiter() {
	let payload = sample_toml_with("sources.fd_offering", "delimiter", Value::from("tab"));
	let cfg = load_payload(payload).expect("Tab keyword must normalize.");

	assert_eq!(cfg.sources.fd_offering.delimiter_byte(), b'\t');
}

#[test]
fn multi_character_delimiter_is_rejected() {
	let payload = sample_toml_with("sources.cf_issuer", "delimiter", Value::from("||"));
	let err = load_payload(payload).expect_err("Expected delimiter validation error.");

	assert!(
		err.to_string().contains("sources.cf_issuer.delimiter must be a single ASCII character."),
		"Unexpected error: {err}"
	);
}

#[test]
fn chunk_rows_must_be_positive() {
	let payload = sample_toml_with("ingest", "chunk_rows", Value::Integer(0));
	let err = load_payload(payload).expect_err("Expected chunk_rows validation error.");

	assert!(
		err.to_string().contains("ingest.chunk_rows must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn default_limit_cannot_exceed_max_limit() {
	let payload = sample_toml_with("matching", "default_limit", Value::Integer(500));
	let err = load_payload(payload).expect_err("Expected limit validation error.");

	assert!(
		err.to_string().contains("matching.default_limit must not exceed matching.max_limit."),
		"Unexpected error: {err}"
	);
}

#[test]
fn matching_section_is_optional() {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");

	root.as_table_mut().expect("Template config must be a table.").remove("matching");

	let cfg = load_payload(toml::to_string(&root).expect("Failed to render config."))
		.expect("Config without [matching] must be valid.");

	assert_eq!(cfg.matching.default_limit, 5);
	assert_eq!(cfg.matching.max_limit, 100);
}

#[test]
fn unknown_encoding_fails_to_parse() {
	let payload = sample_toml_with("sources.adv_base_a", "encoding", Value::from("ebcdic"));
	let err = load_payload(payload).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err}");
}
