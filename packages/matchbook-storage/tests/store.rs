use time::{OffsetDateTime, macros::date};
use uuid::Uuid;

use matchbook_domain::{
	features::{AdviserFeatures, DealFamily, DealFeatures, SecurityClass},
	jurisdiction::JurisdictionSet,
	scoring::ComponentScores,
};
use matchbook_storage::{
	db::Db,
	derived::{self, CandidateCounts, DerivedSet, EntityKind, LatestFiling, ScoredPair},
	load_runs::{self, LoadStatus},
	models::{CfJurisdiction, FdSubmission, STAGING_TABLES},
	queries,
	staging::{self, StagingDigest, StagingRow},
};
use matchbook_testkit::TestStore;

async fn open(store: &TestStore) -> Db {
	let db = Db::connect(&store.sqlite()).await.expect("Failed to open store.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

fn submission(accession: &str, filing_date: Option<time::Date>) -> FdSubmission {
	FdSubmission {
		accession_number: accession.to_string(),
		submission_type: Some("D".to_string()),
		filing_date,
		file_num: None,
		sic_code: None,
		test_or_live: Some("LIVE".to_string()),
	}
}

fn deal(accession: &str) -> DealFeatures {
	DealFeatures {
		deal_id: DealFamily::FormD.deal_id(accession),
		family: DealFamily::FormD,
		accession_number: accession.to_string(),
		entity_key: format!("FD:{accession}"),
		filings_in_group: 1,
		filing_date: Some(date!(2025 - 02 - 01)),
		issuer_name: Some("Acme Rockets Inc".to_string()),
		issuer_city: Some("Denver".to_string()),
		issuer_state: Some("CO".to_string()),
		industry_group: None,
		security_type: Some("Equity".to_string()),
		security_class: SecurityClass::Equity,
		target_raise: Some(2_000_000.0),
		max_raise: None,
		amount_sold: None,
		min_invest: None,
		unit_price: None,
		sold_ratio: None,
		employees: None,
		revenue_recent: None,
		revenue_prior: None,
		accepts_non_accredited: Some(false),
		retail_eligible: false,
		offering_states: JurisdictionSet::new(),
		raise_band: Some(2),
	}
}

fn adviser(filing_id: i64) -> AdviserFeatures {
	AdviserFeatures {
		adviser_id: filing_id.to_string(),
		filing_id,
		entity_key: format!("ADVISER {filing_id}"),
		filings_in_group: 1,
		filing_date: None,
		legal_name: Some(format!("Adviser {filing_id}")),
		hq_city: None,
		hq_state: Some("CO".to_string()),
		total_raum: Some(200_000_000.0),
		discretionary_raum: None,
		aum_band: Some(2),
		clients_individual: Some(10),
		clients_hnw: Some(5),
		clients_pooled: None,
		retail_client_ratio: Some(10.0 / 15.0),
		serves_retail: Some(true),
		serves_accredited: Some(true),
		registered_states: JurisdictionSet::from_codes(["CO", "WY"]),
		broker_dealer_affiliate: None,
		has_custody: None,
	}
}

fn pair(deal_id: &str, adviser_id: &str, composite: f64) -> ScoredPair {
	ScoredPair {
		deal_id: deal_id.to_string(),
		adviser_id: adviser_id.to_string(),
		scores: ComponentScores {
			geography: 1.0,
			capital: 1.0,
			audience: 1.0,
			security: 1.0,
			traction: 0.5,
		},
		composite,
	}
}

#[tokio::test]
async fn schema_bootstrap_is_repeatable() {
	let store = TestStore::new().expect("Failed to create test store.");
	let db = open(&store).await;

	db.ensure_schema().await.expect("Second bootstrap failed.");

	for name in [
		"load_runs",
		"latest_filings",
		"deal_features",
		"adviser_features",
		"deal_adviser_scores",
		"deal_candidate_stats",
		"vw_deal_latest",
		"vw_adviser_latest",
		"vw_deal_features",
		"vw_adviser_features",
		"vw_investor_deal_candidates",
		"vw_investor_deal_scored",
	] {
		assert_eq!(staging::row_count(&db.pool, name).await.expect("Count failed."), Some(0), "{name}");
	}

	assert_eq!(db.path(), store.store_path());
}

#[tokio::test]
async fn staging_tables_round_trip_in_key_order() {
	let store = TestStore::new().expect("Failed to create test store.");
	let db = open(&store).await;
	let rows = vec![
		CfJurisdiction { accession_number: "B".to_string(), state_or_province: "TX".to_string() },
		CfJurisdiction { accession_number: "A".to_string(), state_or_province: "NY".to_string() },
		CfJurisdiction { accession_number: "A".to_string(), state_or_province: "CA".to_string() },
	];
	let mut tx = db.pool.begin().await.expect("Failed to begin.");

	staging::recreate_table(&mut *tx, &CfJurisdiction::TABLE).await.expect("Recreate failed.");
	staging::insert_rows(&mut *tx, &rows).await.expect("Insert failed.");
	tx.commit().await.expect("Commit failed.");

	let read = staging::fetch_all::<CfJurisdiction>(&db.pool).await.expect("Fetch failed.");
	let keys = read.iter().map(StagingRow::key).collect::<Vec<_>>();

	assert_eq!(keys, ["A|CA", "A|NY", "B|TX"]);
}

#[tokio::test]
async fn unloaded_staging_tables_read_as_empty() {
	let store = TestStore::new().expect("Failed to create test store.");
	let db = open(&store).await;

	for table in STAGING_TABLES {
		assert!(!staging::table_exists(&db.pool, table.name).await.expect("Lookup failed."));
		assert_eq!(staging::row_count(&db.pool, table.name).await.expect("Count failed."), None);
	}

	assert!(staging::fetch_all::<FdSubmission>(&db.pool).await.expect("Fetch failed.").is_empty());
}

#[tokio::test]
async fn dropped_transaction_keeps_the_previous_table() {
	let store = TestStore::new().expect("Failed to create test store.");
	let db = open(&store).await;
	let original = vec![submission("0001", Some(date!(2025 - 01 - 01)))];
	let mut tx = db.pool.begin().await.expect("Failed to begin.");

	staging::recreate_table(&mut *tx, &FdSubmission::TABLE).await.expect("Recreate failed.");
	staging::insert_rows(&mut *tx, &original).await.expect("Insert failed.");
	tx.commit().await.expect("Commit failed.");

	{
		let mut tx = db.pool.begin().await.expect("Failed to begin.");

		staging::recreate_table(&mut *tx, &FdSubmission::TABLE).await.expect("Recreate failed.");
		staging::insert_rows(&mut *tx, &[submission("0002", None), submission("0003", None)])
			.await
			.expect("Insert failed.");
	}

	let read = staging::fetch_all::<FdSubmission>(&db.pool).await.expect("Fetch failed.");

	assert_eq!(read, original);
}

#[tokio::test]
async fn duplicate_keys_are_rejected_by_the_table() {
	let store = TestStore::new().expect("Failed to create test store.");
	let db = open(&store).await;
	let mut tx = db.pool.begin().await.expect("Failed to begin.");

	staging::recreate_table(&mut *tx, &FdSubmission::TABLE).await.expect("Recreate failed.");

	let result =
		staging::insert_rows(&mut *tx, &[submission("0001", None), submission("0001", None)]).await;

	assert!(result.is_err());
}

#[test]
fn digest_depends_on_content_not_batching() {
	let rows = [
		submission("0001", Some(date!(2025 - 01 - 01))),
		submission("0002", None),
		submission("0003", Some(date!(2025 - 03 - 01))),
	];
	let mut whole = StagingDigest::new();
	let mut split = StagingDigest::new();
	let mut changed = StagingDigest::new();

	rows.iter().for_each(|row| whole.update(row));

	for batch in rows.chunks(2) {
		batch.iter().for_each(|row| split.update(row));
	}

	let mut edited = rows.clone();

	edited[1].sic_code = Some(String::new());
	edited.iter().for_each(|row| changed.update(row));

	assert_eq!(whole.finalize(), split.finalize());
	assert_ne!(whole.finalize(), changed.finalize());
}

#[tokio::test]
async fn derived_rebuild_replaces_and_queries_read_every_pair() {
	let store = TestStore::new().expect("Failed to create test store.");
	let db = open(&store).await;
	let acme = deal("0005");
	let deal_id = acme.deal_id.clone();
	let stale = DerivedSet {
		deals: vec![deal("0004")],
		advisers: vec![adviser(7)],
		scores: vec![pair("FD:0004", "7", 0.5)],
		..Default::default()
	};

	derived::replace_derived(&db, &stale).await.expect("First rebuild failed.");

	let set = DerivedSet {
		latest: vec![LatestFiling {
			entity_kind: EntityKind::Deal,
			entity_key: acme.entity_key.clone(),
			record_key: acme.accession_number.clone(),
			family: "FORM_D".to_string(),
			filing_date: acme.filing_date,
			filings_in_group: 1,
		}],
		deals: vec![acme],
		advisers: vec![adviser(9), adviser(10), adviser(11)],
		scores: vec![pair(&deal_id, "9", 0.8), pair(&deal_id, "10", 0.8), pair(&deal_id, "11", 0.9)],
		candidate_counts: vec![(deal_id.clone(), CandidateCounts { eligible_advisers: 3, geography_matches: 7 })],
	};

	derived::replace_derived(&db, &set).await.expect("Second rebuild failed.");

	assert_eq!(staging::row_count(&db.pool, "deal_features").await.expect("Count failed."), Some(1));
	assert_eq!(queries::resolve_deal_id(&db, "FD:0004").await.expect("Lookup failed."), None);
	assert_eq!(
		queries::resolve_deal_id(&db, " 0005 ").await.expect("Lookup failed."),
		Some(deal_id.clone())
	);
	assert!(queries::adviser_exists(&db, "10").await.expect("Lookup failed."));
	assert!(!queries::adviser_exists(&db, "7").await.expect("Lookup failed."));

	let rows = queries::matches_for_deal(&db, &deal_id).await.expect("Query failed.");
	let ids = rows.iter().map(|row| row.adviser_id.as_str()).collect::<Vec<_>>();

	assert_eq!(ids, ["10", "11", "9"]);
	assert_eq!(rows[1].composite_score, 0.9);
	assert_eq!(rows[0].registered_states, "CO,WY");
	assert_eq!(rows[0].issuer_name.as_deref(), Some("Acme Rockets Inc"));
	assert_eq!(
		queries::candidate_counts(&db, &deal_id).await.expect("Query failed."),
		Some(CandidateCounts { eligible_advisers: 3, geography_matches: 7 })
	);

	let deals = queries::matches_for_adviser(&db, "9").await.expect("Query failed.");

	assert_eq!(deals.len(), 1);
	assert_eq!(deals[0].deal_id, deal_id);
}

#[tokio::test]
async fn load_runs_record_the_latest_report() {
	let store = TestStore::new().expect("Failed to create test store.");
	let db = open(&store).await;
	let first = Uuid::new_v4();
	let second = Uuid::new_v4();
	let started_at = OffsetDateTime::now_utc();
	let report = serde_json::json!({ "status": "sources_failed" });

	assert!(load_runs::latest_load_run(&db).await.expect("Query failed.").is_none());

	load_runs::insert_load_run(&db, first, started_at, started_at, LoadStatus::Completed, &report)
		.await
		.expect("Insert failed.");
	load_runs::insert_load_run(
		&db,
		second,
		started_at,
		started_at + time::Duration::seconds(5),
		LoadStatus::SourcesFailed,
		&report,
	)
	.await
	.expect("Insert failed.");

	let latest =
		load_runs::latest_load_run(&db).await.expect("Query failed.").expect("Missing load run.");

	assert_eq!(latest.run_id, second.to_string());
	assert_eq!(latest.status, "sources_failed");
	assert_eq!(serde_json::from_str::<serde_json::Value>(&latest.report).ok(), Some(report));
}
