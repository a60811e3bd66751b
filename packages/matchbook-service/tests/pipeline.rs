use matchbook_config::Config;
use matchbook_service::{
	AdvisersForDealRequest, DealsForAdviserRequest, Error, LoadReport, MatchService,
};
use matchbook_storage::{
	load_runs::{self, LoadStatus},
	models::STAGING_TABLES,
};
use matchbook_testkit::{
	TestStore,
	fixtures::{self, FixtureFile},
};

const BIG_RAISE: &str = "0001234567-25-000009";

async fn service(cfg: Config) -> MatchService {
	MatchService::connect(cfg).await.expect("Failed to open store.")
}

async fn loaded(store: &TestStore) -> (MatchService, LoadReport) {
	store.write_sample_filings().expect("Failed to write fixtures.");

	let service = service(store.config()).await;
	let report = service.reload().await.expect("Reload failed.");

	(service, report)
}

fn advisers_request(deal_id: &str, limit: Option<u32>) -> AdvisersForDealRequest {
	AdvisersForDealRequest { deal_id: deal_id.to_string(), limit }
}

fn deals_request(adviser_id: &str, limit: Option<u32>) -> DealsForAdviserRequest {
	DealsForAdviserRequest { adviser_id: adviser_id.to_string(), limit }
}

fn with_big_raise(store: &TestStore) {
	let submission = fixtures::fd_submission().row(&[
		("ACCESSIONNUMBER", BIG_RAISE),
		("FILE_NUM", "021-99999"),
		("FILING_DATE", "03-MAR-2025"),
		("SUBMISSIONTYPE", "D"),
		("TESTORLIVE", "LIVE"),
	]);
	let issuers = fixtures::fd_issuers().row(&[
		("ACCESSIONNUMBER", BIG_RAISE),
		("IS_PRIMARYISSUER_FLAG", "YES"),
		("ISSUER_SEQ_KEY", "1"),
		("ENTITYNAME", "Empire Towers Fund"),
		("STATEORCOUNTRY", "NY"),
	]);
	let offering = fixtures::fd_offering().row(&[
		("ACCESSIONNUMBER", BIG_RAISE),
		("TOTALOFFERINGAMOUNT", "250000000"),
		("ISPOOLEDINVESTMENTFUNDTYPE", "Y"),
	]);

	store.write_fixture(fixtures::FD_SUBMISSION_PATH, &submission).expect("Failed to write fixture.");
	store.write_fixture(fixtures::FD_ISSUERS_PATH, &issuers).expect("Failed to write fixture.");
	store.write_fixture(fixtures::FD_OFFERING_PATH, &offering).expect("Failed to write fixture.");
}

#[tokio::test]
async fn reload_reports_every_source_and_table() {
	let store = TestStore::new().expect("Failed to create test store.");
	let (service, report) = loaded(&store).await;

	assert!(report.succeeded());
	assert_eq!(report.store_path, store.store_path());
	assert_eq!(report.sources.len(), STAGING_TABLES.len());
	assert!(report.failures.is_empty());
	assert_eq!(report.deals, 3);
	assert_eq!(report.advisers, 5);
	assert_eq!(report.scored_pairs, 6);
	assert_eq!(report.empty_candidate_sets, 0);
	assert_eq!(report.rows("stg_fd_submission"), Some(4));
	assert_eq!(report.rows("stg_adv_base_a"), Some(6));
	assert_eq!(report.rows("deal_features"), Some(3));
	assert_eq!(report.rows("vw_investor_deal_scored"), Some(6));

	let fd_offering = report
		.sources
		.iter()
		.find(|source| source.stats.family == "fd_offering")
		.expect("Missing fd_offering.");

	assert_eq!(fd_offering.stats.warnings, 1);
	assert_eq!(fd_offering.stats.warning_samples[0].value, "2025-13-45");

	let run = load_runs::latest_load_run(&service.db)
		.await
		.expect("Failed to read load runs.")
		.expect("Missing load run.");
	let logged: serde_json::Value =
		serde_json::from_str(&run.report).expect("Load run report is not JSON.");

	assert_eq!(run.run_id, report.run_id.to_string());
	assert_eq!(run.status, "completed");
	assert_eq!(logged["status"], "completed");
	assert_eq!(logged["sources"].as_array().map(Vec::len), Some(STAGING_TABLES.len()));
}

#[tokio::test]
async fn reloading_unchanged_sources_is_idempotent() {
	let store = TestStore::new().expect("Failed to create test store.");
	let (service, first) = loaded(&store).await;
	let second = service.reload().await.expect("Second reload failed.");

	for table in STAGING_TABLES {
		let digest = first.digest(table.name).expect("Missing digest.");

		assert_eq!(second.digest(table.name), Some(digest), "{}", table.name);
	}

	assert_eq!(first.table_counts, second.table_counts);
	assert_ne!(first.run_id, second.run_id);
}

#[tokio::test]
async fn latest_filing_wins_for_deals_and_advisers() {
	let store = TestStore::new().expect("Failed to create test store.");
	let (service, _) = loaded(&store).await;
	let latest: Vec<(String, String, String, i64)> = sqlx::query_as(
		"\
SELECT entity_kind, entity_key, record_key, filings_in_group
FROM latest_filings
ORDER BY entity_kind, entity_key",
	)
	.fetch_all(&service.db.pool)
	.await
	.expect("Failed to read latest filings.");
	let find = |key: &str| {
		latest.iter().find(|row| row.1 == key).cloned().expect("Missing latest filing.")
	};
	let empire = format!("CRD:{}", fixtures::EMPIRE_CRD);

	assert_eq!(find("FD:021-11111").2, fixtures::HUDSON_AMENDMENT);
	assert_eq!(find("FD:021-11111").3, 2);
	assert_eq!(find("CF:020-00001").2, fixtures::GOLDEN_GATE);
	assert_eq!(find(&empire).2, fixtures::EMPIRE);
	assert_eq!(find(&empire).3, 2);
	assert_eq!(find("SEC:801-55555").2, fixtures::MONTREAL);
	assert!(latest.iter().all(|row| row.1 != "FD:021-33333"), "Test filings are not deals.");
}

#[tokio::test]
async fn new_york_raise_ranks_the_local_adviser_first() {
	let store = TestStore::new().expect("Failed to create test store.");
	let (service, _) = loaded(&store).await;
	let response = service
		.advisers_for_deal(advisers_request(fixtures::HUDSON_AMENDMENT, Some(5)))
		.await
		.expect("Query failed.");
	let ids = response.items.iter().map(|row| row.adviser_id.as_str()).collect::<Vec<_>>();

	assert!(response.known);
	assert_eq!(response.deal_id, format!("FD:{}", fixtures::HUDSON_AMENDMENT));
	assert_eq!(ids, [fixtures::EMPIRE, fixtures::COAST_TO_COAST]);
	assert!(response.fewer_than_requested);
	assert_eq!(response.eligible_advisers, 2);
	assert!(response.warning.is_some());

	let top = &response.items[0];

	assert_eq!(top.geography_score, 1.0);
	assert!(top.capital_score >= 0.7);
	assert_eq!(top.composite_score, 0.9375);
	assert_eq!(top.issuer_state.as_deref(), Some("NY"));
	assert_eq!(top.target_raise, Some(3_200_000.0));
	assert_eq!(response.items[1].capital_score, 0.7);
	assert_eq!(response.items[1].composite_score, 0.8475);

	for row in &response.items {
		let weighted = 0.30 * row.geography_score
			+ 0.30 * row.capital_score
			+ 0.20 * row.audience_score
			+ 0.10 * row.security_score
			+ 0.10 * row.traction_score;

		assert!((row.composite_score - weighted).abs() < 1e-4);
	}
}

#[tokio::test]
async fn superseded_and_unknown_deals_return_no_rows() {
	let store = TestStore::new().expect("Failed to create test store.");
	let (service, _) = loaded(&store).await;

	for deal_id in [fixtures::HUDSON_ORIGINAL, "FD:0000000000-00-000000", fixtures::TEST_FILING] {
		let response =
			service.advisers_for_deal(advisers_request(deal_id, None)).await.expect("Query failed.");

		assert!(!response.known, "{deal_id}");
		assert!(response.items.is_empty());
		assert_eq!(response.limit, 5);
	}
}

#[tokio::test]
async fn deals_for_adviser_orders_by_composite() {
	let store = TestStore::new().expect("Failed to create test store.");
	let (service, _) = loaded(&store).await;
	let all = service
		.deals_for_adviser(deals_request(fixtures::COAST_TO_COAST, None))
		.await
		.expect("Query failed.");

	assert_eq!(all.items.len(), 3);
	assert!(all.fewer_than_requested);
	assert!(all.items.windows(2).all(|pair| pair[0].composite_score >= pair[1].composite_score));

	let top_two = service
		.deals_for_adviser(deals_request(fixtures::COAST_TO_COAST, Some(2)))
		.await
		.expect("Query failed.");

	assert_eq!(top_two.items, all.items[..2].to_vec());
	assert!(!top_two.fewer_than_requested);

	let montreal = service
		.deals_for_adviser(deals_request(fixtures::MONTREAL, None))
		.await
		.expect("Query failed.");

	assert!(montreal.known);
	assert!(montreal.items.is_empty());

	let superseded = service
		.deals_for_adviser(deals_request(fixtures::EMPIRE_OLD, None))
		.await
		.expect("Query failed.");

	assert!(!superseded.known);
}

#[tokio::test]
async fn every_admitted_pair_is_ranked_from_both_sides() {
	let store = TestStore::new().expect("Failed to create test store.");
	let (service, report) = loaded(&store).await;
	let mut from_deals = 0;
	let mut from_advisers = 0;

	for deal_id in [fixtures::HUDSON_AMENDMENT, fixtures::LONE_STAR_FUND, fixtures::GOLDEN_GATE] {
		let response = service
			.advisers_for_deal(advisers_request(deal_id, Some(100)))
			.await
			.expect("Query failed.");

		assert_eq!(response.items.len() as u32, response.eligible_advisers, "{deal_id}");

		from_deals += response.items.len() as u64;
	}

	for adviser_id in [
		fixtures::EMPIRE,
		fixtures::PACIFIC,
		fixtures::LONE_STAR_WEALTH,
		fixtures::COAST_TO_COAST,
		fixtures::MONTREAL,
	] {
		let response = service
			.deals_for_adviser(deals_request(adviser_id, Some(100)))
			.await
			.expect("Query failed.");

		from_advisers += response.items.len() as u64;
	}

	assert_eq!(from_deals, report.scored_pairs);
	assert_eq!(from_advisers, report.scored_pairs);
}

#[tokio::test]
async fn large_candidate_sets_are_not_cut_before_ranking() {
	let store = TestStore::new().expect("Failed to create test store.");

	store.write_sample_filings().expect("Failed to write fixtures.");

	let mut advisers = FixtureFile::csv(&fixtures::ADV_BASE_A_HEADER).latin1();

	for index in 0..60 {
		let filing_id = (2_000 + index).to_string();
		let crd = (300_000 + index).to_string();

		advisers = advisers.row(&[
			("FilingID", filing_id.as_str()),
			("DateSubmitted", "1/15/2025 9:00:00 AM"),
			("1A", "Midtown Advisory Group"),
			("1E1", crd.as_str()),
			("1F1-City", "New York"),
			("1F1-State", "NY"),
			("5D1a", "50"),
			("5F2c", "250000000"),
		]);
	}

	store.write_fixture(fixtures::ADV_BASE_A_PATH, &advisers).expect("Failed to write fixture.");

	let service = service(store.config()).await;
	let report = service.reload().await.expect("Reload failed.");

	assert_eq!(report.advisers, 60);

	let response = service
		.advisers_for_deal(advisers_request(fixtures::HUDSON_AMENDMENT, Some(100)))
		.await
		.expect("Query failed.");

	assert_eq!(response.eligible_advisers, 60);
	assert_eq!(response.items.len(), 60);
	assert!(response.fewer_than_requested);
	assert_eq!(response.items[0].adviser_id, "2000");

	let last = service
		.deals_for_adviser(deals_request("2059", Some(100)))
		.await
		.expect("Query failed.");

	assert!(last.known);
	assert!(
		last.items.iter().any(|row| row.deal_id == format!("FD:{}", fixtures::HUDSON_AMENDMENT))
	);
}

#[tokio::test]
async fn same_named_firms_stay_separate_advisers() {
	let store = TestStore::new().expect("Failed to create test store.");

	store.write_sample_filings().expect("Failed to write fixtures.");

	let advisers = fixtures::adv_base_a().row(&[
		("FilingID", "1006"),
		("DateSubmitted", "2/1/2025 9:00:00 AM"),
		("1A", "Empire Capital Advisors LLC"),
		("1E1", "220006"),
		("1F1-City", "Houston"),
		("1F1-State", "TX"),
		("5D1a", "40"),
		("5F2c", "900000000"),
	]);

	store.write_fixture(fixtures::ADV_BASE_A_PATH, &advisers).expect("Failed to write fixture.");

	let service = service(store.config()).await;
	let report = service.reload().await.expect("Reload failed.");

	assert_eq!(report.advisers, 6);

	for adviser_id in [fixtures::EMPIRE, "1006"] {
		let response =
			service.deals_for_adviser(deals_request(adviser_id, None)).await.expect("Query failed.");

		assert!(response.known, "{adviser_id}");
		assert!(!response.items.is_empty(), "{adviser_id}");
	}
}

#[tokio::test]
async fn limits_are_defaulted_capped_and_validated() {
	let store = TestStore::new().expect("Failed to create test store.");
	let (service, _) = loaded(&store).await;
	let capped = service
		.advisers_for_deal(advisers_request(fixtures::GOLDEN_GATE, Some(10_000)))
		.await
		.expect("Query failed.");

	assert_eq!(capped.limit, 100);
	assert_eq!(capped.items.len(), 2);

	let err = service
		.advisers_for_deal(advisers_request(fixtures::GOLDEN_GATE, Some(0)))
		.await
		.expect_err("Zero limit must be rejected.");

	assert!(matches!(err, Error::InvalidRequest { .. }));

	let err = service
		.deals_for_adviser(deals_request("  ", None))
		.await
		.expect_err("Blank id must be rejected.");

	assert!(matches!(err, Error::InvalidRequest { .. }));
}

#[tokio::test]
async fn schema_drift_fails_only_that_source() {
	let store = TestStore::new().expect("Failed to create test store.");
	let (service, first) = loaded(&store).await;

	store
		.write_fixture(
			fixtures::FD_OFFERING_PATH,
			&fixtures::fd_offering().without_column("TOTALOFFERINGAMOUNT"),
		)
		.expect("Failed to write fixture.");

	let second = service.reload().await.expect("Reload failed.");

	assert!(!second.succeeded());
	assert_eq!(second.status, LoadStatus::SourcesFailed);
	assert_eq!(second.failures.len(), 1);
	assert_eq!(second.failures[0].family, "fd_offering");
	assert_eq!(second.failures[0].kind, "schema_drift");
	assert!(second.failures[0].message.contains("TOTALOFFERINGAMOUNT"));
	assert_eq!(second.digest("stg_fd_offering"), None);
	assert_eq!(second.rows("stg_fd_offering"), Some(4));

	for table in STAGING_TABLES.iter().filter(|table| table.name != "stg_fd_offering") {
		assert_eq!(second.digest(table.name), first.digest(table.name), "{}", table.name);
	}

	assert_eq!(second.scored_pairs, first.scored_pairs);

	let run = load_runs::latest_load_run(&service.db)
		.await
		.expect("Failed to read load runs.")
		.expect("Missing load run.");

	assert_eq!(run.status, "sources_failed");
}

#[tokio::test]
async fn failing_first_load_still_builds_from_other_sources() {
	let store = TestStore::new().expect("Failed to create test store.");

	store.write_sample_filings().expect("Failed to write fixtures.");

	let duplicated = fixtures::adv_base_b().row(&[("FilingID", fixtures::PACIFIC)]);

	store.write_fixture(fixtures::ADV_BASE_B_PATH, &duplicated).expect("Failed to write fixture.");

	let service = service(store.config()).await;
	let report = service.reload().await.expect("Reload failed.");

	assert_eq!(report.failures.len(), 1);
	assert_eq!(report.failures[0].kind, "duplicate_key");
	assert_eq!(report.rows("stg_adv_base_b"), None);
	assert_eq!(report.deals, 3);
	assert_eq!(report.advisers, 5);
}

#[tokio::test]
async fn results_do_not_depend_on_chunk_size() {
	let mut reports = Vec::new();
	let mut rankings = Vec::new();

	for chunk_rows in [1, 3, 50_000] {
		let store = TestStore::new().expect("Failed to create test store.");

		store.write_sample_filings().expect("Failed to write fixtures.");

		let mut cfg = store.config();

		cfg.ingest.chunk_rows = chunk_rows;

		let service = service(cfg).await;
		let report = service.reload().await.expect("Reload failed.");
		let ranking = service
			.deals_for_adviser(deals_request(fixtures::COAST_TO_COAST, None))
			.await
			.expect("Query failed.");

		reports.push(report);
		rankings.push(ranking.items);
	}

	for report in &reports[1..] {
		for table in STAGING_TABLES {
			assert_eq!(report.digest(table.name), reports[0].digest(table.name), "{}", table.name);
		}
	}

	assert!(rankings.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn empty_candidate_sets_are_reported_with_a_suggestion() {
	let store = TestStore::new().expect("Failed to create test store.");

	store.write_sample_filings().expect("Failed to write fixtures.");
	with_big_raise(&store);

	let mut cfg = store.config();

	cfg.matching.max_band_gap = 1;

	let service = service(cfg).await;
	let report = service.reload().await.expect("Reload failed.");

	assert!(report.succeeded());
	assert_eq!(report.empty_candidate_sets, 1);

	let empty = &report.empty_candidate_samples[0];

	assert_eq!(empty.deal_id, format!("FD:{BIG_RAISE}"));
	assert_eq!(empty.raise_band, Some(5));
	assert_eq!(empty.geography_matches, 2);
	assert!(empty.suggestion.contains("max_band_gap"));

	let response =
		service.advisers_for_deal(advisers_request(BIG_RAISE, None)).await.expect("Query failed.");

	assert!(response.known);
	assert!(response.items.is_empty());
	assert_eq!(response.eligible_advisers, 0);
	assert!(response.warning.as_deref().is_some_and(|warning| warning.contains("max_band_gap")));
}

#[tokio::test]
async fn widening_the_band_gap_only_adds_candidates() {
	let store = TestStore::new().expect("Failed to create test store.");

	store.write_sample_filings().expect("Failed to write fixtures.");
	with_big_raise(&store);

	let mut previous = 0;

	for gap in 0..=5 {
		let mut cfg = store.config();

		cfg.matching.max_band_gap = gap;

		let report = service(cfg).await.reload().await.expect("Reload failed.");

		assert!(report.scored_pairs >= previous, "gap {gap}");

		previous = report.scored_pairs;
	}
}

#[tokio::test]
async fn empty_store_returns_zero_rows() {
	let store = TestStore::new().expect("Failed to create test store.");
	let service = service(store.config()).await;
	let deals = service
		.advisers_for_deal(advisers_request(fixtures::HUDSON_AMENDMENT, Some(5)))
		.await
		.expect("Query failed.");
	let advisers =
		service.deals_for_adviser(deals_request(fixtures::EMPIRE, None)).await.expect("Query failed.");

	assert!(deals.items.is_empty());
	assert!(!deals.known);
	assert!(advisers.items.is_empty());
	assert!(!advisers.known);
}

#[tokio::test]
async fn missing_source_files_fail_without_aborting() {
	let store = TestStore::new().expect("Failed to create test store.");
	let service = service(store.config()).await;
	let report = service.reload().await.expect("Reload failed.");

	assert_eq!(report.failures.len(), STAGING_TABLES.len());
	assert!(report.failures.iter().all(|failure| failure.kind == "open"));
	assert_eq!(report.deals, 0);
	assert_eq!(report.rows("deal_features"), Some(0));
}

