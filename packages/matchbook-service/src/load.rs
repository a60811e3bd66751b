//! Full reload: stage every source, then rebuild the derived tables from staging.

use std::path::PathBuf;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use matchbook_config::{Matching, SourceFile};
use matchbook_domain::{
	features::{AdviserFeatures, DealFeatures},
	scoring,
};
use matchbook_sources::{MAX_WARNING_SAMPLES, SourceLayout, SourceReader, SourceStats};
use matchbook_storage::{
	derived::{self, CandidateCounts, DerivedSet, ScoredPair},
	load_runs::{self, LoadStatus},
	models::{
		AdvBaseA, AdvBaseB, CfDisclosure, CfIssuerInformation, CfJurisdiction, CfSubmission,
		FdIssuer, FdOffering, FdSubmission, STAGING_TABLES,
	},
	staging::{self, StagingDigest},
};

use crate::{
	Error, MatchService, Result,
	candidates::{CandidateFilter, CandidateIndex},
	extract::{self, StagingSnapshot},
	time_serde,
};

const DERIVED_TABLES: [&str; 5] = [
	"latest_filings",
	"deal_features",
	"adviser_features",
	"deal_adviser_scores",
	"deal_candidate_stats",
];
const VIEWS: [&str; 6] = [
	"vw_deal_latest",
	"vw_adviser_latest",
	"vw_deal_features",
	"vw_adviser_features",
	"vw_investor_deal_candidates",
	"vw_investor_deal_scored",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagedSource {
	#[serde(flatten)]
	pub stats: SourceStats,
	/// blake3 over the canonical encoding of every staged row, in file order.
	pub digest: String,
}

/// A source that could not be staged. Its previous table is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
	pub family: String,
	pub table: String,
	pub kind: String,
	pub message: String,
}
impl SourceFailure {
	fn new(family: &str, table: &str, err: &Error) -> Self {
		let kind = match err {
			Error::Source(err) => err.kind(),
			_ => "storage",
		};

		Self {
			family: family.to_string(),
			table: table.to_string(),
			kind: kind.to_string(),
			message: err.to_string(),
		}
	}
}

/// A deal no adviser survived the candidate filters for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyCandidateSet {
	pub deal_id: String,
	pub issuer_state: Option<String>,
	pub raise_band: Option<u8>,
	/// Advisers that pass geography alone.
	pub geography_matches: u32,
	pub suggestion: String,
}
impl EmptyCandidateSet {
	fn new(deal: &DealFeatures, geography_matches: u32, filter: CandidateFilter) -> Self {
		let suggestion = match deal.issuer_state.as_deref() {
			_ if geography_matches > 0 => format!(
				"{geography_matches} advisers are present in the issuer state but sit more than {} \
				 AUM bands below the raise; increase matching.max_band_gap to admit them.",
				filter.max_band_gap
			),
			Some(state) => format!(
				"No adviser is registered or headquartered in {state}; only nationwide advisers can \
				 match this deal."
			),
			None => "The deal has no issuer state; only nationwide advisers can match it.".to_string(),
		};

		Self {
			deal_id: deal.deal_id.clone(),
			issuer_state: deal.issuer_state.clone(),
			raise_band: deal.raise_band,
			geography_matches,
			suggestion,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
	pub name: String,
	/// `None` when the table was never created.
	pub rows: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
	pub run_id: Uuid,
	pub store_path: PathBuf,
	pub status: LoadStatus,
	#[serde(with = "time_serde")]
	pub started_at: OffsetDateTime,
	#[serde(with = "time_serde")]
	pub finished_at: OffsetDateTime,
	pub sources: Vec<StagedSource>,
	pub failures: Vec<SourceFailure>,
	pub deals: u64,
	pub advisers: u64,
	pub scored_pairs: u64,
	pub empty_candidate_sets: u64,
	pub empty_candidate_samples: Vec<EmptyCandidateSet>,
	pub table_counts: Vec<TableCount>,
}
impl LoadReport {
	pub fn succeeded(&self) -> bool {
		self.status == LoadStatus::Completed
	}

	pub fn digest(&self, table: &str) -> Option<&str> {
		self.sources
			.iter()
			.find(|source| source.stats.table == table)
			.map(|source| source.digest.as_str())
	}

	pub fn rows(&self, name: &str) -> Option<i64> {
		self.table_counts.iter().find(|count| count.name == name).and_then(|count| count.rows)
	}
}

/// Scored pairs plus the per-deal bookkeeping that explains them.
#[derive(Debug, Clone, Default)]
pub struct Scored {
	pub pairs: Vec<ScoredPair>,
	pub candidate_counts: Vec<(String, CandidateCounts)>,
	pub empty: Vec<EmptyCandidateSet>,
}

/// Filters and scores every deal against every adviser. Every admitted pair is kept so queries
/// can rank over the full candidate set from either side.
pub fn score_candidates(
	deals: &[DealFeatures],
	advisers: &[AdviserFeatures],
	matching: &Matching,
) -> Scored {
	let filter = CandidateFilter::new(matching.max_band_gap);
	let index = CandidateIndex::build(advisers, filter);
	let geography_only = CandidateIndex::build(advisers, CandidateFilter::new(u8::MAX));
	let mut scored = Scored::default();

	for deal in deals {
		let candidates = index.candidates(deal);
		let geography_matches = count(geography_only.candidates(deal).len());
		let pairs = candidates
			.iter()
			.map(|adviser| {
				let scores = scoring::score_pair(deal, adviser);

				ScoredPair {
					deal_id: deal.deal_id.clone(),
					adviser_id: adviser.adviser_id.clone(),
					composite: scoring::composite(&scores),
					scores,
				}
			})
			.collect::<Vec<_>>();
		let counts =
			CandidateCounts { eligible_advisers: count(candidates.len()), geography_matches };

		if candidates.is_empty() {
			tracing::debug!(deal_id = %deal.deal_id, geography_matches, "Deal has no candidates.");

			scored.empty.push(EmptyCandidateSet::new(deal, geography_matches, filter));
		}

		scored.candidate_counts.push((deal.deal_id.clone(), counts));
		scored.pairs.extend(pairs);
	}

	scored
}

impl MatchService {
	/// Restages every source and rebuilds the derived tables.
	///
	/// A failing source keeps its previous staging table and is reported; the remaining sources
	/// and the derived rebuild still run. Store-level failures abort the reload.
	pub async fn reload(&self) -> Result<LoadReport> {
		let run_id = Uuid::new_v4();
		let started_at = OffsetDateTime::now_utc();

		tracing::info!(%run_id, store = %self.db.path().display(), "Reload started.");

		self.db.ensure_schema().await?;

		let sources = &self.cfg.sources;
		let outcomes = vec![
			self.stage::<FdSubmission>(&sources.fd_submission).await,
			self.stage::<FdIssuer>(&sources.fd_issuers).await,
			self.stage::<FdOffering>(&sources.fd_offering).await,
			self.stage::<CfSubmission>(&sources.cf_submission).await,
			self.stage::<CfIssuerInformation>(&sources.cf_issuer).await,
			self.stage::<CfDisclosure>(&sources.cf_disclosure).await,
			self.stage::<CfJurisdiction>(&sources.cf_jurisdictions).await,
			self.stage::<AdvBaseA>(&sources.adv_base_a).await,
			self.stage::<AdvBaseB>(&sources.adv_base_b).await,
		];
		let mut staged = Vec::new();
		let mut failures = Vec::new();

		for outcome in outcomes {
			match outcome {
				Ok(source) => staged.push(source),
				Err(failure) => failures.push(failure),
			}
		}

		let snapshot = self.snapshot().await?;
		let extracted = extract::extract(&snapshot);
		let scored = score_candidates(&extracted.deals, &extracted.advisers, &self.cfg.matching);
		let deals = extracted.deals.len() as u64;
		let advisers = extracted.advisers.len() as u64;
		let scored_pairs = scored.pairs.len() as u64;
		let empty_candidate_sets = scored.empty.len() as u64;

		if empty_candidate_sets > 0 {
			tracing::warn!(
				deals = empty_candidate_sets,
				max_band_gap = self.cfg.matching.max_band_gap,
				"Some deals have no candidate advisers."
			);
		}

		let mut empty_candidate_samples = scored.empty;

		empty_candidate_samples.truncate(MAX_WARNING_SAMPLES);

		derived::replace_derived(
			&self.db,
			&DerivedSet {
				latest: extracted.latest,
				deals: extracted.deals,
				advisers: extracted.advisers,
				scores: scored.pairs,
				candidate_counts: scored.candidate_counts,
			},
		)
		.await?;

		let table_counts = self.table_counts().await?;
		let status =
			if failures.is_empty() { LoadStatus::Completed } else { LoadStatus::SourcesFailed };
		let report = LoadReport {
			run_id,
			store_path: self.db.path().to_path_buf(),
			status,
			started_at,
			finished_at: OffsetDateTime::now_utc(),
			sources: staged,
			failures,
			deals,
			advisers,
			scored_pairs,
			empty_candidate_sets,
			empty_candidate_samples,
			table_counts,
		};
		let value = serde_json::to_value(&report).map_err(matchbook_storage::Error::from)?;

		load_runs::insert_load_run(
			&self.db,
			run_id,
			report.started_at,
			report.finished_at,
			status,
			&value,
		)
		.await?;

		tracing::info!(
			%run_id,
			status = status.as_str(),
			failed_sources = report.failures.len(),
			deals,
			advisers,
			scored_pairs,
			"Reload finished."
		);

		Ok(report)
	}

	async fn stage<R>(&self, source: &SourceFile) -> Result<StagedSource, SourceFailure>
	where
		R: SourceLayout,
	{
		self.try_stage::<R>(source).await.map_err(|err| {
			let failure = SourceFailure::new(R::LAYOUT.family, R::TABLE.name, &err);

			tracing::error!(
				family = %failure.family,
				kind = %failure.kind,
				error = %failure.message,
				"Source failed; its previous staging table is kept."
			);

			failure
		})
	}

	async fn try_stage<R>(&self, source: &SourceFile) -> Result<StagedSource>
	where
		R: SourceLayout,
	{
		let table = R::TABLE;
		let path = self.cfg.source_path(source);
		let mut reader = SourceReader::<R>::open(&path, source, self.cfg.ingest.chunk_rows)?;
		let mut digest = StagingDigest::new();
		let mut tx = self.db.pool.begin().await?;

		staging::recreate_table(&mut *tx, &table).await?;

		while let Some(chunk) = reader.next_chunk()? {
			staging::insert_rows(&mut *tx, &chunk).await?;

			for row in &chunk {
				digest.update(row);
			}
		}

		tx.commit().await?;

		let stats = reader.finish();

		if stats.warnings > 0 {
			tracing::warn!(
				family = %stats.family,
				warnings = stats.warnings,
				skipped = stats.rows_skipped,
				"Source rows recovered with null values."
			);
		}

		tracing::info!(
			family = %stats.family,
			table = %stats.table,
			rows = stats.rows_staged,
			"Source staged."
		);

		Ok(StagedSource { stats, digest: digest.finalize() })
	}

	async fn snapshot(&self) -> Result<StagingSnapshot> {
		let pool = &self.db.pool;

		Ok(StagingSnapshot {
			fd_submissions: staging::fetch_all(pool).await?,
			fd_issuers: staging::fetch_all(pool).await?,
			fd_offerings: staging::fetch_all(pool).await?,
			cf_submissions: staging::fetch_all(pool).await?,
			cf_issuers: staging::fetch_all(pool).await?,
			cf_disclosures: staging::fetch_all(pool).await?,
			cf_jurisdictions: staging::fetch_all(pool).await?,
			adv_base_a: staging::fetch_all(pool).await?,
			adv_base_b: staging::fetch_all(pool).await?,
		})
	}

	/// Row counts for every staging table, derived table and view.
	pub async fn table_counts(&self) -> Result<Vec<TableCount>> {
		let names = STAGING_TABLES
			.iter()
			.map(|table| table.name)
			.chain(DERIVED_TABLES)
			.chain(VIEWS);
		let mut counts = Vec::new();

		for name in names {
			let rows = staging::row_count(&self.db.pool, name).await?;

			counts.push(TableCount { name: name.to_string(), rows });
		}

		Ok(counts)
	}
}

fn count(len: usize) -> u32 {
	u32::try_from(len).unwrap_or(u32::MAX)
}
