//! Derived tables, rebuilt together on every load.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use time::Date;

use matchbook_domain::{
	features::{AdviserFeatures, DealFeatures},
	scoring::ComponentScores,
};

use crate::{Result, db::Db};

const MAX_BIND_PARAMS: usize = 32_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
	Deal,
	Adviser,
}
impl EntityKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Deal => "deal",
			Self::Adviser => "adviser",
		}
	}
}

/// The filing chosen as current for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestFiling {
	pub entity_kind: EntityKind,
	pub entity_key: String,
	pub record_key: String,
	pub family: String,
	pub filing_date: Option<Date>,
	pub filings_in_group: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPair {
	pub deal_id: String,
	pub adviser_id: String,
	pub scores: ComponentScores,
	pub composite: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateCounts {
	/// Advisers admitted by both candidate filters; each has a stored score.
	pub eligible_advisers: u32,
	/// Advisers admitted by the geography filter alone.
	pub geography_matches: u32,
}

#[derive(Debug, Clone, Default)]
pub struct DerivedSet {
	pub latest: Vec<LatestFiling>,
	pub deals: Vec<DealFeatures>,
	pub advisers: Vec<AdviserFeatures>,
	pub scores: Vec<ScoredPair>,
	pub candidate_counts: Vec<(String, CandidateCounts)>,
}

/// Replaces every derived table in one transaction.
pub async fn replace_derived(db: &Db, set: &DerivedSet) -> Result<()> {
	let mut tx = db.pool.begin().await?;

	for table in [
		"deal_adviser_scores",
		"deal_candidate_stats",
		"deal_features",
		"adviser_features",
		"latest_filings",
	] {
		sqlx::query(&format!("DELETE FROM {table}")).execute(&mut *tx).await?;
	}

	insert_latest(&mut *tx, &set.latest).await?;
	insert_deals(&mut *tx, &set.deals).await?;
	insert_advisers(&mut *tx, &set.advisers).await?;
	insert_scores(&mut *tx, &set.scores).await?;
	insert_candidate_counts(&mut *tx, &set.candidate_counts).await?;

	tx.commit().await?;

	tracing::info!(
		latest = set.latest.len(),
		deals = set.deals.len(),
		advisers = set.advisers.len(),
		scores = set.scores.len(),
		"Derived tables replaced."
	);

	Ok(())
}

fn rows_per_statement(columns: usize) -> usize {
	(MAX_BIND_PARAMS / columns).max(1)
}

async fn insert_latest(conn: &mut SqliteConnection, rows: &[LatestFiling]) -> Result<()> {
	for batch in rows.chunks(rows_per_statement(6)) {
		let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
			"\
INSERT INTO latest_filings (
	entity_kind,
	entity_key,
	record_key,
	family,
	filing_date,
	filings_in_group
) ",
		);

		builder.push_values(batch, |mut bound, row| {
			bound
				.push_bind(row.entity_kind.as_str())
				.push_bind(row.entity_key.as_str())
				.push_bind(row.record_key.as_str())
				.push_bind(row.family.as_str())
				.push_bind(row.filing_date)
				.push_bind(i64::from(row.filings_in_group));
		});
		builder.build().execute(&mut *conn).await?;
	}

	Ok(())
}

async fn insert_deals(conn: &mut SqliteConnection, rows: &[DealFeatures]) -> Result<()> {
	for batch in rows.chunks(rows_per_statement(25)) {
		let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
			"\
INSERT INTO deal_features (
	deal_id,
	family,
	accession_number,
	entity_key,
	filings_in_group,
	filing_date,
	issuer_name,
	issuer_city,
	issuer_state,
	industry_group,
	security_type,
	security_class,
	target_raise,
	max_raise,
	amount_sold,
	min_invest,
	unit_price,
	sold_ratio,
	employees,
	revenue_recent,
	revenue_prior,
	accepts_non_accredited,
	retail_eligible,
	offering_states,
	raise_band
) ",
		);

		builder.push_values(batch, |mut bound, deal| {
			bound
				.push_bind(deal.deal_id.as_str())
				.push_bind(deal.family.as_str())
				.push_bind(deal.accession_number.as_str())
				.push_bind(deal.entity_key.as_str())
				.push_bind(i64::from(deal.filings_in_group))
				.push_bind(deal.filing_date)
				.push_bind(deal.issuer_name.as_deref())
				.push_bind(deal.issuer_city.as_deref())
				.push_bind(deal.issuer_state.as_deref())
				.push_bind(deal.industry_group.as_deref())
				.push_bind(deal.security_type.as_deref())
				.push_bind(deal.security_class.as_str())
				.push_bind(deal.target_raise)
				.push_bind(deal.max_raise)
				.push_bind(deal.amount_sold)
				.push_bind(deal.min_invest)
				.push_bind(deal.unit_price)
				.push_bind(deal.sold_ratio)
				.push_bind(deal.employees)
				.push_bind(deal.revenue_recent)
				.push_bind(deal.revenue_prior)
				.push_bind(deal.accepts_non_accredited)
				.push_bind(deal.retail_eligible)
				.push_bind(deal.offering_states.to_canonical())
				.push_bind(deal.raise_band.map(i64::from));
		});
		builder.build().execute(&mut *conn).await?;
	}

	Ok(())
}

async fn insert_advisers(conn: &mut SqliteConnection, rows: &[AdviserFeatures]) -> Result<()> {
	for batch in rows.chunks(rows_per_statement(20)) {
		let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
			"\
INSERT INTO adviser_features (
	adviser_id,
	filing_id,
	entity_key,
	filings_in_group,
	filing_date,
	legal_name,
	hq_city,
	hq_state,
	total_raum,
	discretionary_raum,
	aum_band,
	clients_individual,
	clients_hnw,
	clients_pooled,
	retail_client_ratio,
	serves_retail,
	serves_accredited,
	registered_states,
	broker_dealer_affiliate,
	has_custody
) ",
		);

		builder.push_values(batch, |mut bound, adviser| {
			bound
				.push_bind(adviser.adviser_id.as_str())
				.push_bind(adviser.filing_id)
				.push_bind(adviser.entity_key.as_str())
				.push_bind(i64::from(adviser.filings_in_group))
				.push_bind(adviser.filing_date)
				.push_bind(adviser.legal_name.as_deref())
				.push_bind(adviser.hq_city.as_deref())
				.push_bind(adviser.hq_state.as_deref())
				.push_bind(adviser.total_raum)
				.push_bind(adviser.discretionary_raum)
				.push_bind(adviser.aum_band.map(i64::from))
				.push_bind(adviser.clients_individual)
				.push_bind(adviser.clients_hnw)
				.push_bind(adviser.clients_pooled)
				.push_bind(adviser.retail_client_ratio)
				.push_bind(adviser.serves_retail)
				.push_bind(adviser.serves_accredited)
				.push_bind(adviser.registered_states.to_canonical())
				.push_bind(adviser.broker_dealer_affiliate)
				.push_bind(adviser.has_custody);
		});
		builder.build().execute(&mut *conn).await?;
	}

	Ok(())
}

async fn insert_scores(conn: &mut SqliteConnection, rows: &[ScoredPair]) -> Result<()> {
	for batch in rows.chunks(rows_per_statement(8)) {
		let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
			"\
INSERT INTO deal_adviser_scores (
	deal_id,
	adviser_id,
	geography_score,
	capital_score,
	audience_score,
	security_score,
	traction_score,
	composite_score
) ",
		);

		builder.push_values(batch, |mut bound, pair| {
			bound
				.push_bind(pair.deal_id.as_str())
				.push_bind(pair.adviser_id.as_str())
				.push_bind(pair.scores.geography)
				.push_bind(pair.scores.capital)
				.push_bind(pair.scores.audience)
				.push_bind(pair.scores.security)
				.push_bind(pair.scores.traction)
				.push_bind(pair.composite);
		});
		builder.build().execute(&mut *conn).await?;
	}

	Ok(())
}

async fn insert_candidate_counts(
	conn: &mut SqliteConnection,
	rows: &[(String, CandidateCounts)],
) -> Result<()> {
	for batch in rows.chunks(rows_per_statement(3)) {
		let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
			"INSERT INTO deal_candidate_stats (deal_id, eligible_advisers, geography_matches) ",
		);

		builder.push_values(batch, |mut bound, (deal_id, counts)| {
			bound
				.push_bind(deal_id.as_str())
				.push_bind(i64::from(counts.eligible_advisers))
				.push_bind(i64::from(counts.geography_matches));
		});
		builder.build().execute(&mut *conn).await?;
	}

	Ok(())
}
