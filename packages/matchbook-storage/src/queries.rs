use serde::Serialize;

use crate::{Result, db::Db, derived::CandidateCounts};

/// One scored deal/adviser pair with the attributes a reader needs to act on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct MatchRow {
	pub deal_id: String,
	pub accession_number: String,
	pub family: String,
	pub issuer_name: Option<String>,
	pub issuer_city: Option<String>,
	pub issuer_state: Option<String>,
	pub target_raise: Option<f64>,
	pub min_invest: Option<f64>,
	pub retail_eligible: bool,
	pub adviser_id: String,
	pub adviser_name: Option<String>,
	pub adviser_city: Option<String>,
	pub adviser_state: Option<String>,
	pub total_raum: Option<f64>,
	pub registered_states: String,
	pub clients_individual: Option<i64>,
	pub clients_hnw: Option<i64>,
	pub broker_dealer_affiliate: Option<bool>,
	pub composite_score: f64,
	pub geography_score: f64,
	pub capital_score: f64,
	pub audience_score: f64,
	pub security_score: f64,
	pub traction_score: f64,
}

const MATCH_COLUMNS: &str = "\
	deal_id,
	accession_number,
	family,
	issuer_name,
	issuer_city,
	issuer_state,
	target_raise,
	min_invest,
	retail_eligible,
	adviser_id,
	adviser_name,
	adviser_city,
	adviser_state,
	total_raum,
	registered_states,
	clients_individual,
	clients_hnw,
	broker_dealer_affiliate,
	composite_score,
	geography_score,
	capital_score,
	audience_score,
	security_score,
	traction_score";

/// Accepts a prefixed deal id (`FD:…`, `CF:…`) or a bare accession number.
pub async fn resolve_deal_id(db: &Db, raw: &str) -> Result<Option<String>> {
	let deal_id = sqlx::query_scalar::<_, String>(
		"\
SELECT deal_id
FROM deal_features
WHERE deal_id = ?1 OR accession_number = ?1
ORDER BY deal_id
LIMIT 1",
	)
	.bind(raw.trim())
	.fetch_optional(&db.pool)
	.await?;

	Ok(deal_id)
}

pub async fn adviser_exists(db: &Db, adviser_id: &str) -> Result<bool> {
	let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM adviser_features WHERE adviser_id = ?1")
		.bind(adviser_id.trim())
		.fetch_optional(&db.pool)
		.await?;

	Ok(found.is_some())
}

/// Every scored pair of one deal, in adviser id order. Ranking is left to the caller.
pub async fn matches_for_deal(db: &Db, deal_id: &str) -> Result<Vec<MatchRow>> {
	let sql = format!(
		"\
SELECT
{MATCH_COLUMNS}
FROM vw_investor_deal_scored
WHERE deal_id = ?1
ORDER BY adviser_id"
	);
	let rows = sqlx::query_as::<_, MatchRow>(&sql).bind(deal_id).fetch_all(&db.pool).await?;

	Ok(rows)
}

/// Every scored pair of one adviser, in deal id order.
pub async fn matches_for_adviser(db: &Db, adviser_id: &str) -> Result<Vec<MatchRow>> {
	let sql = format!(
		"\
SELECT
{MATCH_COLUMNS}
FROM vw_investor_deal_scored
WHERE adviser_id = ?1
ORDER BY deal_id"
	);
	let rows = sqlx::query_as::<_, MatchRow>(&sql).bind(adviser_id).fetch_all(&db.pool).await?;

	Ok(rows)
}

pub async fn candidate_counts(db: &Db, deal_id: &str) -> Result<Option<CandidateCounts>> {
	let row = sqlx::query_as::<_, (i64, i64)>(
		"SELECT eligible_advisers, geography_matches FROM deal_candidate_stats WHERE deal_id = ?1",
	)
	.bind(deal_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row.map(|(eligible, geography)| CandidateCounts {
		eligible_advisers: u32::try_from(eligible).unwrap_or(0),
		geography_matches: u32::try_from(geography).unwrap_or(0),
	}))
}
