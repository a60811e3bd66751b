//! Read-only ranked lookups over the scored view.

use serde::{Deserialize, Serialize};

use matchbook_storage::{
	derived::CandidateCounts,
	queries::{self, MatchRow},
	staging,
};

use crate::{Error, MatchService, Result, rank};

#[derive(Debug, Clone, Deserialize)]
pub struct AdvisersForDealRequest {
	/// A prefixed deal id (`FD:…`, `CF:…`) or a bare accession number.
	pub deal_id: String,
	pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvisersForDealResponse {
	pub deal_id: String,
	/// False when no deal with this id is in the store.
	pub known: bool,
	pub limit: u32,
	pub items: Vec<MatchRow>,
	pub fewer_than_requested: bool,
	pub eligible_advisers: u32,
	pub warning: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DealsForAdviserRequest {
	pub adviser_id: String,
	pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DealsForAdviserResponse {
	pub adviser_id: String,
	pub known: bool,
	pub limit: u32,
	pub items: Vec<MatchRow>,
	pub fewer_than_requested: bool,
	pub warning: Option<String>,
}

impl MatchService {
	pub async fn advisers_for_deal(
		&self,
		req: AdvisersForDealRequest,
	) -> Result<AdvisersForDealResponse> {
		let raw = required_id("deal_id", &req.deal_id)?;
		let limit = self.effective_limit(req.limit)?;
		let mut response = AdvisersForDealResponse {
			deal_id: raw.to_string(),
			known: false,
			limit,
			items: Vec::new(),
			fewer_than_requested: true,
			eligible_advisers: 0,
			warning: None,
		};

		if !self.store_loaded().await? {
			return Ok(response);
		}

		let Some(deal_id) = queries::resolve_deal_id(&self.db, raw).await? else {
			return Ok(response);
		};
		let rows = queries::matches_for_deal(&self.db, &deal_id).await?;
		let ranked = rank::top_advisers(rows, limit as usize);
		let counts = queries::candidate_counts(&self.db, &deal_id)
			.await?
			.unwrap_or(CandidateCounts { eligible_advisers: 0, geography_matches: 0 });

		response.warning = if counts.eligible_advisers == 0 {
			Some(format!(
				"No adviser passed the candidate filters for {deal_id}; increase \
				 matching.max_band_gap or check the issuer state."
			))
		} else if ranked.fewer_than_requested {
			Some(format!("Only {} of {limit} requested advisers are available.", ranked.items.len()))
		} else {
			None
		};
		response.deal_id = deal_id;
		response.known = true;
		response.items = ranked.items;
		response.fewer_than_requested = ranked.fewer_than_requested;
		response.eligible_advisers = counts.eligible_advisers;

		Ok(response)
	}

	pub async fn deals_for_adviser(
		&self,
		req: DealsForAdviserRequest,
	) -> Result<DealsForAdviserResponse> {
		let adviser_id = required_id("adviser_id", &req.adviser_id)?;
		let limit = self.effective_limit(req.limit)?;
		let mut response = DealsForAdviserResponse {
			adviser_id: adviser_id.to_string(),
			known: false,
			limit,
			items: Vec::new(),
			fewer_than_requested: true,
			warning: None,
		};

		if !self.store_loaded().await? || !queries::adviser_exists(&self.db, adviser_id).await? {
			return Ok(response);
		}

		let rows = queries::matches_for_adviser(&self.db, adviser_id).await?;
		let ranked = rank::top_deals(rows, limit as usize);

		if ranked.fewer_than_requested {
			response.warning = Some(format!(
				"Only {} of {limit} requested deals are available.",
				ranked.items.len()
			));
		}

		response.known = true;
		response.items = ranked.items;
		response.fewer_than_requested = ranked.fewer_than_requested;

		Ok(response)
	}

	/// Missing limits fall back to the default; large ones are capped.
	fn effective_limit(&self, requested: Option<u32>) -> Result<u32> {
		let matching = &self.cfg.matching;

		match requested {
			None => Ok(matching.default_limit),
			Some(0) => Err(Error::InvalidRequest { message: "limit must be positive.".to_string() }),
			Some(limit) => Ok(limit.min(matching.max_limit)),
		}
	}

	/// A store that was never loaded has no derived tables and answers with zero rows.
	async fn store_loaded(&self) -> Result<bool> {
		if !self.db.exists() {
			return Ok(false);
		}

		Ok(staging::table_exists(&self.db.pool, "vw_investor_deal_scored").await?)
	}
}

fn required_id<'a>(field: &str, raw: &'a str) -> Result<&'a str> {
	let id = raw.trim();

	if id.is_empty() {
		return Err(Error::InvalidRequest { message: format!("{field} must not be empty.") });
	}

	Ok(id)
}
