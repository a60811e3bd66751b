//! Rule-based deal/adviser compatibility scores.
//!
//! Every component lands in `[0, 1]`. The composite is a fixed-weight sum evaluated in a fixed
//! order and rounded to [`SCORE_DECIMALS`] places, so equal inputs always produce equal scores.

use serde::{Deserialize, Serialize};

use crate::{
	band,
	features::{AdviserFeatures, DealFeatures, SecurityClass},
	jurisdiction,
};

pub const GEOGRAPHY_WEIGHT: f64 = 0.30;
pub const CAPITAL_WEIGHT: f64 = 0.30;
pub const AUDIENCE_WEIGHT: f64 = 0.20;
pub const SECURITY_WEIGHT: f64 = 0.10;
pub const TRACTION_WEIGHT: f64 = 0.10;

pub const SCORE_DECIMALS: i32 = 4;

pub const SAME_STATE_CREDIT: f64 = 1.0;
pub const SAME_REGION_CREDIT: f64 = 0.5;

/// Indexed by band distance; distances past the end score zero.
pub const CAPITAL_BY_BAND_DISTANCE: [f64; 4] = [1.0, 0.7, 0.4, 0.15];
pub const CAPITAL_UNKNOWN: f64 = 0.25;
pub const GOOD_CAPITAL_FIT: f64 = 0.7;

pub const AUDIENCE_MATCH: f64 = 1.0;
pub const AUDIENCE_MISMATCH: f64 = 0.4;
pub const AUDIENCE_UNKNOWN: f64 = 0.6;

pub const TRACTION_NEUTRAL: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
	pub geography: f64,
	pub capital: f64,
	pub audience: f64,
	pub security: f64,
	pub traction: f64,
}
impl ComponentScores {
	pub fn composite(&self) -> f64 {
		composite(self)
	}
}

pub fn score_pair(deal: &DealFeatures, adviser: &AdviserFeatures) -> ComponentScores {
	ComponentScores {
		geography: round_score(geography_score(deal, adviser)),
		capital: round_score(capital_score(deal.raise_band, adviser.aum_band)),
		audience: round_score(audience_score(deal, adviser)),
		security: round_score(security_score(deal.security_class)),
		traction: round_score(traction_score(deal)),
	}
}

pub fn composite(scores: &ComponentScores) -> f64 {
	let mut total = 0.0;

	total += GEOGRAPHY_WEIGHT * scores.geography;
	total += CAPITAL_WEIGHT * scores.capital;
	total += AUDIENCE_WEIGHT * scores.audience;
	total += SECURITY_WEIGHT * scores.security;
	total += TRACTION_WEIGHT * scores.traction;

	round_score(total)
}

pub fn geography_score(deal: &DealFeatures, adviser: &AdviserFeatures) -> f64 {
	let Some(state) = deal.issuer_state.as_deref() else {
		return 0.0;
	};

	if adviser.is_present_in(state) {
		return SAME_STATE_CREDIT;
	}

	let Some(region) = jurisdiction::region_of(state) else {
		return 0.0;
	};
	let hq_region = adviser.hq_state.as_deref().and_then(jurisdiction::region_of);

	if hq_region == Some(region) || adviser.registered_states.regions().any(|r| r == region) {
		return SAME_REGION_CREDIT;
	}

	0.0
}

/// Symmetric in band distance and decreasing as the bands drift apart.
pub fn capital_score(raise_band: Option<u8>, aum_band: Option<u8>) -> f64 {
	let (Some(raise_band), Some(aum_band)) = (raise_band, aum_band) else {
		return CAPITAL_UNKNOWN;
	};
	let distance = band::band_distance(raise_band, aum_band) as usize;

	CAPITAL_BY_BAND_DISTANCE.get(distance).copied().unwrap_or(0.0)
}

/// Mismatch lowers the score but never zeroes it.
pub fn audience_score(deal: &DealFeatures, adviser: &AdviserFeatures) -> f64 {
	let posture = if deal.retail_eligible { adviser.serves_retail } else { adviser.serves_accredited };

	match posture {
		Some(true) => AUDIENCE_MATCH,
		Some(false) => AUDIENCE_MISMATCH,
		None => AUDIENCE_UNKNOWN,
	}
}

pub fn security_score(class: SecurityClass) -> f64 {
	match class {
		SecurityClass::Equity => 1.0,
		SecurityClass::Convertible => 0.8,
		SecurityClass::PooledFund => 0.7,
		SecurityClass::Debt => 0.6,
		SecurityClass::Other => 0.5,
		SecurityClass::Unknown => 0.4,
	}
}

/// Mean of whichever signals are present: sold-vs-target, headcount, revenue trend.
pub fn traction_score(deal: &DealFeatures) -> f64 {
	let signals = [
		deal.sold_ratio.map(|ratio| ratio.clamp(0.0, 1.0)),
		deal.employees.map(employee_signal),
		revenue_signal(deal.revenue_recent, deal.revenue_prior),
	];
	let mut total = 0.0;
	let mut present = 0_u32;

	for signal in signals.into_iter().flatten() {
		total += signal;
		present += 1;
	}

	if present == 0 {
		return TRACTION_NEUTRAL;
	}

	total / f64::from(present)
}

fn employee_signal(employees: i64) -> f64 {
	match employees {
		i64::MIN..=0 => 0.0,
		1..=4 => 0.4,
		5..=19 => 0.7,
		_ => 1.0,
	}
}

fn revenue_signal(recent: Option<f64>, prior: Option<f64>) -> Option<f64> {
	let recent = recent?;

	if recent <= 0.0 {
		return Some(0.2);
	}
	if prior.map(|prior| prior > 0.0 && recent > prior).unwrap_or(false) {
		return Some(1.0);
	}

	Some(0.6)
}

pub fn round_score(value: f64) -> f64 {
	let scale = 10_f64.powi(SCORE_DECIMALS);

	((value * scale).round() / scale).clamp(0.0, 1.0)
}
