//! Feature records and the canonical derivations behind their flags.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::jurisdiction::{JurisdictionSet, NATIONWIDE_MIN_JURISDICTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealFamily {
	#[serde(rename = "FORM_D")]
	FormD,
	#[serde(rename = "REG_CF")]
	RegCf,
}
impl DealFamily {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::FormD => "FORM_D",
			Self::RegCf => "REG_CF",
		}
	}

	pub fn id_prefix(self) -> &'static str {
		match self {
			Self::FormD => "FD",
			Self::RegCf => "CF",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"FORM_D" => Some(Self::FormD),
			"REG_CF" => Some(Self::RegCf),
			_ => None,
		}
	}

	pub fn deal_id(self, accession_number: &str) -> String {
		format!("{}:{accession_number}", self.id_prefix())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityClass {
	Equity,
	Convertible,
	PooledFund,
	Debt,
	Other,
	Unknown,
}
impl SecurityClass {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Equity => "equity",
			Self::Convertible => "convertible",
			Self::PooledFund => "pooled_fund",
			Self::Debt => "debt",
			Self::Other => "other",
			Self::Unknown => "unknown",
		}
	}

	pub fn parse(raw: &str) -> Self {
		match raw {
			"equity" => Self::Equity,
			"convertible" => Self::Convertible,
			"pooled_fund" => Self::PooledFund,
			"debt" => Self::Debt,
			"other" => Self::Other,
			_ => Self::Unknown,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealFeatures {
	pub deal_id: String,
	pub family: DealFamily,
	pub accession_number: String,
	pub entity_key: String,
	pub filings_in_group: u32,
	pub filing_date: Option<Date>,
	pub issuer_name: Option<String>,
	pub issuer_city: Option<String>,
	pub issuer_state: Option<String>,
	pub industry_group: Option<String>,
	pub security_type: Option<String>,
	pub security_class: SecurityClass,
	pub target_raise: Option<f64>,
	pub max_raise: Option<f64>,
	pub amount_sold: Option<f64>,
	pub min_invest: Option<f64>,
	pub unit_price: Option<f64>,
	pub sold_ratio: Option<f64>,
	pub employees: Option<i64>,
	pub revenue_recent: Option<f64>,
	pub revenue_prior: Option<f64>,
	pub accepts_non_accredited: Option<bool>,
	pub retail_eligible: bool,
	pub offering_states: JurisdictionSet,
	pub raise_band: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviserFeatures {
	pub adviser_id: String,
	pub filing_id: i64,
	pub entity_key: String,
	pub filings_in_group: u32,
	pub filing_date: Option<Date>,
	pub legal_name: Option<String>,
	pub hq_city: Option<String>,
	pub hq_state: Option<String>,
	pub total_raum: Option<f64>,
	pub discretionary_raum: Option<f64>,
	pub aum_band: Option<u8>,
	pub clients_individual: Option<i64>,
	pub clients_hnw: Option<i64>,
	pub clients_pooled: Option<i64>,
	pub retail_client_ratio: Option<f64>,
	pub serves_retail: Option<bool>,
	pub serves_accredited: Option<bool>,
	pub registered_states: JurisdictionSet,
	pub broker_dealer_affiliate: Option<bool>,
	pub has_custody: Option<bool>,
}
impl AdviserFeatures {
	pub fn state_unrestricted(&self) -> bool {
		self.registered_states.len() >= NATIONWIDE_MIN_JURISDICTIONS
	}

	pub fn is_present_in(&self, state: &str) -> bool {
		self.hq_state.as_deref() == Some(state) || self.registered_states.contains(state)
	}
}

/// Reg CF offerings are open to every investor; Form D offerings only when the filing says
/// non-accredited investors may participate.
pub fn retail_eligible(family: DealFamily, has_non_accredited: Option<bool>) -> bool {
	match family {
		DealFamily::RegCf => true,
		DealFamily::FormD => has_non_accredited == Some(true),
	}
}

pub fn sold_ratio(amount_sold: Option<f64>, target_raise: Option<f64>) -> Option<f64> {
	let target = target_raise.filter(|value| *value > 0.0)?;

	Some(amount_sold? / target)
}

/// Form D reports flags; pooled funds take precedence over equity, equity over debt.
pub fn security_class_from_flags(
	is_equity: Option<bool>,
	is_debt: Option<bool>,
	is_pooled_fund: Option<bool>,
) -> SecurityClass {
	if is_pooled_fund == Some(true) {
		return SecurityClass::PooledFund;
	}
	if is_equity == Some(true) {
		return SecurityClass::Equity;
	}
	if is_debt == Some(true) {
		return SecurityClass::Debt;
	}
	if is_equity.is_none() && is_debt.is_none() && is_pooled_fund.is_none() {
		return SecurityClass::Unknown;
	}

	SecurityClass::Other
}

/// Reg CF reports free text such as `Common Stock`, `SAFE` or `Debt`.
pub fn security_class_from_text(raw: Option<&str>) -> SecurityClass {
	let Some(text) = raw.map(|value| value.trim().to_ascii_lowercase()) else {
		return SecurityClass::Unknown;
	};

	if text.is_empty() {
		return SecurityClass::Unknown;
	}
	if text.contains("safe") || text.contains("convertible") {
		return SecurityClass::Convertible;
	}
	if text.contains("debt") || text.contains("note") {
		return SecurityClass::Debt;
	}
	if text.contains("stock") || text.contains("equity") || text.contains("membership") {
		return SecurityClass::Equity;
	}

	SecurityClass::Other
}

pub fn serves_retail(clients_individual: Option<i64>) -> Option<bool> {
	clients_individual.map(|count| count > 0)
}

pub fn serves_accredited(clients_hnw: Option<i64>, clients_pooled: Option<i64>) -> Option<bool> {
	match (clients_hnw, clients_pooled) {
		(None, None) => None,
		(hnw, pooled) => Some(hnw.unwrap_or(0) > 0 || pooled.unwrap_or(0) > 0),
	}
}

/// Share of counted clients that are retail individuals.
pub fn retail_client_ratio(
	clients_individual: Option<i64>,
	clients_hnw: Option<i64>,
	clients_pooled: Option<i64>,
) -> Option<f64> {
	let individual = clients_individual?;
	let total = individual + clients_hnw.unwrap_or(0) + clients_pooled.unwrap_or(0);

	if total <= 0 {
		return None;
	}

	Some(individual as f64 / total as f64)
}

pub fn has_custody(custody_cash: Option<bool>, custody_securities: Option<bool>) -> Option<bool> {
	match (custody_cash, custody_securities) {
		(None, None) => None,
		(cash, securities) => Some(cash == Some(true) || securities == Some(true)),
	}
}

/// Groups an adviser's filings by its CRD number, then its SEC file number. A filing with
/// neither stands alone.
pub fn adviser_entity_key(
	crd_number: Option<&str>,
	sec_number: Option<&str>,
	filing_id: i64,
) -> String {
	let id = |raw: Option<&str>| {
		raw.map(|value| value.trim().to_ascii_uppercase()).filter(|value| !value.is_empty())
	};

	if let Some(crd) = id(crd_number) {
		return format!("CRD:{crd}");
	}
	if let Some(sec) = id(sec_number) {
		return format!("SEC:{sec}");
	}

	format!("FILING:{filing_id}")
}
