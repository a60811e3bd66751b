//! Feature extraction from the current filing of each entity.

use ahash::AHashMap;

use matchbook_domain::{
	band,
	coerce,
	features::{self, AdviserFeatures, DealFamily, DealFeatures},
	jurisdiction::JurisdictionSet,
};
use matchbook_storage::{
	derived::{EntityKind, LatestFiling},
	models::{
		AdvBaseA, AdvBaseB, CfDisclosure, CfIssuerInformation, CfJurisdiction, CfSubmission,
		FdIssuer, FdOffering, FdSubmission,
	},
};

use crate::resolve::{self, Resolved};

const FORM_D_DEAL_TYPES: [&str; 2] = ["D", "D/A"];
const REG_CF_DEAL_TYPES: [&str; 2] = ["C", "C/A"];

/// Current staging contents, as read back from the store.
#[derive(Debug, Default)]
pub struct StagingSnapshot {
	pub fd_submissions: Vec<FdSubmission>,
	pub fd_issuers: Vec<FdIssuer>,
	pub fd_offerings: Vec<FdOffering>,
	pub cf_submissions: Vec<CfSubmission>,
	pub cf_issuers: Vec<CfIssuerInformation>,
	pub cf_disclosures: Vec<CfDisclosure>,
	pub cf_jurisdictions: Vec<CfJurisdiction>,
	pub adv_base_a: Vec<AdvBaseA>,
	pub adv_base_b: Vec<AdvBaseB>,
}

#[derive(Debug, Default)]
pub struct Extracted {
	pub deals: Vec<DealFeatures>,
	pub advisers: Vec<AdviserFeatures>,
	pub latest: Vec<LatestFiling>,
}

pub fn extract(snapshot: &StagingSnapshot) -> Extracted {
	let mut out = Extracted::default();

	form_d_deals(snapshot, &mut out);
	reg_cf_deals(snapshot, &mut out);
	advisers(snapshot, &mut out);

	out.deals.sort_by(|a, b| a.deal_id.cmp(&b.deal_id));
	out.advisers.sort_by(|a, b| a.adviser_id.cmp(&b.adviser_id));

	out
}

fn form_d_deals(snapshot: &StagingSnapshot, out: &mut Extracted) {
	let issuers = primary_issuers(&snapshot.fd_issuers);
	let offerings = index_by(&snapshot.fd_offerings, |offering| &offering.accession_number);
	let live = snapshot.fd_submissions.iter().filter(|submission| {
		is_deal_type(submission.submission_type.as_deref(), &FORM_D_DEAL_TYPES)
			&& !submission
				.test_or_live
				.as_deref()
				.is_some_and(|flag| flag.trim().eq_ignore_ascii_case("TEST"))
	});
	let resolved = resolve::resolve_latest(
		live,
		|submission| {
			deal_entity_key(
				DealFamily::FormD,
				submission.file_num.as_deref(),
				&submission.accession_number,
			)
		},
		|submission| submission.filing_date,
		|submission| submission.accession_number.clone(),
	);

	for Resolved { entity_key, current, filings_in_group } in resolved {
		let accession = current.accession_number.as_str();
		let issuer = issuers.get(accession).copied();
		let offering = offerings.get(accession).copied();
		let target_raise = coerce::non_negative(offering.and_then(|o| o.total_offering_amount));
		let amount_sold = coerce::non_negative(offering.and_then(|o| o.total_amount_sold));
		let accepts_non_accredited = offering.and_then(|o| o.has_non_accredited_investors);
		let security_class = match offering {
			Some(o) => features::security_class_from_flags(
				o.is_equity_type,
				o.is_debt_type,
				o.is_pooled_investment_fund_type,
			),
			None => features::security_class_from_flags(None, None, None),
		};

		out.latest.push(LatestFiling {
			entity_kind: EntityKind::Deal,
			entity_key: entity_key.clone(),
			record_key: current.accession_number.clone(),
			family: DealFamily::FormD.as_str().to_string(),
			filing_date: current.filing_date,
			filings_in_group,
		});
		out.deals.push(DealFeatures {
			deal_id: DealFamily::FormD.deal_id(accession),
			family: DealFamily::FormD,
			accession_number: current.accession_number.clone(),
			entity_key,
			filings_in_group,
			filing_date: current.filing_date,
			issuer_name: issuer.and_then(|i| i.entity_name.clone()),
			issuer_city: issuer.and_then(|i| i.city.clone()),
			issuer_state: issuer.and_then(|i| state_code(i.state_or_country.as_deref())),
			industry_group: offering.and_then(|o| o.industry_group_type.clone()),
			security_type: offering.and_then(form_d_security_type),
			security_class,
			target_raise,
			max_raise: None,
			amount_sold,
			min_invest: coerce::non_negative(offering.and_then(|o| o.minimum_investment_accepted)),
			unit_price: None,
			sold_ratio: features::sold_ratio(amount_sold, target_raise),
			employees: None,
			revenue_recent: None,
			revenue_prior: None,
			accepts_non_accredited,
			retail_eligible: features::retail_eligible(DealFamily::FormD, accepts_non_accredited),
			offering_states: JurisdictionSet::new(),
			raise_band: band::raise_band(target_raise),
		});
	}
}

fn reg_cf_deals(snapshot: &StagingSnapshot, out: &mut Extracted) {
	let issuers = index_by(&snapshot.cf_issuers, |issuer| &issuer.accession_number);
	let disclosures = index_by(&snapshot.cf_disclosures, |disclosure| &disclosure.accession_number);
	let mut jurisdictions: AHashMap<&str, JurisdictionSet> = AHashMap::new();

	for row in &snapshot.cf_jurisdictions {
		jurisdictions.entry(row.accession_number.as_str()).or_default().insert(&row.state_or_province);
	}

	let live = snapshot
		.cf_submissions
		.iter()
		.filter(|submission| is_deal_type(submission.submission_type.as_deref(), &REG_CF_DEAL_TYPES));
	let resolved = resolve::resolve_latest(
		live,
		|submission| {
			deal_entity_key(
				DealFamily::RegCf,
				submission.file_number.as_deref(),
				&submission.accession_number,
			)
		},
		|submission| submission.filing_date,
		|submission| submission.accession_number.clone(),
	);

	for Resolved { entity_key, current, filings_in_group } in resolved {
		let accession = current.accession_number.as_str();
		let issuer = issuers.get(accession).copied();
		let disclosure = disclosures.get(accession).copied();
		let amount = |field: fn(&CfDisclosure) -> Option<f64>| {
			coerce::non_negative(disclosure.and_then(field))
		};
		let target_raise = amount(|d| d.offering_amount);
		let unit_price = amount(|d| d.price);
		let accepts_non_accredited = Some(true);

		out.latest.push(LatestFiling {
			entity_kind: EntityKind::Deal,
			entity_key: entity_key.clone(),
			record_key: current.accession_number.clone(),
			family: DealFamily::RegCf.as_str().to_string(),
			filing_date: current.filing_date,
			filings_in_group,
		});
		out.deals.push(DealFeatures {
			deal_id: DealFamily::RegCf.deal_id(accession),
			family: DealFamily::RegCf,
			accession_number: current.accession_number.clone(),
			entity_key,
			filings_in_group,
			filing_date: current.filing_date,
			issuer_name: issuer.and_then(|i| i.name_of_issuer.clone()),
			issuer_city: issuer.and_then(|i| i.city.clone()),
			issuer_state: issuer.and_then(|i| state_code(i.state_or_country.as_deref())),
			industry_group: None,
			security_type: disclosure.and_then(|d| d.security_offered_type.clone()),
			security_class: features::security_class_from_text(
				disclosure.and_then(|d| d.security_offered_type.as_deref()),
			),
			target_raise,
			max_raise: amount(|d| d.maximum_offering_amount),
			amount_sold: None,
			// One security is the smallest commitment a Reg CF investor can make.
			min_invest: unit_price,
			unit_price,
			sold_ratio: None,
			employees: coerce::count_from(disclosure.and_then(|d| d.current_employees)),
			revenue_recent: amount(|d| d.revenue_most_recent_year),
			revenue_prior: amount(|d| d.revenue_prior_year),
			accepts_non_accredited,
			retail_eligible: features::retail_eligible(DealFamily::RegCf, accepts_non_accredited),
			offering_states: jurisdictions.get(accession).cloned().unwrap_or_default(),
			raise_band: band::raise_band(target_raise),
		});
	}
}

fn advisers(snapshot: &StagingSnapshot, out: &mut Extracted) {
	let base_b = snapshot
		.adv_base_b
		.iter()
		.map(|row| (row.filing_id, row))
		.collect::<AHashMap<i64, &AdvBaseB>>();
	let resolved = resolve::resolve_latest(
		&snapshot.adv_base_a,
		|filing| {
			features::adviser_entity_key(
				filing.crd_number.as_deref(),
				filing.sec_number.as_deref(),
				filing.filing_id,
			)
		},
		|filing| filing.date_submitted,
		|filing| filing.filing_id,
	);

	for Resolved { entity_key, current, filings_in_group } in resolved {
		let registration = base_b.get(&current.filing_id).copied();
		let clients_individual = coerce::count_from(current.clients_individual);
		let clients_hnw = coerce::count_from(current.clients_hnw_individual);
		let clients_pooled = coerce::count_from(current.clients_pooled_vehicle);
		let total_raum = coerce::non_negative(current.raum_total);

		out.latest.push(LatestFiling {
			entity_kind: EntityKind::Adviser,
			entity_key: entity_key.clone(),
			record_key: current.filing_id.to_string(),
			family: "ADV".to_string(),
			filing_date: current.date_submitted,
			filings_in_group,
		});
		out.advisers.push(AdviserFeatures {
			adviser_id: current.filing_id.to_string(),
			filing_id: current.filing_id,
			entity_key,
			filings_in_group,
			filing_date: current.date_submitted,
			legal_name: current.legal_name.clone(),
			hq_city: current.hq_city.clone(),
			hq_state: state_code(current.hq_state.as_deref()),
			total_raum,
			discretionary_raum: current.raum_discretionary.filter(|value| *value >= 0.0),
			aum_band: band::aum_band(total_raum),
			clients_individual,
			clients_hnw,
			clients_pooled,
			retail_client_ratio: features::retail_client_ratio(
				clients_individual,
				clients_hnw,
				clients_pooled,
			),
			serves_retail: features::serves_retail(clients_individual),
			serves_accredited: features::serves_accredited(clients_hnw, clients_pooled),
			registered_states: registration
				.map(|row| JurisdictionSet::parse_canonical(&row.registered_states))
				.unwrap_or_default(),
			broker_dealer_affiliate: current.affil_broker_dealer,
			has_custody: features::has_custody(current.custody_cash, current.custody_securities),
		});
	}
}

fn is_deal_type(submission_type: Option<&str>, accepted: &[&str]) -> bool {
	submission_type
		.map(|raw| accepted.iter().any(|accepted| raw.trim().eq_ignore_ascii_case(accepted)))
		.unwrap_or(false)
}

/// Offerings are grouped by SEC file number; filings without one stand alone.
fn deal_entity_key(family: DealFamily, file_number: Option<&str>, accession: &str) -> String {
	let key = file_number.and_then(coerce::non_empty).unwrap_or_else(|| accession.to_string());

	format!("{}:{key}", family.id_prefix())
}

fn state_code(raw: Option<&str>) -> Option<String> {
	raw.and_then(coerce::non_empty).map(|state| state.to_ascii_uppercase())
}

/// The primary issuer per filing, falling back to the lowest sequence number.
fn primary_issuers(issuers: &[FdIssuer]) -> AHashMap<&str, &FdIssuer> {
	let mut chosen: AHashMap<&str, &FdIssuer> = AHashMap::new();

	for issuer in issuers {
		let rank = |i: &FdIssuer| (i.is_primary_issuer != Some(true), i.issuer_seq_key);

		chosen
			.entry(issuer.accession_number.as_str())
			.and_modify(|current| {
				if rank(issuer) < rank(current) {
					*current = issuer;
				}
			})
			.or_insert(issuer);
	}

	chosen
}

fn index_by<T, F>(rows: &[T], key: F) -> AHashMap<&str, &T>
where
	F: Fn(&T) -> &String,
{
	rows.iter().map(|row| (key(row).as_str(), row)).collect()
}

fn form_d_security_type(offering: &FdOffering) -> Option<String> {
	let labels = [
		(offering.is_equity_type, "Equity"),
		(offering.is_debt_type, "Debt"),
		(offering.is_pooled_investment_fund_type, "Pooled Investment Fund"),
	]
	.into_iter()
	.filter(|(flag, _)| *flag == Some(true))
	.map(|(_, label)| label)
	.collect::<Vec<_>>();

	if labels.is_empty() { None } else { Some(labels.join(", ")) }
}
