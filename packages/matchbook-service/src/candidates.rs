//! Candidate generation: cheap geography and capital filters applied before scoring.

use ahash::AHashMap;

use matchbook_domain::features::{AdviserFeatures, DealFeatures};

/// Both filters are monotonic: widening an adviser's registrations or assets, or raising the
/// band gap, never removes a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateFilter {
	pub max_band_gap: u8,
}
impl CandidateFilter {
	pub fn new(max_band_gap: u8) -> Self {
		Self { max_band_gap }
	}

	pub fn admits(&self, deal: &DealFeatures, adviser: &AdviserFeatures) -> bool {
		geography_admits(deal, adviser) && self.capital_admits(deal.raise_band, adviser.aum_band)
	}

	/// The adviser may sit at most `max_band_gap` bands below the deal. Unknown bands admit.
	pub fn capital_admits(&self, raise_band: Option<u8>, aum_band: Option<u8>) -> bool {
		match (raise_band, aum_band) {
			(Some(raise), Some(aum)) => u16::from(aum) + u16::from(self.max_band_gap) >= u16::from(raise),
			_ => true,
		}
	}
}

pub fn geography_admits(deal: &DealFeatures, adviser: &AdviserFeatures) -> bool {
	if adviser.state_unrestricted() {
		return true;
	}

	deal.issuer_state.as_deref().is_some_and(|state| adviser.is_present_in(state))
}

/// Advisers indexed by every state they are present in, so each deal only visits advisers that
/// can pass the geography filter.
pub struct CandidateIndex<'a> {
	advisers: &'a [AdviserFeatures],
	by_state: AHashMap<String, Vec<usize>>,
	unrestricted: Vec<usize>,
	filter: CandidateFilter,
}
impl<'a> CandidateIndex<'a> {
	pub fn build(advisers: &'a [AdviserFeatures], filter: CandidateFilter) -> Self {
		let mut by_state: AHashMap<String, Vec<usize>> = AHashMap::new();
		let mut unrestricted = Vec::new();

		for (index, adviser) in advisers.iter().enumerate() {
			if adviser.state_unrestricted() {
				unrestricted.push(index);

				continue;
			}

			let mut states = adviser.registered_states.iter().map(str::to_string).collect::<Vec<_>>();

			if let Some(hq) = &adviser.hq_state {
				states.push(hq.clone());
			}

			states.sort();
			states.dedup();

			for state in states {
				by_state.entry(state).or_default().push(index);
			}
		}

		Self { advisers, by_state, unrestricted, filter }
	}

	/// Admitted advisers for one deal, in adviser order.
	pub fn candidates(&self, deal: &DealFeatures) -> Vec<&'a AdviserFeatures> {
		let mut indices = self.unrestricted.clone();

		if let Some(present) = deal.issuer_state.as_deref().and_then(|state| self.by_state.get(state)) {
			indices.extend(present.iter().copied());
		}

		indices.sort_unstable();
		indices.dedup();

		indices
			.into_iter()
			.map(|index| &self.advisers[index])
			.filter(|adviser| self.filter.admits(deal, adviser))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use matchbook_domain::{
		features::{DealFamily, SecurityClass},
		jurisdiction::JurisdictionSet,
	};

	use super::*;

	fn deal(state: &str, raise_band: Option<u8>) -> DealFeatures {
		DealFeatures {
			deal_id: "FD:1".to_string(),
			family: DealFamily::FormD,
			accession_number: "1".to_string(),
			entity_key: "FD:1".to_string(),
			filings_in_group: 1,
			filing_date: None,
			issuer_name: None,
			issuer_city: None,
			issuer_state: Some(state.to_string()),
			industry_group: None,
			security_type: None,
			security_class: SecurityClass::Unknown,
			target_raise: None,
			max_raise: None,
			amount_sold: None,
			min_invest: None,
			unit_price: None,
			sold_ratio: None,
			employees: None,
			revenue_recent: None,
			revenue_prior: None,
			accepts_non_accredited: None,
			retail_eligible: false,
			offering_states: JurisdictionSet::new(),
			raise_band,
		}
	}

	fn adviser(id: &str, hq: &str, registered: &[&str], aum_band: Option<u8>) -> AdviserFeatures {
		AdviserFeatures {
			adviser_id: id.to_string(),
			filing_id: 0,
			entity_key: id.to_string(),
			filings_in_group: 1,
			filing_date: None,
			legal_name: None,
			hq_city: None,
			hq_state: Some(hq.to_string()),
			total_raum: None,
			discretionary_raum: None,
			aum_band,
			clients_individual: None,
			clients_hnw: None,
			clients_pooled: None,
			retail_client_ratio: None,
			serves_retail: None,
			serves_accredited: None,
			registered_states: JurisdictionSet::from_codes(registered),
			broker_dealer_affiliate: None,
			has_custody: None,
		}
	}

	#[test]
	fn adding_registrations_never_removes_a_candidate() {
		let filter = CandidateFilter::new(2);
		let states = ["CA", "NY", "TX", "FL", "NJ"];

		for deal_state in states {
			let deal = deal(deal_state, Some(2));

			for prefix in 0..=states.len() {
				let narrow = adviser("A", "WA", &states[..prefix], Some(2));

				for extra in prefix..=states.len() {
					let wide = adviser("A", "WA", &states[..extra], Some(2));

					if filter.admits(&deal, &narrow) {
						assert!(filter.admits(&deal, &wide));
					}
				}
			}
		}
	}

	#[test]
	fn capital_gap_is_bounded_and_unknown_admits() {
		let filter = CandidateFilter::new(2);

		assert!(filter.capital_admits(Some(4), Some(2)));
		assert!(!filter.capital_admits(Some(4), Some(1)));
		assert!(filter.capital_admits(Some(0), Some(5)));
		assert!(filter.capital_admits(None, Some(0)));
		assert!(filter.capital_admits(Some(5), None));
	}

	#[test]
	fn index_matches_pairwise_filter() {
		let filter = CandidateFilter::new(1);
		let everywhere = [
			"AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
			"IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
			"NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
		];
		let advisers = vec![
			adviser("1", "NY", &["NJ"], Some(2)),
			adviser("2", "CA", &["CA", "NY"], Some(0)),
			adviser("3", "FL", &everywhere, Some(3)),
			adviser("4", "TX", &[], None),
		];
		let index = CandidateIndex::build(&advisers, filter);

		for state in ["NY", "NJ", "CA", "TX", "WY"] {
			for band in [None, Some(0), Some(2), Some(4)] {
				let deal = deal(state, band);
				let expected = advisers
					.iter()
					.filter(|adviser| filter.admits(&deal, adviser))
					.map(|adviser| adviser.adviser_id.as_str())
					.collect::<Vec<_>>();
				let actual = index
					.candidates(&deal)
					.into_iter()
					.map(|adviser| adviser.adviser_id.as_str())
					.collect::<Vec<_>>();

				assert_eq!(actual, expected, "state {state}, band {band:?}");
			}
		}
	}
}
