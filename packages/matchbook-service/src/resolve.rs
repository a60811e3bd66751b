//! Latest-filing resolution.

use std::collections::BTreeMap;

use time::Date;

/// The current filing of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
	pub entity_key: String,
	pub current: T,
	pub filings_in_group: u32,
}

/// Keeps one record per entity: the latest filing date, ties going to the larger natural key.
///
/// A missing filing date sorts before every known date. Output is ordered by entity key, so the
/// result does not depend on input order.
pub fn resolve_latest<T, K, G, D, N>(
	records: impl IntoIterator<Item = T>,
	entity_key: G,
	filing_date: D,
	natural_key: N,
) -> Vec<Resolved<T>>
where
	K: Ord,
	G: Fn(&T) -> String,
	D: Fn(&T) -> Option<Date>,
	N: Fn(&T) -> K,
{
	let mut groups: BTreeMap<String, (T, u32)> = BTreeMap::new();

	for record in records {
		let key = entity_key(&record);

		match groups.get_mut(&key) {
			Some((current, count)) => {
				*count += 1;

				let newer = (filing_date(&record), natural_key(&record))
					> (filing_date(&*current), natural_key(&*current));

				if newer {
					*current = record;
				}
			},
			None => {
				groups.insert(key, (record, 1));
			},
		}
	}

	groups
		.into_iter()
		.map(|(entity_key, (current, filings_in_group))| Resolved {
			entity_key,
			current,
			filings_in_group,
		})
		.collect()
}
