//! Ranking of scored pairs.

use std::cmp::Ordering;

use matchbook_storage::queries::MatchRow;

#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
	pub items: Vec<T>,
	pub requested: usize,
	pub fewer_than_requested: bool,
}

/// Composite descending, then counterpart id ascending.
pub fn by_composite_then_id(lhs_score: f64, lhs_id: &str, rhs_score: f64, rhs_id: &str) -> Ordering {
	rhs_score.total_cmp(&lhs_score).then_with(|| lhs_id.cmp(rhs_id))
}

/// Orders one deal's pairs and keeps the first `limit`.
pub fn top_advisers(rows: Vec<MatchRow>, limit: usize) -> Ranked<MatchRow> {
	top_by(rows, limit, |row| row.adviser_id.as_str())
}

/// Orders one adviser's pairs and keeps the first `limit`.
pub fn top_deals(rows: Vec<MatchRow>, limit: usize) -> Ranked<MatchRow> {
	top_by(rows, limit, |row| row.deal_id.as_str())
}

fn top_by<F>(mut rows: Vec<MatchRow>, limit: usize, counterpart: F) -> Ranked<MatchRow>
where
	F: Fn(&MatchRow) -> &str,
{
	rows.sort_by(|a, b| {
		by_composite_then_id(a.composite_score, counterpart(a), b.composite_score, counterpart(b))
	});

	let fewer_than_requested = rows.len() < limit;

	rows.truncate(limit);

	Ranked { items: rows, requested: limit, fewer_than_requested }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(deal_id: &str, adviser_id: &str, composite_score: f64) -> MatchRow {
		MatchRow {
			deal_id: deal_id.to_string(),
			adviser_id: adviser_id.to_string(),
			composite_score,
			..Default::default()
		}
	}

	#[test]
	fn ties_break_on_adviser_id() {
		let ranked =
			top_advisers(vec![row("D", "9", 0.5), row("D", "10", 0.5), row("D", "2", 0.8)], 5);
		let ids = ranked.items.iter().map(|r| r.adviser_id.as_str()).collect::<Vec<_>>();

		assert_eq!(ids, ["2", "10", "9"]);
		assert!(ranked.fewer_than_requested);
	}

	#[test]
	fn exact_fill_is_not_short() {
		let ranked = top_deals(vec![row("B", "A", 0.1), row("A", "A", 0.1)], 2);

		assert_eq!(ranked.items[0].deal_id, "A");
		assert!(!ranked.fewer_than_requested);
	}

	#[test]
	fn limit_truncates() {
		let ranked = top_deals(vec![row("A", "X", 0.3), row("B", "X", 0.9), row("C", "X", 0.6)], 2);

		assert_eq!(ranked.items.iter().map(|r| r.deal_id.as_str()).collect::<Vec<_>>(), ["B", "C"]);
		assert!(!ranked.fewer_than_requested);
	}
}
