//! Form ADV bulk extracts: `IA_ADV_Base_A` and `IA_ADV_Base_B`.

use matchbook_storage::models::{AdvBaseA, AdvBaseB};

use crate::{
	layout::{Layout, SourceLayout, col},
	reader::Row,
};

/// Item 2.C notice-filing flags, one column per jurisdiction (`2-NY`, `2-CA`, …).
pub const STATE_FLAG_PATTERN: &str = r"^2-([A-Z]{2})$";

impl SourceLayout for AdvBaseA {
	const LAYOUT: Layout = Layout {
		family: "adv_base_a",
		columns: &[
			col("FilingID"),
			col("DateSubmitted"),
			col("1A"),
			col("1D"),
			col("1E1"),
			col("1F1-Street 1"),
			col("1F1-Street 2"),
			col("1F1-City"),
			col("1F1-State"),
			col("1F1-Country"),
			col("1F1-Postal"),
			col("1F1-Private"),
			col("1F2-M-F"),
			col("1F2-Other"),
			col("1F2-Hours"),
			col("1F3"),
			col("1F4"),
			col("1F5"),
			col("1G-Street 1"),
			col("1G-Street 2"),
			col("1G-City"),
			col("1G-State"),
			col("1G-Country"),
			col("1G-Postal"),
			col("1G-Private"),
			col("5D1a"),
			col("5D1b"),
			col("5D1e"),
			col("5D1f"),
			col("5D2a"),
			col("5D2b"),
			col("5D2c"),
			col("5D2g"),
			col("5D2h"),
			col("5D2j"),
			col("5D2k"),
			col("5F2a"),
			col("5F2b"),
			col("5F2c"),
			col("5H"),
			col("5J2"),
			col("5K1"),
			col("5K2"),
			col("5K3"),
			col("5K4"),
			col("7A1"),
			col("7A2"),
			col("7A6"),
			col("7A8"),
			col("7A9"),
			col("7A10"),
			col("7A12"),
			col("7A16"),
			col("9A1a"),
			col("9A1b"),
			col("9A2a"),
			col("9A2b"),
		],
		flag_pattern: None,
		needs_date_format: true,
	};

	fn from_row(row: &mut Row<'_>) -> Option<Self> {
		Some(Self {
			filing_id: row.key_integer("FilingID")?,
			date_submitted: row.date("DateSubmitted"),
			legal_name: row.text("1A"),
			sec_number: row.text("1D"),
			crd_number: row.text("1E1"),
			hq_street1: row.text("1F1-Street 1"),
			hq_street2: row.text("1F1-Street 2"),
			hq_city: row.text("1F1-City"),
			hq_state: row.text("1F1-State"),
			hq_country: row.text("1F1-Country"),
			hq_postal: row.text("1F1-Postal"),
			hq_private: row.boolean("1F1-Private"),
			hq_days_mon_fri: row.boolean("1F2-M-F"),
			hq_days_other: row.text("1F2-Other"),
			hq_hours: row.text("1F2-Hours"),
			hq_phone: row.text("1F3"),
			hq_fax: row.text("1F4"),
			office_count: row.text("1F5"),
			mail_street1: row.text("1G-Street 1"),
			mail_street2: row.text("1G-Street 2"),
			mail_city: row.text("1G-City"),
			mail_state: row.text("1G-State"),
			mail_country: row.text("1G-Country"),
			mail_postal: row.text("1G-Postal"),
			mail_private: row.boolean("1G-Private"),
			clients_individual: row.number("5D1a"),
			clients_hnw_individual: row.number("5D1b"),
			clients_bdc: row.number("5D1e"),
			clients_pooled_vehicle: row.number("5D1f"),
			raum_individual: row.number("5D2a"),
			raum_hnw_individual: row.number("5D2b"),
			raum_banking: row.number("5D2c"),
			raum_pension: row.number("5D2g"),
			raum_charity: row.number("5D2h"),
			raum_other_adviser: row.number("5D2j"),
			raum_insurance: row.number("5D2k"),
			raum_discretionary: row.number("5F2a"),
			raum_non_discretionary: row.number("5F2b"),
			raum_total: row.number("5F2c"),
			clients_served_range: row.text("5H"),
			alt_assets_method: row.text("5J2"),
			sma_regulatory_assets: row.boolean("5K1"),
			sma_borrowings: row.boolean("5K2"),
			sma_derivatives: row.boolean("5K3"),
			sma_custodians: row.boolean("5K4"),
			affil_broker_dealer: row.boolean("7A1"),
			affil_other_adviser: row.boolean("7A2"),
			affil_commodity_pool_operator: row.boolean("7A6"),
			affil_bank: row.boolean("7A8"),
			affil_trust_company: row.boolean("7A9"),
			affil_accounting_firm: row.boolean("7A10"),
			affil_insurance_company: row.boolean("7A12"),
			affil_pooled_vehicle_sponsor: row.boolean("7A16"),
			custody_cash: row.boolean("9A1a"),
			custody_securities: row.boolean("9A1b"),
			custody_amount: row.number("9A2a"),
			custody_clients: row.number("9A2b"),
		})
	}
}

impl SourceLayout for AdvBaseB {
	const LAYOUT: Layout = Layout {
		family: "adv_base_b",
		columns: &[col("FilingID"), col("3A"), col("3A-Other")],
		flag_pattern: Some(STATE_FLAG_PATTERN),
		needs_date_format: false,
	};

	fn from_row(row: &mut Row<'_>) -> Option<Self> {
		Some(Self {
			filing_id: row.key_integer("FilingID")?,
			registered_states: row.flag_set().to_canonical(),
			org_form: row.text("3A"),
			org_form_other: row.text("3A-Other"),
		})
	}
}
