//! Staging rows, one struct per source file.

use time::Date;

use crate::staging::{ColumnDef, SqlType, SqlValue, StagingRow, TableDef};

macro_rules! staging_table {
	(
		$(#[$meta:meta])*
		pub struct $name:ident in $table:literal key ($($key:ident),+) {
			$($field:ident: $ty:ty => $sql:ident),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
		pub struct $name {
			$(pub $field: $ty),+
		}
		impl StagingRow for $name {
			const TABLE: TableDef = TableDef {
				name: $table,
				key: &[$(stringify!($key)),+],
				columns: &[$(ColumnDef { name: stringify!($field), sql_type: SqlType::$sql }),+],
			};

			fn key(&self) -> String {
				[$(self.$key.to_string()),+].join("|")
			}

			fn values(&self) -> Vec<SqlValue> {
				vec![$(SqlValue::from(self.$field.clone())),+]
			}
		}
	};
}

staging_table! {
	/// `FORMDSUBMISSION`.
	pub struct FdSubmission in "stg_fd_submission" key (accession_number) {
		accession_number: String => Text,
		submission_type: Option<String> => Text,
		filing_date: Option<Date> => Date,
		file_num: Option<String> => Text,
		sic_code: Option<String> => Text,
		test_or_live: Option<String> => Text,
	}
}

staging_table! {
	/// `ISSUERS`. A filing lists one primary issuer and any number of co-issuers.
	pub struct FdIssuer in "stg_fd_issuers" key (accession_number, issuer_seq_key) {
		accession_number: String => Text,
		issuer_seq_key: i64 => Integer,
		is_primary_issuer: Option<bool> => Boolean,
		cik: Option<String> => Text,
		entity_name: Option<String> => Text,
		street1: Option<String> => Text,
		street2: Option<String> => Text,
		entity_type: Option<String> => Text,
		city: Option<String> => Text,
		state_or_country: Option<String> => Text,
		state_or_country_description: Option<String> => Text,
		zipcode: Option<String> => Text,
		jurisdiction_of_inc: Option<String> => Text,
		year_of_inc: Option<String> => Text,
		issuer_phone_number: Option<String> => Text,
	}
}

staging_table! {
	/// `OFFERING`. Amounts stay as reported; some filings say `Indefinite`.
	pub struct FdOffering in "stg_fd_offering" key (accession_number) {
		accession_number: String => Text,
		industry_group_type: Option<String> => Text,
		federal_exemptions: Option<String> => Text,
		is_equity_type: Option<bool> => Boolean,
		is_debt_type: Option<bool> => Boolean,
		is_pooled_investment_fund_type: Option<bool> => Boolean,
		has_non_accredited_investors: Option<bool> => Boolean,
		total_offering_amount: Option<f64> => Real,
		total_amount_sold: Option<f64> => Real,
		total_remaining: Option<f64> => Real,
		minimum_investment_accepted: Option<f64> => Real,
		sale_date: Option<Date> => Date,
	}
}

staging_table! {
	/// `FORM_C_SUBMISSION`.
	pub struct CfSubmission in "stg_cf_submission" key (accession_number) {
		accession_number: String => Text,
		submission_type: Option<String> => Text,
		filing_date: Option<Date> => Date,
		cik: Option<String> => Text,
		file_number: Option<String> => Text,
		period: Option<String> => Text,
	}
}

staging_table! {
	/// `FORM_C_ISSUER_INFORMATION`. A missing progress update is stored as empty text.
	pub struct CfIssuerInformation in "stg_cf_issuer_information" key (accession_number) {
		accession_number: String => Text,
		name_of_issuer: Option<String> => Text,
		legal_status_form: Option<String> => Text,
		jurisdiction_organization: Option<String> => Text,
		street1: Option<String> => Text,
		street2: Option<String> => Text,
		city: Option<String> => Text,
		state_or_country: Option<String> => Text,
		zipcode: Option<String> => Text,
		issuer_website: Option<String> => Text,
		progress_update: String => Text,
	}
}

staging_table! {
	/// `FORM_C_DISCLOSURE`.
	pub struct CfDisclosure in "stg_cf_disclosure" key (accession_number) {
		accession_number: String => Text,
		security_offered_type: Option<String> => Text,
		no_of_security_offered: Option<f64> => Real,
		price: Option<f64> => Real,
		offering_amount: Option<f64> => Real,
		maximum_offering_amount: Option<f64> => Real,
		over_subscription_accepted: Option<bool> => Boolean,
		over_subscription_allocation_type: Option<String> => Text,
		deadline_date: Option<Date> => Date,
		current_employees: Option<f64> => Real,
		total_asset_most_recent_year: Option<f64> => Real,
		revenue_most_recent_year: Option<f64> => Real,
		net_income_most_recent_year: Option<f64> => Real,
		total_asset_prior_year: Option<f64> => Real,
		revenue_prior_year: Option<f64> => Real,
		net_income_prior_year: Option<f64> => Real,
	}
}

staging_table! {
	/// `FORM_C_ISSUER_JURISDICTIONS`, one row per jurisdiction an offering is made in.
	pub struct CfJurisdiction in "stg_cf_issuer_jurisdictions" key (accession_number, state_or_province) {
		accession_number: String => Text,
		state_or_province: String => Text,
	}
}

staging_table! {
	/// `IA_ADV_Base_A`: identity, main office, clients, assets, affiliations and custody.
	pub struct AdvBaseA in "stg_adv_base_a" key (filing_id) {
		filing_id: i64 => Integer,
		date_submitted: Option<Date> => Date,
		legal_name: Option<String> => Text,
		sec_number: Option<String> => Text,
		crd_number: Option<String> => Text,
		hq_street1: Option<String> => Text,
		hq_street2: Option<String> => Text,
		hq_city: Option<String> => Text,
		hq_state: Option<String> => Text,
		hq_country: Option<String> => Text,
		hq_postal: Option<String> => Text,
		hq_private: Option<bool> => Boolean,
		hq_days_mon_fri: Option<bool> => Boolean,
		hq_days_other: Option<String> => Text,
		hq_hours: Option<String> => Text,
		hq_phone: Option<String> => Text,
		hq_fax: Option<String> => Text,
		office_count: Option<String> => Text,
		mail_street1: Option<String> => Text,
		mail_street2: Option<String> => Text,
		mail_city: Option<String> => Text,
		mail_state: Option<String> => Text,
		mail_country: Option<String> => Text,
		mail_postal: Option<String> => Text,
		mail_private: Option<bool> => Boolean,
		clients_individual: Option<f64> => Real,
		clients_hnw_individual: Option<f64> => Real,
		clients_bdc: Option<f64> => Real,
		clients_pooled_vehicle: Option<f64> => Real,
		raum_individual: Option<f64> => Real,
		raum_hnw_individual: Option<f64> => Real,
		raum_banking: Option<f64> => Real,
		raum_pension: Option<f64> => Real,
		raum_charity: Option<f64> => Real,
		raum_other_adviser: Option<f64> => Real,
		raum_insurance: Option<f64> => Real,
		raum_discretionary: Option<f64> => Real,
		raum_non_discretionary: Option<f64> => Real,
		raum_total: Option<f64> => Real,
		clients_served_range: Option<String> => Text,
		alt_assets_method: Option<String> => Text,
		sma_regulatory_assets: Option<bool> => Boolean,
		sma_borrowings: Option<bool> => Boolean,
		sma_derivatives: Option<bool> => Boolean,
		sma_custodians: Option<bool> => Boolean,
		affil_broker_dealer: Option<bool> => Boolean,
		affil_other_adviser: Option<bool> => Boolean,
		affil_commodity_pool_operator: Option<bool> => Boolean,
		affil_bank: Option<bool> => Boolean,
		affil_trust_company: Option<bool> => Boolean,
		affil_accounting_firm: Option<bool> => Boolean,
		affil_insurance_company: Option<bool> => Boolean,
		affil_pooled_vehicle_sponsor: Option<bool> => Boolean,
		custody_cash: Option<bool> => Boolean,
		custody_securities: Option<bool> => Boolean,
		custody_amount: Option<f64> => Real,
		custody_clients: Option<f64> => Real,
	}
}

staging_table! {
	/// `IA_ADV_Base_B`. The `2-XX` notice-filing flags are folded into `registered_states`,
	/// stored in canonical jurisdiction-set form.
	pub struct AdvBaseB in "stg_adv_base_b" key (filing_id) {
		filing_id: i64 => Integer,
		registered_states: String => Text,
		org_form: Option<String> => Text,
		org_form_other: Option<String> => Text,
	}
}

/// Every staging table, in load order.
pub const STAGING_TABLES: [TableDef; 9] = [
	FdSubmission::TABLE,
	FdIssuer::TABLE,
	FdOffering::TABLE,
	CfSubmission::TABLE,
	CfIssuerInformation::TABLE,
	CfDisclosure::TABLE,
	CfJurisdiction::TABLE,
	AdvBaseA::TABLE,
	AdvBaseB::TABLE,
];
