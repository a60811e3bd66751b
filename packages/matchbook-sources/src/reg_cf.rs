//! Reg CF: `FORM_C_SUBMISSION`, `FORM_C_ISSUER_INFORMATION`, `FORM_C_DISCLOSURE`,
//! `FORM_C_ISSUER_JURISDICTIONS`.

use matchbook_domain::jurisdiction;
use matchbook_storage::models::{CfDisclosure, CfIssuerInformation, CfJurisdiction, CfSubmission};

use crate::{
	layout::{Layout, SourceLayout, col, col_aka},
	reader::Row,
};

impl SourceLayout for CfSubmission {
	const LAYOUT: Layout = Layout {
		family: "cf_submission",
		columns: &[
			col("ACCESSION_NUMBER"),
			col("SUBMISSION_TYPE"),
			col("FILING_DATE"),
			col("CIK"),
			col("FILE_NUMBER"),
			col("PERIOD"),
		],
		flag_pattern: None,
		needs_date_format: true,
	};

	fn from_row(row: &mut Row<'_>) -> Option<Self> {
		Some(Self {
			accession_number: row.key("ACCESSION_NUMBER")?,
			submission_type: row.text("SUBMISSION_TYPE"),
			filing_date: row.date("FILING_DATE"),
			cik: row.text("CIK"),
			file_number: row.text("FILE_NUMBER"),
			period: row.text("PERIOD"),
		})
	}
}

impl SourceLayout for CfIssuerInformation {
	const LAYOUT: Layout = Layout {
		family: "cf_issuer",
		columns: &[
			col("ACCESSION_NUMBER"),
			col("NAMEOFISSUER"),
			col("LEGALSTATUSFORM"),
			col("JURISDICTIONORGANIZATION"),
			col("STREET1"),
			col("STREET2"),
			col("CITY"),
			col("STATEORCOUNTRY"),
			col("ZIPCODE"),
			col("ISSUERWEBSITE"),
			col("PROGRESSUPDATE"),
		],
		flag_pattern: None,
		needs_date_format: false,
	};

	fn from_row(row: &mut Row<'_>) -> Option<Self> {
		Some(Self {
			accession_number: row.key("ACCESSION_NUMBER")?,
			name_of_issuer: row.text("NAMEOFISSUER"),
			legal_status_form: row.text("LEGALSTATUSFORM"),
			jurisdiction_organization: row.text("JURISDICTIONORGANIZATION"),
			street1: row.text("STREET1"),
			street2: row.text("STREET2"),
			city: row.text("CITY"),
			state_or_country: row.text("STATEORCOUNTRY"),
			zipcode: row.text("ZIPCODE"),
			issuer_website: row.text("ISSUERWEBSITE"),
			progress_update: row.raw("PROGRESSUPDATE").to_string(),
		})
	}
}

impl SourceLayout for CfDisclosure {
	const LAYOUT: Layout = Layout {
		family: "cf_disclosure",
		columns: &[
			col("ACCESSION_NUMBER"),
			col("SECURITYOFFEREDTYPE"),
			col("NOOFSECURITYOFFERED"),
			col("PRICE"),
			col("OFFERINGAMOUNT"),
			col("MAXIMUMOFFERINGAMOUNT"),
			col("OVERSUBSCRIPTIONACCEPTED"),
			col("OVERSUBSCRIPTIONALLOCATIONTYPE"),
			col("DEADLINEDATE"),
			col("CURRENTEMPLOYEES"),
			col("TOTALASSETMOSTRECENTFISCALYEAR"),
			col("REVENUEMOSTRECENTFISCALYEAR"),
			col("NETINCOMEMOSTRECENTFISCALYEAR"),
			col_aka("TOTALASSETPRIORYEAR", &["TOTALASSETPRIORFISCALYEAR"]),
			col_aka("REVENUEPRIORYEAR", &["REVENUEPRIORFISCALYEAR"]),
			col_aka("NETINCOMEPRIORYEAR", &["NETINCOMEPRIORFISCALYEAR"]),
		],
		flag_pattern: None,
		needs_date_format: true,
	};

	fn from_row(row: &mut Row<'_>) -> Option<Self> {
		Some(Self {
			accession_number: row.key("ACCESSION_NUMBER")?,
			security_offered_type: row.text("SECURITYOFFEREDTYPE"),
			no_of_security_offered: row.number("NOOFSECURITYOFFERED"),
			price: row.number("PRICE"),
			offering_amount: row.number("OFFERINGAMOUNT"),
			maximum_offering_amount: row.number("MAXIMUMOFFERINGAMOUNT"),
			over_subscription_accepted: row.boolean("OVERSUBSCRIPTIONACCEPTED"),
			over_subscription_allocation_type: row.text("OVERSUBSCRIPTIONALLOCATIONTYPE"),
			deadline_date: row.date("DEADLINEDATE"),
			current_employees: row.number("CURRENTEMPLOYEES"),
			total_asset_most_recent_year: row.number("TOTALASSETMOSTRECENTFISCALYEAR"),
			revenue_most_recent_year: row.number("REVENUEMOSTRECENTFISCALYEAR"),
			net_income_most_recent_year: row.number("NETINCOMEMOSTRECENTFISCALYEAR"),
			total_asset_prior_year: row.number("TOTALASSETPRIORYEAR"),
			revenue_prior_year: row.number("REVENUEPRIORYEAR"),
			net_income_prior_year: row.number("NETINCOMEPRIORYEAR"),
		})
	}
}

impl SourceLayout for CfJurisdiction {
	const LAYOUT: Layout = Layout {
		family: "cf_jurisdictions",
		columns: &[
			col("ACCESSION_NUMBER"),
			col_aka("STATEORPROVINCE", &["ISSUEJURISDICTIONSECUROFFERING"]),
		],
		flag_pattern: None,
		needs_date_format: false,
	};

	/// Codes are normalized so `ny` and `NY` do not become two rows.
	fn from_row(row: &mut Row<'_>) -> Option<Self> {
		let accession_number = row.key("ACCESSION_NUMBER")?;
		let raw = row.key("STATEORPROVINCE")?;
		let state_or_province = jurisdiction::normalize_code(&raw).unwrap_or(raw);

		Some(Self { accession_number, state_or_province })
	}
}
