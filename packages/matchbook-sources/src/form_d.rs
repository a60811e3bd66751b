//! Form D: `FORMDSUBMISSION`, `ISSUERS`, `OFFERING`.

use matchbook_storage::models::{FdIssuer, FdOffering, FdSubmission};

use crate::{
	layout::{Layout, SourceLayout, col},
	reader::Row,
};

impl SourceLayout for FdSubmission {
	const LAYOUT: Layout = Layout {
		family: "fd_submission",
		columns: &[
			col("ACCESSIONNUMBER"),
			col("SUBMISSIONTYPE"),
			col("FILING_DATE"),
			col("FILE_NUM"),
			col("SIC_CODE"),
			col("TESTORLIVE"),
		],
		flag_pattern: None,
		needs_date_format: true,
	};

	fn from_row(row: &mut Row<'_>) -> Option<Self> {
		Some(Self {
			accession_number: row.key("ACCESSIONNUMBER")?,
			submission_type: row.text("SUBMISSIONTYPE"),
			filing_date: row.date("FILING_DATE"),
			file_num: row.text("FILE_NUM"),
			sic_code: row.text("SIC_CODE"),
			test_or_live: row.text("TESTORLIVE"),
		})
	}
}

impl SourceLayout for FdIssuer {
	const LAYOUT: Layout = Layout {
		family: "fd_issuers",
		columns: &[
			col("ACCESSIONNUMBER"),
			col("ISSUER_SEQ_KEY"),
			col("IS_PRIMARYISSUER_FLAG"),
			col("CIK"),
			col("ENTITYNAME"),
			col("STREET1"),
			col("STREET2"),
			col("ENTITYTYPE"),
			col("CITY"),
			col("STATEORCOUNTRY"),
			col("STATEORCOUNTRYDESCRIPTION"),
			col("ZIPCODE"),
			col("JURISDICTIONOFINC"),
			col("YEAROFINC_VALUE_ENTERED"),
			col("ISSUERPHONENUMBER"),
		],
		flag_pattern: None,
		needs_date_format: false,
	};

	fn from_row(row: &mut Row<'_>) -> Option<Self> {
		let accession_number = row.key("ACCESSIONNUMBER")?;
		let issuer_seq_key = row.key_integer("ISSUER_SEQ_KEY")?;

		Some(Self {
			accession_number,
			issuer_seq_key,
			is_primary_issuer: row.boolean("IS_PRIMARYISSUER_FLAG"),
			cik: row.text("CIK"),
			entity_name: row.text("ENTITYNAME"),
			street1: row.text("STREET1"),
			street2: row.text("STREET2"),
			entity_type: row.text("ENTITYTYPE"),
			city: row.text("CITY"),
			state_or_country: row.text("STATEORCOUNTRY"),
			state_or_country_description: row.text("STATEORCOUNTRYDESCRIPTION"),
			zipcode: row.text("ZIPCODE"),
			jurisdiction_of_inc: row.text("JURISDICTIONOFINC"),
			year_of_inc: row.text("YEAROFINC_VALUE_ENTERED"),
			issuer_phone_number: row.text("ISSUERPHONENUMBER"),
		})
	}
}

impl SourceLayout for FdOffering {
	const LAYOUT: Layout = Layout {
		family: "fd_offering",
		columns: &[
			col("ACCESSIONNUMBER"),
			col("INDUSTRYGROUPTYPE"),
			col("FEDERALEXEMPTIONS_ITEMS_LIST"),
			col("ISEQUITYTYPE"),
			col("ISDEBTTYPE"),
			col("ISPOOLEDINVESTMENTFUNDTYPE"),
			col("HASNONACCREDITEDINVESTORS"),
			col("TOTALOFFERINGAMOUNT"),
			col("TOTALAMOUNTSOLD"),
			col("TOTALREMAINING"),
			col("MINIMUMINVESTMENTACCEPTED"),
			col("SALE_DATE"),
		],
		flag_pattern: None,
		needs_date_format: true,
	};

	fn from_row(row: &mut Row<'_>) -> Option<Self> {
		Some(Self {
			accession_number: row.key("ACCESSIONNUMBER")?,
			industry_group_type: row.text("INDUSTRYGROUPTYPE"),
			federal_exemptions: row.text("FEDERALEXEMPTIONS_ITEMS_LIST"),
			is_equity_type: row.boolean("ISEQUITYTYPE"),
			is_debt_type: row.boolean("ISDEBTTYPE"),
			is_pooled_investment_fund_type: row.boolean("ISPOOLEDINVESTMENTFUNDTYPE"),
			has_non_accredited_investors: row.boolean("HASNONACCREDITEDINVESTORS"),
			total_offering_amount: row.number("TOTALOFFERINGAMOUNT"),
			total_amount_sold: row.number("TOTALAMOUNTSOLD"),
			total_remaining: row.number("TOTALREMAINING"),
			minimum_investment_accepted: row.number("MINIMUMINVESTMENTACCEPTED"),
			sale_date: row.date("SALE_DATE"),
		})
	}
}
