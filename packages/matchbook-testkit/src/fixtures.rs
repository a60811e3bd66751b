//! Small delimited exports shaped like the public SEC datasets.
//!
//! Scenario, as loaded by the default test config:
//! - Form D offering `021-11111` (Hudson Robotics, NY, $3.2M equity) filed twice; the
//!   February `D/A` is current. Offering `021-22222` is a $50M Texas pooled fund whose sale
//!   date is malformed. Accession `…-000004` is a test filing and never becomes a deal.
//! - Reg CF offering `020-00001` (Golden Gate Coffee, CA, $50K target) plus a `C-U` progress
//!   update that is not a deal.
//! - Advisers: Empire Capital (NY, two filings; 1001 is current), Pacific Growth (CA, $40M),
//!   Lone Star Wealth (TX, $5B), Coast To Coast (FL, notice-filed everywhere), and a Montreal
//!   adviser with a Latin-1 name and no US registrations.

use std::{fs, path::Path};

use crate::{Error, Result};

pub const FD_SUBMISSION_PATH: &str = "form_d/FORMDSUBMISSION.tsv";
pub const FD_ISSUERS_PATH: &str = "form_d/ISSUERS.tsv";
pub const FD_OFFERING_PATH: &str = "form_d/OFFERING.tsv";
pub const CF_SUBMISSION_PATH: &str = "reg_cf/FORM_C_SUBMISSION.tsv";
pub const CF_ISSUER_PATH: &str = "reg_cf/FORM_C_ISSUER_INFORMATION.tsv";
pub const CF_DISCLOSURE_PATH: &str = "reg_cf/FORM_C_DISCLOSURE.tsv";
pub const CF_JURISDICTIONS_PATH: &str = "reg_cf/FORM_C_ISSUER_JURISDICTIONS.tsv";
pub const ADV_BASE_A_PATH: &str = "adv/IA_ADV_Base_A.csv";
pub const ADV_BASE_B_PATH: &str = "adv/IA_ADV_Base_B.csv";

pub const FD_SUBMISSION_HEADER: [&str; 7] = [
	"ACCESSIONNUMBER",
	"FILE_NUM",
	"FILING_DATE",
	"SIC_CODE",
	"SUBMISSIONTYPE",
	"OVER100PERSONSFLAG",
	"TESTORLIVE",
];
pub const FD_ISSUERS_HEADER: [&str; 15] = [
	"ACCESSIONNUMBER",
	"IS_PRIMARYISSUER_FLAG",
	"ISSUER_SEQ_KEY",
	"CIK",
	"ENTITYNAME",
	"STREET1",
	"STREET2",
	"CITY",
	"STATEORCOUNTRY",
	"STATEORCOUNTRYDESCRIPTION",
	"ZIPCODE",
	"ISSUERPHONENUMBER",
	"JURISDICTIONOFINC",
	"ENTITYTYPE",
	"YEAROFINC_VALUE_ENTERED",
];
pub const FD_OFFERING_HEADER: [&str; 13] = [
	"ACCESSIONNUMBER",
	"INDUSTRYGROUPTYPE",
	"INVESTMENTFUNDTYPE",
	"FEDERALEXEMPTIONS_ITEMS_LIST",
	"SALE_DATE",
	"ISEQUITYTYPE",
	"ISDEBTTYPE",
	"ISPOOLEDINVESTMENTFUNDTYPE",
	"MINIMUMINVESTMENTACCEPTED",
	"TOTALOFFERINGAMOUNT",
	"TOTALAMOUNTSOLD",
	"TOTALREMAINING",
	"HASNONACCREDITEDINVESTORS",
];
pub const CF_SUBMISSION_HEADER: [&str; 6] =
	["ACCESSION_NUMBER", "SUBMISSION_TYPE", "FILING_DATE", "CIK", "FILE_NUMBER", "PERIOD"];
pub const CF_ISSUER_HEADER: [&str; 12] = [
	"ACCESSION_NUMBER",
	"NAMEOFISSUER",
	"LEGALSTATUSFORM",
	"JURISDICTIONORGANIZATION",
	"DATEINCORPORATION",
	"STREET1",
	"STREET2",
	"CITY",
	"STATEORCOUNTRY",
	"ZIPCODE",
	"ISSUERWEBSITE",
	"PROGRESSUPDATE",
];
pub const CF_DISCLOSURE_HEADER: [&str; 16] = [
	"ACCESSION_NUMBER",
	"SECURITYOFFEREDTYPE",
	"NOOFSECURITYOFFERED",
	"PRICE",
	"OFFERINGAMOUNT",
	"MAXIMUMOFFERINGAMOUNT",
	"OVERSUBSCRIPTIONACCEPTED",
	"OVERSUBSCRIPTIONALLOCATIONTYPE",
	"DEADLINEDATE",
	"CURRENTEMPLOYEES",
	"TOTALASSETMOSTRECENTFISCALYEAR",
	"TOTALASSETPRIORFISCALYEAR",
	"REVENUEMOSTRECENTFISCALYEAR",
	"REVENUEPRIORFISCALYEAR",
	"NETINCOMEMOSTRECENTFISCALYEAR",
	"NETINCOMEPRIORFISCALYEAR",
];
pub const CF_JURISDICTIONS_HEADER: [&str; 2] =
	["ACCESSION_NUMBER", "ISSUEJURISDICTIONSECUROFFERING"];
pub const ADV_BASE_A_HEADER: [&str; 57] = [
	"FilingID",
	"DateSubmitted",
	"1A",
	"1D",
	"1E1",
	"1F1-Street 1",
	"1F1-Street 2",
	"1F1-City",
	"1F1-State",
	"1F1-Country",
	"1F1-Postal",
	"1F1-Private",
	"1F2-M-F",
	"1F2-Other",
	"1F2-Hours",
	"1F3",
	"1F4",
	"1F5",
	"1G-Street 1",
	"1G-Street 2",
	"1G-City",
	"1G-State",
	"1G-Country",
	"1G-Postal",
	"1G-Private",
	"5D1a",
	"5D1b",
	"5D1e",
	"5D1f",
	"5D2a",
	"5D2b",
	"5D2c",
	"5D2g",
	"5D2h",
	"5D2j",
	"5D2k",
	"5F2a",
	"5F2b",
	"5F2c",
	"5H",
	"5J2",
	"5K1",
	"5K2",
	"5K3",
	"5K4",
	"7A1",
	"7A2",
	"7A6",
	"7A8",
	"7A9",
	"7A10",
	"7A12",
	"7A16",
	"9A1a",
	"9A1b",
	"9A2a",
	"9A2b",
];
/// Jurisdictions that carry a `2-XX` notice-filing flag in ADV Base B.
pub const ADV_STATE_FLAG_CODES: [&str; 52] = [
	"AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
	"KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
	"NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
	"WV", "WI", "WY", "PR",
];

pub const HUDSON_ORIGINAL: &str = "0001234567-25-000001";
pub const HUDSON_AMENDMENT: &str = "0001234567-25-000002";
pub const LONE_STAR_FUND: &str = "0001234567-25-000003";
pub const TEST_FILING: &str = "0001234567-25-000004";
pub const GOLDEN_GATE: &str = "0001670254-25-000010";
pub const GOLDEN_GATE_UPDATE: &str = "0001670254-25-000011";

pub const EMPIRE_CRD: &str = "110001";
pub const EMPIRE_OLD: &str = "1000";
pub const EMPIRE: &str = "1001";
pub const PACIFIC: &str = "1002";
pub const LONE_STAR_WEALTH: &str = "1003";
pub const COAST_TO_COAST: &str = "1004";
pub const MONTREAL: &str = "1005";

/// One delimited file, built row by row against a fixed header.
#[derive(Debug, Clone)]
pub struct FixtureFile {
	header: Vec<String>,
	rows: Vec<Vec<String>>,
	delimiter: u8,
	quoted: bool,
	latin1: bool,
	unknown: Vec<String>,
}
impl FixtureFile {
	/// Tab separated, unquoted, UTF-8.
	pub fn tsv(header: &[&str]) -> Self {
		Self::with_format(header, b'\t', false)
	}

	/// Comma separated, every cell quoted.
	pub fn csv(header: &[&str]) -> Self {
		Self::with_format(header, b',', true)
	}

	fn with_format(header: &[&str], delimiter: u8, quoted: bool) -> Self {
		Self {
			header: header.iter().map(|name| name.to_string()).collect(),
			rows: Vec::new(),
			delimiter,
			quoted,
			latin1: false,
			unknown: Vec::new(),
		}
	}

	pub fn latin1(mut self) -> Self {
		self.latin1 = true;

		self
	}

	/// Cells not named are left empty.
	pub fn row(mut self, cells: &[(&str, &str)]) -> Self {
		let mut row = vec![String::new(); self.header.len()];

		for (name, value) in cells {
			match self.header.iter().position(|column| column == name) {
				Some(index) => row[index] = value.to_string(),
				None => self.unknown.push(name.to_string()),
			}
		}

		self.rows.push(row);

		self
	}

	pub fn without_column(mut self, name: &str) -> Self {
		if let Some(index) = self.header.iter().position(|column| column == name) {
			self.header.remove(index);

			for row in &mut self.rows {
				row.remove(index);
			}
		}

		self
	}

	pub fn render(&self) -> Result<Vec<u8>> {
		if !self.unknown.is_empty() {
			return Err(Error::Message(format!(
				"Fixture rows name columns missing from the header: {}.",
				self.unknown.join(", ")
			)));
		}

		let mut text = String::new();

		for line in std::iter::once(&self.header).chain(self.rows.iter()) {
			let cells = line.iter().map(|cell| self.render_cell(cell)).collect::<Vec<_>>();

			text.push_str(&cells.join(&char::from(self.delimiter).to_string()));
			text.push('\n');
		}

		if !self.latin1 {
			return Ok(text.into_bytes());
		}

		Ok(text.chars().map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?')).collect())
	}

	pub fn write(&self, path: &Path) -> Result<()> {
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}

		fs::write(path, self.render()?)?;

		Ok(())
	}

	fn render_cell(&self, cell: &str) -> String {
		if self.quoted { format!("\"{}\"", cell.replace('"', "\"\"")) } else { cell.to_string() }
	}
}

pub fn fd_submission() -> FixtureFile {
	FixtureFile::tsv(&FD_SUBMISSION_HEADER)
		.row(&[
			("ACCESSIONNUMBER", HUDSON_ORIGINAL),
			("FILE_NUM", "021-11111"),
			("FILING_DATE", "10-JAN-2025"),
			("SIC_CODE", "3569"),
			("SUBMISSIONTYPE", "D"),
			("OVER100PERSONSFLAG", "N"),
			("TESTORLIVE", "LIVE"),
		])
		.row(&[
			("ACCESSIONNUMBER", HUDSON_AMENDMENT),
			("FILE_NUM", "021-11111"),
			("FILING_DATE", "15-FEB-2025"),
			("SIC_CODE", "3569"),
			("SUBMISSIONTYPE", "D/A"),
			("TESTORLIVE", "LIVE"),
		])
		.row(&[
			("ACCESSIONNUMBER", LONE_STAR_FUND),
			("FILE_NUM", "021-22222"),
			("FILING_DATE", "20-Jan-2025"),
			("SUBMISSIONTYPE", "D"),
			("TESTORLIVE", "LIVE"),
		])
		.row(&[
			("ACCESSIONNUMBER", TEST_FILING),
			("FILE_NUM", "021-33333"),
			("FILING_DATE", "12-JAN-2025"),
			("SUBMISSIONTYPE", "D"),
			("TESTORLIVE", "TEST"),
		])
}

pub fn fd_issuers() -> FixtureFile {
	FixtureFile::tsv(&FD_ISSUERS_HEADER)
		.row(&[
			("ACCESSIONNUMBER", HUDSON_ORIGINAL),
			("IS_PRIMARYISSUER_FLAG", "YES"),
			("ISSUER_SEQ_KEY", "1"),
			("CIK", "0001900001"),
			("ENTITYNAME", "Hudson Robotics Inc"),
			("STREET1", "200 Varick St"),
			("CITY", "New York"),
			("STATEORCOUNTRY", "NY"),
			("STATEORCOUNTRYDESCRIPTION", "NEW YORK"),
			("ZIPCODE", "10014"),
			("ENTITYTYPE", "Corporation"),
			("JURISDICTIONOFINC", "DELAWARE"),
		])
		.row(&[
			("ACCESSIONNUMBER", HUDSON_ORIGINAL),
			("IS_PRIMARYISSUER_FLAG", "NO"),
			("ISSUER_SEQ_KEY", "2"),
			("CIK", "0001900002"),
			("ENTITYNAME", "Hudson Robotics Holdings LLC"),
			("CITY", "Wilmington"),
			("STATEORCOUNTRY", "DE"),
		])
		.row(&[
			("ACCESSIONNUMBER", HUDSON_AMENDMENT),
			("IS_PRIMARYISSUER_FLAG", "YES"),
			("ISSUER_SEQ_KEY", "1"),
			("CIK", "0001900001"),
			("ENTITYNAME", "Hudson Robotics Inc"),
			("STREET1", "200 Varick St"),
			("CITY", "New York"),
			("STATEORCOUNTRY", "NY"),
			("ZIPCODE", "10014"),
		])
		.row(&[
			("ACCESSIONNUMBER", LONE_STAR_FUND),
			("IS_PRIMARYISSUER_FLAG", "YES"),
			("ISSUER_SEQ_KEY", "1"),
			("CIK", "0001900003"),
			("ENTITYNAME", "Lone Star Property Fund LP"),
			("CITY", "Houston"),
			("STATEORCOUNTRY", "TX"),
			("ENTITYTYPE", "Limited Partnership"),
		])
		.row(&[
			("ACCESSIONNUMBER", TEST_FILING),
			("IS_PRIMARYISSUER_FLAG", "YES"),
			("ISSUER_SEQ_KEY", "1"),
			("ENTITYNAME", "Test Filer Corp"),
			("STATEORCOUNTRY", "NY"),
		])
}

pub fn fd_offering() -> FixtureFile {
	FixtureFile::tsv(&FD_OFFERING_HEADER)
		.row(&[
			("ACCESSIONNUMBER", HUDSON_ORIGINAL),
			("INDUSTRYGROUPTYPE", "Other Technology"),
			("FEDERALEXEMPTIONS_ITEMS_LIST", "06b"),
			("SALE_DATE", "2025-01-02"),
			("ISEQUITYTYPE", "Y"),
			("ISDEBTTYPE", "N"),
			("ISPOOLEDINVESTMENTFUNDTYPE", "N"),
			("MINIMUMINVESTMENTACCEPTED", "25000"),
			("TOTALOFFERINGAMOUNT", "3200000"),
			("TOTALAMOUNTSOLD", "800000"),
			("TOTALREMAINING", "2400000"),
			("HASNONACCREDITEDINVESTORS", "N"),
		])
		.row(&[
			("ACCESSIONNUMBER", HUDSON_AMENDMENT),
			("INDUSTRYGROUPTYPE", "Other Technology"),
			("FEDERALEXEMPTIONS_ITEMS_LIST", "06b"),
			("SALE_DATE", "2025-01-02"),
			("ISEQUITYTYPE", "true"),
			("ISDEBTTYPE", "false"),
			("ISPOOLEDINVESTMENTFUNDTYPE", "false"),
			("MINIMUMINVESTMENTACCEPTED", "$25,000"),
			("TOTALOFFERINGAMOUNT", "$3,200,000"),
			("TOTALAMOUNTSOLD", "1,200,000"),
			("TOTALREMAINING", "2,000,000"),
			("HASNONACCREDITEDINVESTORS", "no"),
		])
		.row(&[
			("ACCESSIONNUMBER", LONE_STAR_FUND),
			("INDUSTRYGROUPTYPE", "Pooled Investment Fund"),
			("INVESTMENTFUNDTYPE", "Private Equity Fund"),
			("FEDERALEXEMPTIONS_ITEMS_LIST", "06c"),
			("SALE_DATE", "2025-13-45"),
			("ISEQUITYTYPE", "N"),
			("ISDEBTTYPE", "N"),
			("ISPOOLEDINVESTMENTFUNDTYPE", "Y"),
			("MINIMUMINVESTMENTACCEPTED", "250000"),
			("TOTALOFFERINGAMOUNT", "50000000"),
			("TOTALAMOUNTSOLD", "10000000"),
			("TOTALREMAINING", "40000000"),
			("HASNONACCREDITEDINVESTORS", "N"),
		])
		.row(&[
			("ACCESSIONNUMBER", TEST_FILING),
			("TOTALOFFERINGAMOUNT", "1000000"),
			("ISEQUITYTYPE", "Y"),
		])
}

pub fn cf_submission() -> FixtureFile {
	FixtureFile::tsv(&CF_SUBMISSION_HEADER)
		.row(&[
			("ACCESSION_NUMBER", GOLDEN_GATE),
			("SUBMISSION_TYPE", "C"),
			("FILING_DATE", "20250105"),
			("CIK", "0001950001"),
			("FILE_NUMBER", "020-00001"),
			("PERIOD", ""),
		])
		.row(&[
			("ACCESSION_NUMBER", GOLDEN_GATE_UPDATE),
			("SUBMISSION_TYPE", "C-U"),
			("FILING_DATE", "20250301"),
			("CIK", "0001950001"),
			("FILE_NUMBER", "020-00001"),
		])
}

pub fn cf_issuer() -> FixtureFile {
	FixtureFile::tsv(&CF_ISSUER_HEADER)
		.row(&[
			("ACCESSION_NUMBER", GOLDEN_GATE),
			("NAMEOFISSUER", "Golden Gate Coffee Co"),
			("LEGALSTATUSFORM", "Corporation"),
			("JURISDICTIONORGANIZATION", "CA"),
			("STREET1", "1 Ferry Building"),
			("CITY", "San Francisco"),
			("STATEORCOUNTRY", "CA"),
			("ZIPCODE", "94111"),
			("ISSUERWEBSITE", "https://goldengate.example"),
		])
		.row(&[
			("ACCESSION_NUMBER", GOLDEN_GATE_UPDATE),
			("NAMEOFISSUER", "Golden Gate Coffee Co"),
			("CITY", "San Francisco"),
			("STATEORCOUNTRY", "CA"),
			("PROGRESSUPDATE", "Reached 50% of target"),
		])
}

pub fn cf_disclosure() -> FixtureFile {
	FixtureFile::tsv(&CF_DISCLOSURE_HEADER).row(&[
		("ACCESSION_NUMBER", GOLDEN_GATE),
		("SECURITYOFFEREDTYPE", "Common Stock"),
		("NOOFSECURITYOFFERED", "50000"),
		("PRICE", "1.00"),
		("OFFERINGAMOUNT", "50000"),
		("MAXIMUMOFFERINGAMOUNT", "500000"),
		("OVERSUBSCRIPTIONACCEPTED", "Y"),
		("OVERSUBSCRIPTIONALLOCATIONTYPE", "First-come, first-served basis"),
		("DEADLINEDATE", "2025-06-30"),
		("CURRENTEMPLOYEES", "4"),
		("TOTALASSETMOSTRECENTFISCALYEAR", "120000"),
		("TOTALASSETPRIORFISCALYEAR", "90000"),
		("REVENUEMOSTRECENTFISCALYEAR", "200000"),
		("REVENUEPRIORFISCALYEAR", "150000"),
		("NETINCOMEMOSTRECENTFISCALYEAR", "-15000"),
		("NETINCOMEPRIORFISCALYEAR", "-40000"),
	])
}

pub fn cf_jurisdictions() -> FixtureFile {
	let mut file = FixtureFile::tsv(&CF_JURISDICTIONS_HEADER);

	for state in ["CA", "NY", "TX"] {
		file = file.row(&[
			("ACCESSION_NUMBER", GOLDEN_GATE),
			("ISSUEJURISDICTIONSECUROFFERING", state),
		]);
	}

	file
}

pub fn adv_base_a() -> FixtureFile {
	FixtureFile::csv(&ADV_BASE_A_HEADER)
		.latin1()
		.row(&[
			("FilingID", EMPIRE_OLD),
			("DateSubmitted", "3/1/2023 9:05:00 AM"),
			("1A", "EMPIRE CAPITAL ADVISORS  LLC"),
			("1E1", EMPIRE_CRD),
			("1F1-City", "New York"),
			("1F1-State", "NY"),
			("1F1-Country", "United States"),
			("5D1a", "90"),
			("5D1b", "30"),
			("5F2c", "180000000"),
		])
		.row(&[
			("FilingID", EMPIRE),
			("DateSubmitted", "12/30/2024 10:15:00 AM"),
			("1A", "Empire Capital Advisors LLC"),
			("1E1", EMPIRE_CRD),
			("1F1-Street 1", "350 Park Ave"),
			("1F1-City", "New York"),
			("1F1-State", "NY"),
			("1F1-Country", "United States"),
			("1F1-Postal", "10022"),
			("1F2-M-F", "Y"),
			("5D1a", "120"),
			("5D1b", "40"),
			("5D1f", "2"),
			("5F2a", "240,000,000"),
			("5F2b", "10,000,000"),
			("5F2c", "250,000,000"),
			("7A1", "N"),
			("9A1a", "N"),
			("9A1b", "N"),
		])
		.row(&[
			("FilingID", PACIFIC),
			("DateSubmitted", "6/15/2024 2:30:00 PM"),
			("1A", "Pacific Growth Partners"),
			("1E1", "110002"),
			("1F1-City", "San Francisco"),
			("1F1-State", "CA"),
			("1F1-Country", "United States"),
			("5D1a", "300"),
			("5D1b", "10"),
			("5F2c", "40000000"),
		])
		.row(&[
			("FilingID", LONE_STAR_WEALTH),
			("DateSubmitted", "3/31/2024 11:00:00 AM"),
			("1A", "Lone Star Wealth Management"),
			("1E1", "110003"),
			("1F1-City", "Dallas"),
			("1F1-State", "TX"),
			("1F1-Country", "United States"),
			("5D1b", "800"),
			("5D1f", "12"),
			("5F2c", "5000000000"),
			("7A1", "Y"),
		])
		.row(&[
			("FilingID", COAST_TO_COAST),
			("DateSubmitted", "9/1/2024 8:00:00 AM"),
			("1A", "Coast To Coast Advisers"),
			("1E1", "110004"),
			("1F1-City", "Miami"),
			("1F1-State", "FL"),
			("1F1-Country", "United States"),
			("5D1a", "1500"),
			("5D1b", "500"),
			("5F2c", "1200000000"),
			("9A1b", "Y"),
		])
		.row(&[
			("FilingID", MONTREAL),
			("DateSubmitted", "not a timestamp"),
			("1A", "Société Générale Conseil"),
			("1D", "801-55555"),
			("1F1-City", "Montréal"),
			("1F1-State", "QC"),
			("1F1-Country", "Canada"),
			("5F2c", "15000000"),
		])
}

pub fn adv_base_b() -> FixtureFile {
	let flag_columns =
		ADV_STATE_FLAG_CODES.iter().map(|code| format!("2-{code}")).collect::<Vec<_>>();
	let mut header = vec!["FilingID", "2-SECStateReg", "3A", "3A-Other"];

	header.extend(flag_columns.iter().map(String::as_str));

	let everywhere = flag_columns.iter().map(|column| (column.as_str(), "Y")).collect::<Vec<_>>();
	let mut coast = vec![("FilingID", COAST_TO_COAST), ("3A", "Limited Liability Company")];

	coast.extend(everywhere);

	FixtureFile::csv(&header)
		.latin1()
		.row(&[("FilingID", EMPIRE_OLD), ("3A", "Limited Liability Company"), ("2-NY", "Y")])
		.row(&[
			("FilingID", EMPIRE),
			("3A", "Limited Liability Company"),
			("2-NY", "Y"),
			("2-NJ", "y"),
			("2-CT", "N"),
		])
		.row(&[("FilingID", PACIFIC), ("3A", "Corporation"), ("2-CA", "Y")])
		.row(&[("FilingID", LONE_STAR_WEALTH), ("3A", "Corporation"), ("2-TX", "Y"), ("2-OK", "Y")])
		.row(&coast)
		.row(&[("FilingID", MONTREAL), ("3A", "Other"), ("3A-Other", "Société par actions")])
}

/// Every sample file with its path under the data root.
pub fn sample_filings() -> Vec<(&'static str, FixtureFile)> {
	vec![
		(FD_SUBMISSION_PATH, fd_submission()),
		(FD_ISSUERS_PATH, fd_issuers()),
		(FD_OFFERING_PATH, fd_offering()),
		(CF_SUBMISSION_PATH, cf_submission()),
		(CF_ISSUER_PATH, cf_issuer()),
		(CF_DISCLOSURE_PATH, cf_disclosure()),
		(CF_JURISDICTIONS_PATH, cf_jurisdictions()),
		(ADV_BASE_A_PATH, adv_base_a()),
		(ADV_BASE_B_PATH, adv_base_b()),
	]
}
