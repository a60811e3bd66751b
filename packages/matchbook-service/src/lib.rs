//! Resolution, extraction, matching and the query surface over a matchbook store.

pub mod candidates;
pub mod extract;
pub mod load;
pub mod query;
pub mod rank;
pub mod resolve;
pub mod time_serde;

mod error;

pub use error::{Error, Result};
pub use load::{EmptyCandidateSet, LoadReport, SourceFailure, StagedSource, TableCount};
pub use query::{
	AdvisersForDealRequest, AdvisersForDealResponse, DealsForAdviserRequest,
	DealsForAdviserResponse,
};

use matchbook_config::Config;
use matchbook_storage::db::Db;

pub struct MatchService {
	pub cfg: Config,
	pub db: Db,
}
impl MatchService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}

	/// Opens the configured store.
	pub async fn connect(cfg: Config) -> Result<Self> {
		let db = Db::connect(&cfg.storage.sqlite).await?;

		Ok(Self { cfg, db })
	}
}
