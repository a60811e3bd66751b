use std::sync::Arc;

use matchbook_service::MatchService;
use matchbook_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<MatchService>,
}
impl AppState {
	/// Opens the store read-only; the loader owns the file and its schema.
	pub async fn new(config: matchbook_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect_read_only(&config.storage.sqlite);

		Ok(Self { service: Arc::new(MatchService::new(config, db)) })
	}
}
