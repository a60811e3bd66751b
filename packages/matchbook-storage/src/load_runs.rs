use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, db::Db};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
	Completed,
	SourcesFailed,
}
impl LoadStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Completed => "completed",
			Self::SourcesFailed => "sources_failed",
		}
	}
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LoadRunRecord {
	pub run_id: String,
	pub started_at: OffsetDateTime,
	pub finished_at: OffsetDateTime,
	pub status: String,
	pub report: String,
}

pub async fn insert_load_run(
	db: &Db,
	run_id: Uuid,
	started_at: OffsetDateTime,
	finished_at: OffsetDateTime,
	status: LoadStatus,
	report: &serde_json::Value,
) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO load_runs (run_id, started_at, finished_at, status, report)
VALUES (?1, ?2, ?3, ?4, ?5)",
	)
	.bind(run_id.to_string())
	.bind(started_at)
	.bind(finished_at)
	.bind(status.as_str())
	.bind(serde_json::to_string(report)?)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn latest_load_run(db: &Db) -> Result<Option<LoadRunRecord>> {
	let row = sqlx::query_as::<_, LoadRunRecord>(
		"\
SELECT run_id, started_at, finished_at, status, report
FROM load_runs
ORDER BY finished_at DESC, run_id DESC
LIMIT 1",
	)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}
