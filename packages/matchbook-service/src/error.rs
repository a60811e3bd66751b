pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error(transparent)]
	Source(#[from] matchbook_sources::Error),
}
impl From<matchbook_storage::Error> for Error {
	fn from(err: matchbook_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
