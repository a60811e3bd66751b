pub mod db;
pub mod derived;
pub mod load_runs;
pub mod models;
pub mod queries;
pub mod schema;
pub mod staging;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
