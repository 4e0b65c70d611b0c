mod clear;
mod error;
mod health;
mod ingest;
mod metrics;
mod query;
mod sources;

pub use clear::clear_handler;
pub use error::{ApiError, ErrorResponse};
pub use health::{SERVICE_NAME, health_handler};
pub use ingest::{ingest_directory_handler, ingest_handler};
pub use metrics::metrics_handler;
pub use query::query_handler;
pub use sources::sources_handler;
