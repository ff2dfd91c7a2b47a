pub mod backend;
pub mod error;

pub use crate::backend::Fetcher;
use std::sync::Arc;

/// The fixed `User-Agent` sent with every catalog request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

pub type FetcherHandle = Arc<dyn Fetcher + Send + Sync>;
