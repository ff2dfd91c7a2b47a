//! SQLite-backed stock of electronic components and the projects that
//! consume them.
//!
//! # Architecture
//! - **Components**: one row per stocked part, keyed by a numeric id. The
//!   MPN is expected to be unique but is not enforced by the schema; adding
//!   a part whose MPN already exists bumps that row's count instead.
//! - **Projects**: a named build with a list of component lines. Creating a
//!   project reserves its components by decrementing their stock, all in one
//!   transaction.

mod db;
pub mod error;
pub mod models;
mod repo;
pub mod search;
mod store;

pub use crate::db::Database;
pub use crate::repo::Repository;
pub use crate::store::Inventory;
