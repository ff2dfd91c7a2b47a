//! Page extraction for the part-resolution pipelines.
//!
//! Nothing in this crate touches the network: every function takes markup
//! that somebody else fetched and returns owned data, so the parsed
//! [`scraper::Html`] document never outlives a single call.

mod consts;
pub mod error;
pub mod link;
pub mod models;
pub mod query;
mod site;

pub use crate::site::{DatasheetLayout, DatasheetSite, SubstitutionLayout, SubstitutionSite};
