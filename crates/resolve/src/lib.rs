//! Part-resolution pipelines.
//!
//! Both pipelines share a shape: search, disambiguate, follow a link,
//! extract. Each stage either produces the next stage's input or ends the
//! call; fetches within one call are strictly sequential. Resolvers hold no
//! mutable state, so one instance can serve any number of concurrent calls.

mod datasheet;
pub mod error;
pub mod models;
mod substitution;

pub use crate::datasheet::DatasheetResolver;
pub use crate::error::Stage;
pub use crate::models::{DatasheetResult, SubstitutionList, SubstitutionResult};
pub use crate::substitution::SubstitutionResolver;
