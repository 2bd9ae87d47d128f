//! st-materialize - Materialization compiler for Strata
//!
//! Turns an asset's materialization policy plus its rendered query into
//! the ordered, dialect-correct SQL statement list that realizes the
//! policy on the target warehouse. One generic compiler drives all
//! strategies; per-warehouse syntax lives behind the [`DialectAdapter`]
//! capability trait.

pub mod compiler;
pub mod dialect;
pub mod dialects;
pub mod error;
mod scd2;
mod strategies;

pub use compiler::{Materializer, SuffixGenerator};
pub use dialect::{DdlPrimaryKey, DialectAdapter, ReplaceShape, TempRelation};
pub use dialects::Dialect;
pub use error::{RenderError, RenderResult};
pub use strategies::TEMP_PREFIX;
