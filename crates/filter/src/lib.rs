//! Composable filter engine for service records.
//!
//! Pure logic: no I/O, no async, no shared state. The server's filter endpoint and any
//! client-side re-filter use the same `filter_records`, so applying it twice with the
//! same spec yields the same result as applying it once.

pub mod date;
pub mod engine;
pub mod error;
pub mod spec;

pub use engine::{apply_filters, filter_records, CompiledFilter};
pub use error::FilterError;
pub use spec::FilterSpec;
