pub mod seed;
pub mod service;
pub mod summary;

pub use seed::seed_records;
pub use service::{sort_newest_first, RecordService};
pub use summary::{FilterFacets, StatusSummary};
