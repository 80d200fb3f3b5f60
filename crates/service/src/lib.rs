//! Record service layer: storage backends, the `RecordService` façade over them,
//! seed data, KPI summary/facets and the CSV/HTML export renderers.

pub mod errors;
pub mod export;
pub mod records;
pub mod runtime;
pub mod storage;

pub use errors::ServiceError;
pub use records::{FilterFacets, RecordService, StatusSummary};
pub use storage::{FileRecordStore, MemoryRecordStore, RecordStore};
