//! Storage abstractions for the record service.
//!
//! `RecordStore` is the only thing `RecordService` knows about persistence.
//! Two implementations: an in-process map for tests and throwaway runs, and a JSON
//! file built on the generic `JsonMapStore`.

pub mod file;
pub mod json_map_store;
pub mod memory;

use async_trait::async_trait;
use models::ServiceRecord;

use crate::errors::ServiceError;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

/// Keyed record storage. Every method may fail with `ServiceError::Storage`;
/// a failed `put`/`delete` must leave the stored data as it was.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records, in no particular order.
    async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<ServiceRecord>, ServiceError>;
    /// Insert or replace by `record.id`.
    async fn put(&self, record: ServiceRecord) -> Result<(), ServiceError>;
    /// Insert or replace many records as one write: either all land or none do.
    async fn put_all(&self, records: Vec<ServiceRecord>) -> Result<(), ServiceError>;
    /// Remove by id; returns whether a record existed.
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
}
