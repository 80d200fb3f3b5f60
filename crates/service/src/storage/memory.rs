use async_trait::async_trait;
use dashmap::DashMap;
use models::ServiceRecord;

use super::RecordStore;
use crate::errors::ServiceError;

/// Process-local record store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: DashMap<String, ServiceRecord>,
}

impl MemoryRecordStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_records(records: impl IntoIterator<Item = ServiceRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.records.insert(record.id.clone(), record);
        }
        store
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
        Ok(self.records.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<ServiceRecord>, ServiceError> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, record: ServiceRecord) -> Result<(), ServiceError> {
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn put_all(&self, records: Vec<ServiceRecord>) -> Result<(), ServiceError> {
        for record in records {
            self.records.insert(record.id.clone(), record);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.records.remove(id).is_some())
    }
}
