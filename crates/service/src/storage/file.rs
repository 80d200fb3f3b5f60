use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::ServiceRecord;

use super::{json_map_store::JsonMapStore, RecordStore};
use crate::errors::ServiceError;

/// File storage: records persisted as a JSON object keyed by id.
#[derive(Clone)]
pub struct FileRecordStore {
    store: Arc<JsonMapStore<String, ServiceRecord>>,
}

impl FileRecordStore {
    /// Open (or create) the backing file.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, ServiceRecord>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceError> { Ok(self.store.values().await) }

    async fn get(&self, id: &str) -> Result<Option<ServiceRecord>, ServiceError> {
        Ok(self.store.get(&id.to_string()).await)
    }

    async fn put(&self, record: ServiceRecord) -> Result<(), ServiceError> {
        self.store.insert(record.id.clone(), record).await
    }

    async fn put_all(&self, records: Vec<ServiceRecord>) -> Result<(), ServiceError> {
        self.store
            .update_map(|m| {
                m.extend(records.into_iter().map(|r| (r.id.clone(), r)));
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> { self.store.remove(&id.to_string()).await }
}
