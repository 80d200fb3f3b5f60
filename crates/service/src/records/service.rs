use std::sync::Arc;

use chrono::Utc;
use filter::{filter_records, FilterSpec};
use models::{lifecycle::Transition, ServiceRecord, ServiceRecordInput};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::summary::{FilterFacets, StatusSummary};
use crate::errors::ServiceError;
use crate::storage::RecordStore;

/// Application service for assigned-service records.
///
/// Every mutation is a plain read-modify-write against the store with no version
/// check: two concurrent updates of the same id race and the last write wins.
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

/// Newest first; ties broken by id so the order is stable across store backends.
pub fn sort_newest_first(records: &mut [ServiceRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

fn generate_id() -> String {
    format!("SER-{}", Uuid::new_v4().simple()).to_uppercase()
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self { Self { store } }

    /// All records, newest first.
    pub async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
        let mut records = self.store.list().await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    pub async fn get(&self, id: &str) -> Result<ServiceRecord, ServiceError> {
        self.store.get(id).await?.ok_or_else(|| ServiceError::not_found("service", id))
    }

    /// Validate input, assign id and timestamps, persist. Status always starts `Active`.
    #[instrument(skip(self, input), fields(employee = %input.employee))]
    pub async fn create(&self, input: ServiceRecordInput) -> Result<ServiceRecord, ServiceError> {
        input.validate()?;
        let record = ServiceRecord::from_input(generate_id(), input, Utc::now());
        self.store.put(record.clone()).await?;
        info!(event = "service_created", id = %record.id, "created service record");
        Ok(record)
    }

    /// Full replace of every client-owned field, status included (absent means `Active`).
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: ServiceRecordInput) -> Result<ServiceRecord, ServiceError> {
        let mut record = self.get(id).await?;
        input.validate()?;
        record.apply_input(input, Utc::now());
        self.store.put(record.clone()).await?;
        info!(event = "service_updated", id = %record.id, status = %record.status, "updated service record");
        Ok(record)
    }

    pub async fn enable(&self, id: &str) -> Result<ServiceRecord, ServiceError> {
        self.transition(id, Transition::Enable).await
    }

    pub async fn disable(&self, id: &str) -> Result<ServiceRecord, ServiceError> {
        self.transition(id, Transition::Disable).await
    }

    #[instrument(skip(self))]
    async fn transition(&self, id: &str, transition: Transition) -> Result<ServiceRecord, ServiceError> {
        let mut record = self.get(id).await?;
        let from = record.status;
        if let Err(e) = transition.apply(&mut record, Utc::now()) {
            warn!(event = "service_transition_rejected", id, %from, transition = transition.name(), "rejected status change");
            return Err(e.into());
        }
        self.store.put(record.clone()).await?;
        info!(event = "service_status_changed", id, %from, to = %record.status, "changed service status");
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::not_found("service", id));
        }
        info!(event = "service_deleted", id, "deleted service record");
        Ok(())
    }

    /// Apply the filter engine to the whole store, newest first.
    #[instrument(skip(self, spec), fields(active_filters = spec.active_filter_count()))]
    pub async fn filter_list(&self, spec: &FilterSpec) -> Result<Vec<ServiceRecord>, ServiceError> {
        let records = self.store.list().await?;
        let mut matched = filter_records(&records, spec)?;
        sort_newest_first(&mut matched);
        info!(total = records.len(), matched = matched.len(), "filtered service records");
        Ok(matched)
    }

    pub async fn summary(&self) -> Result<StatusSummary, ServiceError> {
        Ok(StatusSummary::from_records(&self.store.list().await?))
    }

    pub async fn facets(&self) -> Result<FilterFacets, ServiceError> {
        Ok(FilterFacets::from_records(&self.store.list().await?))
    }

    /// Load the given records only if the store is empty. Returns how many were written.
    pub async fn seed_if_empty(&self, records: Vec<ServiceRecord>) -> Result<usize, ServiceError> {
        if !self.store.list().await?.is_empty() {
            return Ok(0);
        }
        let count = records.len();
        self.store.put_all(records).await?;
        info!(event = "store_seeded", count, "seeded empty record store");
        Ok(count)
    }
}
