use std::sync::Arc;

use service::RecordService;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub records: Arc<RecordService>,
}

impl ServerState {
    pub fn new(records: RecordService) -> Self { Self { records: Arc::new(records) } }
}
