//! Domain models for assigned telecom services.
//! - `service_record`: the stored entity and its create/update input.
//! - `status`: the closed status vocabulary.
//! - `lifecycle`: enable/disable transition rules.

pub mod errors;
pub mod lifecycle;
pub mod service_record;
pub mod status;

pub use errors::ModelError;
pub use lifecycle::Transition;
pub use service_record::{ServiceRecord, ServiceRecordInput};
pub use status::ServiceStatus;
