//! Enable/disable rules for `ServiceStatus`.
//!
//! Only two transitions are exposed: enable (`Expired | Exp_soon -> Active`) and
//! disable (`Active -> Expired`). `Exp_soon` is never a transition target; it is
//! only reached through a full update that carries it.

use chrono::{DateTime, Utc};

use crate::errors::ModelError;
use crate::service_record::ServiceRecord;
use crate::status::ServiceStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Enable,
    Disable,
}

impl Transition {
    pub fn name(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }

    pub fn target(self) -> ServiceStatus {
        match self {
            Self::Enable => ServiceStatus::Active,
            Self::Disable => ServiceStatus::Expired,
        }
    }

    pub fn allowed_from(self, current: ServiceStatus) -> bool {
        match self {
            Self::Enable => current != ServiceStatus::Active,
            Self::Disable => current == ServiceStatus::Active,
        }
    }

    /// Apply the transition in place, refreshing `updated_at`.
    /// A rejected transition leaves the record untouched.
    pub fn apply(self, record: &mut ServiceRecord, now: DateTime<Utc>) -> Result<(), ModelError> {
        if !self.allowed_from(record.status) {
            return Err(ModelError::InvalidTransition { transition: self.name(), from: record.status });
        }
        record.status = self.target();
        record.touch(now);
        Ok(())
    }
}

pub fn enable(record: &mut ServiceRecord, now: DateTime<Utc>) -> Result<(), ModelError> {
    Transition::Enable.apply(record, now)
}

pub fn disable(record: &mut ServiceRecord, now: DateTime<Utc>) -> Result<(), ModelError> {
    Transition::Disable.apply(record, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_record::ServiceRecordInput;
    use chrono::Duration;

    fn record(status: ServiceStatus) -> ServiceRecord {
        let mut rec = ServiceRecord::from_input("SER-001".into(), ServiceRecordInput::default(), Utc::now());
        rec.status = status;
        rec
    }

    #[test]
    fn enable_from_expired_and_exp_soon() {
        for from in [ServiceStatus::Expired, ServiceStatus::ExpSoon] {
            let mut rec = record(from);
            let later = rec.updated_at + Duration::seconds(1);
            enable(&mut rec, later).unwrap();
            assert_eq!(rec.status, ServiceStatus::Active);
            assert_eq!(rec.updated_at, later);
        }
    }

    #[test]
    fn disable_from_active() {
        let mut rec = record(ServiceStatus::Active);
        disable(&mut rec, Utc::now()).unwrap();
        assert_eq!(rec.status, ServiceStatus::Expired);
    }

    #[test]
    fn enable_active_is_rejected_without_touching_record() {
        let mut rec = record(ServiceStatus::Active);
        let before = rec.clone();
        let err = enable(&mut rec, Utc::now() + Duration::seconds(10)).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidTransition { transition: "enable", from: ServiceStatus::Active }
        );
        assert_eq!(rec, before);
    }

    #[test]
    fn disable_non_active_is_rejected() {
        for from in [ServiceStatus::Expired, ServiceStatus::ExpSoon] {
            let mut rec = record(from);
            assert!(disable(&mut rec, Utc::now()).is_err());
            assert_eq!(rec.status, from);
        }
    }

    #[test]
    fn exp_soon_is_never_a_target() {
        assert!(Transition::Enable.target() != ServiceStatus::ExpSoon);
        assert!(Transition::Disable.target() != ServiceStatus::ExpSoon);
    }
}
