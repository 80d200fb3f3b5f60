use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::status::ServiceStatus;

/// A telecom service (package, airtime, dongle...) assigned to an employee.
///
/// `id` is assigned once by the server and never changes. `expires` is kept as the
/// text the client sent; the canonical form is `DD/MM/YYYY` but nothing enforces it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: String,
    pub ref_no: String,
    pub employee: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub package_name: String,
    pub ser_number: String,
    pub vendor: String,
    #[serde(default)]
    pub status: ServiceStatus,
    pub expires: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload: everything except id and timestamps, which the server owns.
///
/// Missing string fields deserialize as empty so that `validate` reports them,
/// rather than failing at the JSON layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceRecordInput {
    pub ref_no: String,
    pub employee: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub package_name: String,
    pub ser_number: String,
    pub vendor: String,
    pub status: Option<ServiceStatus>,
    pub expires: String,
}

pub fn validate_required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::required(field));
    }
    Ok(())
}

/// Digits, spaces, `+`, `-` and parentheses; at least seven digits.
pub fn validate_ser_number(value: &str) -> Result<(), ModelError> {
    validate_required("serNumber", value)?;
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')');
    if !value.chars().all(allowed) {
        return Err(ModelError::Validation(
            "serNumber can only contain digits, +, -, spaces, and parentheses".into(),
        ));
    }
    if value.chars().filter(|c| c.is_ascii_digit()).count() < 7 {
        return Err(ModelError::Validation("serNumber must contain at least 7 digits".into()));
    }
    Ok(())
}

pub fn validate_ref_no(value: &str) -> Result<(), ModelError> {
    validate_required("refNo", value)?;
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '#' | '-' | '_');
    if !value.chars().all(allowed) {
        return Err(ModelError::Validation(
            "refNo can only contain letters, numbers, #, -, and _".into(),
        ));
    }
    Ok(())
}

pub fn validate_package_name(value: &str) -> Result<(), ModelError> {
    validate_required("packageName", value)?;
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '(' | ')');
    if !value.chars().all(allowed) {
        return Err(ModelError::Validation(
            "packageName can only contain letters, numbers, spaces, hyphens, and parentheses".into(),
        ));
    }
    Ok(())
}

impl ServiceRecordInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_ref_no(&self.ref_no)?;
        validate_required("employee", &self.employee)?;
        validate_required("type", &self.service_type)?;
        validate_package_name(&self.package_name)?;
        validate_ser_number(&self.ser_number)?;
        validate_required("vendor", &self.vendor)?;
        validate_required("expires", &self.expires)?;
        Ok(())
    }
}

impl ServiceRecord {
    /// Build a new record from validated input. Status always starts as `Active`,
    /// whatever the input carries.
    pub fn from_input(id: String, input: ServiceRecordInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            ref_no: input.ref_no,
            employee: input.employee,
            service_type: input.service_type,
            package_name: input.package_name,
            ser_number: input.ser_number,
            vendor: input.vendor,
            status: ServiceStatus::Active,
            expires: input.expires,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full field replace. An absent status resets to `Active`.
    pub fn apply_input(&mut self, input: ServiceRecordInput, now: DateTime<Utc>) {
        self.ref_no = input.ref_no;
        self.employee = input.employee;
        self.service_type = input.service_type;
        self.package_name = input.package_name;
        self.ser_number = input.ser_number;
        self.vendor = input.vendor;
        self.status = input.status.unwrap_or_default();
        self.expires = input.expires;
        self.touch(now);
    }

    /// Refresh `updated_at` without ever moving it backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at).max(self.created_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn input() -> ServiceRecordInput {
        ServiceRecordInput {
            ref_no: "#ref2024".into(),
            employee: "Aman Buze".into(),
            service_type: "Packages".into(),
            package_name: "Unlimited Voice".into(),
            ser_number: "+251980808080".into(),
            vendor: "ETHIO_TELE".into(),
            status: None,
            expires: "02/10/2026".into(),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert_eq!(input().validate(), Ok(()));
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let mut bad = input();
        bad.vendor = "   ".into();
        assert_eq!(bad.validate(), Err(ModelError::required("vendor")));

        let mut bad = input();
        bad.expires.clear();
        assert_eq!(bad.validate(), Err(ModelError::required("expires")));
    }

    #[test]
    fn ser_number_rules() {
        assert!(validate_ser_number("+251 (98) 080-8080").is_ok());
        assert!(validate_ser_number("12345").is_err());
        assert!(validate_ser_number("+2519808x8080").is_err());
    }

    #[test]
    fn ref_no_and_package_rules() {
        assert!(validate_ref_no("#ref-2024_a").is_ok());
        assert!(validate_ref_no("ref 2024").is_err());
        assert!(validate_package_name("Data (10GB) - Monthly").is_ok());
        assert!(validate_package_name("Voice/Data").is_err());
    }

    #[test]
    fn input_deserializes_with_wire_names_and_missing_fields() {
        let parsed: ServiceRecordInput =
            serde_json::from_str(r##"{"refNo":"#r1","type":"Packages","status":"Exp_soon"}"##).unwrap();
        assert_eq!(parsed.ref_no, "#r1");
        assert_eq!(parsed.service_type, "Packages");
        assert_eq!(parsed.status, Some(ServiceStatus::ExpSoon));
        assert!(parsed.employee.is_empty());
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn from_input_ignores_client_status() {
        let now = Utc::now();
        let mut i = input();
        i.status = Some(ServiceStatus::Expired);
        let rec = ServiceRecord::from_input("SER-9".into(), i, now);
        assert_eq!(rec.status, ServiceStatus::Active);
        assert_eq!(rec.created_at, rec.updated_at);
    }

    #[test]
    fn apply_input_replaces_fields_and_keeps_timestamps_ordered() {
        let now = Utc::now();
        let mut rec = ServiceRecord::from_input("SER-9".into(), input(), now);
        let mut i = input();
        i.vendor = "SAFARICOM".into();
        i.status = Some(ServiceStatus::ExpSoon);
        rec.apply_input(i, now - Duration::seconds(30));
        assert_eq!(rec.vendor, "SAFARICOM");
        assert_eq!(rec.status, ServiceStatus::ExpSoon);
        assert!(rec.updated_at >= rec.created_at);

        rec.apply_input(input(), now + Duration::seconds(5));
        assert_eq!(rec.status, ServiceStatus::Active);
        assert_eq!(rec.updated_at, now + Duration::seconds(5));
    }

    #[test]
    fn record_serializes_camel_case_with_type_key() {
        let rec = ServiceRecord::from_input("SER-1".into(), input(), Utc::now());
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["type"], "Packages");
        assert_eq!(v["packageName"], "Unlimited Voice");
        assert_eq!(v["status"], "Active");
        assert!(v.get("createdAt").is_some());
    }
}
