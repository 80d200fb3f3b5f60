use chrono::{DateTime, Duration, Utc};
use models::{ServiceRecord, ServiceStatus};

/// Demo data loaded into an empty store on first start.
///
/// `SER-001` is the newest so a default listing reads 001, 002, 003.
pub fn seed_records(now: DateTime<Utc>) -> Vec<ServiceRecord> {
    [
        ("SER-001", ServiceStatus::Active),
        ("SER-002", ServiceStatus::ExpSoon),
        ("SER-003", ServiceStatus::Expired),
    ]
    .into_iter()
    .enumerate()
    .map(|(age, (id, status))| {
        let created = now - Duration::seconds(age as i64);
        ServiceRecord {
            id: id.to_string(),
            ref_no: "#ref2024".into(),
            employee: "Aman Buze".into(),
            service_type: "Packages".into(),
            package_name: "Unlimited Voice".into(),
            ser_number: "+251980808080".into(),
            vendor: "ETHIO_TELE".into(),
            status,
            expires: "02/10/2026".into(),
            created_at: created,
            updated_at: created,
        }
    })
    .collect()
}
