use chrono::NaiveDateTime;
use models::ServiceRecord;

use crate::date::{parse_generic, parse_tolerant};
use crate::error::FilterError;
use crate::spec::{populated, FilterSpec};

/// A `FilterSpec` with its text lower-cased and its date bounds parsed once,
/// ready to test many records.
#[derive(Debug, Clone)]
pub struct CompiledFilter<'a> {
    spec: &'a FilterSpec,
    search: Option<String>,
    ser_number: Option<String>,
    ref_no: Option<String>,
    date_range: Option<DateRange>,
}

#[derive(Debug, Clone, Copy)]
struct DateRange {
    from: Option<NaiveDateTime>,
    to: Option<NaiveDateTime>,
}

fn parse_bound(field: &'static str, value: &Option<String>) -> Result<Option<NaiveDateTime>, FilterError> {
    match populated(value) {
        None => Ok(None),
        Some(raw) => parse_generic(raw)
            .map(Some)
            .ok_or_else(|| FilterError::InvalidDateBound { field, value: raw.to_string() }),
    }
}

impl<'a> CompiledFilter<'a> {
    /// Fails only when a date bound cannot be parsed. Bounds go through the generic
    /// parser alone; the `DD/MM/YYYY` fallback applies to record expiry values only.
    pub fn compile(spec: &'a FilterSpec) -> Result<Self, FilterError> {
        let date_range = if spec.has_date_range() {
            Some(DateRange {
                from: parse_bound("dateFrom", &spec.date_from)?,
                to: parse_bound("dateTo", &spec.date_to)?,
            })
        } else {
            None
        };
        Ok(Self {
            spec,
            search: populated(&spec.search_query).map(str::to_lowercase),
            ser_number: populated(&spec.ser_number).map(str::to_lowercase),
            ref_no: populated(&spec.ref_no).map(str::to_lowercase),
            date_range,
        })
    }

    /// Check a single record against every populated predicate.
    pub fn matches(&self, record: &ServiceRecord) -> bool {
        self.matches_search(record)
            && self.matches_categories(record)
            && self.matches_substrings(record)
            && self.matches_date_range(record)
    }

    fn matches_search(&self, record: &ServiceRecord) -> bool {
        let Some(query) = self.search.as_deref() else {
            return true;
        };
        [
            &record.id,
            &record.employee,
            &record.package_name,
            &record.vendor,
            &record.ser_number,
            &record.ref_no,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(query))
    }

    fn matches_categories(&self, record: &ServiceRecord) -> bool {
        let spec = self.spec;
        accepts(&spec.employee, &record.employee)
            && accepts(&spec.service_type, &record.service_type)
            && accepts(&spec.vendor, &record.vendor)
            && accepts(&spec.status, record.status.as_str())
            && accepts(&spec.package_name, &record.package_name)
    }

    fn matches_substrings(&self, record: &ServiceRecord) -> bool {
        contains_ci(self.ser_number.as_deref(), &record.ser_number)
            && contains_ci(self.ref_no.as_deref(), &record.ref_no)
    }

    fn matches_date_range(&self, record: &ServiceRecord) -> bool {
        let Some(range) = self.date_range else {
            return true;
        };
        // Unparseable expiry dates are kept whatever the bounds.
        let Some(expires) = parse_tolerant(&record.expires) else {
            return true;
        };
        if matches!(range.from, Some(from) if expires < from) {
            return false;
        }
        if matches!(range.to, Some(to) if expires > to) {
            return false;
        }
        true
    }
}

fn accepts(set: &std::collections::BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

fn contains_ci(needle_lower: Option<&str>, haystack: &str) -> bool {
    needle_lower.map_or(true, |needle| haystack.to_lowercase().contains(needle))
}

/// Apply a spec to a slice of records, returning indices of matching records in
/// input order.
pub fn apply_filters(records: &[ServiceRecord], spec: &FilterSpec) -> Result<Vec<usize>, FilterError> {
    if spec.is_empty() {
        return Ok((0..records.len()).collect());
    }
    let compiled = CompiledFilter::compile(spec)?;
    Ok(records
        .iter()
        .enumerate()
        .filter(|(_, record)| compiled.matches(record))
        .map(|(idx, _)| idx)
        .collect())
}

/// Stable filter: the matching records, cloned, in their original relative order.
pub fn filter_records(records: &[ServiceRecord], spec: &FilterSpec) -> Result<Vec<ServiceRecord>, FilterError> {
    Ok(apply_filters(records, spec)?.into_iter().map(|idx| records[idx].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use models::ServiceStatus;

    fn make_record(id: &str, status: ServiceStatus, expires: &str) -> ServiceRecord {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        ServiceRecord {
            id: id.to_string(),
            ref_no: "#ref2024".into(),
            employee: "Aman Buze".into(),
            service_type: "Packages".into(),
            package_name: "Unlimited Voice".into(),
            ser_number: "+251980808080".into(),
            vendor: "ETHIO_TELE".into(),
            status,
            expires: expires.to_string(),
            created_at: created,
            updated_at: created + Duration::seconds(1),
        }
    }

    fn seed() -> Vec<ServiceRecord> {
        vec![
            make_record("SER-001", ServiceStatus::Active, "02/10/2026"),
            make_record("SER-002", ServiceStatus::ExpSoon, "02/10/2026"),
            make_record("SER-003", ServiceStatus::Expired, "02/10/2026"),
        ]
    }

    fn mixed() -> Vec<ServiceRecord> {
        let mut a = make_record("SER-010", ServiceStatus::Active, "15/01/2024");
        a.employee = "John Doe".into();
        a.vendor = "SAFARICOM".into();
        a.ref_no = "#INV-77".into();
        let mut b = make_record("SER-011", ServiceStatus::Expired, "2025-06-30");
        b.service_type = "Dongle".into();
        b.ser_number = "+254711000111".into();
        let c = make_record("SER-012", ServiceStatus::ExpSoon, "not-a-date");
        let mut d = make_record("SER-013", ServiceStatus::Active, "31/12/2026");
        d.package_name = "Data 10GB".into();
        vec![a, b, c, d]
    }

    fn ids(records: &[ServiceRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn empty_spec_is_identity() {
        let records = mixed();
        let out = filter_records(&records, &FilterSpec::default()).unwrap();
        assert_eq!(out, records);
        assert_eq!(apply_filters(&records, &FilterSpec::default()).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_over_all_text_fields() {
        let records = mixed();
        assert_eq!(ids(&filter_records(&records, &FilterSpec::search("AMAN")).unwrap()), vec![
            "SER-011", "SER-012", "SER-013"
        ]);
        assert_eq!(ids(&filter_records(&records, &FilterSpec::search("inv-77")).unwrap()), vec!["SER-010"]);
        assert_eq!(ids(&filter_records(&records, &FilterSpec::search("0111")).unwrap()), vec!["SER-011"]);
        assert_eq!(ids(&filter_records(&records, &FilterSpec::search("ser-013")).unwrap()), vec!["SER-013"]);
        assert!(filter_records(&records, &FilterSpec::search("packages")).unwrap().is_empty());
    }

    #[test]
    fn status_set_is_exact_match() {
        let out = filter_records(&seed(), &FilterSpec::statuses([ServiceStatus::Active])).unwrap();
        assert_eq!(ids(&out), vec!["SER-001"]);
        let out =
            filter_records(&seed(), &FilterSpec::statuses([ServiceStatus::Active, ServiceStatus::Expired])).unwrap();
        assert_eq!(ids(&out), vec!["SER-001", "SER-003"]);
    }

    #[test]
    fn categorical_sets_are_case_sensitive_and_or_combined() {
        let records = mixed();
        let mut spec = FilterSpec::default();
        spec.employee.insert("aman buze".into());
        assert!(filter_records(&records, &spec).unwrap().is_empty());

        spec.employee.insert("Aman Buze".into());
        spec.employee.insert("John Doe".into());
        assert_eq!(filter_records(&records, &spec).unwrap().len(), 4);

        spec.service_type.insert("Dongle".into());
        assert_eq!(ids(&filter_records(&records, &spec).unwrap()), vec!["SER-011"]);
    }

    #[test]
    fn substring_predicates_ignore_case() {
        let records = mixed();
        let spec = FilterSpec { ref_no: Some("#inv".into()), ..Default::default() };
        assert_eq!(ids(&filter_records(&records, &spec).unwrap()), vec!["SER-010"]);
        let spec = FilterSpec { ser_number: Some("254711".into()), ..Default::default() };
        assert_eq!(ids(&filter_records(&records, &spec).unwrap()), vec!["SER-011"]);
    }

    #[test]
    fn date_range_is_inclusive_and_fails_open() {
        let records = mixed();
        let spec = FilterSpec {
            date_from: Some("2025-06-30".into()),
            date_to: Some("2026-12-31".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&records, &spec).unwrap()), vec!["SER-011", "SER-012", "SER-013"]);

        let spec = FilterSpec { date_to: Some("2024-01-15".into()), ..Default::default() };
        assert_eq!(ids(&filter_records(&records, &spec).unwrap()), vec!["SER-010", "SER-012"]);
    }

    #[test]
    fn bad_expiry_passes_any_lower_bound() {
        let records = vec![make_record("SER-100", ServiceStatus::Active, "not-a-date")];
        let spec = FilterSpec { date_from: Some("2024-01-01".into()), ..Default::default() };
        assert_eq!(filter_records(&records, &spec).unwrap().len(), 1);
    }

    #[test]
    fn malformed_bound_fails_the_call() {
        let spec = FilterSpec { date_to: Some("someday".into()), ..Default::default() };
        let err = filter_records(&seed(), &spec).unwrap_err();
        assert_eq!(err, FilterError::InvalidDateBound { field: "dateTo", value: "someday".into() });
        // Even with nothing to filter.
        assert!(apply_filters(&[], &spec).is_err());
    }

    #[test]
    fn empty_bound_strings_do_not_activate_the_range() {
        let spec = FilterSpec { date_from: Some(String::new()), date_to: Some(String::new()), ..Default::default() };
        assert!(spec.is_empty());
        assert_eq!(filter_records(&seed(), &spec).unwrap().len(), 3);
    }

    #[test]
    fn bounds_use_the_generic_parser_only() {
        let spec = FilterSpec { date_from: Some("02/10/2026".into()), ..Default::default() };
        assert_eq!(
            filter_records(&seed(), &spec).unwrap_err(),
            FilterError::InvalidDateBound { field: "dateFrom", value: "02/10/2026".into() }
        );

        // Same day written year-first or with a month name still compares against DD/MM/YYYY expiry.
        let spec = FilterSpec { date_from: Some("2026-10-03".into()), ..Default::default() };
        assert!(filter_records(&seed(), &spec).unwrap().is_empty());
        let spec = FilterSpec { date_from: Some("2 October 2026".into()), ..Default::default() };
        assert_eq!(filter_records(&seed(), &spec).unwrap().len(), 3);
    }

    #[test]
    fn unknown_or_miscased_status_matches_nothing() {
        let mut spec = FilterSpec::default();
        spec.status.insert("active".into());
        assert!(filter_records(&seed(), &spec).unwrap().is_empty());

        spec.status.insert("Paused".into());
        spec.status.insert("Expired".into());
        assert_eq!(ids(&filter_records(&seed(), &spec).unwrap()), vec!["SER-003"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = mixed();
        let spec = FilterSpec {
            search_query: Some("e".into()),
            date_from: Some("2024-06-01".into()),
            ..Default::default()
        };
        let once = filter_records(&records, &spec).unwrap();
        let twice = filter_records(&once, &spec).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn predicates_commute() {
        let records = mixed();
        let status_then_text = {
            let by_status = filter_records(&records, &FilterSpec::statuses([ServiceStatus::Active])).unwrap();
            filter_records(&by_status, &FilterSpec::search("data")).unwrap()
        };
        let text_then_status = {
            let by_text = filter_records(&records, &FilterSpec::search("data")).unwrap();
            filter_records(&by_text, &FilterSpec::statuses([ServiceStatus::Active])).unwrap()
        };
        let combined = filter_records(
            &records,
            &FilterSpec { search_query: Some("data".into()), ..FilterSpec::statuses([ServiceStatus::Active]) },
        )
        .unwrap();
        assert_eq!(status_then_text, text_then_status);
        assert_eq!(combined, status_then_text);
        assert_eq!(ids(&combined), vec!["SER-013"]);
    }

    #[test]
    fn filtering_does_not_reorder() {
        let mut records = mixed();
        records.reverse();
        let out = filter_records(&records, &FilterSpec::search("ser-01")).unwrap();
        assert_eq!(ids(&out), vec!["SER-013", "SER-012", "SER-011", "SER-010"]);
    }
}
