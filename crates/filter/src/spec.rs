use std::collections::BTreeSet;

use models::ServiceStatus;
use serde::{Deserialize, Serialize};

/// Declarative filter over service records. All populated predicates are AND-combined;
/// values inside one categorical set are OR-combined.
///
/// Wire form uses camelCase keys; absent keys, empty arrays and empty strings all mean
/// "no restriction".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Accepted employees (exact match).
    pub employee: BTreeSet<String>,
    /// Accepted service types (exact match).
    #[serde(rename = "type")]
    pub service_type: BTreeSet<String>,
    /// Accepted vendors (exact match).
    pub vendor: BTreeSet<String>,
    /// Accepted status names (exact, case-sensitive match against `Active`, `Exp_soon`, `Expired`).
    pub status: BTreeSet<String>,
    /// Accepted package names (exact match).
    pub package_name: BTreeSet<String>,
    /// Case-insensitive substring of the service number.
    pub ser_number: Option<String>,
    /// Case-insensitive substring of the reference number.
    pub ref_no: Option<String>,
    /// Inclusive lower bound on `expires`.
    pub date_from: Option<String>,
    /// Inclusive upper bound on `expires`.
    pub date_to: Option<String>,
    /// Free text matched against id, employee, package, vendor, service and reference numbers.
    pub search_query: Option<String>,
}

/// `Some` only for a present, non-empty string.
pub(crate) fn populated(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl FilterSpec {
    /// Spec with only a free-text query.
    pub fn search(query: impl Into<String>) -> Self {
        Self { search_query: Some(query.into()), ..Default::default() }
    }

    /// Spec restricted to the given statuses.
    pub fn statuses(statuses: impl IntoIterator<Item = ServiceStatus>) -> Self {
        Self { status: statuses.into_iter().map(|s| s.as_str().to_string()).collect(), ..Default::default() }
    }

    /// Returns true if no predicate is populated.
    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0 && populated(&self.search_query).is_none()
    }

    pub fn has_date_range(&self) -> bool {
        populated(&self.date_from).is_some() || populated(&self.date_to).is_some()
    }

    /// Number of populated filter-panel predicates, for the "Filters (n)" badge.
    /// The free-text query is not counted; each date bound counts on its own.
    pub fn active_filter_count(&self) -> usize {
        let sets = [
            self.employee.is_empty(),
            self.service_type.is_empty(),
            self.vendor.is_empty(),
            self.status.is_empty(),
            self.package_name.is_empty(),
        ];
        let texts = [&self.ser_number, &self.ref_no, &self.date_from, &self.date_to];
        sets.iter().filter(|empty| !**empty).count()
            + texts.iter().filter(|v| populated(v).is_some()).count()
    }
}
