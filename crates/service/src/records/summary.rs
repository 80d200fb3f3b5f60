use std::collections::BTreeSet;

use models::{ServiceRecord, ServiceStatus};
use serde::Serialize;

/// KPI counts shown above the services table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total: usize,
    pub active: usize,
    pub expiring_soon: usize,
    pub expired: usize,
}

impl StatusSummary {
    pub fn from_records(records: &[ServiceRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, rec| {
            acc.total += 1;
            match rec.status {
                ServiceStatus::Active => acc.active += 1,
                ServiceStatus::ExpSoon => acc.expiring_soon += 1,
                ServiceStatus::Expired => acc.expired += 1,
            }
            acc
        })
    }
}

/// Distinct values per categorical field, sorted, for populating filter options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFacets {
    pub employee: Vec<String>,
    #[serde(rename = "type")]
    pub service_type: Vec<String>,
    pub vendor: Vec<String>,
    pub package_name: Vec<String>,
    pub status: Vec<ServiceStatus>,
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values.filter(|v| !v.is_empty()).map(str::to_string).collect::<BTreeSet<_>>().into_iter().collect()
}

impl FilterFacets {
    pub fn from_records(records: &[ServiceRecord]) -> Self {
        Self {
            employee: distinct(records.iter().map(|r| r.employee.as_str())),
            service_type: distinct(records.iter().map(|r| r.service_type.as_str())),
            vendor: distinct(records.iter().map(|r| r.vendor.as_str())),
            package_name: distinct(records.iter().map(|r| r.package_name.as_str())),
            status: ServiceStatus::ALL.to_vec(),
        }
    }
}
