//! Renderers for a filtered record sequence. Both are pure and preserve input order.

pub mod csv;
pub mod html;

use thiserror::Error;

pub use self::csv::{export_csv, render_csv};
pub use self::html::render_html;

/// Column titles shared by both export formats.
pub const COLUMNS: [&str; 9] = [
    "Ser_No",
    "Ref No",
    "Employee",
    "Type",
    "Package Name",
    "Service Number",
    "Vendor",
    "Status",
    "Expires",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("export io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("export produced invalid utf-8")]
    Encoding,
}

pub(crate) fn row(record: &models::ServiceRecord) -> [&str; 9] {
    [
        record.id.as_str(),
        record.ref_no.as_str(),
        record.employee.as_str(),
        record.service_type.as_str(),
        record.package_name.as_str(),
        record.ser_number.as_str(),
        record.vendor.as_str(),
        record.status.as_str(),
        record.expires.as_str(),
    ]
}
