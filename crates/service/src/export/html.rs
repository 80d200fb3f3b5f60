use chrono::NaiveDate;
use html_escape::encode_text;
use models::{ServiceRecord, ServiceStatus};

use super::{row, COLUMNS};

const STATUS_COLUMN: usize = 7;

fn status_color(status: ServiceStatus) -> &'static str {
    match status {
        ServiceStatus::Active => "#16a34a",
        ServiceStatus::ExpSoon => "#ca8a04",
        ServiceStatus::Expired => "#dc2626",
    }
}

/// Standalone "Services Report" document with one table row per record.
pub fn render_html(records: &[ServiceRecord], generated_on: NaiveDate) -> String {
    let mut out = String::with_capacity(1024 + records.len() * 512);
    out.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Services Report</title>\n\
         <style>\n\
         body { font-family: sans-serif; margin: 24px; }\n\
         table { border-collapse: collapse; width: 100%; }\n\
         th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }\n\
         th { background-color: #f3f4f6; }\n\
         </style>\n</head>\n<body>\n<h1>Services Report</h1>\n",
    );
    out.push_str(&format!("<p>Generated on {}</p>\n", generated_on.format("%Y-%m-%d")));

    out.push_str("<table>\n<thead>\n<tr>");
    for title in COLUMNS {
        out.push_str(&format!("<th>{}</th>", encode_text(title)));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in records {
        out.push_str("<tr>");
        for (i, cell) in row(record).iter().enumerate() {
            if i == STATUS_COLUMN {
                out.push_str(&format!(
                    "<td style=\"color: {}; font-weight: 600;\">{}</td>",
                    status_color(record.status),
                    encode_text(cell)
                ));
            } else {
                out.push_str(&format!("<td>{}</td>", encode_text(cell)));
            }
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    out
}
