//! Label-change report — one fixed header row plus one row per classified
//! creative, handed to a pluggable tabular sink.

pub mod report;
pub mod sink;

pub use report::{ReportRow, ReportWriter, REPORT_COLUMNS, REPORT_SHEET_NAME};
pub use sink::{CsvReportSink, MemoryReportSink, ReportSink};
