//! Tabular sinks for the label-change report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use triage_core::{TriageError, TriageResult};

/// Destination for report rows. Mirrors the spreadsheet surface the live
/// platform exposes: open a named sheet, append ordered rows to it.
pub trait ReportSink {
    fn insert_sheet(&mut self, name: &str) -> TriageResult<()>;
    fn append_row(&mut self, fields: &[String]) -> TriageResult<()>;
}

/// File-backed CSV sink for development mode. A CSV file has no notion of
/// multiple sheets, so inserting a second sheet is an error.
pub struct CsvReportSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl CsvReportSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: None,
        }
    }

    /// Flush and close the underlying file.
    pub fn finish(&mut self) -> TriageResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            info!(path = %self.path.display(), "Report file closed");
        }
        Ok(())
    }
}

impl ReportSink for CsvReportSink {
    fn insert_sheet(&mut self, name: &str) -> TriageResult<()> {
        if self.writer.is_some() {
            return Err(TriageError::Report(
                "CSV sink supports a single sheet".to_string(),
            ));
        }
        let file = File::create(&self.path)?;
        self.writer = Some(BufWriter::new(file));
        info!(sheet = name, path = %self.path.display(), "Report sheet created");
        Ok(())
    }

    fn append_row(&mut self, fields: &[String]) -> TriageResult<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            TriageError::Report("append_row called before insert_sheet".to_string())
        })?;
        let line: Vec<String> = fields.iter().map(|f| escape_csv(f)).collect();
        writeln!(writer, "{}", line.join(","))?;
        Ok(())
    }
}

/// Quote a field when it contains a delimiter, doubling embedded quotes.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Captures rows in memory for tests.
#[derive(Debug, Default)]
pub struct MemoryReportSink {
    sheet_name: Option<String>,
    rows: Vec<Vec<String>>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl ReportSink for MemoryReportSink {
    fn insert_sheet(&mut self, name: &str) -> TriageResult<()> {
        self.sheet_name = Some(name.to_string());
        Ok(())
    }

    fn append_row(&mut self, fields: &[String]) -> TriageResult<()> {
        if self.sheet_name.is_none() {
            return Err(TriageError::Report(
                "append_row called before insert_sheet".to_string(),
            ));
        }
        self.rows.push(fields.to_vec());
        Ok(())
    }
}
