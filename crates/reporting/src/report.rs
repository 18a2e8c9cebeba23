//! Row schema and report assembly.

use tracing::info;
use triage_core::types::{ClassificationResult, Creative, LabelNames};
use triage_core::TriageResult;

use crate::sink::ReportSink;

/// The single 10-column schema. Every data row is built by the same
/// constructor, so rows can never drift from this header.
pub const REPORT_COLUMNS: [&str; 10] = [
    "Campaign",
    "Ad Group",
    "Id",
    "Headline",
    "Description 1",
    "Description 2",
    "CTR",
    "Impressions",
    "Clicks",
    "Change Made",
];

pub const REPORT_SHEET_NAME: &str = "Winners and Losers Label Report";

/// One report line for one creative.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub campaign: String,
    pub ad_group: String,
    pub creative_id: String,
    pub headline: String,
    pub description_1: String,
    pub description_2: String,
    pub ctr: String,
    pub impressions: String,
    pub clicks: String,
    pub change: String,
}

impl ReportRow {
    /// Build a row from a classified creative and the label it received.
    /// The creative's stats snapshot was captured at fetch time, so no date
    /// range is needed here.
    pub fn from_creative(creative: &Creative, label_name: &str) -> Self {
        Self {
            campaign: creative.campaign_name.clone(),
            ad_group: creative.ad_group_name.clone(),
            creative_id: creative.id.to_string(),
            headline: creative.headline.clone(),
            description_1: creative.description_1.clone(),
            description_2: creative.description_2.clone(),
            ctr: format!("{:.4}", creative.stats.ctr),
            impressions: creative.stats.impressions.to_string(),
            clicks: creative.stats.clicks.to_string(),
            change: format!("Label Added - {label_name}"),
        }
    }

    pub fn into_fields(self) -> Vec<String> {
        vec![
            self.campaign,
            self.ad_group,
            self.creative_id,
            self.headline,
            self.description_1,
            self.description_2,
            self.ctr,
            self.impressions,
            self.clicks,
            self.change,
        ]
    }
}

/// Streams a classification result into a [`ReportSink`].
pub struct ReportWriter<'a, S: ReportSink + ?Sized> {
    sink: &'a mut S,
}

impl<'a, S: ReportSink + ?Sized> ReportWriter<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self { sink }
    }

    /// Insert the report sheet, append the header, then one row per creative
    /// in bucket order (winners, losers, unclear). Returns the number of
    /// data rows written.
    pub fn write(
        &mut self,
        result: &ClassificationResult,
        labels: &LabelNames,
    ) -> TriageResult<usize> {
        self.sink.insert_sheet(REPORT_SHEET_NAME)?;
        self.sink
            .append_row(&REPORT_COLUMNS.map(String::from))?;

        let mut rows = 0;
        for (bucket, creative) in result.iter_with_bucket() {
            let row = ReportRow::from_creative(creative, labels.for_bucket(bucket));
            self.sink.append_row(&row.into_fields())?;
            rows += 1;
        }

        info!(rows, sheet = REPORT_SHEET_NAME, "Report written");
        Ok(rows)
    }
}
