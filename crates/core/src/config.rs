use serde::Deserialize;

use crate::error::{TriageError, TriageResult};
use crate::types::{DateRange, LabelNames};

/// Root application configuration. Loaded from environment variables with the
/// prefix `CREATIVE_TRIAGE__`; every field has a default matching the
/// original script constants.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Minimum creatives an ad group needs to be analyzed at all.
    #[serde(default = "default_min_ads_per_group")]
    pub min_ads_per_group: usize,
    /// Stats window for ad group and creative queries.
    #[serde(default)]
    pub date_range: DateRange,
    /// Minimum group winners required for a winners/losers split; below this
    /// the whole group is tagged unclear.
    #[serde(default = "default_winners_threshold")]
    pub winners_threshold: usize,
    /// Upper bound on ad groups fetched per run.
    #[serde(default = "default_ad_group_limit")]
    pub ad_group_limit: usize,
    #[serde(default)]
    pub labels: LabelNames,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_enabled")]
    pub enabled: bool,
    /// Target spreadsheet for a live sheet sink.
    #[serde(default = "default_spreadsheet_url")]
    pub spreadsheet_url: String,
    /// Local path used by the CSV sink in development mode.
    #[serde(default = "default_report_output_path")]
    pub output_path: String,
}

// Default functions
fn default_min_ads_per_group() -> usize {
    6
}
fn default_winners_threshold() -> usize {
    3
}
fn default_ad_group_limit() -> usize {
    10
}
fn default_report_enabled() -> bool {
    false
}
fn default_spreadsheet_url() -> String {
    "https://docs.google.com/spreadsheet_url".to_string()
}
fn default_report_output_path() -> String {
    "triage_report.csv".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: default_report_enabled(),
            spreadsheet_url: default_spreadsheet_url(),
            output_path: default_report_output_path(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            min_ads_per_group: default_min_ads_per_group(),
            date_range: DateRange::default(),
            winners_threshold: default_winners_threshold(),
            ad_group_limit: default_ad_group_limit(),
            labels: LabelNames::default(),
            report: ReportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CREATIVE_TRIAGE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Reject threshold values that would make the run meaningless.
    pub fn validate(&self) -> TriageResult<()> {
        if self.min_ads_per_group < 1 {
            return Err(TriageError::Config(
                "min_ads_per_group must be at least 1".to_string(),
            ));
        }
        if self.winners_threshold < 1 {
            return Err(TriageError::Config(
                "winners_threshold must be at least 1".to_string(),
            ));
        }
        if self.ad_group_limit < 1 {
            return Err(TriageError::Config(
                "ad_group_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
