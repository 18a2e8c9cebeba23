//! Single-pass run orchestration: labels, fetch, classify, tag.

use tracing::info;
use triage_core::config::AppConfig;
use triage_core::platform::{AdGroupSource, LabelStore};
use triage_core::types::{ClassificationResult, StatusFilter};
use triage_core::TriageResult;

use crate::classifier::Classifier;
use crate::labeler::Labeler;

/// Execute one triage pass: ensure the labels exist, fetch enabled ad groups
/// for the configured window, classify them, and tag every creative.
///
/// Fail-fast by design: the first gateway error aborts the run with no
/// retries and no partial-completion checkpoint. Returns the classification
/// so the caller can build an optional report.
pub fn run(
    config: &AppConfig,
    source: &dyn AdGroupSource,
    labels: &dyn LabelStore,
) -> TriageResult<ClassificationResult> {
    info!("Creative triage run starting");
    config.validate()?;

    info!("Checking labels");
    let labeler = Labeler::new(labels, &config.labels);
    labeler.ensure_labels_exist()?;

    info!(
        date_range = %config.date_range,
        limit = config.ad_group_limit,
        "Fetching enabled ad groups"
    );
    let ad_groups = source.list_ad_groups(
        StatusFilter::Enabled,
        config.date_range,
        config.ad_group_limit,
    )?;
    info!(ad_groups = ad_groups.len(), "Filtering ad groups");

    let classifier = Classifier::new(config.min_ads_per_group, config.winners_threshold);
    let result = classifier.classify(&ad_groups);

    let applied = labeler.apply_labels(&result)?;

    info!(
        winners = result.winners.len(),
        losers = result.losers.len(),
        unclear = result.unclear.len(),
        labels_applied = applied,
        "Creative triage run complete"
    );

    Ok(result)
}
