//! DashMap-backed ads-platform fake with seeded demo data.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use triage_core::platform::{AdGroupSource, LabelStore};
use triage_core::types::{AdGroup, Creative, CreativeStats, DateRange, Label, StatusFilter};
use triage_core::{TriageError, TriageResult};

struct StoredCreative {
    creative: Creative,
    status: StatusFilter,
}

struct StoredAdGroup {
    status: StatusFilter,
    creatives: Vec<StoredCreative>,
}

/// Thread-safe in-memory ads platform: ad groups, account labels, and the
/// labels applied to each creative.
///
/// Holds a single stats snapshot per creative, so the date-range argument
/// selects nothing here; callers seed the snapshot they want the "window" to
/// contain. Creation and application calls are counted so tests can assert
/// idempotency at the gateway boundary.
pub struct InMemoryAdsPlatform {
    ad_groups: DashMap<String, StoredAdGroup>,
    labels: DashMap<String, Label>,
    applied: DashMap<Uuid, Vec<String>>,
    create_calls: AtomicUsize,
    apply_calls: AtomicUsize,
}

impl InMemoryAdsPlatform {
    pub fn new() -> Self {
        info!("Ads platform initialized (in-memory, development mode)");
        Self {
            ad_groups: DashMap::new(),
            labels: DashMap::new(),
            applied: DashMap::new(),
            create_calls: AtomicUsize::new(0),
            apply_calls: AtomicUsize::new(0),
        }
    }

    /// An account pre-populated with a handful of ad groups.
    pub fn with_demo_data() -> Self {
        let platform = Self::new();
        platform.seed_demo_data();
        platform
    }

    /// Register an ad group whose creatives are all enabled.
    pub fn insert_ad_group(&self, name: &str, status: StatusFilter, creatives: Vec<Creative>) {
        let creatives = creatives
            .into_iter()
            .map(|creative| StoredCreative {
                creative,
                status: StatusFilter::Enabled,
            })
            .collect();
        self.ad_groups
            .insert(name.to_string(), StoredAdGroup { status, creatives });
    }

    /// Flip one creative's status, e.g. to pause it out of future listings.
    pub fn set_creative_status(&self, group_name: &str, creative_id: Uuid, status: StatusFilter) {
        if let Some(mut group) = self.ad_groups.get_mut(group_name) {
            for stored in group.creatives.iter_mut() {
                if stored.creative.id == creative_id {
                    stored.status = status;
                }
            }
        }
    }

    /// Number of `create_label` calls accepted so far.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::Relaxed)
    }

    /// Number of `apply_label` calls accepted so far.
    pub fn apply_calls(&self) -> usize {
        self.apply_calls.load(Ordering::Relaxed)
    }

    /// Labels currently attached to a creative.
    pub fn labels_on(&self, creative_id: Uuid) -> Vec<String> {
        self.applied
            .get(&creative_id)
            .map(|names| names.clone())
            .unwrap_or_default()
    }

    fn seed_demo_data(&self) {
        let seed = |name: &str, campaign: &str, stats: &[(u64, u64)]| {
            let creatives = stats
                .iter()
                .enumerate()
                .map(|(i, (impressions, clicks))| Creative {
                    id: Uuid::new_v4(),
                    campaign_name: campaign.to_string(),
                    ad_group_name: name.to_string(),
                    headline: format!("{campaign} #{n}", n = i + 1),
                    description_1: "Shop the range".to_string(),
                    description_2: "Free delivery".to_string(),
                    stats: CreativeStats::new(*impressions, *clicks),
                })
                .collect();
            self.insert_ad_group(name, StatusFilter::Enabled, creatives);
        };

        seed(
            "brand-exact",
            "Search - Brand",
            &[
                (15400, 910),
                (13900, 720),
                (11200, 560),
                (9800, 340),
                (7600, 190),
                (5100, 110),
                (2400, 40),
                (900, 12),
            ],
        );
        seed(
            "generic-broad",
            "Search - Generic",
            &[
                (8800, 260),
                (8100, 240),
                (7400, 180),
                (5300, 95),
                (3100, 40),
                (1600, 15),
            ],
        );
        // Below the default minimum of 6: skipped by the classifier.
        seed(
            "retargeting-30d",
            "Display - Retargeting",
            &[(4200, 60), (3900, 55), (2100, 20), (800, 6)],
        );

        info!(
            ad_groups = self.ad_groups.len(),
            "Seeded demo ad groups"
        );
    }
}

impl Default for InMemoryAdsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl AdGroupSource for InMemoryAdsPlatform {
    fn list_ad_groups(
        &self,
        status: StatusFilter,
        _date_range: DateRange,
        limit: usize,
    ) -> TriageResult<Vec<AdGroup>> {
        let mut groups: Vec<AdGroup> = self
            .ad_groups
            .iter()
            .filter(|entry| entry.value().status == status)
            .map(|entry| {
                let mut creatives: Vec<Creative> = entry
                    .value()
                    .creatives
                    .iter()
                    .filter(|stored| stored.status == status)
                    .map(|stored| stored.creative.clone())
                    .collect();
                // The two-key sort the live platform performs server-side.
                creatives.sort_by(|a, b| {
                    b.stats
                        .impressions
                        .cmp(&a.stats.impressions)
                        .then_with(|| b.stats.ctr.total_cmp(&a.stats.ctr))
                });
                AdGroup {
                    name: entry.key().clone(),
                    creatives,
                }
            })
            .collect();

        groups.sort_by(|a, b| a.name.cmp(&b.name));
        groups.truncate(limit);
        Ok(groups)
    }
}

impl LabelStore for InMemoryAdsPlatform {
    fn list_labels(&self) -> TriageResult<Vec<Label>> {
        let mut labels: Vec<Label> = self.labels.iter().map(|l| l.value().clone()).collect();
        labels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(labels)
    }

    fn create_label(&self, label: &Label) -> TriageResult<()> {
        if self.labels.contains_key(&label.name) {
            return Err(TriageError::Label(format!(
                "label already exists: {}",
                label.name
            )));
        }
        self.labels.insert(label.name.clone(), label.clone());
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn apply_label(&self, creative_id: Uuid, label_name: &str) -> TriageResult<()> {
        if !self.labels.contains_key(label_name) {
            return Err(TriageError::Label(format!(
                "unknown label: {label_name}"
            )));
        }
        let mut names = self.applied.entry(creative_id).or_default();
        // Reapplication is a platform no-op.
        if !names.iter().any(|n| n == label_name) {
            names.push(label_name.to_string());
        }
        self.apply_calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creative(group: &str, impressions: u64, clicks: u64) -> Creative {
        Creative {
            id: Uuid::new_v4(),
            campaign_name: "Flash Sale".to_string(),
            ad_group_name: group.to_string(),
            headline: "Limited Offer".to_string(),
            description_1: "Ends soon".to_string(),
            description_2: "Shop now".to_string(),
            stats: CreativeStats::new(impressions, clicks),
        }
    }

    #[test]
    fn test_listing_sorts_by_impressions_then_ctr() {
        let platform = InMemoryAdsPlatform::new();
        platform.insert_ad_group(
            "g",
            StatusFilter::Enabled,
            vec![
                creative("g", 500, 5),
                // Same impressions, higher CTR: must come first of the two.
                creative("g", 800, 80),
                creative("g", 800, 20),
            ],
        );

        let groups = platform
            .list_ad_groups(StatusFilter::Enabled, DateRange::Last30Days, 10)
            .unwrap();
        let stats: Vec<(u64, u64)> = groups[0]
            .creatives
            .iter()
            .map(|c| (c.stats.impressions, c.stats.clicks))
            .collect();
        assert_eq!(stats, vec![(800, 80), (800, 20), (500, 5)]);
    }

    #[test]
    fn test_listing_honors_status_and_limit() {
        let platform = InMemoryAdsPlatform::new();
        platform.insert_ad_group("a", StatusFilter::Enabled, vec![creative("a", 100, 1)]);
        platform.insert_ad_group("b", StatusFilter::Paused, vec![creative("b", 100, 1)]);
        platform.insert_ad_group("c", StatusFilter::Enabled, vec![creative("c", 100, 1)]);
        platform.insert_ad_group("d", StatusFilter::Enabled, vec![creative("d", 100, 1)]);

        let groups = platform
            .list_ad_groups(StatusFilter::Enabled, DateRange::Last30Days, 2)
            .unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.name != "b"));
    }

    #[test]
    fn test_paused_creative_is_filtered_out() {
        let platform = InMemoryAdsPlatform::new();
        let paused = creative("g", 900, 9);
        let paused_id = paused.id;
        platform.insert_ad_group(
            "g",
            StatusFilter::Enabled,
            vec![creative("g", 700, 7), paused],
        );
        platform.set_creative_status("g", paused_id, StatusFilter::Paused);

        let groups = platform
            .list_ad_groups(StatusFilter::Enabled, DateRange::Last30Days, 10)
            .unwrap();
        assert_eq!(groups[0].creatives.len(), 1);
        assert_eq!(groups[0].creatives[0].stats.impressions, 700);
    }

    #[test]
    fn test_duplicate_label_creation_errors() {
        let platform = InMemoryAdsPlatform::new();
        let label = Label {
            name: "winner".to_string(),
            description: "desc".to_string(),
            color_hex: "#079938".to_string(),
        };
        platform.create_label(&label).unwrap();
        assert!(platform.create_label(&label).is_err());
        assert_eq!(platform.create_calls(), 1);
    }

    #[test]
    fn test_label_reapplication_is_a_no_op() {
        let platform = InMemoryAdsPlatform::new();
        let label = Label {
            name: "winner".to_string(),
            description: "desc".to_string(),
            color_hex: "#079938".to_string(),
        };
        platform.create_label(&label).unwrap();

        let id = Uuid::new_v4();
        platform.apply_label(id, "winner").unwrap();
        platform.apply_label(id, "winner").unwrap();
        assert_eq!(platform.labels_on(id), vec!["winner"]);
        assert_eq!(platform.apply_calls(), 2);
    }

    #[test]
    fn test_demo_data_has_one_group_below_minimum() {
        let platform = InMemoryAdsPlatform::with_demo_data();
        let groups = platform
            .list_ad_groups(StatusFilter::Enabled, DateRange::Last30Days, 10)
            .unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(
            groups.iter().filter(|g| g.creatives.len() < 6).count(),
            1
        );
    }
}
