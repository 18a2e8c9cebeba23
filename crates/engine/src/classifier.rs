//! Winner/loser/unclear classification over pre-sorted ad groups.

use tracing::info;
use triage_core::types::{AdGroup, ClassificationResult};

/// Hard cap on winners per ad group, regardless of group size.
pub const MAX_GROUP_WINNERS: usize = 3;

/// Partitions each ad group's creatives by impression rank.
///
/// Creatives arrive sorted impressions descending then CTR descending, so
/// "first few positions" doubles as "highest CTR among the most-served ads".
/// The classifier never re-sorts.
#[derive(Debug, Clone)]
pub struct Classifier {
    min_ads_per_group: usize,
    winners_threshold: usize,
}

impl Classifier {
    pub fn new(min_ads_per_group: usize, winners_threshold: usize) -> Self {
        Self {
            min_ads_per_group,
            winners_threshold,
        }
    }

    /// Classify all groups into one accumulated result.
    ///
    /// Per group: fewer than `min_ads_per_group` creatives skips the group
    /// entirely. Otherwise every creative at a position within the top half
    /// by impressions (position <= ceil(count / 2)) becomes a group winner
    /// until the cap of [`MAX_GROUP_WINNERS`] is hit; the rest are group
    /// losers. Groups producing fewer than `winners_threshold` winners are
    /// reclassified wholesale as unclear.
    pub fn classify(&self, ad_groups: &[AdGroup]) -> ClassificationResult {
        let mut result = ClassificationResult::new();

        for group in ad_groups {
            let count = group.creatives.len();
            info!(ad_group = %group.name, ads = count, "Checking ad group");

            if count < self.min_ads_per_group {
                info!(
                    ad_group = %group.name,
                    minimum = self.min_ads_per_group,
                    "Too few ads, skipping group"
                );
                continue;
            }

            let cutoff = impressions_cutoff(count);
            let mut group_winners = Vec::new();
            let mut group_losers = Vec::new();

            for (position, creative) in group.creatives.iter().enumerate() {
                if position <= cutoff && group_winners.len() < MAX_GROUP_WINNERS {
                    group_winners.push(creative.clone());
                } else {
                    group_losers.push(creative.clone());
                }
            }

            info!(
                ad_group = %group.name,
                winners = group_winners.len(),
                losers = group_losers.len(),
                "Group partitioned"
            );

            if group_winners.len() >= self.winners_threshold {
                result.winners.append(&mut group_winners);
                result.losers.append(&mut group_losers);
            } else {
                // No partial credit: the whole group is unclear.
                result.unclear.append(&mut group_winners);
                result.unclear.append(&mut group_losers);
            }
        }

        result
    }
}

/// Zero-based index of the last position still inside the top half by
/// impressions: ceil(count / 2).
fn impressions_cutoff(count: usize) -> usize {
    (count + 1) / 2
}
