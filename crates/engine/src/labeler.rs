//! Account-label management: ensure the three triage labels exist, then tag
//! every classified creative.

use std::collections::HashSet;

use tracing::info;
use triage_core::platform::LabelStore;
use triage_core::types::{Bucket, ClassificationResult, LabelNames};
use triage_core::TriageResult;

/// Applies bucket labels through a [`LabelStore`].
pub struct Labeler<'a, S: LabelStore + ?Sized> {
    store: &'a S,
    names: &'a LabelNames,
}

impl<'a, S: LabelStore + ?Sized> Labeler<'a, S> {
    pub fn new(store: &'a S, names: &'a LabelNames) -> Self {
        Self { store, names }
    }

    /// Create any of the three configured labels missing from the account.
    ///
    /// Labels must exist account-wide before they can be attached to ads.
    /// The account is listed once; creation only happens for absent names, so
    /// back-to-back runs create each label exactly once. Returns the number
    /// of labels created.
    pub fn ensure_labels_exist(&self) -> TriageResult<usize> {
        let existing: HashSet<String> = self
            .store
            .list_labels()?
            .into_iter()
            .map(|label| label.name)
            .collect();

        let mut created = 0;
        for bucket in Bucket::ALL {
            let name = self.names.for_bucket(bucket);
            if !existing.contains(name) {
                info!(label = name, bucket = %bucket, "Creating account label");
                self.store.create_label(&self.names.label_for(bucket))?;
                created += 1;
            }
        }

        Ok(created)
    }

    /// Tag every classified creative with its bucket's label. Returns the
    /// number of applications performed.
    pub fn apply_labels(&self, result: &ClassificationResult) -> TriageResult<usize> {
        let mut applied = 0;

        for bucket in Bucket::ALL {
            let creatives = result.bucket(bucket);
            let name = self.names.for_bucket(bucket);
            info!(bucket = %bucket, count = creatives.len(), label = name, "Applying labels");

            for creative in creatives {
                self.store.apply_label(creative.id, name)?;
                applied += 1;
            }
        }

        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::types::{Creative, CreativeStats};
    use triage_platform::InMemoryAdsPlatform;
    use uuid::Uuid;

    fn creative() -> Creative {
        Creative {
            id: Uuid::new_v4(),
            campaign_name: "Holiday Promo".to_string(),
            ad_group_name: "gifts".to_string(),
            headline: "Gifts Galore".to_string(),
            description_1: "Wrapped free".to_string(),
            description_2: "Ships today".to_string(),
            stats: CreativeStats::new(1000, 40),
        }
    }

    #[test]
    fn test_ensure_labels_creates_each_name_once() {
        let platform = InMemoryAdsPlatform::new();
        let names = LabelNames::default();
        let labeler = Labeler::new(&platform, &names);

        let created = labeler.ensure_labels_exist().unwrap();
        assert_eq!(created, 3);
        assert_eq!(platform.create_calls(), 3);

        // Second pass sees the labels and creates nothing.
        let created = labeler.ensure_labels_exist().unwrap();
        assert_eq!(created, 0);
        assert_eq!(platform.create_calls(), 3);
    }

    #[test]
    fn test_ensure_labels_fills_only_the_gaps() {
        let platform = InMemoryAdsPlatform::new();
        let names = LabelNames::default();
        platform.create_label(&names.label_for(Bucket::Winners)).unwrap();

        let labeler = Labeler::new(&platform, &names);
        let created = labeler.ensure_labels_exist().unwrap();
        assert_eq!(created, 2);

        let mut label_names: Vec<String> = platform
            .list_labels()
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        label_names.sort();
        assert_eq!(label_names, vec!["loser", "no winner", "winner"]);
    }

    #[test]
    fn test_apply_labels_tags_every_bucket() {
        let platform = InMemoryAdsPlatform::new();
        let names = LabelNames::default();
        let labeler = Labeler::new(&platform, &names);
        labeler.ensure_labels_exist().unwrap();

        let winner = creative();
        let loser = creative();
        let unclear = creative();
        let result = ClassificationResult {
            winners: vec![winner.clone()],
            losers: vec![loser.clone()],
            unclear: vec![unclear.clone()],
        };

        let applied = labeler.apply_labels(&result).unwrap();
        assert_eq!(applied, 3);
        assert_eq!(platform.labels_on(winner.id), vec!["winner"]);
        assert_eq!(platform.labels_on(loser.id), vec!["loser"]);
        assert_eq!(platform.labels_on(unclear.id), vec!["no winner"]);
    }

    #[test]
    fn test_apply_unknown_label_fails_fast() {
        let platform = InMemoryAdsPlatform::new();
        let names = LabelNames::default();
        let labeler = Labeler::new(&platform, &names);

        // Labels never created: the first application must error.
        let result = ClassificationResult {
            winners: vec![creative()],
            losers: vec![],
            unclear: vec![],
        };
        assert!(labeler.apply_labels(&result).is_err());
    }
}
