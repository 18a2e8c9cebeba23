//! Gateway traits for the external ads platform.
//!
//! The live platform is reached over its scripting API; development and tests
//! use the in-memory implementation in `triage-platform`. All calls are
//! blocking and fail-fast: any error aborts the run.

use uuid::Uuid;

use crate::error::TriageResult;
use crate::types::{AdGroup, DateRange, Label, StatusFilter};

/// Read side of the ads platform: ad groups and their creatives.
pub trait AdGroupSource {
    /// List ad groups matching `status` within `date_range`, up to `limit`.
    /// Each group's creatives are filtered to the same status and date range
    /// and sorted by impressions descending, CTR descending. Iteration order
    /// of the groups themselves is platform-determined.
    fn list_ad_groups(
        &self,
        status: StatusFilter,
        date_range: DateRange,
        limit: usize,
    ) -> TriageResult<Vec<AdGroup>>;
}

/// Account-level label CRUD plus label application to creatives.
pub trait LabelStore {
    /// All labels currently defined on the account.
    fn list_labels(&self) -> TriageResult<Vec<Label>>;

    /// Create a label. Not idempotent on the platform side; callers check
    /// existence first via `list_labels`.
    fn create_label(&self, label: &Label) -> TriageResult<()>;

    /// Attach an existing label to a creative. Reapplying an already-present
    /// label is a platform no-op.
    fn apply_label(&self, creative_id: Uuid, label_name: &str) -> TriageResult<()>;
}
