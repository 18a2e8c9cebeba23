use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named reporting windows understood by the ads platform. Stats snapshots
/// are always relative to one of these; there is no arbitrary start/end pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateRange {
    Today,
    Yesterday,
    Last7Days,
    ThisWeekSunToday,
    LastWeek,
    Last14Days,
    #[default]
    Last30Days,
    LastBusinessWeek,
    LastWeekSunSat,
    ThisMonth,
    LastMonth,
    AllTime,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::Today => "TODAY",
            DateRange::Yesterday => "YESTERDAY",
            DateRange::Last7Days => "LAST_7_DAYS",
            DateRange::ThisWeekSunToday => "THIS_WEEK_SUN_TODAY",
            DateRange::LastWeek => "LAST_WEEK",
            DateRange::Last14Days => "LAST_14_DAYS",
            DateRange::Last30Days => "LAST_30_DAYS",
            DateRange::LastBusinessWeek => "LAST_BUSINESS_WEEK",
            DateRange::LastWeekSunSat => "LAST_WEEK_SUN_SAT",
            DateRange::ThisMonth => "THIS_MONTH",
            DateRange::LastMonth => "LAST_MONTH",
            DateRange::AllTime => "ALL_TIME",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TODAY" => Ok(DateRange::Today),
            "YESTERDAY" => Ok(DateRange::Yesterday),
            "LAST_7_DAYS" => Ok(DateRange::Last7Days),
            "THIS_WEEK_SUN_TODAY" => Ok(DateRange::ThisWeekSunToday),
            "LAST_WEEK" => Ok(DateRange::LastWeek),
            "LAST_14_DAYS" => Ok(DateRange::Last14Days),
            "LAST_30_DAYS" => Ok(DateRange::Last30Days),
            "LAST_BUSINESS_WEEK" => Ok(DateRange::LastBusinessWeek),
            "LAST_WEEK_SUN_SAT" => Ok(DateRange::LastWeekSunSat),
            "THIS_MONTH" => Ok(DateRange::ThisMonth),
            "LAST_MONTH" => Ok(DateRange::LastMonth),
            "ALL_TIME" => Ok(DateRange::AllTime),
            other => Err(format!("unknown date range: {other}")),
        }
    }
}

/// Entity status filter applied when listing ad groups or creatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Enabled,
    Paused,
    Removed,
}

/// Performance snapshot for one creative over one date range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CreativeStats {
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
}

impl CreativeStats {
    /// Build a snapshot; CTR is clicks over impressions, 0.0 for an unserved
    /// creative.
    pub fn new(impressions: u64, clicks: u64) -> Self {
        let ctr = if impressions == 0 {
            0.0
        } else {
            clicks as f64 / impressions as f64
        };
        Self {
            impressions,
            clicks,
            ctr,
        }
    }
}

/// One ad. Immutable value object for the whole run; only the label store
/// mutates anything about it, and that happens account-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creative {
    pub id: Uuid,
    pub campaign_name: String,
    pub ad_group_name: String,
    pub headline: String,
    pub description_1: String,
    pub description_2: String,
    pub stats: CreativeStats,
}

/// A named container of creatives. The source delivers creatives already
/// sorted by impressions descending, CTR descending; the classifier relies on
/// that order and never re-sorts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdGroup {
    pub name: String,
    pub creatives: Vec<Creative>,
}

/// An account-level label. Must exist before it can be applied to a creative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub description: String,
    pub color_hex: String,
}

/// The three mutually exclusive classification outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Winners,
    Losers,
    Unclear,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Winners, Bucket::Losers, Bucket::Unclear];

    pub fn key(&self) -> &'static str {
        match self {
            Bucket::Winners => "winners",
            Bucket::Losers => "losers",
            Bucket::Unclear => "unclear",
        }
    }

    /// Fixed description used when the bucket's label is created.
    pub fn label_description(&self) -> &'static str {
        match self {
            Bucket::Winners => "Tags winning ads picked by the creative triage run",
            Bucket::Losers => "Tags losing ads picked by the creative triage run",
            Bucket::Unclear => {
                "Tags ads in ad groups with no clear winners from the creative triage run"
            }
        }
    }

    /// Fixed label color: green for winners, red for losers, light blue for
    /// unclear.
    pub fn label_color(&self) -> &'static str {
        match self {
            Bucket::Winners => "#079938",
            Bucket::Losers => "#dd1d04",
            Bucket::Unclear => "#e3effc",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Bucket-keyed label names. Replaces ad-hoc string lookups so a typo cannot
/// route a bucket to the wrong label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelNames {
    pub winners: String,
    pub losers: String,
    pub unclear: String,
}

impl LabelNames {
    pub fn for_bucket(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Winners => &self.winners,
            Bucket::Losers => &self.losers,
            Bucket::Unclear => &self.unclear,
        }
    }

    /// The label definition created on the account for a bucket.
    pub fn label_for(&self, bucket: Bucket) -> Label {
        Label {
            name: self.for_bucket(bucket).to_string(),
            description: bucket.label_description().to_string(),
            color_hex: bucket.label_color().to_string(),
        }
    }
}

impl Default for LabelNames {
    fn default() -> Self {
        Self {
            winners: "winner".to_string(),
            losers: "loser".to_string(),
            unclear: "no winner".to_string(),
        }
    }
}

/// Classifier output: three ordered creative lists built by concatenation
/// across processed ad groups. Every creative of a processed group lands in
/// exactly one list; skipped groups contribute to none.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub winners: Vec<Creative>,
    pub losers: Vec<Creative>,
    pub unclear: Vec<Creative>,
}

impl ClassificationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, bucket: Bucket) -> &[Creative] {
        match bucket {
            Bucket::Winners => &self.winners,
            Bucket::Losers => &self.losers,
            Bucket::Unclear => &self.unclear,
        }
    }

    pub fn total(&self) -> usize {
        self.winners.len() + self.losers.len() + self.unclear.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterate every classified creative with its bucket, in bucket order
    /// (winners, losers, unclear).
    pub fn iter_with_bucket(&self) -> impl Iterator<Item = (Bucket, &Creative)> {
        Bucket::ALL
            .into_iter()
            .flat_map(move |b| self.bucket(b).iter().map(move |c| (b, c)))
    }
}
