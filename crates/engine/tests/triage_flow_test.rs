//! End-to-end pass against the in-memory platform: labels, fetch, classify,
//! tag.

use triage_core::config::AppConfig;
use triage_core::types::{Creative, CreativeStats, StatusFilter};
use triage_platform::InMemoryAdsPlatform;
use uuid::Uuid;

fn creative(campaign: &str, group: &str, impressions: u64, clicks: u64) -> Creative {
    Creative {
        id: Uuid::new_v4(),
        campaign_name: campaign.to_string(),
        ad_group_name: group.to_string(),
        headline: format!("{campaign} hero"),
        description_1: "Best prices".to_string(),
        description_2: "Order online".to_string(),
        stats: CreativeStats::new(impressions, clicks),
    }
}

fn seeded_platform() -> InMemoryAdsPlatform {
    let platform = InMemoryAdsPlatform::new();

    // Eight creatives: splits 3 winners / 5 losers at the default thresholds.
    platform.insert_ad_group(
        "brand",
        StatusFilter::Enabled,
        (0..8)
            .map(|i| creative("Brand", "brand", 8000 - i * 500, 400 - i * 40))
            .collect(),
    );

    // Five creatives: below the default minimum of six, skipped.
    platform.insert_ad_group(
        "thin",
        StatusFilter::Enabled,
        (0..5)
            .map(|i| creative("Generic", "thin", 900 - i * 100, 30 - i * 5))
            .collect(),
    );

    platform
}

#[test]
fn test_full_pass_buckets_and_tags() {
    let platform = seeded_platform();
    let config = AppConfig::default();

    let result = triage_engine::run(&config, &platform, &platform).unwrap();

    assert_eq!(result.winners.len(), 3);
    assert_eq!(result.losers.len(), 5);
    assert!(result.unclear.is_empty());

    // The skipped group contributed nothing.
    assert_eq!(result.total(), 8);

    // Every classified creative carries exactly its bucket's label.
    for creative in &result.winners {
        assert_eq!(platform.labels_on(creative.id), vec!["winner"]);
    }
    for creative in &result.losers {
        assert_eq!(platform.labels_on(creative.id), vec!["loser"]);
    }
    assert_eq!(platform.apply_calls(), 8);
}

#[test]
fn test_second_run_creates_no_new_labels() {
    let platform = seeded_platform();
    let config = AppConfig::default();

    triage_engine::run(&config, &platform, &platform).unwrap();
    assert_eq!(platform.create_calls(), 3);

    triage_engine::run(&config, &platform, &platform).unwrap();
    assert_eq!(platform.create_calls(), 3);
}

#[test]
fn test_low_winner_group_goes_to_unclear() {
    let platform = InMemoryAdsPlatform::new();
    platform.insert_ad_group(
        "pair",
        StatusFilter::Enabled,
        vec![
            creative("Pair", "pair", 600, 30),
            creative("Pair", "pair", 500, 10),
        ],
    );

    let mut config = AppConfig::default();
    config.min_ads_per_group = 2;

    // Two positions both sit inside the cutoff, yielding 2 winners, below
    // the threshold of 3: the whole group is tagged unclear.
    let result = triage_engine::run(&config, &platform, &platform).unwrap();
    assert!(result.winners.is_empty());
    assert!(result.losers.is_empty());
    assert_eq!(result.unclear.len(), 2);
    for creative in &result.unclear {
        assert_eq!(platform.labels_on(creative.id), vec!["no winner"]);
    }
}

#[test]
fn test_invalid_config_aborts_before_any_side_effect() {
    let platform = seeded_platform();
    let mut config = AppConfig::default();
    config.winners_threshold = 0;

    assert!(triage_engine::run(&config, &platform, &platform).is_err());
    assert_eq!(platform.create_calls(), 0);
    assert_eq!(platform.apply_calls(), 0);
}
