//! Dashboard and offline scoring command handlers.

use std::path::Path;

use anyhow::Context;
use influtrust_core::{
    load_category_dictionary, load_targets, AppConfig, CategoryDictionary, InfluencerRecord,
    Platform, PlatformProfile,
};
use influtrust_metrics::{score_profiles, sort_records, Dashboard, DashboardStats, NoTrendData};
use influtrust_platforms::{build_dashboard, FetchFailure, PlatformClients};
use serde::Deserialize;

/// A score input file holds either one profile or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProfileInput {
    Many(Vec<PlatformProfile>),
    One(Box<PlatformProfile>),
}

impl ProfileInput {
    pub(crate) fn into_profiles(self) -> Vec<PlatformProfile> {
        match self {
            ProfileInput::Many(profiles) => profiles,
            ProfileInput::One(profile) => vec![*profile],
        }
    }
}

fn dictionary_from(path: Option<&Path>) -> anyhow::Result<CategoryDictionary> {
    Ok(match path {
        Some(path) => load_category_dictionary(path)?,
        None => CategoryDictionary::default(),
    })
}

/// Collect every configured platform for the tracked influencers and print
/// the ranked result.
///
/// # Errors
///
/// Returns an error if configuration or targets cannot be loaded, or if
/// every attempted platform fetch failed.
pub(crate) async fn run_dashboard(
    config: &AppConfig,
    platform: Option<Platform>,
    json: bool,
) -> anyhow::Result<()> {
    let targets = load_targets(&config.targets_path)?.influencers;
    let dictionary = dictionary_from(config.categories_path.as_deref())?;
    let clients = PlatformClients::from_config(config)?;
    if clients.configured().is_empty() {
        tracing::warn!("no platform credentials configured; nothing will be fetched");
    }

    let mut report = build_dashboard(
        &clients,
        &targets,
        &dictionary,
        &NoTrendData,
        config.max_concurrent_targets,
    )
    .await?;

    let dashboard = restrict_to_platform(report.dashboard, platform);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    let stats = &dashboard.stats;
    println!(
        "{} influencers, average followers {:.0}, average trust score {}",
        stats.total, stats.average_followers, stats.average_trust_score
    );
    print_records(&dashboard.records);
    print_failures(&report.failures);
    Ok(())
}

/// Keep only `platform`'s records and recompute the headline stats over them.
pub(crate) fn restrict_to_platform(mut dashboard: Dashboard, platform: Option<Platform>) -> Dashboard {
    if let Some(platform) = platform {
        dashboard.records.retain(|record| record.platform == platform);
        dashboard.stats = DashboardStats::from_records(&dashboard.records);
    }
    dashboard
}

/// Score profiles read from `file` and print them ranked.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid profile JSON,
/// or if the category dictionary override fails to load.
pub(crate) fn run_score(file: &Path, categories: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let profiles = parse_profiles(&content)
        .with_context(|| format!("{} is not a profile or list of profiles", file.display()))?;
    let dictionary = dictionary_from(categories)?;

    let mut records = score_profiles(&profiles, &dictionary);
    sort_records(&mut records);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_records(&records);
    }
    Ok(())
}

pub(crate) fn parse_profiles(content: &str) -> serde_json::Result<Vec<PlatformProfile>> {
    serde_json::from_str::<ProfileInput>(content).map(ProfileInput::into_profiles)
}

pub(crate) fn format_record_row(record: &InfluencerRecord) -> String {
    let categories = record
        .categories
        .iter()
        .map(|c| c.category.label())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{:<28}{:<11}{:>12}{:>7}{:>12.1}  {}",
        truncate(&record.name, 26),
        record.platform.as_str(),
        record.followers,
        record.trust_score.value(),
        record.engagement,
        categories
    )
}

fn print_records(records: &[InfluencerRecord]) {
    if records.is_empty() {
        println!("no records");
        return;
    }
    println!(
        "{:<28}{:<11}{:>12}{:>7}{:>12}  CATEGORIES",
        "NAME", "PLATFORM", "FOLLOWERS", "TRUST", "ENGAGEMENT"
    );
    for record in records {
        println!("{}", format_record_row(record));
    }
}

fn print_failures(failures: &[FetchFailure]) {
    for failure in failures {
        println!(
            "skipped {} on {} ({}): {}",
            failure.target, failure.platform, failure.handle, failure.error
        );
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
