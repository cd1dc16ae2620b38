//! Pure aggregation logic behind the feedback dashboard.
//!
//! Every function here is a deterministic, side-effect-free transformation
//! of an in-memory record collection: cascading filter options, the filter
//! predicate, revision-round counts per brand, topic distribution, per-day
//! volume timeline, and the per-project friction table. Grouping uses
//! ordered maps so identical inputs always serialize identically.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Sentinels
// ---------------------------------------------------------------------------

/// Brand/version filter value meaning "no filter". Kept in Portuguese for
/// parity with the dashboard frontend and the ingestion pipeline.
pub const ALL_BRANDS: &str = "Todas";
/// Format filter value meaning "no filter".
pub const ALL_FORMATS: &str = "Todos";
/// Bucket for records whose topic list is empty or unparseable.
pub const OTHER_TOPIC: &str = "Other";

/// Regex pattern matching everything that is not an ASCII digit.
pub const NON_DIGIT_PATTERN: &str = r"\D";

/// Compiled non-digit matcher for version suffix extraction.
static NON_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NON_DIGIT_PATTERN).expect("valid regex"));

/// True when a filter selection means "match everything".
fn is_all(selection: &str) -> bool {
    selection.is_empty() || selection == ALL_BRANDS || selection == ALL_FORMATS
}

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// The slice of a feedback row the reporting layer cares about.
///
/// `created_at` stays a raw ISO-8601 string: upstream rows occasionally
/// carry malformed timestamps, and the timeline must skip those instead of
/// failing the whole computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRecord {
    pub brand: String,
    pub theme: String,
    pub format: String,
    pub version: String,
    pub topics_json: String,
    pub created_at: String,
}

/// Current filter selections, as the dashboard holds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilter {
    pub brand: String,
    pub version: String,
    pub format: String,
    /// Case-insensitive substring match against the theme. Empty matches all.
    pub search: String,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self {
            brand: ALL_BRANDS.to_string(),
            version: ALL_BRANDS.to_string(),
            format: ALL_FORMATS.to_string(),
            search: String::new(),
        }
    }
}

impl ReportFilter {
    /// The filter predicate: all four dimensions must pass.
    pub fn matches(&self, record: &ReportRecord) -> bool {
        (is_all(&self.brand) || record.brand == self.brand)
            && (is_all(&self.version) || record.version == self.version)
            && (is_all(&self.format) || record.format == self.format)
            && record
                .theme
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }
}

/// Return the subset of `records` passing `filter`, in input order.
pub fn apply_filter(records: &[ReportRecord], filter: &ReportFilter) -> Vec<ReportRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Version labels
// ---------------------------------------------------------------------------

/// Extract the numeric suffix of a version label (`"V3"` -> 3).
///
/// Strips every non-digit character and parses the remainder; an empty or
/// non-numeric remainder yields 0.
pub fn version_suffix(label: &str) -> u32 {
    NON_DIGIT_RE.replace_all(label, "").parse().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Cascading option lists
// ---------------------------------------------------------------------------

/// Brand filter options: the sentinel followed by distinct brands in
/// first-seen order.
pub fn brand_options(records: &[ReportRecord]) -> Vec<String> {
    let mut options = vec![ALL_BRANDS.to_string()];
    for record in records {
        if !options.contains(&record.brand) {
            options.push(record.brand.clone());
        }
    }
    options
}

/// Version filter options for the selected brand: the sentinel followed by
/// the lexicographically sorted distinct versions of the brand-filtered
/// subset. The sentinel brand yields the whole universe, so the result for
/// any specific brand is always a subset of the sentinel's.
pub fn version_options(records: &[ReportRecord], selected_brand: &str) -> Vec<String> {
    let versions: BTreeSet<&str> = records
        .iter()
        .filter(|r| is_all(selected_brand) || r.brand == selected_brand)
        .map(|r| r.version.as_str())
        .collect();

    let mut options = vec![ALL_BRANDS.to_string()];
    options.extend(versions.into_iter().map(str::to_string));
    options
}

// ---------------------------------------------------------------------------
// Revision rounds per brand
// ---------------------------------------------------------------------------

/// How many revision rounds a brand's most-revised project went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandRounds {
    pub brand: String,
    pub rounds: u32,
}

/// Per brand, `max(version suffix) + 1` (V0 counts as one round), so the
/// result is always >= 1 for any brand with at least one record. Sorted by
/// rounds descending, then brand ascending.
///
/// This is the brand's *most-revised* project, not a per-project mean, so
/// cross-brand comparison is approximate when brands run many projects.
pub fn rounds_by_brand(records: &[ReportRecord]) -> Vec<BrandRounds> {
    let mut max_suffix: BTreeMap<&str, u32> = BTreeMap::new();
    for record in records {
        let suffix = version_suffix(&record.version);
        let entry = max_suffix.entry(record.brand.as_str()).or_insert(0);
        *entry = (*entry).max(suffix);
    }

    let mut rounds: Vec<BrandRounds> = max_suffix
        .into_iter()
        .map(|(brand, max)| BrandRounds {
            brand: brand.to_string(),
            rounds: max + 1,
        })
        .collect();
    rounds.sort_by(|a, b| b.rounds.cmp(&a.rounds).then_with(|| a.brand.cmp(&b.brand)));
    rounds
}

// ---------------------------------------------------------------------------
// Topic distribution
// ---------------------------------------------------------------------------

/// Occurrence count for one AI-assigned topic over the filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicCount {
    pub topic: String,
    pub count: u32,
}

/// Parse a record's topic-list field into the buckets it counts toward.
///
/// A valid JSON array of strings yields one bucket per topic. An empty
/// field, empty array, non-array JSON, or parse failure yields the single
/// synthetic [`OTHER_TOPIC`] bucket, so every record lands somewhere.
pub fn record_topics(topics_json: &str) -> Vec<String> {
    let other = || vec![OTHER_TOPIC.to_string()];

    if topics_json.trim().is_empty() {
        return other();
    }
    match serde_json::from_str::<serde_json::Value>(topics_json) {
        Ok(serde_json::Value::Array(items)) => {
            let topics: Vec<String> = items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            if topics.is_empty() {
                other()
            } else {
                topics
            }
        }
        _ => other(),
    }
}

/// Count per distinct topic over `records`, sorted by count descending then
/// topic ascending.
pub fn topic_distribution(records: &[ReportRecord]) -> Vec<TopicCount> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for record in records {
        for topic in record_topics(&record.topics_json) {
            *counts.entry(topic).or_insert(0) += 1;
        }
    }

    let mut distribution: Vec<TopicCount> = counts
        .into_iter()
        .map(|(topic, count)| TopicCount { topic, count })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.topic.cmp(&b.topic)));
    distribution
}

// ---------------------------------------------------------------------------
// Volume timeline
// ---------------------------------------------------------------------------

/// Feedback volume for one calendar day, keyed `DD/MM` for charting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayVolume {
    pub day: String,
    pub count: u32,
}

/// Parse the calendar day out of a stored timestamp.
///
/// Accepts full RFC 3339 first, then a bare `YYYY-MM-DD` prefix. `None`
/// means the timestamp is malformed and the record is excluded from the
/// timeline.
fn record_date(created_at: &str) -> Option<NaiveDate> {
    if let Ok(dt) = created_at.parse::<chrono::DateTime<chrono::Utc>>() {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(created_at.get(..10)?, "%Y-%m-%d").ok()
}

/// Count filtered records per calendar day, chronologically ascending.
/// Records with malformed timestamps are silently skipped.
pub fn volume_timeline(records: &[ReportRecord]) -> Vec<DayVolume> {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for record in records {
        if let Some(date) = record_date(&record.created_at) {
            *counts.entry(date).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|(date, count)| DayVolume {
            day: date.format("%d/%m").to_string(),
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Per-project table
// ---------------------------------------------------------------------------

/// One (brand, theme) group: total feedback count and max version suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub brand: String,
    pub theme: String,
    /// Total feedback records for the project.
    pub alterations: u32,
    /// Highest version suffix observed for the project.
    pub versions: u32,
}

/// Group records by (brand, theme) and surface the highest-friction
/// projects first: sorted by versions descending, then alterations
/// descending, then brand/theme ascending.
pub fn project_table(records: &[ReportRecord]) -> Vec<ProjectSummary> {
    let mut groups: BTreeMap<(&str, &str), (u32, u32)> = BTreeMap::new();
    for record in records {
        let entry = groups
            .entry((record.brand.as_str(), record.theme.as_str()))
            .or_insert((0, 0));
        entry.0 += 1;
        entry.1 = entry.1.max(version_suffix(&record.version));
    }

    let mut projects: Vec<ProjectSummary> = groups
        .into_iter()
        .map(|((brand, theme), (alterations, versions))| ProjectSummary {
            brand: brand.to_string(),
            theme: theme.to_string(),
            alterations,
            versions,
        })
        .collect();
    projects.sort_by(|a, b| {
        b.versions
            .cmp(&a.versions)
            .then_with(|| b.alterations.cmp(&a.alterations))
            .then_with(|| a.brand.cmp(&b.brand))
            .then_with(|| a.theme.cmp(&b.theme))
    });
    projects
}

// ---------------------------------------------------------------------------
// KPI summary & report assembly
// ---------------------------------------------------------------------------

/// The dashboard's header cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportKpis {
    /// Filtered feedback volume.
    pub feedback_count: u32,
    /// Distinct projects (themes) in the filtered set.
    pub project_count: u32,
    /// Mean rounds per brand over the whole collection, one decimal.
    pub mean_rounds: f64,
}

/// The full derived report served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackReport {
    pub kpis: ReportKpis,
    pub brand_options: Vec<String>,
    pub version_options: Vec<String>,
    pub rounds_by_brand: Vec<BrandRounds>,
    pub topic_distribution: Vec<TopicCount>,
    pub volume_timeline: Vec<DayVolume>,
    pub projects: Vec<ProjectSummary>,
}

/// Mean of the per-brand round counts, rounded to one decimal. 0.0 when
/// there are no brands.
fn mean_rounds(rounds: &[BrandRounds]) -> f64 {
    if rounds.is_empty() {
        return 0.0;
    }
    let total: u32 = rounds.iter().map(|r| r.rounds).sum();
    let mean = f64::from(total) / rounds.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Derive the complete report from the record collection and the current
/// filter state.
///
/// Option lists and per-brand rounds are computed over the *whole*
/// collection (the filter dropdowns and the effort chart never shrink to
/// the current selection); everything else is computed over the filtered
/// subset.
pub fn build_report(records: &[ReportRecord], filter: &ReportFilter) -> FeedbackReport {
    let filtered = apply_filter(records, filter);
    let rounds = rounds_by_brand(records);

    let projects: BTreeSet<&str> = filtered.iter().map(|r| r.theme.as_str()).collect();

    FeedbackReport {
        kpis: ReportKpis {
            feedback_count: filtered.len() as u32,
            project_count: projects.len() as u32,
            mean_rounds: mean_rounds(&rounds),
        },
        brand_options: brand_options(records),
        version_options: version_options(records, &filter.brand),
        rounds_by_brand: rounds,
        topic_distribution: topic_distribution(&filtered),
        volume_timeline: volume_timeline(&filtered),
        projects: project_table(&filtered),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
