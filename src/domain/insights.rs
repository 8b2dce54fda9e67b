//! Insights aggregation.
//!
//! Pure derivation of analytics from a user's focus entries, decisions,
//! and documents. No side effects; empty inputs produce the neutral
//! empty report.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::decision::Decision;
use crate::domain::document::Document;
use crate::domain::focus::FocusEntry;
use crate::domain::foundation::Timestamp;

/// Number of trailing weeks in the activity trend.
pub const TREND_WEEKS: usize = 4;

/// Number of tags reported in `top_tags`.
pub const TOP_TAG_LIMIT: usize = 5;

/// Derived analytics view for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub focus_count: usize,
    pub decision_count: usize,
    pub document_count: usize,

    /// Sum of focus durations across all entries.
    pub total_focus_minutes: u64,

    /// Combined focus + decision event counts, Monday-first.
    pub weekday_activity: [u32; 7],

    /// Weekday with the most activity; `None` when there is no history.
    pub busiest_weekday: Option<String>,

    /// Activity per week for the trailing weeks, oldest first.
    pub weekly_trend: Vec<WeekActivity>,

    /// Consecutive days with at least one focus entry, anchored at today
    /// (or yesterday, when today has no entry yet).
    pub current_streak_days: u32,

    /// Most frequent document tags, ties broken alphabetically.
    pub top_tags: Vec<TagCount>,
}

/// Activity counts for one seven-day window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekActivity {
    /// First day of the window (UTC).
    pub week_start: NaiveDate,
    pub focus_count: u32,
    pub decision_count: u32,
}

/// A tag and how many documents carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag: String,
    pub count: u32,
}

impl InsightReport {
    /// Builds the report. `now` is passed in so the derivation stays a
    /// pure function of its inputs.
    pub fn build(
        focus: &[FocusEntry],
        decisions: &[Decision],
        documents: &[Document],
        now: Timestamp,
    ) -> Self {
        let total_focus_minutes = focus.iter().map(|f| f.duration_minutes() as u64).sum();

        let mut weekday_activity = [0u32; 7];
        for ts in event_timestamps(focus, decisions) {
            weekday_activity[ts.date().weekday().num_days_from_monday() as usize] += 1;
        }

        let busiest_weekday = busiest_weekday(&weekday_activity);
        let weekly_trend = weekly_trend(focus, decisions, now);
        let current_streak_days = focus_streak(focus, now);
        let top_tags = top_tags(documents);

        Self {
            focus_count: focus.len(),
            decision_count: decisions.len(),
            document_count: documents.len(),
            total_focus_minutes,
            weekday_activity,
            busiest_weekday,
            weekly_trend,
            current_streak_days,
            top_tags,
        }
    }

    /// The neutral report for a user with no history.
    pub fn empty(now: Timestamp) -> Self {
        Self::build(&[], &[], &[], now)
    }
}

fn event_timestamps<'a>(
    focus: &'a [FocusEntry],
    decisions: &'a [Decision],
) -> impl Iterator<Item = Timestamp> + 'a {
    focus
        .iter()
        .map(|f| f.occurred_at())
        .chain(decisions.iter().map(|d| d.decided_at()))
}

const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn busiest_weekday(activity: &[u32; 7]) -> Option<String> {
    let max = *activity.iter().max()?;
    if max == 0 {
        return None;
    }
    let index = activity.iter().position(|&c| c == max)?;
    Some(WEEKDAY_NAMES[index].to_string())
}

/// Trailing weekly windows ending at `now`, oldest first. The most recent
/// window covers the seven days up to and including `now`.
fn weekly_trend(focus: &[FocusEntry], decisions: &[Decision], now: Timestamp) -> Vec<WeekActivity> {
    let mut weeks = Vec::with_capacity(TREND_WEEKS);
    for i in (0..TREND_WEEKS).rev() {
        let end = now.minus_days(7 * i as i64);
        let start = end.minus_days(7);

        let in_window = |ts: Timestamp| ts.is_after(&start) && !ts.is_after(&end);
        let focus_count = focus.iter().filter(|f| in_window(f.occurred_at())).count() as u32;
        let decision_count = decisions
            .iter()
            .filter(|d| in_window(d.decided_at()))
            .count() as u32;

        weeks.push(WeekActivity {
            week_start: start.plus_days(1).date(),
            focus_count,
            decision_count,
        });
    }
    weeks
}

/// Consecutive days with at least one focus entry, counting back from
/// today. A streak that has not been extended today still counts when it
/// ran through yesterday.
fn focus_streak(focus: &[FocusEntry], now: Timestamp) -> u32 {
    let days: HashSet<NaiveDate> = focus.iter().map(|f| f.occurred_at().date()).collect();
    if days.is_empty() {
        return 0;
    }

    let today = now.date();
    let mut cursor = if days.contains(&today) {
        today
    } else if days.contains(&(today - chrono::Duration::days(1))) {
        today - chrono::Duration::days(1)
    } else {
        return 0;
    };

    let mut streak = 0u32;
    while days.contains(&cursor) {
        streak += 1;
        cursor -= chrono::Duration::days(1);
    }
    streak
}

fn top_tags(documents: &[Document]) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for doc in documents {
        for tag in doc.tags() {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    // BTreeMap iteration is alphabetical, so a stable sort by count leaves
    // ties alphabetical.
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags.truncate(TOP_TAG_LIMIT);
    tags
}
