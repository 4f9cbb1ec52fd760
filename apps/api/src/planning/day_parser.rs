//! Lenient extraction of per-day records from normalized plan lines.
//!
//! The provider is asked for a `Day N: date` / `Topics:` / `Time Allotted:` template
//! but often decorates it with markdown (`**Day 1:**`, `- Topics:`). Matching is
//! prefix-based and case-insensitive. Unmatched lines are ignored; parsing never fails.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static DAY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\s*#>\-]*day\s*(\d+)[\s*]*[:\-–.]?[\s*]*(.*)$").expect("valid day regex")
});

static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\s*#>\-]*(topics(?:\s+to\s+study)?|time\s+allotted)[\s*]*:[\s*]*(.*)$")
        .expect("valid field regex")
});

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub day: u32,
    pub date: String,
    pub topics: Option<String>,
    pub time_allotted: Option<String>,
}

/// Groups `lines` into day records. Lines before the first `Day N` are skipped.
pub fn parse_day_entries(lines: &[String]) -> Vec<DayEntry> {
    let mut entries: Vec<DayEntry> = Vec::new();

    for line in lines {
        if let Some(caps) = DAY_LINE.captures(line) {
            let Ok(day) = caps[1].parse::<u32>() else {
                continue;
            };
            entries.push(DayEntry {
                day,
                date: clean_value(&caps[2]).unwrap_or_default(),
                topics: None,
                time_allotted: None,
            });
            continue;
        }

        let Some(current) = entries.last_mut() else {
            continue;
        };

        if let Some(caps) = FIELD_LINE.captures(line) {
            let value = clean_value(&caps[2]);
            if caps[1].to_lowercase().starts_with("topics") {
                current.topics = value;
            } else {
                current.time_allotted = value;
            }
        }
    }

    entries
}

/// Trims whitespace and stray bold markers left over from markdown.
fn clean_value(raw: &str) -> Option<String> {
    let value = raw.trim().trim_matches('*').trim();
    (!value.is_empty()).then(|| value.to_string())
}
