//! Rows for the leaderboard screen.

use chrono::{Local, TimeZone};

use crate::record::ScoreRecord;

/// One display row: `"1."`, name, score and a `yy/MM/dd` date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub position_label: String,
    pub name: String,
    pub score: String,
    pub date: String,
    /// The entry that was just recorded, for the renderer to animate.
    pub highlighted: bool,
}

/// Build display rows in rank order.
pub fn score_rows(records: &[ScoreRecord], highlighted: Option<usize>) -> Vec<ScoreRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| ScoreRow {
            position_label: format!("{}.", i + 1),
            name: record.name().to_string(),
            score: record.score().to_string(),
            date: format_date(record.timestamp_ms()),
            highlighted: highlighted == Some(i),
        })
        .collect()
}

/// Format a unix timestamp (ms) as a local `yy/MM/dd` date.
pub fn format_date(timestamp_ms: u64) -> String {
    format_date_in(timestamp_ms, &Local)
}

pub fn format_date_in<Tz: TimeZone>(timestamp_ms: u64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(|ms| tz.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%y/%m/%d").to_string())
        .unwrap_or_default()
}
