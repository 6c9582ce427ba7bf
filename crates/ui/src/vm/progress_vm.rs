use chrono::{DateTime, Utc};
use noun_core::model::{ProgressId, ProgressKind};
use services::ProgressOverview;

use crate::vm::time_fmt::ago_label;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressRowVm {
    pub id: ProgressId,
    pub kind: ProgressKind,
    pub kind_label: &'static str,
    pub subject: String,
    pub score_label: String,
    pub time_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressSummaryVm {
    pub rows: Vec<ProgressRowVm>,
    pub average_label: String,
    pub total_label: String,
}

#[must_use]
pub fn map_progress_summary(overview: &ProgressOverview, now: DateTime<Utc>) -> ProgressSummaryVm {
    let rows = overview
        .recent
        .iter()
        .map(|row| {
            let kind = row.kind();
            ProgressRowVm {
                id: row.id.clone(),
                kind,
                kind_label: kind.label(),
                subject: row.subject().unwrap_or(kind.label()).to_string(),
                score_label: format!("{}%", row.score()),
                time_label: ago_label(row.timestamp, now),
            }
        })
        .collect();

    let average_label = overview.average_score.map_or_else(
        || "No scores yet".to_string(),
        |avg| format!("Average score: {avg}%"),
    );
    let total_label = match overview.total {
        1 => "1 activity".to_string(),
        n => format!("{n} activities"),
    };

    ProgressSummaryVm {
        rows,
        average_label,
        total_label,
    }
}
