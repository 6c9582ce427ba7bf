use chrono::{DateTime, Utc};

use crate::model::{CourseId, ExamId, MaterialId, ProgressId};

/// Highest score a progress row can carry.
pub const MAX_SCORE: u8 = 100;

/// Title-only projection of an object nested in a progress row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedItem {
    pub title: String,
}

/// What kind of activity produced a progress row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressKind {
    Quiz,
    Exam,
    Summary,
}

impl ProgressKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Quiz => "Quiz",
            Self::Exam => "Exam",
            Self::Summary => "Summary",
        }
    }
}

/// One scored activity recorded for the student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProgress {
    pub id: ProgressId,
    pub timestamp: DateTime<Utc>,
    score: u8,
    pub material_id: Option<MaterialId>,
    pub exam_id: Option<ExamId>,
    pub course_id: Option<CourseId>,
    pub material: Option<LinkedItem>,
    pub exam: Option<LinkedItem>,
    pub course: Option<LinkedItem>,
}

impl UserProgress {
    /// Builds a row with no links; the score is clamped to `0..=100`.
    #[must_use]
    pub fn new(id: ProgressId, timestamp: DateTime<Utc>, score: f64) -> Self {
        Self {
            id,
            timestamp,
            score: clamp_score(score),
            material_id: None,
            exam_id: None,
            course_id: None,
            material: None,
            exam: None,
            course: None,
        }
    }

    #[must_use]
    pub fn score(&self) -> u8 {
        self.score
    }

    /// Exam links win over material links; rows with neither are summaries.
    #[must_use]
    pub fn kind(&self) -> ProgressKind {
        if self.exam_id.is_some() || self.exam.is_some() {
            ProgressKind::Exam
        } else if self.material_id.is_some() || self.material.is_some() {
            ProgressKind::Quiz
        } else {
            ProgressKind::Summary
        }
    }

    /// Best available title for the row, most specific link first.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.exam
            .as_ref()
            .or(self.material.as_ref())
            .or(self.course.as_ref())
            .map(|item| item.title.as_str())
    }
}

fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    // Truncation is safe after the clamp.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = raw.round().clamp(0.0, f64::from(MAX_SCORE)) as u8;
    score
}
