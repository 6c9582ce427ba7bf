use std::sync::Arc;

use chrono::{DateTime, Utc};
use noun_core::model::{Course, Exam};
use noun_core::time::days_until;

use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::normalize::{normalize_courses, normalize_exams};
use crate::query_client::QueryClient;

/// Number of exams shown in the upcoming exams card.
pub const UPCOMING_EXAM_LIMIT: usize = 3;

/// An exam joined with its course and its distance from today.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpcomingExam {
    pub exam: Exam,
    pub course: Option<Course>,
    /// Always at least 1; an exam later today counts as one day away.
    pub days_until: i64,
}

/// Keep exams dated strictly after `now`, nearest first.
#[must_use]
pub fn rank_upcoming(
    exams: &[Exam],
    courses: &[Course],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<UpcomingExam> {
    let mut upcoming: Vec<UpcomingExam> = exams
        .iter()
        .filter(|exam| exam.is_upcoming(now))
        .filter_map(|exam| {
            let date = exam.date?;
            Some(UpcomingExam {
                exam: exam.clone(),
                course: exam.find_course(courses).cloned(),
                days_until: days_until(date, now).max(1),
            })
        })
        .collect();

    upcoming.sort_by(|left, right| {
        left.days_until
            .cmp(&right.days_until)
            .then_with(|| left.exam.date.cmp(&right.exam.date))
    });
    upcoming.truncate(limit);
    upcoming
}

#[derive(Clone)]
pub struct ExamService {
    query: Arc<QueryClient>,
}

impl ExamService {
    #[must_use]
    pub fn new(query: Arc<QueryClient>) -> Self {
        Self { query }
    }

    /// Nearest upcoming exams with their courses.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the exams or courses endpoint answers with an error status.
    pub async fn upcoming(&self) -> Result<Vec<UpcomingExam>, ApiError> {
        let exams = self
            .query
            .fetch_or_fallback(&Endpoint::Exams.query_key())
            .await?;
        let courses = self
            .query
            .fetch_or_fallback(&Endpoint::Courses.query_key())
            .await?;
        let now = self.query.clock().now();
        Ok(rank_upcoming(
            &normalize_exams(&exams),
            &normalize_courses(&courses),
            now,
            UPCOMING_EXAM_LIMIT,
        ))
    }
}
