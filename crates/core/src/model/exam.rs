use chrono::{DateTime, Utc};

use crate::model::{CourseId, ExamId};

/// A course the student is enrolled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub title: String,
}

/// A scheduled exam. The date may be unknown while the timetable is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exam {
    pub id: ExamId,
    pub course_id: CourseId,
    pub date: Option<DateTime<Utc>>,
    pub description: String,
}

impl Exam {
    /// True when the exam has a date strictly after `now`.
    #[must_use]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date.is_some_and(|date| date > now)
    }

    /// Finds the exam's course by linear search.
    #[must_use]
    pub fn find_course<'a>(&self, courses: &'a [Course]) -> Option<&'a Course> {
        courses.iter().find(|course| course.id == self.course_id)
    }
}
