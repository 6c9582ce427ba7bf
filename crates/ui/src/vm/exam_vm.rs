use noun_core::model::ExamId;
use services::UpcomingExam;

use crate::vm::time_fmt::format_date;

pub const UNKNOWN_COURSE: &str = "Unknown course";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Urgent,
    Warning,
    Info,
}

impl Severity {
    #[must_use]
    pub fn from_days(days_until: i64) -> Self {
        if days_until <= 3 {
            Self::Urgent
        } else if days_until <= 7 {
            Self::Warning
        } else {
            Self::Info
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Urgent => "exam-card exam-urgent",
            Self::Warning => "exam-card exam-warning",
            Self::Info => "exam-card exam-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamCardVm {
    pub id: ExamId,
    pub course_code: String,
    pub course_title: String,
    pub description: String,
    pub when_label: String,
    pub date_label: String,
    pub severity: Severity,
}

#[must_use]
pub fn map_exam_cards(exams: &[UpcomingExam]) -> Vec<ExamCardVm> {
    exams.iter().map(map_exam_card).collect()
}

#[must_use]
pub fn map_exam_card(upcoming: &UpcomingExam) -> ExamCardVm {
    let (course_code, course_title) = match &upcoming.course {
        Some(course) => (course.code.clone(), course.title.clone()),
        None => (String::new(), UNKNOWN_COURSE.to_string()),
    };
    let when_label = match upcoming.days_until {
        1 => "Tomorrow".to_string(),
        days => format!("In {days} days"),
    };

    ExamCardVm {
        id: upcoming.exam.id.clone(),
        course_code,
        course_title,
        description: upcoming.exam.description.clone(),
        when_label,
        date_label: upcoming.exam.date.map(format_date).unwrap_or_default(),
        severity: Severity::from_days(upcoming.days_until),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use noun_core::model::{Course, CourseId, Exam};
    use noun_core::time::fixed_now;

    fn upcoming(days: i64, course: Option<Course>) -> UpcomingExam {
        UpcomingExam {
            exam: Exam {
                id: ExamId::new("e1"),
                course_id: CourseId::new("c1"),
                date: Some(fixed_now() + Duration::days(days)),
                description: "Final exam".to_string(),
            },
            course,
            days_until: days,
        }
    }

    #[test]
    fn severity_bands() {
        assert_eq!(Severity::from_days(1), Severity::Urgent);
        assert_eq!(Severity::from_days(3), Severity::Urgent);
        assert_eq!(Severity::from_days(4), Severity::Warning);
        assert_eq!(Severity::from_days(7), Severity::Warning);
        assert_eq!(Severity::from_days(8), Severity::Info);
    }

    #[test]
    fn joined_course_fills_code_and_title() {
        let course = Course {
            id: CourseId::new("c1"),
            code: "MTH101".to_string(),
            title: "Elementary Mathematics".to_string(),
        };
        let vm = map_exam_card(&upcoming(1, Some(course)));
        assert_eq!(vm.course_code, "MTH101");
        assert_eq!(vm.when_label, "Tomorrow");
        assert_eq!(vm.date_label, "Nov 15, 2023");
        assert_eq!(vm.severity, Severity::Urgent);
    }

    #[test]
    fn missing_course_reads_unknown() {
        let vm = map_exam_card(&upcoming(10, None));
        assert_eq!(vm.course_title, UNKNOWN_COURSE);
        assert!(vm.course_code.is_empty());
        assert_eq!(vm.when_label, "In 10 days");
        assert_eq!(vm.severity, Severity::Info);
    }
}
