use chrono::{DateTime, Utc};
use std::fmt;

use crate::model::JobId;

/// Location shown when a posting does not name one.
pub const DEFAULT_JOB_LOCATION: &str = "Remote";

/// Employment arrangement of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    Remote,
    Hybrid,
    PartTime,
    FullTime,
    Internship,
    Other,
}

impl JobType {
    /// Parses the server's enum-like string. Matching ignores case and treats
    /// `-`, `_` and spaces as the same separator. Unknown values become `Other`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|ch| match ch {
                '_' | ' ' => '-',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "remote" => Self::Remote,
            "hybrid" => Self::Hybrid,
            "part-time" | "parttime" => Self::PartTime,
            "full-time" | "fulltime" => Self::FullTime,
            "internship" | "intern" => Self::Internship,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::PartTime => "Part-time",
            Self::FullTime => "Full-time",
            Self::Internship => "Internship",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A job or internship posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub posted_at: DateTime<Utc>,
}

impl Job {
    #[must_use]
    pub fn display_location(&self) -> &str {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
            .unwrap_or(DEFAULT_JOB_LOCATION)
    }
}
