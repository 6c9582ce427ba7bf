use chrono::{DateTime, Utc};
use noun_core::model::{Job, JobId, JobType};

use crate::vm::time_fmt::ago_label;

/// Colour family of a job type badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTone {
    Green,
    Blue,
    Amber,
    Purple,
    Pink,
    Neutral,
}

impl BadgeTone {
    #[must_use]
    pub fn for_job_type(job_type: Option<JobType>) -> Self {
        match job_type {
            Some(JobType::Remote) => Self::Green,
            Some(JobType::Hybrid) => Self::Blue,
            Some(JobType::PartTime) => Self::Amber,
            Some(JobType::FullTime) => Self::Purple,
            Some(JobType::Internship) => Self::Pink,
            Some(JobType::Other) | None => Self::Neutral,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Green => "badge badge-green",
            Self::Blue => "badge badge-blue",
            Self::Amber => "badge badge-amber",
            Self::Purple => "badge badge-purple",
            Self::Pink => "badge badge-pink",
            Self::Neutral => "badge badge-neutral",
        }
    }
}

/// Classify a raw type string as sent by the jobs endpoint.
#[must_use]
pub fn badge_tone(raw: Option<&str>) -> BadgeTone {
    let job_type = raw
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(JobType::parse);
    BadgeTone::for_job_type(job_type)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobCardVm {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub type_label: Option<String>,
    pub tone: BadgeTone,
    pub posted_label: String,
}

#[must_use]
pub fn map_job_cards(jobs: &[Job], now: DateTime<Utc>) -> Vec<JobCardVm> {
    jobs.iter()
        .map(|job| JobCardVm {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.display_location().to_string(),
            type_label: job.job_type.map(|job_type| job_type.label().to_string()),
            tone: BadgeTone::for_job_type(job.job_type),
            posted_label: ago_label(job.posted_at, now),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use noun_core::time::fixed_now;

    #[test]
    fn remote_is_green_in_any_case() {
        assert_eq!(badge_tone(Some("Remote")), BadgeTone::Green);
        assert_eq!(badge_tone(Some("REMOTE")), BadgeTone::Green);
        assert_eq!(badge_tone(Some("remote")), BadgeTone::Green);
    }

    #[test]
    fn known_types_map_to_their_tone() {
        assert_eq!(badge_tone(Some("hybrid")), BadgeTone::Blue);
        assert_eq!(badge_tone(Some("Part-Time")), BadgeTone::Amber);
        assert_eq!(badge_tone(Some("full_time")), BadgeTone::Purple);
        assert_eq!(badge_tone(Some("Internship")), BadgeTone::Pink);
    }

    #[test]
    fn unknown_or_absent_type_is_neutral() {
        assert_eq!(badge_tone(Some("freelance")), BadgeTone::Neutral);
        assert_eq!(badge_tone(Some("   ")), BadgeTone::Neutral);
        assert_eq!(badge_tone(None), BadgeTone::Neutral);
    }

    #[test]
    fn card_defaults_location_and_omits_missing_type() {
        let now = fixed_now();
        let job = Job {
            id: JobId::new("j1"),
            title: "Data Analyst Intern".to_string(),
            company: "Kora Labs".to_string(),
            location: None,
            job_type: None,
            posted_at: now - Duration::days(3),
        };
        let cards = map_job_cards(&[job], now);
        assert_eq!(cards[0].location, "Remote");
        assert_eq!(cards[0].type_label, None);
        assert_eq!(cards[0].tone, BadgeTone::Neutral);
        assert_eq!(cards[0].posted_label, "3 days ago");
    }
}
