//! Response normalization: raw endpoint bodies into complete core records.
//!
//! Every list-bearing body yields a vec, never an absent value: a missing,
//! null or non-array field is an empty list, and items that fail to decode
//! are skipped. Optional nested fields are defaulted here once so widgets
//! never re-check them.
//!
//! An id is always required. Forum posts and jobs also need a parseable
//! `createdAt` / `postedAt`: both lists are ordered and labelled by that
//! timestamp, so an item without one is dropped rather than dated arbitrarily.

use chrono::{DateTime, NaiveDate, Utc};
use noun_core::model::{
    Author, ChatHistory, ChatMessage, ChatRole, ChatUsage, Course, CourseId, Exam, ExamId,
    ForumPost, Job, JobId, JobType, LinkedItem, MaterialId, MessageId, PostId, ProgressId,
    UserProgress,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Decode the array under `field`, defaulting to an empty vec.
#[must_use]
pub fn list_field<T: DeserializeOwned>(body: &Value, field: &str) -> Vec<T> {
    let Some(items) = body.get(field).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                debug!(field, error = %err, "skipping malformed item");
                None
            }
        })
        .collect()
}

#[must_use]
pub fn normalize_posts(body: &Value) -> Vec<ForumPost> {
    list_field::<ForumPostDto>(body, "posts")
        .into_iter()
        .filter_map(ForumPostDto::into_post)
        .collect()
}

#[must_use]
pub fn normalize_jobs(body: &Value) -> Vec<Job> {
    list_field::<JobDto>(body, "jobs")
        .into_iter()
        .filter_map(JobDto::into_job)
        .collect()
}

#[must_use]
pub fn normalize_exams(body: &Value) -> Vec<Exam> {
    list_field::<ExamDto>(body, "exams")
        .into_iter()
        .filter_map(ExamDto::into_exam)
        .collect()
}

#[must_use]
pub fn normalize_courses(body: &Value) -> Vec<Course> {
    list_field::<CourseDto>(body, "courses")
        .into_iter()
        .filter_map(CourseDto::into_course)
        .collect()
}

#[must_use]
pub fn normalize_progress(body: &Value) -> Vec<UserProgress> {
    list_field::<ProgressDto>(body, "progress")
        .into_iter()
        .filter_map(ProgressDto::into_progress)
        .collect()
}

#[must_use]
pub fn normalize_chat_history(body: &Value) -> ChatHistory {
    let messages = list_field::<ChatMessageDto>(body, "messages")
        .into_iter()
        .enumerate()
        .filter_map(|(index, dto)| dto.into_message(index))
        .collect();

    let prompts_used = body
        .get("promptsUsed")
        .and_then(Value::as_u64)
        .map_or(0, saturate_u32);
    let prompt_limit = body
        .get("promptLimit")
        .and_then(Value::as_u64)
        .map(saturate_u32);

    ChatHistory {
        messages,
        usage: ChatUsage {
            prompts_used,
            prompt_limit,
        },
    }
}

/// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date at UTC midnight.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn saturate_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

// Counts arrive as whole numbers; truncation only drops stray fractions.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(raw: Option<f64>) -> u64 {
    match raw {
        Some(value) if value.is_finite() && value > 0.0 => value as u64,
        _ => 0,
    }
}

fn text_or_default(raw: Option<String>) -> String {
    raw.map(|text| text.trim().to_string()).unwrap_or_default()
}

// Ids arrive as strings from some endpoints and integers from others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> Option<String> {
        match self {
            Self::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Number(number) => Some(number.to_string()),
        }
    }
}

fn id_of(raw: Option<RawId>) -> Option<String> {
    raw.and_then(RawId::into_string)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorDto {
    first_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForumPostDto {
    id: Option<RawId>,
    title: Option<String>,
    author: Option<AuthorDto>,
    created_at: Option<String>,
    views: Option<f64>,
    reply_count: Option<f64>,
}

impl ForumPostDto {
    fn into_post(self) -> Option<ForumPost> {
        let id = id_of(self.id)?;
        let created_at = self.created_at.as_deref().and_then(parse_timestamp)?;
        let author = Author::new(
            self.author
                .as_ref()
                .and_then(|author| author.first_name.as_deref()),
        );
        Some(ForumPost {
            id: PostId::new(id),
            title: text_or_default(self.title),
            author,
            created_at,
            views: to_count(self.views),
            reply_count: to_count(self.reply_count),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobDto {
    id: Option<RawId>,
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    #[serde(rename = "type")]
    job_type: Option<String>,
    posted_at: Option<String>,
}

impl JobDto {
    fn into_job(self) -> Option<Job> {
        let id = id_of(self.id)?;
        let posted_at = self.posted_at.as_deref().and_then(parse_timestamp)?;
        let job_type = self
            .job_type
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(JobType::parse);
        Some(Job {
            id: JobId::new(id),
            title: text_or_default(self.title),
            company: text_or_default(self.company),
            location: self.location,
            job_type,
            posted_at,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExamDto {
    id: Option<RawId>,
    course_id: Option<RawId>,
    date: Option<String>,
    description: Option<String>,
}

impl ExamDto {
    fn into_exam(self) -> Option<Exam> {
        let id = id_of(self.id)?;
        let course_id = id_of(self.course_id).unwrap_or_default();
        Some(Exam {
            id: ExamId::new(id),
            course_id: CourseId::new(course_id),
            date: self.date.as_deref().and_then(parse_timestamp),
            description: text_or_default(self.description),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CourseDto {
    id: Option<RawId>,
    code: Option<String>,
    title: Option<String>,
}

impl CourseDto {
    fn into_course(self) -> Option<Course> {
        let id = id_of(self.id)?;
        Some(Course {
            id: CourseId::new(id),
            code: text_or_default(self.code),
            title: text_or_default(self.title),
        })
    }
}

#[derive(Debug, Deserialize)]
struct LinkedDto {
    title: Option<String>,
}

impl LinkedDto {
    fn into_item(self) -> LinkedItem {
        LinkedItem {
            title: self
                .title
                .map(|title| title.trim().to_string())
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressDto {
    id: Option<RawId>,
    timestamp: Option<String>,
    score: Option<f64>,
    material_id: Option<RawId>,
    exam_id: Option<RawId>,
    course_id: Option<RawId>,
    material: Option<LinkedDto>,
    exam: Option<LinkedDto>,
    course: Option<LinkedDto>,
}

impl ProgressDto {
    fn into_progress(self) -> Option<UserProgress> {
        let id = id_of(self.id)?;
        let timestamp = self.timestamp.as_deref().and_then(parse_timestamp)?;
        let mut progress =
            UserProgress::new(ProgressId::new(id), timestamp, self.score.unwrap_or(0.0));
        progress.material_id = id_of(self.material_id).map(MaterialId::new);
        progress.exam_id = id_of(self.exam_id).map(ExamId::new);
        progress.course_id = id_of(self.course_id).map(CourseId::new);
        progress.material = self.material.map(LinkedDto::into_item);
        progress.exam = self.exam.map(LinkedDto::into_item);
        progress.course = self.course.map(LinkedDto::into_item);
        Some(progress)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatMessageDto {
    id: Option<RawId>,
    role: Option<String>,
    content: Option<String>,
    created_at: Option<String>,
}

impl ChatMessageDto {
    // History rows may lack ids; position keeps them distinct for rendering.
    fn into_message(self, index: usize) -> Option<ChatMessage> {
        let content = self.content?;
        let id = id_of(self.id).unwrap_or_else(|| format!("msg-{index}"));
        Some(ChatMessage {
            id: MessageId::new(id),
            role: ChatRole::parse(self.role.as_deref().unwrap_or_default()),
            content,
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
        })
    }
}
