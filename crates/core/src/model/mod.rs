mod chat;
mod exam;
mod forum;
mod ids;
mod job;
mod progress;
mod session;

pub use ids::{
    CourseId, ExamId, JobId, MaterialId, MessageId, ParseIdError, PostId, ProgressId, UserId,
};

pub use chat::{ChatHistory, ChatMessage, ChatRole, ChatUsage};
pub use exam::{Course, Exam};
pub use forum::{Author, ForumPost, UNKNOWN_AUTHOR};
pub use job::{DEFAULT_JOB_LOCATION, Job, JobType};
pub use progress::{LinkedItem, MAX_SCORE, ProgressKind, UserProgress};
pub use session::{Session, SessionUser};
