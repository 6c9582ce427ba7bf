mod chat_vm;
mod exam_vm;
mod forum_vm;
mod job_vm;
mod markdown_vm;
mod progress_vm;
mod time_fmt;
mod viewer_vm;

pub use chat_vm::{ChatMessageVm, ChatPhase, ChatVm, Notice, map_chat_messages, usage_label};
pub use exam_vm::{ExamCardVm, Severity, UNKNOWN_COURSE, map_exam_card, map_exam_cards};
pub use forum_vm::{ForumHighlightVm, map_forum_highlight, map_forum_highlights};
pub use job_vm::{BadgeTone, JobCardVm, badge_tone, map_job_cards};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use progress_vm::{ProgressRowVm, ProgressSummaryVm, map_progress_summary};
pub use time_fmt::{ago_label, format_date};
pub use viewer_vm::{
    DEFAULT_DOCUMENT_NAME, DocumentViewerVm, LoadState, MAX_ZOOM, MIN_ZOOM, StudyDocument,
    ZOOM_STEP, download_filename,
};
