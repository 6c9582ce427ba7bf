mod chat;
mod dashboard;
mod exams;
mod forum;
mod jobs;
mod progress;
mod state;
mod viewer;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use chat::ChatWidget;
pub use dashboard::DashboardView;
pub use exams::UpcomingExams;
pub use forum::ForumHighlights;
pub use jobs::{JOBS_EMPTY_MESSAGE, JobBoard};
pub use progress::RecentProgress;
pub use state::{ErrorPanel, LoadingSkeleton, ViewError, ViewState, view_state_from_resource};
pub use viewer::DocumentViewer;
