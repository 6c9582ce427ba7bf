use std::sync::Arc;

use chrono::{DateTime, Utc};
use services::{ChatService, Clock, ExamService, ForumService, JobService, ProgressService};

use crate::vm::StudyDocument;

/// What the dashboard needs from its host.
pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;

    fn forum(&self) -> Arc<ForumService>;
    fn jobs(&self) -> Arc<JobService>;
    fn exams(&self) -> Arc<ExamService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn chat(&self) -> Arc<ChatService>;

    /// Material to open in the document viewer, if any.
    fn study_document(&self) -> Option<StudyDocument>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    forum: Arc<ForumService>,
    jobs: Arc<JobService>,
    exams: Arc<ExamService>,
    progress: Arc<ProgressService>,
    chat: Arc<ChatService>,
    study_document: Option<StudyDocument>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            forum: app.forum(),
            jobs: app.jobs(),
            exams: app.exams(),
            progress: app.progress(),
            chat: app.chat(),
            study_document: app.study_document(),
        }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn forum(&self) -> Arc<ForumService> {
        Arc::clone(&self.forum)
    }

    #[must_use]
    pub fn jobs(&self) -> Arc<JobService> {
        Arc::clone(&self.jobs)
    }

    #[must_use]
    pub fn exams(&self) -> Arc<ExamService> {
        Arc::clone(&self.exams)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn chat(&self) -> Arc<ChatService> {
        Arc::clone(&self.chat)
    }

    #[must_use]
    pub fn study_document(&self) -> Option<StudyDocument> {
        self.study_document.clone()
    }
}

// Provided by the composition root in `crates/app`.

#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
