use std::sync::Arc;

use cache::InMemoryQueryCache;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use noun_core::time::fixed_now;
use services::{
    ChatService, Clock, DashboardServices, ExamService, ForumService, JobService,
    ProgressService, StubTransport,
};

use crate::context::{UiApp, build_app_context};
use crate::views::{
    ChatWidget, DashboardView, DocumentViewer, ForumHighlights, JobBoard, RecentProgress,
    UpcomingExams,
};
use crate::vm::StudyDocument;

#[derive(Clone)]
struct TestApp {
    services: DashboardServices,
    clock: Clock,
    document: Option<StudyDocument>,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.clock
    }

    fn forum(&self) -> Arc<ForumService> {
        self.services.forum()
    }

    fn jobs(&self) -> Arc<JobService> {
        self.services.jobs()
    }

    fn exams(&self) -> Arc<ExamService> {
        self.services.exams()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn chat(&self) -> Arc<ChatService> {
        self.services.chat()
    }

    fn study_document(&self) -> Option<StudyDocument> {
        self.document.clone()
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Dashboard,
    Forum,
    Jobs,
    Exams,
    Progress,
    Chat,
    Viewer(StudyDocument),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    match props.view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Forum => rsx! { ForumHighlights {} },
        ViewKind::Jobs => rsx! { JobBoard {} },
        ViewKind::Exams => rsx! { UpcomingExams {} },
        ViewKind::Progress => rsx! { RecentProgress {} },
        ViewKind::Chat => rsx! { ChatWidget {} },
        ViewKind::Viewer(document) => rsx! { DocumentViewer { document } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub stub: StubTransport,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, stub: StubTransport) -> ViewHarness {
    setup_view_harness_with_document(view, stub, None)
}

pub fn setup_view_harness_with_document(
    view: ViewKind,
    stub: StubTransport,
    document: Option<StudyDocument>,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let services = DashboardServices::new(
        Arc::new(InMemoryQueryCache::new()),
        Arc::new(stub.clone()),
        clock,
        chrono::Duration::seconds(30),
    );
    let app = Arc::new(TestApp {
        services,
        clock,
        document,
    });

    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app, view });

    ViewHarness { dom, stub }
}
