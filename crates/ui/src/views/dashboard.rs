use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{
    ChatWidget, DocumentViewer, ForumHighlights, JobBoard, RecentProgress, UpcomingExams,
};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let document = ctx.study_document();

    rsx! {
        div { class: "page dashboard",
            header { class: "view-header",
                h2 { class: "view-title", "Dashboard" }
                p { class: "view-subtitle", "Your courses, exams and opportunities at a glance." }
            }
            div { class: "dashboard-grid",
                RecentProgress {}
                UpcomingExams {}
                JobBoard {}
                ForumHighlights {}
                ChatWidget {}
            }
            if let Some(document) = document {
                DocumentViewer { document }
            }
        }
    }
}
