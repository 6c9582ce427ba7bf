use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ErrorPanel, LoadingSkeleton, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ExamCardVm, map_exam_cards};

#[component]
pub fn UpcomingExams() -> Element {
    let ctx = use_context::<AppContext>();
    let exams = ctx.exams();

    let resource = use_resource(move || {
        let exams = exams.clone();
        async move {
            let upcoming = exams.upcoming().await.map_err(ViewError::from)?;
            Ok(map_exam_cards(&upcoming))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        section { class: "widget widget-exams",
            h3 { class: "widget-title", "Upcoming Exams" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingSkeleton { rows: 3 }
                },
                ViewState::Error(err) => rsx! {
                    ErrorPanel {
                        message: err.message().to_string(),
                        on_retry: move |()| {
                            let mut resource = resource;
                            resource.restart();
                        },
                    }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { class: "widget-empty", "No upcoming exams scheduled." }
                    } else {
                        ul { class: "exam-list",
                            for card in cards {
                                ExamCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ExamCard(card: ExamCardVm) -> Element {
    rsx! {
        li { class: card.severity.css_class(),
            div { class: "exam-card-head",
                if !card.course_code.is_empty() {
                    span { class: "exam-course-code", "{card.course_code}" }
                }
                span { class: "exam-course-title", "{card.course_title}" }
            }
            p { class: "exam-description", "{card.description}" }
            p { class: "exam-when",
                span { class: "exam-countdown", "{card.when_label}" }
                span { class: "exam-date", "{card.date_label}" }
            }
        }
    }
}
