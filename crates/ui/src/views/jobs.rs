use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ErrorPanel, LoadingSkeleton, ViewError, ViewState, view_state_from_resource};
use crate::vm::{JobCardVm, map_job_cards};

pub const JOBS_EMPTY_MESSAGE: &str = "No opportunities available right now.";

#[component]
pub fn JobBoard() -> Element {
    let ctx = use_context::<AppContext>();
    let jobs = ctx.jobs();
    let now = ctx.now();

    let resource = use_resource(move || {
        let jobs = jobs.clone();
        async move {
            let latest = jobs.latest().await.map_err(ViewError::from)?;
            Ok(map_job_cards(&latest, now))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        section { class: "widget widget-jobs",
            h3 { class: "widget-title", "Job Opportunities" }
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
                        p { class: "widget-empty", "{JOBS_EMPTY_MESSAGE}" }
                    } else {
                        ul { class: "job-list",
                            for card in cards {
                                JobCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn JobCard(card: JobCardVm) -> Element {
    rsx! {
        li { class: "job-card",
            div { class: "job-card-head",
                p { class: "job-card-title", "{card.title}" }
                if let Some(label) = card.type_label.clone() {
                    span { class: card.tone.css_class(), "{label}" }
                }
            }
            p { class: "job-card-company", "{card.company}" }
            p { class: "job-card-meta",
                span { "{card.location}" }
                span { "{card.posted_label}" }
            }
        }
    }
}
