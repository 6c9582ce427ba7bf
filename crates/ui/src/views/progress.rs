use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ErrorPanel, LoadingSkeleton, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ProgressRowVm, map_progress_summary};

#[component]
pub fn RecentProgress() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let now = ctx.now();

    let resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let overview = progress.overview().await.map_err(ViewError::from)?;
            Ok(map_progress_summary(&overview, now))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        section { class: "widget widget-progress",
            h3 { class: "widget-title", "Recent Progress" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingSkeleton { rows: 5 }
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
                ViewState::Ready(summary) => rsx! {
                    div { class: "progress-summary",
                        span { class: "progress-average", "{summary.average_label}" }
                        span { class: "progress-total", "{summary.total_label}" }
                    }
                    if summary.rows.is_empty() {
                        p { class: "widget-empty", "No activity yet. Take a quiz to get started." }
                    } else {
                        ul { class: "progress-list",
                            for row in summary.rows {
                                ProgressRow { key: "{row.id}", row }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ProgressRow(row: ProgressRowVm) -> Element {
    rsx! {
        li { class: "progress-row",
            span { class: "progress-kind", "{row.kind_label}" }
            span { class: "progress-subject", "{row.subject}" }
            span { class: "progress-score", "{row.score_label}" }
            span { class: "progress-time", "{row.time_label}" }
        }
    }
}
