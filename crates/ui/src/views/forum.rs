use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ErrorPanel, LoadingSkeleton, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ForumHighlightVm, map_forum_highlights};

#[component]
pub fn ForumHighlights() -> Element {
    let ctx = use_context::<AppContext>();
    let forum = ctx.forum();
    let now = ctx.now();

    let resource = use_resource(move || {
        let forum = forum.clone();
        async move {
            let posts = forum.highlights().await.map_err(ViewError::from)?;
            Ok(map_forum_highlights(&posts, now))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        section { class: "widget widget-forum",
            h3 { class: "widget-title", "Forum Highlights" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingSkeleton { rows: 2 }
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
                ViewState::Ready(posts) => rsx! {
                    if posts.is_empty() {
                        p { class: "widget-empty", "No discussions yet. Start one in the forum." }
                    } else {
                        ul { class: "forum-list",
                            for post in posts {
                                ForumPostCard { key: "{post.id}", post }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ForumPostCard(post: ForumHighlightVm) -> Element {
    rsx! {
        li { class: "forum-card",
            span { class: "avatar", "{post.avatar}" }
            div { class: "forum-card-body",
                p { class: "forum-card-title", "{post.title}" }
                p { class: "forum-card-meta", "{post.author} · {post.posted_label}" }
                p { class: "forum-card-stats",
                    span { "{post.views_label}" }
                    span { "{post.replies_label}" }
                }
            }
        }
    }
}
