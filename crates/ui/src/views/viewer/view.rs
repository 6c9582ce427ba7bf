use dioxus::prelude::*;

use crate::views::viewer::scripts::{VIEWER_CONTAINER_ID, set_fullscreen, trigger_download};
use crate::vm::{DocumentViewerVm, LoadState, StudyDocument};

#[component]
pub fn DocumentViewer(document: StudyDocument) -> Element {
    let mut vm = use_signal(|| DocumentViewerVm::new(&document));

    use_effect(use_reactive(&document, move |document| {
        if vm.peek().url() != document.url {
            vm.write().open(&document);
        }
    }));

    let snapshot = vm.read().clone();
    let frame_style = format!(
        "transform: scale({}); transform-origin: top center;",
        snapshot.zoom()
    );
    let fullscreen_label = if snapshot.is_fullscreen() {
        "Exit fullscreen"
    } else {
        "Fullscreen"
    };

    rsx! {
        section { id: VIEWER_CONTAINER_ID, class: "widget widget-viewer",
            header { class: "viewer-toolbar",
                h3 { class: "widget-title", "{snapshot.title()}" }
                div { class: "viewer-controls",
                    button {
                        class: "btn btn-icon",
                        r#type: "button",
                        disabled: !snapshot.can_zoom_out(),
                        onclick: move |_| vm.write().zoom_out(),
                        "-"
                    }
                    button {
                        class: "btn btn-link viewer-zoom",
                        r#type: "button",
                        onclick: move |_| vm.write().reset_zoom(),
                        "{snapshot.zoom_label()}"
                    }
                    button {
                        class: "btn btn-icon",
                        r#type: "button",
                        disabled: !snapshot.can_zoom_in(),
                        onclick: move |_| vm.write().zoom_in(),
                        "+"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let enter = vm.write().toggle_fullscreen();
                            spawn(async move {
                                set_fullscreen(VIEWER_CONTAINER_ID, enter).await;
                            });
                        },
                        "{fullscreen_label}"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let url = vm.peek().url().to_string();
                            let filename = vm.peek().download_filename();
                            spawn(async move {
                                trigger_download(&url, &filename).await;
                            });
                        },
                        "Download"
                    }
                }
            }
            div { class: "viewer-stage",
                match snapshot.load_state() {
                    LoadState::Loading => rsx! {
                        p { class: "viewer-status", "Loading document..." }
                    },
                    LoadState::Error => rsx! {
                        div { class: "widget-error", role: "alert",
                            p { class: "widget-error-message", "Unable to load this document." }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| vm.write().retry(),
                                "Retry"
                            }
                        }
                    },
                    LoadState::Loaded => rsx! {},
                }
                iframe {
                    class: "viewer-frame",
                    style: "{frame_style}",
                    title: "{snapshot.title()}",
                    src: "{snapshot.frame_src()}",
                    onload: move |_| vm.write().mark_loaded(),
                    onerror: move |_| vm.write().mark_failed(),
                }
            }
        }
    }
}
