use dioxus::prelude::*;
use services::ApiError;

/// A failed load, carrying the message shown in the widget's error panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError {
    message: String,
}

impl ViewError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ApiError> for ViewError {
    fn from(err: ApiError) -> Self {
        Self::new(err.user_message())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Loading,
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Error panel with a retry control that restarts the widget's resource.
#[component]
pub fn ErrorPanel(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "widget-error", role: "alert",
            p { class: "widget-error-message", "{message}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}

#[component]
pub fn LoadingSkeleton(rows: usize) -> Element {
    rsx! {
        div { class: "widget-skeleton", aria_busy: "true",
            for idx in 0..rows {
                div { key: "{idx}", class: "skeleton-row" }
            }
        }
    }
}
