use chrono::{DateTime, Utc};
use noun_core::model::{ChatHistory, ChatRole, ChatUsage, MessageId};

use crate::vm::markdown_vm::markdown_to_html;
use crate::vm::time_fmt::ago_label;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    Sending,
    Error(String),
}

/// Transient message shown after a failed send.
///
/// `generation` identifies which failure raised it, so a timer started for an
/// older notice cannot clear a newer one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub generation: u64,
}

/// Composer state for the tutor widget.
///
/// `Sending` blocks further sends; an error keeps the draft so the user can
/// resend it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatVm {
    draft: String,
    phase: ChatPhase,
    notice: Option<Notice>,
    generation: u64,
}

impl Default for ChatVm {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: String::new(),
            phase: ChatPhase::Idle,
            notice: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    #[must_use]
    pub fn phase(&self) -> &ChatPhase {
        &self.phase
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.phase == ChatPhase::Sending
    }

    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.is_sending() && !self.draft.trim().is_empty()
    }

    /// Move to `Sending` and hand back the trimmed prompt, or `None` when the
    /// draft is blank or a send is already running.
    pub fn begin_send(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        self.phase = ChatPhase::Sending;
        self.notice = None;
        Some(self.draft.trim().to_string())
    }

    pub fn finish_ok(&mut self) {
        self.phase = ChatPhase::Idle;
        self.draft.clear();
    }

    /// Record a failed send and return the generation of the raised notice.
    pub fn finish_err(&mut self, message: impl Into<String>) -> u64 {
        let message = message.into();
        self.generation += 1;
        self.notice = Some(Notice {
            message: message.clone(),
            generation: self.generation,
        });
        self.phase = ChatPhase::Error(message);
        self.generation
    }

    /// Clear the error and its notice.
    pub fn dismiss(&mut self) {
        self.notice = None;
        if matches!(self.phase, ChatPhase::Error(_)) {
            self.phase = ChatPhase::Idle;
        }
    }

    /// Dismiss only if the current notice is still the one from `generation`.
    pub fn expire_notice(&mut self, generation: u64) {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.generation == generation)
        {
            self.dismiss();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessageVm {
    pub id: MessageId,
    pub from_user: bool,
    pub text: String,
    /// Sanitized HTML for assistant replies; `None` for user messages.
    pub html: Option<String>,
    pub time_label: Option<String>,
}

#[must_use]
pub fn map_chat_messages(history: &ChatHistory, now: DateTime<Utc>) -> Vec<ChatMessageVm> {
    history
        .messages
        .iter()
        .map(|message| {
            let from_user = message.role == ChatRole::User;
            ChatMessageVm {
                id: message.id.clone(),
                from_user,
                text: message.content.clone(),
                html: (!from_user).then(|| markdown_to_html(&message.content)),
                time_label: message.created_at.map(|at| ago_label(at, now)),
            }
        })
        .collect()
}

#[must_use]
pub fn usage_label(usage: &ChatUsage) -> String {
    match usage.prompt_limit {
        Some(limit) => format!("{} of {limit} prompts used", usage.prompts_used),
        None => match usage.prompts_used {
            1 => "1 prompt used".to_string(),
            used => format!("{used} prompts used"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noun_core::model::ChatMessage;
    use noun_core::time::fixed_now;

    #[test]
    fn blank_draft_does_not_start_a_send() {
        let mut vm = ChatVm::new();
        assert_eq!(vm.begin_send(), None);
        vm.set_draft("   ");
        assert_eq!(vm.begin_send(), None);
        assert_eq!(vm.phase(), &ChatPhase::Idle);
    }

    #[test]
    fn second_send_is_blocked_until_the_first_finishes() {
        let mut vm = ChatVm::new();
        vm.set_draft("  What is a derivative? ");
        assert_eq!(vm.begin_send().as_deref(), Some("What is a derivative?"));
        assert!(vm.is_sending());
        assert_eq!(vm.begin_send(), None);

        vm.finish_ok();
        assert_eq!(vm.phase(), &ChatPhase::Idle);
        assert!(vm.draft().is_empty());
    }

    #[test]
    fn failure_keeps_draft_and_raises_notice() {
        let mut vm = ChatVm::new();
        vm.set_draft("hello");
        vm.begin_send();
        vm.finish_err("Unable to reach the server.");

        assert_eq!(vm.draft(), "hello");
        assert_eq!(
            vm.notice().map(|n| n.message.as_str()),
            Some("Unable to reach the server.")
        );
        assert!(vm.can_send());

        vm.dismiss();
        assert_eq!(vm.phase(), &ChatPhase::Idle);
        assert!(vm.notice().is_none());
    }

    #[test]
    fn stale_timer_does_not_clear_a_newer_notice() {
        let mut vm = ChatVm::new();
        vm.set_draft("hello");
        vm.begin_send();
        let first = vm.finish_err("Unable to reach the server.");

        vm.begin_send();
        let second = vm.finish_err("Something went wrong on our side.");
        assert_ne!(first, second);

        vm.expire_notice(first);
        assert_eq!(
            vm.notice().map(|n| n.message.as_str()),
            Some("Something went wrong on our side.")
        );

        vm.expire_notice(second);
        assert!(vm.notice().is_none());
        assert_eq!(vm.phase(), &ChatPhase::Idle);
    }

    #[test]
    fn assistant_replies_render_sanitized_markdown() {
        let history = ChatHistory {
            messages: vec![
                ChatMessage {
                    id: MessageId::new("1"),
                    role: ChatRole::User,
                    content: "**hi**".to_string(),
                    created_at: None,
                },
                ChatMessage {
                    id: MessageId::new("2"),
                    role: ChatRole::Assistant,
                    content: "**Hello**<script>alert(1)</script>".to_string(),
                    created_at: Some(fixed_now()),
                },
            ],
            usage: ChatUsage::default(),
        };
        let vms = map_chat_messages(&history, fixed_now());

        assert!(vms[0].from_user);
        assert_eq!(vms[0].html, None);
        let html = vms[1].html.as_deref().unwrap();
        assert!(html.contains("<strong>Hello</strong>"));
        assert!(!html.contains("script"));
        assert_eq!(vms[1].time_label.as_deref(), Some("Just now"));
    }

    #[test]
    fn usage_label_mentions_limit_when_known() {
        let limited = ChatUsage {
            prompts_used: 3,
            prompt_limit: Some(10),
        };
        assert_eq!(usage_label(&limited), "3 of 10 prompts used");
        assert_eq!(usage_label(&ChatUsage::default()), "0 prompts used");
    }
}
