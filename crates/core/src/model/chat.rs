use chrono::{DateTime, Utc};

use crate::model::MessageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Anything that is not explicitly the user is treated as the tutor.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("user") {
            Self::User
        } else {
            Self::Assistant
        }
    }
}

/// One entry in the AI tutor conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Prompt quota for the current user. `prompt_limit` of `None` means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatUsage {
    pub prompts_used: u32,
    pub prompt_limit: Option<u32>,
}

impl ChatUsage {
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.prompt_limit
            .map(|limit| limit.saturating_sub(self.prompts_used))
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == Some(0)
    }
}

/// Conversation history plus the quota counters returned alongside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatHistory {
    pub messages: Vec<ChatMessage>,
    pub usage: ChatUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_without_limit_is_never_exhausted() {
        let usage = ChatUsage {
            prompts_used: 500,
            prompt_limit: None,
        };
        assert_eq!(usage.remaining(), None);
        assert!(!usage.is_exhausted());
    }

    #[test]
    fn usage_saturates_at_zero() {
        let usage = ChatUsage {
            prompts_used: 12,
            prompt_limit: Some(10),
        };
        assert_eq!(usage.remaining(), Some(0));
        assert!(usage.is_exhausted());
    }

    #[test]
    fn role_parse_defaults_to_assistant() {
        assert_eq!(ChatRole::parse("USER"), ChatRole::User);
        assert_eq!(ChatRole::parse("assistant"), ChatRole::Assistant);
        assert_eq!(ChatRole::parse("system"), ChatRole::Assistant);
    }
}
