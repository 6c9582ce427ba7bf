use chrono::{DateTime, Utc};
use noun_core::model::{ForumPost, PostId};

use crate::vm::time_fmt::ago_label;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForumHighlightVm {
    pub id: PostId,
    pub title: String,
    pub author: String,
    pub avatar: String,
    pub posted_label: String,
    pub views_label: String,
    pub replies_label: String,
}

#[must_use]
pub fn map_forum_highlights(posts: &[ForumPost], now: DateTime<Utc>) -> Vec<ForumHighlightVm> {
    posts.iter().map(|post| map_forum_highlight(post, now)).collect()
}

#[must_use]
pub fn map_forum_highlight(post: &ForumPost, now: DateTime<Utc>) -> ForumHighlightVm {
    let author = post.author.first_name().to_string();
    let avatar = author
        .chars()
        .next()
        .map_or_else(|| "?".to_string(), |ch| ch.to_uppercase().to_string());

    ForumHighlightVm {
        id: post.id.clone(),
        title: post.title.clone(),
        author,
        avatar,
        posted_label: ago_label(post.created_at, now),
        views_label: count_label(post.views, "view"),
        replies_label: count_label(post.reply_count, "reply"),
    }
}

fn count_label(count: u64, noun: &str) -> String {
    match (count, noun) {
        (1, _) => format!("1 {noun}"),
        (_, "reply") => format!("{count} replies"),
        _ => format!("{count} {noun}s"),
    }
}
