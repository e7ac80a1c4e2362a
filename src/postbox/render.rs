//! Formatting of posts for the surface.
//!
//! Pure string building: summaries for list/search output, the full single
//! post view, and the nanosecond-to-local-time conversion used by both.

use chrono::{DateTime, Local};

use crate::model::Post;

/// Summaries show at most this many characters of content.
const PREVIEW_LEN: usize = 100;

pub const NO_POSTS_TEXT: &str = "No posts found.";
pub const POST_NOT_FOUND_TEXT: &str = "Post not found.";

/// Convert a service timestamp (nanoseconds since epoch) to local calendar
/// time. The service resolution is nanoseconds but rendering only needs
/// milliseconds.
pub fn format_timestamp(nanos: i64) -> String {
    let millis = nanos / 1_000_000;
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => millis.to_string(),
    }
}

/// One-post summary block: title, timestamp, tags, truncated content.
pub fn summarize(post: &Post) -> String {
    let preview: String = post.content.chars().take(PREVIEW_LEN).collect();
    format!(
        "{}\n{}\n{}\n{}...",
        post.title,
        format_timestamp(post.timestamp),
        post.tags.join(", "),
        preview
    )
}

/// Full single-post view with untruncated content.
pub fn full_post(post: &Post) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        post.title,
        format_timestamp(post.timestamp),
        post.tags.join(", "),
        post.content
    )
}

/// Render a sequence of posts as summary blocks separated by blank lines.
pub fn post_list(posts: &[Post]) -> String {
    if posts.is_empty() {
        return NO_POSTS_TEXT.to_string();
    }
    posts
        .iter()
        .map(summarize)
        .collect::<Vec<_>>()
        .join("\n\n")
}
