//! Feed ranking, pagination and content previews.
//!
//! The hot and rising formulas are placeholders inherited from the product
//! and may be retuned; only their ordering contract matters to callers.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::entities::Post;
use crate::enums::FeedSort;

pub const DEFAULT_POSTS_PER_PAGE: u32 = 20;
pub const DEFAULT_TRENDING_LIMIT: u32 = 10;
pub const DEFAULT_PREVIEW_LENGTH: usize = 280;

/// Whole hours since `created_at`, never negative.
#[must_use]
pub fn age_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_hours().max(0)
}

/// `upvotes + comment_count - floor(age_hours)`.
#[must_use]
pub fn hot_score(post: &Post, now: DateTime<Utc>) -> i64 {
    i64::from(post.upvotes) + i64::from(post.comment_count) - age_hours(post.created_at, now)
}

/// `upvotes - downvotes`.
#[must_use]
pub fn top_score(post: &Post) -> i64 {
    post.net_votes()
}

/// `(upvotes - downvotes) / max(1, floor(age_hours))`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rising_score(post: &Post, now: DateTime<Utc>) -> f64 {
    post.net_votes() as f64 / age_hours(post.created_at, now).max(1) as f64
}

fn tie_break(a: &Post, b: &Post) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort posts in place, best first.
pub fn sort_posts(posts: &mut [Post], sort: FeedSort, now: DateTime<Utc>) {
    match sort {
        FeedSort::New => posts.sort_by(tie_break),
        FeedSort::Top => posts.sort_by(|a, b| {
            top_score(b)
                .cmp(&top_score(a))
                .then_with(|| tie_break(a, b))
        }),
        FeedSort::Hot => posts.sort_by(|a, b| {
            hot_score(b, now)
                .cmp(&hot_score(a, now))
                .then_with(|| tie_break(a, b))
        }),
        FeedSort::Rising => posts.sort_by(|a, b| {
            rising_score(b, now)
                .total_cmp(&rising_score(a, now))
                .then_with(|| tie_break(a, b))
        }),
    }
}

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub index: u32,
    pub size: u32,
}

impl Page {
    #[must_use]
    pub const fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.index as u64 * self.size as u64
    }

    /// A next page exists iff this one came back full.
    #[must_use]
    pub const fn has_next(&self, returned: usize) -> bool {
        self.size > 0 && returned >= self.size as usize
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_POSTS_PER_PAGE)
    }
}

/// Truncate to `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn content_preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        None => content.to_string(),
        Some((byte_idx, _)) => format!("{}...", content[..byte_idx].trim_end()),
    }
}
