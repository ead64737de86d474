//! Feed paging and preview configuration.

use ama_core::enums::FeedSort;
use ama_core::feed::{DEFAULT_POSTS_PER_PAGE, DEFAULT_PREVIEW_LENGTH, DEFAULT_TRENDING_LIMIT};
use serde::{Deserialize, Serialize};

const fn default_posts_per_page() -> u32 {
    DEFAULT_POSTS_PER_PAGE
}

const fn default_trending_limit() -> u32 {
    DEFAULT_TRENDING_LIMIT
}

const fn default_preview_length() -> usize {
    DEFAULT_PREVIEW_LENGTH
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: u32,

    #[serde(default = "default_trending_limit")]
    pub trending_limit: u32,

    /// Characters of post content shown in feed listings.
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,

    #[serde(default)]
    pub default_sort: FeedSort,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            posts_per_page: default_posts_per_page(),
            trending_limit: default_trending_limit(),
            preview_length: default_preview_length(),
            default_sort: FeedSort::default(),
        }
    }
}
