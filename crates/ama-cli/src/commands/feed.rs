use ama_core::enums::FeedSort;
use ama_core::feed::Page;
use chrono::Utc;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FeedArgs;
use crate::commands::community::resolve_community_id;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_optional_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama feed`.
pub async fn handle(args: &FeedArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let feed = &ctx.config.feed;

    if args.trending {
        let limit = effective_limit(flags.limit, feed.trending_limit);
        let posts = ctx.service.trending_posts_at(limit, Utc::now()).await?;
        return output(&posts, flags.format);
    }

    let sort = parse_optional_enum::<FeedSort>(args.sort.as_deref(), "sort")?
        .unwrap_or(feed.default_sort);
    let page = Page::new(args.page, effective_limit(flags.limit, feed.posts_per_page));
    let community = match &args.community {
        Some(key) => Some(resolve_community_id(ctx, key).await?),
        None => None,
    };
    let result = ctx
        .service
        .feed_page(sort, page, community.as_deref(), feed.preview_length)
        .await?;
    output(&result, flags.format)
}
