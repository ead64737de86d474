use ama_core::ids::{PREFIX_COMMUNITY, has_prefix};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CommunityCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Accept either a community ID or its name.
pub async fn resolve_community_id(ctx: &AppContext, key: &str) -> anyhow::Result<String> {
    if has_prefix(key, PREFIX_COMMUNITY) {
        return Ok(key.to_string());
    }
    Ok(ctx.service.get_community_by_name(key).await?.id)
}

/// Handle `ama community`.
pub async fn handle(
    action: &CommunityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    match action {
        CommunityCommands::Create {
            name,
            display_name,
            description,
            category,
            by,
        } => {
            let community = ctx
                .service
                .create_community(
                    name,
                    display_name,
                    description.as_deref(),
                    category,
                    by.as_deref(),
                )
                .await?;
            output(&community, flags.format)
        }
        CommunityCommands::Get { community } => {
            let id = resolve_community_id(ctx, community).await?;
            output(&ctx.service.get_community(&id).await?, flags.format)
        }
        CommunityCommands::List { category } => output(
            &ctx.service
                .list_communities(category.as_deref(), limit)
                .await?,
            flags.format,
        ),
        CommunityCommands::Join { community, user } => {
            let id = resolve_community_id(ctx, community).await?;
            output(&ctx.service.join_community(&id, user).await?, flags.format)
        }
        CommunityCommands::Leave { community, user } => {
            let id = resolve_community_id(ctx, community).await?;
            output(&ctx.service.leave_community(&id, user).await?, flags.format)
        }
        CommunityCommands::Members { community } => {
            let id = resolve_community_id(ctx, community).await?;
            output(
                &ctx.service.list_community_members(&id, limit).await?,
                flags.format,
            )
        }
    }
}
