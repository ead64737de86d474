use ama_db::updates::post::PostUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PostCommands;
use crate::commands::community::resolve_community_id;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama post`.
pub async fn handle(action: &PostCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    match action {
        PostCommands::Create {
            author,
            title,
            content,
            tags,
            community,
        } => {
            let community = match community {
                Some(key) => Some(resolve_community_id(ctx, key).await?),
                None => None,
            };
            let post = ctx
                .service
                .create_post(author, title, content, tags, community.as_deref())
                .await?;
            output(&post, flags.format)
        }
        PostCommands::Get { id } => output(&ctx.service.get_post(id).await?, flags.format),
        PostCommands::Update {
            id,
            title,
            content,
            tags,
            community,
        } => {
            let mut builder = PostUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title.as_str());
            }
            if let Some(content) = content {
                builder = builder.content(content.as_str());
            }
            if !tags.is_empty() {
                builder = builder.tags(tags.clone());
            }
            if let Some(key) = community {
                builder = builder.community_id(Some(resolve_community_id(ctx, key).await?));
            }
            output(&ctx.service.update_post(id, builder.build()).await?, flags.format)
        }
        PostCommands::Delete { id } => {
            ctx.service.delete_post(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        PostCommands::List { author } => output(
            &ctx.service.list_posts_by_author(author, limit).await?,
            flags.format,
        ),
        PostCommands::Search { query } => {
            output(&ctx.service.search_posts(query, limit).await?, flags.format)
        }
    }
}
