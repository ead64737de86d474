use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CommentCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama comment`.
pub async fn handle(
    action: &CommentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CommentCommands::Create {
            post,
            author,
            content,
            parent,
        } => {
            let comment = ctx
                .service
                .create_comment(post, author, content, parent.as_deref())
                .await?;
            output(&comment, flags.format)
        }
        CommentCommands::Get { id } => output(&ctx.service.get_comment(id).await?, flags.format),
        CommentCommands::List {
            post,
            include_hidden,
        } => output(
            &ctx.service.list_comments(post, *include_hidden).await?,
            flags.format,
        ),
        CommentCommands::Delete { id } => {
            ctx.service.delete_comment(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        CommentCommands::Hide { id, reason } => output(
            &ctx.service.hide_comment(id, reason.as_deref()).await?,
            flags.format,
        ),
        CommentCommands::Unhide { id } => {
            output(&ctx.service.unhide_comment(id).await?, flags.format)
        }
    }
}
