use crate::cli::GlobalFlags;
use crate::cli::subcommands::QueryCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama query`.
pub async fn handle(action: &QueryCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        QueryCommands::Ask {
            official,
            asker,
            question,
        } => output(
            &ctx.service.ask_query(official, asker, question).await?,
            flags.format,
        ),
        QueryCommands::Get { id } => output(&ctx.service.get_query(id).await?, flags.format),
        QueryCommands::Respond { id, response } => output(
            &ctx.service.respond_to_query(id, response).await?,
            flags.format,
        ),
        QueryCommands::List {
            official,
            unanswered,
        } => output(
            &ctx
                .service
                .list_queries_for_official(official, *unanswered)
                .await?,
            flags.format,
        ),
    }
}
