use ama_core::enums::PromiseStatus;
use ama_db::updates::promise::PromiseUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PromiseCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama promise`.
pub async fn handle(
    action: &PromiseCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PromiseCommands::Create {
            official,
            title,
            description,
            category,
        } => {
            let promise = ctx
                .service
                .create_promise(official, title, description.as_deref(), category.as_deref())
                .await?;
            output(&promise, flags.format)
        }
        PromiseCommands::Get { id } => output(&ctx.service.get_promise(id).await?, flags.format),
        PromiseCommands::List { official } => output(
            &ctx.service.list_promises_for_official(official).await?,
            flags.format,
        ),
        PromiseCommands::Update {
            id,
            title,
            description,
            category,
            progress,
        } => {
            let mut builder = PromiseUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title.as_str());
            }
            if description.is_some() {
                builder = builder.description(description.clone());
            }
            if category.is_some() {
                builder = builder.category(category.clone());
            }
            if let Some(progress) = progress {
                builder = builder.progress_percentage(*progress);
            }
            output(&ctx.service.update_promise(id, builder.build()).await?, flags.format)
        }
        PromiseCommands::Transition { id, status, reason } => {
            let status: PromiseStatus = parse_enum(status, "status")?;
            let promise = ctx
                .service
                .transition_promise(id, status, reason.as_deref())
                .await?;
            output(&promise, flags.format)
        }
    }
}
