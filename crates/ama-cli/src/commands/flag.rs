use ama_core::responses::FeatureCheckResponse;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FlagCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama flag`.
pub async fn handle(action: &FlagCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        FlagCommands::Create {
            key,
            name,
            category,
            description,
            enabled,
        } => {
            let flag = ctx
                .service
                .upsert_feature_flag(key, name, category, description.as_deref(), *enabled)
                .await?;
            output(&flag, flags.format)
        }
        FlagCommands::Get { key } => output(&ctx.service.get_feature_flag(key).await?, flags.format),
        FlagCommands::Check { key } => {
            let enabled = ctx.service.is_feature_enabled(key).await?;
            output(
                &FeatureCheckResponse {
                    feature_key: key.clone(),
                    enabled,
                },
                flags.format,
            )
        }
        FlagCommands::Toggle { key } => {
            output(&ctx.service.toggle_feature_flag(key).await?, flags.format)
        }
        FlagCommands::Enable { key } => {
            output(&ctx.service.set_feature_flag(key, true).await?, flags.format)
        }
        FlagCommands::Disable { key } => {
            output(&ctx.service.set_feature_flag(key, false).await?, flags.format)
        }
        FlagCommands::List { category } => output(
            &ctx.service.list_feature_flags(category.as_deref()).await?,
            flags.format,
        ),
    }
}
