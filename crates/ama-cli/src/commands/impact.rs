use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ImpactCommands, LevelCommands};
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama impact`.
pub async fn handle(
    action: &ImpactCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ImpactCommands::Show { user } => {
            output(&ctx.service.impact_summary(user).await?, flags.format)
        }
        ImpactCommands::Award { user, amount } => {
            ctx.service.award_xp(user, *amount).await?;
            output(&ctx.service.impact_summary(user).await?, flags.format)
        }
    }
}

/// Handle `ama level`.
pub async fn handle_level(
    action: &LevelCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LevelCommands::List => output(&ctx.service.list_goat_levels().await?, flags.format),
        LevelCommands::Seed => {
            let seeded = ctx.service.seed_default_goat_levels().await?;
            output(&serde_json::json!({ "seeded": seeded }), flags.format)
        }
    }
}
