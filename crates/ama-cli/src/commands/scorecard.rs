use crate::cli::GlobalFlags;
use crate::cli::subcommands::ScorecardCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama scorecard`.
pub async fn handle(
    action: &ScorecardCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let card = match action {
        ScorecardCommands::Show { official } => ctx.service.get_scorecard(official).await?,
        ScorecardCommands::Compute { official } => {
            ctx.service.compute_official_scorecard(official).await?
        }
        ScorecardCommands::Refresh { official } => ctx.service.refresh_scorecard(official).await?,
    };
    output(&card, flags.format)
}
