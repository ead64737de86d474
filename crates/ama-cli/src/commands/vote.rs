use ama_core::enums::{VoteTarget, VoteType};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::VoteArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama vote`. Repeating a vote removes it; the opposite vote replaces it.
pub async fn handle(args: &VoteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let target: VoteTarget = parse_enum(&args.target, "target")?;
    let direction: VoteType = parse_enum(&args.direction, "direction")?;
    let response = ctx
        .service
        .cast_vote(&args.user, target, &args.target_id, direction)
        .await?;
    output(&response, flags.format)
}
