use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct InitResponse<'a> {
    database: &'a str,
    goat_levels_seeded: usize,
    goat_levels_total: usize,
}

/// Handle `ama init`. Opening the context already ran the migrations.
pub async fn handle(args: &InitArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let seeded = if args.no_seed {
        0
    } else {
        ctx.service.seed_default_goat_levels().await?
    };
    let total = ctx.service.list_goat_levels().await?.len();

    tracing::info!(database = %ctx.database_path, seeded, "ama initialized");
    output(
        &InitResponse {
            database: &ctx.database_path,
            goat_levels_seeded: seeded,
            goat_levels_total: total,
        },
        flags.format,
    )
}
