use ama_config::AmaConfig;
use ama_router::LocationContext;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ModerateArgs, RouteArgs};
use crate::context::router_client;
use crate::output::output;

/// Handle `ama route`.
pub async fn handle(args: &RouteArgs, config: &AmaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = router_client(config)?;
    let location = LocationContext {
        lat: args.lat,
        lng: args.lng,
        ward: args.ward.clone(),
        constituency: args.constituency.clone(),
        county: args.county.clone(),
        text: args.location.clone(),
    };
    let result = client
        .route(&args.description, &location, &args.photos)
        .await?;
    output(&result, flags.format)
}

/// Handle `ama moderate`.
pub async fn handle_moderate(
    args: &ModerateArgs,
    config: &AmaConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = router_client(config)?;
    let result = client.moderate(&args.content_type, &args.content).await?;
    output(&result, flags.format)
}
