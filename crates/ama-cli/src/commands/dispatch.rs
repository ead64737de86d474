use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Init(args) => commands::init::handle(&args, ctx, flags).await,
        Commands::Profile { action } => commands::profile::handle(&action, ctx, flags).await,
        Commands::Community { action } => commands::community::handle(&action, ctx, flags).await,
        Commands::Post { action } => commands::post::handle(&action, ctx, flags).await,
        Commands::Comment { action } => commands::comment::handle(&action, ctx, flags).await,
        Commands::Vote(args) => commands::vote::handle(&args, ctx, flags).await,
        Commands::Feed(args) => commands::feed::handle(&args, ctx, flags).await,
        Commands::Action { action } => commands::action::handle(&action, ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Promise { action } => commands::promise::handle(&action, ctx, flags).await,
        Commands::Attendance { action } => commands::attendance::handle(&action, ctx, flags).await,
        Commands::Query { action } => commands::query::handle(&action, ctx, flags).await,
        Commands::Division { action } => commands::division::handle(&action, ctx, flags).await,
        Commands::Institution { action } => {
            commands::institution::handle(&action, ctx, flags).await
        }
        Commands::Office { action } => commands::office::handle(&action, ctx, flags).await,
        Commands::Flag { action } => commands::flag::handle(&action, ctx, flags).await,
        Commands::Scorecard { action } => commands::scorecard::handle(&action, ctx, flags).await,
        Commands::Impact { action } => commands::impact::handle(&action, ctx, flags).await,
        Commands::Level { action } => commands::impact::handle_level(&action, ctx, flags).await,
        Commands::Stats(args) => commands::stats::handle(&args, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::Route(args) => commands::route::handle(&args, &ctx.config, flags).await,
        Commands::Moderate(args) => {
            commands::route::handle_moderate(&args, &ctx.config, flags).await
        }
    }
}

#[cfg(test)]
mod tests {
    use ama_config::AmaConfig;
    use clap::Parser;

    use super::dispatch;
    use crate::cli::Cli;
    use crate::context::AppContext;

    async fn run(ctx: &AppContext, args: &[&str]) -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(std::iter::once("ama").chain(args.iter().copied()))?;
        let flags = cli.global_flags();
        dispatch(cli.command, ctx, &flags).await
    }

    async fn memory_context() -> AppContext {
        let cli = Cli::try_parse_from(["ama", "--database", ":memory:", "--quiet", "init"])
            .expect("cli should parse");
        AppContext::init(AmaConfig::default(), &cli.global_flags())
            .await
            .expect("context should open")
    }

    #[tokio::test]
    async fn init_seeds_levels_once() {
        let ctx = memory_context().await;
        run(&ctx, &["init"]).await.expect("init should succeed");
        let first = ctx.service.list_goat_levels().await.expect("levels");
        run(&ctx, &["level", "seed"]).await.expect("seed should succeed");
        let second = ctx.service.list_goat_levels().await.expect("levels");
        assert!(!first.is_empty());
        assert_eq!(first.len(), second.len());
    }

    #[tokio::test]
    async fn flag_commands_round_trip_state() {
        let ctx = memory_context().await;
        run(&ctx, &["flag", "create", "civic_router", "--name", "Civic router"])
            .await
            .expect("create should succeed");
        run(&ctx, &["flag", "enable", "civic_router"])
            .await
            .expect("enable should succeed");
        assert!(ctx.service.is_feature_enabled("civic_router").await.expect("lookup"));
        run(&ctx, &["flag", "toggle", "civic_router"])
            .await
            .expect("toggle should succeed");
        assert!(!ctx.service.is_feature_enabled("civic_router").await.expect("lookup"));
    }

    #[tokio::test]
    async fn invalid_enum_values_are_reported() {
        let ctx = memory_context().await;
        let err = run(&ctx, &["action", "list", "--status", "closed"])
            .await
            .expect_err("status should be rejected");
        assert!(err.to_string().contains("invalid status 'closed'"));
    }

    #[tokio::test]
    async fn missing_records_surface_errors() {
        let ctx = memory_context().await;
        assert!(run(&ctx, &["scorecard", "show", "usr-00000000"]).await.is_err());
        assert!(run(&ctx, &["action", "get", "CA-2026-000000"]).await.is_err());
    }

    #[tokio::test]
    async fn communities_resolve_by_name() {
        let ctx = memory_context().await;
        run(&ctx, &["profile", "create", "wanjiru"])
            .await
            .expect("profile should be created");
        let user = ctx
            .service
            .get_profile_by_username("wanjiru")
            .await
            .expect("profile");
        run(&ctx, &["community", "create", "Eldoret", "--category", "location"])
            .await
            .expect("community should be created");
        run(&ctx, &["community", "join", "eldoret", "--user", user.id.as_str()])
            .await
            .expect("join should succeed");
        run(
            &ctx,
            &[
                "post",
                "create",
                "--author",
                user.id.as_str(),
                "--title",
                "Market",
                "--community",
                "eldoret",
            ],
        )
        .await
        .expect("post should be created");

        let community = ctx
            .service
            .get_community_by_name("eldoret")
            .await
            .expect("community");
        assert_eq!(community.member_count, 1);
        run(&ctx, &["feed", "--community", "eldoret"])
            .await
            .expect("feed should resolve the name");
        assert!(run(&ctx, &["feed", "--community", "nowhere"]).await.is_err());
    }

    #[tokio::test]
    async fn route_without_router_config_fails_fast() {
        let ctx = memory_context().await;
        let err = run(&ctx, &["route", "Flooded underpass"])
            .await
            .expect_err("router is not configured");
        assert!(format!("{err:#}").contains("router"));
    }
}
