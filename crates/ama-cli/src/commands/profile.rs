use ama_core::enums::AppRole;
use ama_core::impact::VerificationFlags;
use ama_db::updates::profile::ProfileUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProfileCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_enum, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama profile`.
pub async fn handle(
    action: &ProfileCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProfileCommands::Create {
            username,
            display_name,
            role,
        } => {
            let role: AppRole = parse_enum(role, "role")?;
            let profile = ctx
                .service
                .create_profile(username, display_name.as_deref(), role)
                .await?;
            output(&profile, flags.format)
        }
        ProfileCommands::Get { id } => output(&ctx.service.get_profile(id).await?, flags.format),
        ProfileCommands::Lookup { username } => output(
            &ctx.service.get_profile_by_username(username).await?,
            flags.format,
        ),
        ProfileCommands::List => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            output(&ctx.service.list_profiles(limit).await?, flags.format)
        }
        ProfileCommands::Update {
            id,
            display_name,
            role,
            ward,
            constituency,
            county,
        } => {
            let mut builder = ProfileUpdateBuilder::new();
            if display_name.is_some() {
                builder = builder.display_name(display_name.clone());
            }
            if let Some(role) = parse_optional_enum::<AppRole>(role.as_deref(), "role")? {
                builder = builder.role(role);
            }
            if ward.is_some() || constituency.is_some() || county.is_some() {
                builder = builder.location(ward.clone(), constituency.clone(), county.clone());
            }
            let profile = ctx.service.update_profile(id, builder.build()).await?;
            output(&profile, flags.format)
        }
        ProfileCommands::Verify {
            id,
            resident,
            user,
            official,
        } => {
            let verification = VerificationFlags {
                is_verified_resident: *resident,
                is_verified_user: *user,
                is_verified_official: *official,
            };
            let profile = ctx
                .service
                .set_verification_flags(id, verification)
                .await?;
            output(&profile, flags.format)
        }
    }
}
