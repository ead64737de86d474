use ama_core::enums::{AuditAction, EntityType};
use ama_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_optional_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = AuditFilter {
        entity_type: parse_optional_enum::<EntityType>(args.entity_type.as_deref(), "entity type")?,
        entity_id: args.entity_id.clone(),
        action: parse_optional_enum::<AuditAction>(args.action.as_deref(), "action")?,
        actor_id: args.by.clone(),
        limit: Some(effective_limit(flags.limit, ctx.config.general.default_limit)),
    };
    output(&ctx.service.query_audit(&filter).await?, flags.format)
}
