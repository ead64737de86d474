use ama_core::enums::{ActionLevel, CivicActionStatus, IssueCategory, Urgency};
use ama_core::ids::CASE_NUMBER_PREFIX;
use ama_db::repos::civic_action::{CivicActionFilter, NewCivicAction};
use ama_db::updates::civic_action::CivicActionPatchBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ActionCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_enum, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama action`.
pub async fn handle(
    action: &ActionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ActionCommands::Report {
            user,
            category,
            title,
            description,
            urgency,
            level,
            location,
            lat,
            lng,
            ward,
            constituency,
            county,
            private,
        } => {
            let category: IssueCategory = parse_enum(category, "category")?;
            let mut input = NewCivicAction::new(user.as_str(), category, title.as_str());
            if let Some(urgency) = parse_optional_enum::<Urgency>(urgency.as_deref(), "urgency")? {
                input.urgency = urgency;
            }
            input.action_level = parse_optional_enum::<ActionLevel>(level.as_deref(), "level")?;
            input.description.clone_from(description);
            input.location_text.clone_from(location);
            input.latitude = *lat;
            input.longitude = *lng;
            input.ward_id.clone_from(ward);
            input.constituency_id.clone_from(constituency);
            input.county_id.clone_from(county);
            input.is_public = !private;

            let created = ctx.service.report_civic_action(input).await?;
            output(&created, flags.format)
        }
        ActionCommands::Get { id } => {
            let id = resolve_action_id(ctx, id).await?;
            output(&ctx.service.civic_action_detail(&id).await?, flags.format)
        }
        ActionCommands::List {
            status,
            category,
            level,
            user,
            public_only,
        } => {
            let filter = CivicActionFilter {
                status: parse_optional_enum::<CivicActionStatus>(status.as_deref(), "status")?,
                category: parse_optional_enum::<IssueCategory>(category.as_deref(), "category")?,
                action_level: parse_optional_enum::<ActionLevel>(level.as_deref(), "level")?,
                user_id: user.clone(),
                public_only: *public_only,
                limit: Some(effective_limit(flags.limit, ctx.config.general.default_limit)),
            };
            output(&ctx.service.list_civic_actions(&filter).await?, flags.format)
        }
        ActionCommands::Update {
            id,
            title,
            description,
            category,
            urgency,
            location,
            public,
        } => {
            let id = resolve_action_id(ctx, id).await?;
            let mut builder = CivicActionPatchBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title.as_str());
            }
            if description.is_some() {
                builder = builder.description(description.clone());
            }
            if let Some(category) = parse_optional_enum::<IssueCategory>(category.as_deref(), "category")? {
                builder = builder.category(category);
            }
            if let Some(urgency) = parse_optional_enum::<Urgency>(urgency.as_deref(), "urgency")? {
                builder = builder.urgency(urgency);
            }
            if location.is_some() {
                builder = builder.location_text(location.clone());
            }
            if let Some(public) = public {
                builder = builder.is_public(*public);
            }
            output(
                &ctx.service.update_civic_action(&id, builder.build()).await?,
                flags.format,
            )
        }
        ActionCommands::Transition {
            id,
            status,
            comment,
        } => {
            let id = resolve_action_id(ctx, id).await?;
            let status: CivicActionStatus = parse_enum(status, "status")?;
            let response = ctx
                .service
                .transition_civic_action(&id, status, comment.as_deref())
                .await?;
            output(&response, flags.format)
        }
        ActionCommands::History { id } => {
            let id = resolve_action_id(ctx, id).await?;
            output(&ctx.service.list_civic_action_updates(&id).await?, flags.format)
        }
        ActionCommands::Support { id, user } => {
            let id = resolve_action_id(ctx, id).await?;
            let (supported, support_count) =
                ctx.service.toggle_civic_action_support(&id, user).await?;
            output(
                &json!({
                    "action_id": id,
                    "user_id": user,
                    "supported": supported,
                    "support_count": support_count,
                }),
                flags.format,
            )
        }
    }
}

/// Accept either an action ID or its case number.
async fn resolve_action_id(ctx: &AppContext, raw: &str) -> anyhow::Result<String> {
    if is_case_number(raw) {
        Ok(ctx.service.get_civic_action_by_case(raw).await?.id)
    } else {
        Ok(raw.to_string())
    }
}

fn is_case_number(raw: &str) -> bool {
    raw.split_once('-')
        .is_some_and(|(head, _)| head.eq_ignore_ascii_case(CASE_NUMBER_PREFIX))
}
