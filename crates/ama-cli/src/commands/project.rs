use ama_core::enums::ProjectStatus;
use ama_db::repos::project::{NewProject, ProjectFilter};
use ama_db::updates::project::ProjectUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_enum, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create {
            title,
            official,
            institution,
            description,
            category,
            budget,
            county,
            constituency,
            ward,
        } => {
            let input = NewProject {
                title: title.clone(),
                official_id: official.clone(),
                institution_id: institution.clone(),
                description: description.clone(),
                category: category.clone(),
                budget_allocated: *budget,
                county: county.clone(),
                constituency: constituency.clone(),
                ward: ward.clone(),
            };
            output(&ctx.service.create_project(input).await?, flags.format)
        }
        ProjectCommands::Get { id } => output(&ctx.service.get_project(id).await?, flags.format),
        ProjectCommands::List {
            official,
            status,
            county,
            verified_only,
        } => {
            let filter = ProjectFilter {
                official_id: official.clone(),
                status: parse_optional_enum::<ProjectStatus>(status.as_deref(), "status")?,
                county: county.clone(),
                verified_only: *verified_only,
                limit: Some(effective_limit(flags.limit, ctx.config.general.default_limit)),
            };
            output(&ctx.service.list_projects(&filter).await?, flags.format)
        }
        ProjectCommands::Update {
            id,
            title,
            description,
            category,
            progress,
            budget_allocated,
            budget_used,
            official,
        } => {
            let mut builder = ProjectUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title.as_str());
            }
            if description.is_some() {
                builder = builder.description(description.clone());
            }
            if category.is_some() {
                builder = builder.category(category.clone());
            }
            if let Some(progress) = progress {
                builder = builder.progress_percentage(*progress);
            }
            if budget_allocated.is_some() {
                builder = builder.budget_allocated(*budget_allocated);
            }
            if budget_used.is_some() {
                builder = builder.budget_used(*budget_used);
            }
            if official.is_some() {
                builder = builder.official_id(official.clone());
            }
            output(&ctx.service.update_project(id, builder.build()).await?, flags.format)
        }
        ProjectCommands::Transition { id, status, reason } => {
            let status: ProjectStatus = parse_enum(status, "status")?;
            let project = ctx
                .service
                .transition_project(id, status, reason.as_deref())
                .await?;
            output(&project, flags.format)
        }
        ProjectCommands::Verify { id, revoke } => {
            output(&ctx.service.verify_project(id, !revoke).await?, flags.format)
        }
        ProjectCommands::Delete { id } => {
            ctx.service.delete_project(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
