use ama_db::repos::division::NewDivision;
use ama_db::updates::division::DivisionUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DivisionCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama division`.
pub async fn handle(
    action: &DivisionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DivisionCommands::Create {
            name,
            level,
            country,
            parent,
            code,
            population,
        } => {
            let input = NewDivision {
                country_code: country.clone().unwrap_or_default(),
                name: name.clone(),
                governance_level: level.clone(),
                parent_id: parent.clone(),
                division_code: code.clone(),
                population: *population,
            };
            output(&ctx.service.create_division(input).await?, flags.format)
        }
        DivisionCommands::Get { id } => output(&ctx.service.get_division(id).await?, flags.format),
        DivisionCommands::Update {
            id,
            name,
            level,
            code,
            population,
        } => {
            let mut builder = DivisionUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name.as_str());
            }
            if let Some(level) = level {
                builder = builder.governance_level(level.as_str());
            }
            if code.is_some() {
                builder = builder.division_code(code.clone());
            }
            if population.is_some() {
                builder = builder.population(*population);
            }
            output(&ctx.service.update_division(id, builder.build()).await?, flags.format)
        }
        DivisionCommands::Delete { id } => {
            ctx.service.delete_division(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        DivisionCommands::Children { id } => {
            output(&ctx.service.list_child_divisions(id).await?, flags.format)
        }
        DivisionCommands::Roots { country } => output(
            &ctx.service.list_root_divisions(country.as_deref()).await?,
            flags.format,
        ),
        DivisionCommands::Ancestors { id } => {
            output(&ctx.service.division_ancestors(id).await?, flags.format)
        }
    }
}
