use crate::cli::GlobalFlags;
use crate::cli::subcommands::InstitutionCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama institution`.
pub async fn handle(
    action: &InstitutionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        InstitutionCommands::Create {
            name,
            institution_type,
            division,
        } => output(
            &ctx.service
                .create_institution(name, institution_type, division.as_deref())
                .await?,
            flags.format,
        ),
        InstitutionCommands::Get { id } => {
            output(&ctx.service.get_institution(id).await?, flags.format)
        }
        InstitutionCommands::List { division } => output(
            &ctx.service.list_institutions(division.as_deref()).await?,
            flags.format,
        ),
    }
}
