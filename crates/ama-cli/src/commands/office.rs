use ama_core::enums::VerificationStatus;
use ama_db::repos::institution::NewOfficeHolder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OfficeCommands;
use crate::commands::shared::parse::{parse_date, parse_enum, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama office`.
pub async fn handle(
    action: &OfficeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OfficeCommands::Claim {
            user,
            position,
            institution,
            division,
            term_start,
            term_end,
        } => {
            let input = NewOfficeHolder {
                user_id: user.clone(),
                position_title: position.clone(),
                institution_id: institution.clone(),
                division_id: division.clone(),
                term_start: term_start
                    .as_deref()
                    .map(|raw| parse_date(raw, "term-start"))
                    .transpose()?,
                term_end: term_end
                    .as_deref()
                    .map(|raw| parse_date(raw, "term-end"))
                    .transpose()?,
            };
            output(&ctx.service.claim_office(input).await?, flags.format)
        }
        OfficeCommands::Get { id } => {
            output(&ctx.service.get_office_holder(id).await?, flags.format)
        }
        OfficeCommands::List { status } => {
            let status =
                parse_optional_enum::<VerificationStatus>(status.as_deref(), "status")?;
            output(&ctx.service.list_office_holders(status).await?, flags.format)
        }
        OfficeCommands::Verify { id, decision } => {
            let decision: VerificationStatus = parse_enum(decision, "decision")?;
            output(
                &ctx.service.verify_office_holder(id, decision).await?,
                flags.format,
            )
        }
        OfficeCommands::Deactivate { id } => {
            output(&ctx.service.deactivate_office_holder(id).await?, flags.format)
        }
    }
}
