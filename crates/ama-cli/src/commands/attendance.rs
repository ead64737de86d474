use crate::cli::GlobalFlags;
use crate::cli::subcommands::AttendanceCommands;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ama attendance`.
pub async fn handle(
    action: &AttendanceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AttendanceCommands::Record {
            official,
            date,
            absent,
        } => {
            let session_date = parse_date(date, "date")?;
            let session = ctx
                .service
                .record_attendance(official, session_date, !absent)
                .await?;
            output(&session, flags.format)
        }
        AttendanceCommands::List { official } => {
            output(&ctx.service.list_attendance(official).await?, flags.format)
        }
    }
}
