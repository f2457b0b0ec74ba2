use stockdeck_core::WatchlistConfig;

use crate::cli::ListArgs;
use crate::error::CliError;
use crate::output::snapshot_frame;

use super::{build_session, fetch_with_retries, to_view_state, CommandResult};

pub async fn run(args: &ListArgs, config: &WatchlistConfig) -> Result<CommandResult, CliError> {
    let mut session = build_session(config, to_view_state(&args.view))?;
    let fetched = fetch_with_retries(&mut session, args.retries).await;

    session.go_to_page(args.page);
    if session.view().current_page() != args.page {
        tracing::debug!(
            requested = args.page,
            shown = session.view().current_page(),
            "page clamped"
        );
    }

    let snapshot = session.snapshot();
    let table = snapshot_frame(&snapshot);
    let data = serde_json::to_value(&snapshot)?;

    Ok(CommandResult::ok(data, session.source_id())
        .with_warnings(fetched.warnings)
        .with_errors(fetched.errors)
        .with_latency(fetched.latency_ms)
        .with_table(table))
}
