use serde::Serialize;
use stockdeck_core::{DetailView, LoadStatus, RecordId, ViewState, WatchlistConfig};

use crate::cli::ShowArgs;
use crate::error::CliError;
use crate::output::detail_frame;

use super::{build_session, fetch_with_retries, CommandResult};

#[derive(Debug, Serialize)]
struct ShowResponseData {
    id: RecordId,
    load: LoadStatus,
    detail: Option<DetailView>,
}

pub async fn run(args: &ShowArgs, config: &WatchlistConfig) -> Result<CommandResult, CliError> {
    let id: RecordId = args.id.parse().unwrap_or_else(|never| match never {});

    let mut session = build_session(config, ViewState::default())?;
    let fetched = fetch_with_retries(&mut session, args.retries).await;
    session.select(id.clone());

    let detail = session.detail();
    let mut warnings = fetched.warnings;
    if let Some(detail) = &detail {
        warnings.extend(
            detail
                .issues()
                .iter()
                .map(|issue| format!("record {id}: {issue}")),
        );
    }

    let table = detail.as_ref().map(detail_frame).unwrap_or_default();
    let data = serde_json::to_value(ShowResponseData {
        id,
        load: session.load_state().status(),
        detail,
    })?;

    Ok(CommandResult::ok(data, session.source_id())
        .with_warnings(warnings)
        .with_errors(fetched.errors)
        .with_latency(fetched.latency_ms)
        .with_table(table))
}
