use std::fmt::Write as _;

use serde::Serialize;
use stockdeck_core::{RecordId, WatchlistConfig};

use crate::error::CliError;

use super::{load_dataset, CommandResult};

#[derive(Debug, Serialize)]
struct SampleResponseData {
    records: usize,
    fetch_limit: usize,
    failure_rate: f64,
    latency_ms: u64,
    symbols: Vec<String>,
    incomplete: Vec<RecordId>,
}

pub fn run(config: &WatchlistConfig) -> Result<CommandResult, CliError> {
    let dataset = load_dataset(config)?;

    let symbols = dataset
        .records()
        .iter()
        .filter_map(|record| record.symbol().map(str::to_owned))
        .collect::<Vec<_>>();
    let incomplete = dataset
        .records()
        .iter()
        .filter(|record| !record.is_complete())
        .map(|record| record.id.clone())
        .collect::<Vec<_>>();

    let mut table = String::new();
    let _ = writeln!(
        table,
        "{} records, {} per fetch, failure rate {}, latency {} ms",
        dataset.len(),
        config.fetch_limit,
        config.failure_rate,
        config.latency_ms
    );
    let _ = writeln!(table, "symbols: {}", symbols.join(", "));
    if !incomplete.is_empty() {
        let ids = incomplete.iter().map(ToString::to_string).collect::<Vec<_>>();
        let _ = writeln!(table, "incomplete ids: {}", ids.join(", "));
    }

    let data = serde_json::to_value(SampleResponseData {
        records: dataset.len(),
        fetch_limit: config.fetch_limit,
        failure_rate: config.failure_rate,
        latency_ms: config.latency_ms,
        symbols,
        incomplete,
    })?;

    Ok(CommandResult::ok(data, "dataset").with_table(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_the_bundled_dataset() {
        let result = run(&WatchlistConfig::default()).expect("sample runs");
        assert_eq!(result.source, "dataset");
        assert_eq!(result.data["fetch_limit"], 27);
        assert!(result.data["records"].as_u64().is_some_and(|count| count > 27));
        assert!(result.table.is_some_and(|table| table.contains("TCS")));
    }
}
