mod list;
mod sample;
mod show;
mod watch;

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use stockdeck_core::{
    Dataset, Density, Envelope, EnvelopeError, EnvelopeMeta, FetchOutcome, Orientation,
    SimulatedSource, SortDirection, SortKey, ViewState, WatchlistConfig, WatchlistSession,
};
use uuid::Uuid;

use crate::cli::{
    Cli, Command, DensitySelector, DirectionSelector, OrientationSelector, SortSelector, ViewArgs,
};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
    pub source: String,
    /// Pre-rendered human frame for `--format table`.
    pub table: Option<String>,
}

impl CommandResult {
    pub fn ok(data: Value, source: impl Into<String>) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            latency_ms: 0,
            source: source.into(),
            table: None,
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_table(mut self, table: String) -> Self {
        self.table = Some(table);
        self
    }
}

/// Envelope plus the optional human frame it was rendered from.
pub struct CommandOutput {
    pub envelope: Envelope<Value>,
    pub table: Option<String>,
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let config = load_config(cli)?;

    let command_result = match &cli.command {
        Command::List(args) => list::run(args, &config).await?,
        Command::Show(args) => show::run(args, &config).await?,
        Command::Watch(args) => watch::run(args, &config, cli.format).await?,
        Command::Sample => sample::run(&config)?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
        latency_ms,
        source,
        table,
    } = command_result;

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), source, latency_ms)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    let envelope = Envelope::with_errors(meta, data, errors)?;
    Ok(CommandOutput { envelope, table })
}

/// Defaults, then `--config`, then `STOCKDECK_*`, then flags.
fn load_config(cli: &Cli) -> Result<WatchlistConfig, CliError> {
    let base = match &cli.config {
        Some(path) => WatchlistConfig::from_file(path)?,
        None => WatchlistConfig::default(),
    };
    let mut config = base.with_env_overrides();

    if let Some(path) = &cli.dataset {
        config.dataset_path = Some(path.clone());
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(latency_ms) = cli.latency_ms {
        config.latency_ms = latency_ms;
    }
    if let Some(failure_rate) = cli.failure_rate {
        config.failure_rate = failure_rate;
    }

    config.validate()?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

fn load_dataset(config: &WatchlistConfig) -> Result<Dataset, CliError> {
    let dataset = match &config.dataset_path {
        Some(path) => Dataset::from_path(path)?,
        None => Dataset::bundled()?,
    };
    Ok(dataset)
}

fn build_session(config: &WatchlistConfig, view: ViewState) -> Result<WatchlistSession, CliError> {
    let source = SimulatedSource::from_config(load_dataset(config)?, config);
    let trend_rng = config
        .seed
        .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    Ok(WatchlistSession::new(Arc::new(source))
        .with_view(view)
        .with_trend_rng(trend_rng))
}

fn to_view_state(args: &ViewArgs) -> ViewState {
    let mut view = ViewState::default();
    view.set_search_query(args.query.clone());
    view.set_sort_key(to_sort_key(args.sort));
    view.set_sort_direction(to_sort_direction(args.direction));
    view.set_orientation(to_orientation(args.orientation));
    view.set_density(to_density(args.density));
    view
}

fn to_sort_key(selector: SortSelector) -> SortKey {
    match selector {
        SortSelector::Change => SortKey::Change,
        SortSelector::Capital => SortKey::CapitalPrice,
        SortSelector::Futures => SortKey::FuturesPrice,
    }
}

fn to_sort_direction(selector: DirectionSelector) -> SortDirection {
    match selector {
        DirectionSelector::Asc => SortDirection::Ascending,
        DirectionSelector::Desc => SortDirection::Descending,
    }
}

fn to_orientation(selector: OrientationSelector) -> Orientation {
    match selector {
        OrientationSelector::FuturesFirst => Orientation::FuturesFirst,
        OrientationSelector::CapitalFirst => Orientation::CapitalFirst,
    }
}

fn to_density(selector: DensitySelector) -> Density {
    match selector {
        DensitySelector::Compact => Density::Compact,
        DensitySelector::Grid => Density::Grid,
    }
}

/// Outcome of a fetch with user-style retries.
struct Fetched {
    warnings: Vec<String>,
    errors: Vec<EnvelopeError>,
    latency_ms: u64,
}

/// Fetch once, then retry up to `retries` times after a failure, the way a
/// user pressing Retry would.
async fn fetch_with_retries(session: &mut WatchlistSession, retries: u32) -> Fetched {
    let started = Instant::now();
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    session.refresh();
    let mut attempt = 0;
    loop {
        match session.settle().await {
            Some(FetchOutcome::Failed(error)) if attempt < retries => {
                attempt += 1;
                warnings.push(format!(
                    "fetch attempt {attempt} failed: {}; retrying",
                    error.message()
                ));
                session.retry();
            }
            Some(FetchOutcome::Failed(error)) => {
                errors.push(EnvelopeError::from(&error));
                break;
            }
            Some(FetchOutcome::Loaded { .. }) | None => break,
        }
    }

    Fetched {
        warnings,
        errors,
        latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
}
