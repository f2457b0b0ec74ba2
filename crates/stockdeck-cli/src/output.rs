use std::fmt::Write as _;

use stockdeck_core::format::format_inr;
use stockdeck_core::{Content, Density, DetailView, Movement, StockCard, WatchlistSnapshot};

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&output.envelope)?
            } else {
                serde_json::to_string(&output.envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(output)?,
    }

    Ok(())
}

fn render_table(output: &CommandOutput) -> Result<(), CliError> {
    let envelope = &output.envelope;
    println!("request_id  : {}", envelope.meta.request_id);
    println!("schema      : {}", envelope.meta.schema_version);
    println!("generated_at: {}", envelope.meta.generated_at);
    println!("source      : {}", envelope.meta.source);
    println!("latency_ms  : {}", envelope.meta.latency_ms);

    if !envelope.meta.warnings.is_empty() {
        println!("warnings:");
        for warning in &envelope.meta.warnings {
            println!("  - {warning}");
        }
    }

    match &output.table {
        Some(table) => print!("{table}"),
        None => {
            println!("data:");
            let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
            for line in pretty_data.lines() {
                println!("  {line}");
            }
        }
    }

    if !envelope.errors.is_empty() {
        println!("errors:");
        for error in &envelope.errors {
            println!("  - {}: {}", error.code, error.message);
        }
    }

    Ok(())
}

/// Human frame for one watchlist snapshot.
pub fn snapshot_frame(snapshot: &WatchlistSnapshot) -> String {
    let mut frame = String::new();
    let view = &snapshot.view;

    let _ = writeln!(
        frame,
        "status: {:?}{}",
        snapshot.load,
        snapshot
            .updated
            .as_deref()
            .map(|updated| format!("  (fetched {updated})"))
            .unwrap_or_default()
    );
    let _ = writeln!(
        frame,
        "view  : query={:?} sort={} {} orientation={} density={}",
        view.search_query(),
        view.sort_key(),
        view.sort_direction(),
        view.orientation(),
        view.density()
    );

    match &snapshot.content {
        Content::Idle => {
            let _ = writeln!(frame, "(no data yet; type 'refresh')");
        }
        Content::Loading { placeholders } => {
            for _ in 0..(*placeholders).min(3) {
                let _ = writeln!(frame, "  ░░░░░░░░  ░░░░░░░░░░  ░░░░░");
            }
            let _ = writeln!(frame, "loading...");
        }
        Content::Error { message } => {
            let _ = writeln!(frame, "error: {message}");
            let _ = writeln!(frame, "type 'retry' to try again");
        }
        Content::Empty { message } => {
            let _ = writeln!(frame, "{message}");
        }
        Content::Items { cards } => {
            for card in cards {
                match view.density() {
                    Density::Compact => compact_row(&mut frame, card),
                    Density::Grid => grid_cell(&mut frame, card),
                }
            }
        }
    }

    let page = &snapshot.page;
    let _ = writeln!(
        frame,
        "page {}/{} ({} items){}{}",
        page.page_number,
        page.total_pages,
        page.total_items,
        if page.has_prev { "  [prev]" } else { "" },
        if page.has_next { "  [next]" } else { "" }
    );

    if let Some(detail) = &snapshot.detail {
        frame.push_str(&detail_frame(detail));
    }

    frame
}

fn compact_row(frame: &mut String, card: &StockCard) {
    let _ = writeln!(
        frame,
        "  {:<6} {:<12} {:>14}  {} {}",
        card.id.to_string(),
        card.symbol.as_deref().unwrap_or("?"),
        card.headline_text(),
        arrow(card.movement),
        card.change_text()
    );
}

fn grid_cell(frame: &mut String, card: &StockCard) {
    let price = |value: Option<f64>| value.map(format_inr).unwrap_or_else(|| "--".to_owned());
    let _ = writeln!(
        frame,
        "  [{}] {}  {}  {} {}",
        card.id,
        card.symbol.as_deref().unwrap_or("?"),
        card.headline_text(),
        arrow(card.movement),
        card.change_text()
    );
    let _ = writeln!(
        frame,
        "      {} {}  |  {} {}  |  {}",
        card.primary_label,
        price(card.primary_price),
        card.secondary_label,
        price(card.secondary_price),
        card.spread.as_deref().unwrap_or("--")
    );
    if let Some(updated) = &card.updated {
        let _ = writeln!(frame, "      updated {updated}");
    }
}

/// Human frame for an open detail.
pub fn detail_frame(detail: &DetailView) -> String {
    let mut frame = String::new();
    match detail {
        DetailView::Ready(card) => {
            let _ = writeln!(frame, "detail: {}", card.symbol);
            let _ = writeln!(frame, "  capital : {}", card.capital_price);
            let _ = writeln!(
                frame,
                "  futures : {}  ({})",
                card.futures_price, card.futures_difference
            );
            let _ = writeln!(frame, "  change  : {} {}", arrow(card.movement), card.change);
            if let Some(updated) = &card.updated {
                let _ = writeln!(frame, "  updated : {updated}");
            }
            if let Some(about) = &card.record.about {
                let _ = writeln!(frame, "  about   : {about}");
            }
            let _ = writeln!(frame, "  trend   : {}", sparkline(&card.trend));
        }
        DetailView::Missing { title, issues } => {
            let _ = writeln!(frame, "detail: {title}");
            let _ = writeln!(frame, "  Some important details are missing for this stock:");
            for issue in issues {
                let _ = writeln!(frame, "  - {issue}");
            }
        }
    }
    frame
}

fn arrow(movement: Movement) -> char {
    match movement {
        Movement::Positive => '▲',
        Movement::Negative => '▼',
    }
}

/// Eight-level block sparkline; flat series render at the lowest level.
fn sparkline(points: &[f64]) -> String {
    const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    let min = points.iter().copied().fold(f64::INFINITY, f64::min);
    let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    points
        .iter()
        .map(|point| {
            if range <= 0.0 {
                LEVELS[0]
            } else {
                let scaled = ((point - min) / range * 7.0).round() as usize;
                LEVELS[scaled.min(7)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdeck_core::{RecordId, StockRecord, UtcDateTime};

    #[test]
    fn sparkline_spans_the_range() {
        assert_eq!(sparkline(&[1.0, 2.0, 3.0]), "▁▅█");
        assert_eq!(sparkline(&[5.0, 5.0]), "▁▁");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn missing_detail_lists_every_issue() {
        let records =
            vec![StockRecord::new(9, Some("GRASIM"), Some(2700.0), None, 0.3).expect("valid")];
        let detail = DetailView::build(
            &records,
            &RecordId::Number(9),
            Vec::new(),
            UtcDateTime::now(),
        );

        let frame = detail_frame(&detail);

        assert!(frame.contains("detail: GRASIM"));
        assert!(frame.contains("- Missing Futures Price."));
        assert!(!frame.contains("Missing Capital Market Price."));
    }
}
