//! Non-interactive replay of a click sequence.

use anyhow::Result;
use ripple_grid::{ClickOutcome, GridConfig, GridSession, Position};
use std::fmt::Write;
use std::time::Instant;
use tracing::{info, instrument};

/// Applies `clicks` in order to a fresh grid and renders a report.
///
/// The report lists each click's affected cells followed by the final
/// grid, or just the final grid as JSON when `json` is set.
#[instrument(skip(config, clicks), fields(clicks = clicks.len()))]
pub fn replay(config: &GridConfig, clicks: &[Position], json: bool) -> Result<String> {
    let mut session = GridSession::new(config);
    let outcomes = session.replay(clicks.iter().copied(), Instant::now())?;
    info!(applied = session.clicks(), "Replay finished");

    if json {
        return Ok(serde_json::to_string_pretty(session.state())?);
    }

    let mut report = String::new();
    for (pos, outcome) in clicks.iter().zip(&outcomes) {
        match outcome {
            ClickOutcome::Applied(result) if result.affected().is_empty() => {
                writeln!(report, "{pos}: no ripple")?;
            }
            ClickOutcome::Applied(result) => {
                let hit = result
                    .affected()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(report, "{pos}: rippled into {hit}")?;
            }
            ClickOutcome::Ignored => writeln!(report, "{pos}: locked, ignored")?,
        }
    }
    writeln!(report)?;
    write!(report, "{}", session.state())?;
    Ok(report)
}
