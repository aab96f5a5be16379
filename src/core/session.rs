use crate::core::keeper::ScoreKeeper;
use crate::core::selection::HoleSelection;
use crate::domain::ports::{HoleStore, LineSource, RoundStore};
use crate::utils::error::{Result, ScorecardError};
use std::io::Write;

/// Counts for one interactive session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub saved: usize,
    pub rejected: usize,
}

enum Command<'a> {
    Select(&'a str),
    Cancel,
    Card,
    Help,
    Quit,
    Score(&'a str),
}

fn command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    let lowered = trimmed.to_lowercase();
    match lowered.as_str() {
        "cancel" => Command::Cancel,
        "card" => Command::Card,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "done" => Command::Quit,
        _ => match lowered.strip_prefix("select ") {
            Some(_) => Command::Select(trimmed.get("select ".len()..).unwrap_or("").trim()),
            None => Command::Score(trimmed),
        },
    }
}

const HELP: &str = "Enter a score line (e.g. 'hole 4 strokes 5 putts 2 fairway'), \
'select N' to pick a hole, 'cancel' to clear it, 'card' to show the scorecard, 'quit' to stop.";

/// Reads lines until the source runs dry or the golfer quits.
///
/// Parse and validation problems are reported to `out` and the loop carries
/// on; storage failures end the session.
pub async fn run_session<S, L, W>(
    keeper: &ScoreKeeper<S>,
    round_id: &str,
    source: &mut L,
    out: &mut W,
) -> Result<SessionReport>
where
    S: HoleStore + RoundStore,
    L: LineSource + ?Sized,
    W: Write,
{
    let mut selection = HoleSelection::default();
    let mut report = SessionReport::default();

    while let Some(line) = source.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match command(&line) {
            Command::Quit => break,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Cancel => {
                selection.cancel();
                writeln!(out, "Selection cleared")?;
            }
            Command::Card => {
                let card = keeper.scorecard(round_id).await?;
                write!(out, "{}", card.render())?;
            }
            Command::Select(arg) => {
                let picked = arg
                    .parse::<u8>()
                    .map_err(|_| ScorecardError::validation(format!("Not a hole number: {}", arg)))
                    .and_then(|hole| selection.toggle(hole));
                match picked {
                    Ok(()) => match selection.context() {
                        Some(hole) => writeln!(out, "Hole {} selected", hole)?,
                        None => writeln!(out, "Selection cleared")?,
                    },
                    Err(e) => writeln!(out, "❌ {}", e.user_friendly_message())?,
                }
            }
            Command::Score(text) => match keeper.record_line(round_id, text, &mut selection).await {
                Ok(stats) => {
                    report.saved += 1;
                    writeln!(
                        out,
                        "✅ Hole {}: {} strokes, {} putts, {} balls lost",
                        stats.hole, stats.strokes, stats.putts, stats.balls_lost
                    )?;
                }
                Err(e) if e.category() == crate::utils::error::ErrorCategory::Input => {
                    report.rejected += 1;
                    writeln!(out, "❌ {}", e.user_friendly_message())?;
                }
                Err(e) => return Err(e),
            },
        }
    }

    Ok(report)
}
