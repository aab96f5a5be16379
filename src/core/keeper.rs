use crate::core::merge::{FullFormEntry, HoleMerger};
use crate::core::parser::parse_line;
use crate::core::round::NewRound;
use crate::core::scorecard::Scorecard;
use crate::core::selection::HoleSelection;
use crate::domain::model::{HoleStats, PartialHoleUpdate, Round};
use crate::domain::ports::{HoleStore, RoundStore};
use crate::utils::error::{Result, ScorecardError};
use crate::utils::validation::Validate;
use chrono::Utc;

/// Sequences read -> merge -> write for one hole at a time.
///
/// The existing record is always re-read right before merging, so two
/// successive lines for the same hole never accumulate onto a stale base.
pub struct ScoreKeeper<S: HoleStore + RoundStore> {
    store: S,
}

impl<S: HoleStore + RoundStore> ScoreKeeper<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn start_round(&self, new_round: NewRound) -> Result<Round> {
        let round = new_round.into_round(uuid::Uuid::new_v4().to_string(), Utc::now())?;
        self.store.create_round(&round).await?;
        tracing::info!(
            round_id = %round.id,
            players = round.players.len(),
            "started round"
        );
        Ok(round)
    }

    pub async fn rounds(&self) -> Result<Vec<Round>> {
        self.store.list_rounds().await
    }

    pub async fn remove_round(&self, round_id: &str) -> Result<()> {
        self.require_round(round_id).await?;
        self.store.delete_round(round_id).await?;
        tracing::info!(round_id, "deleted round");
        Ok(())
    }

    pub async fn scorecard(&self, round_id: &str) -> Result<Scorecard> {
        let round = self.require_round(round_id).await?;
        let holes = self.store.list_holes(round_id).await?;
        Ok(Scorecard::build(round, holes))
    }

    /// Quick entry: one free-text or transcribed line.
    ///
    /// A parse failure leaves the selection as it was so the golfer can retry.
    pub async fn record_line(
        &self,
        round_id: &str,
        line: &str,
        selection: &mut HoleSelection,
    ) -> Result<HoleStats> {
        self.require_round(round_id).await?;

        let update = match parse_line(line, selection.context()) {
            Ok(update) => update,
            Err(e) => {
                tracing::warn!(line, error = %e, "could not interpret score line");
                return Err(e.into());
            }
        };

        let saved = self.apply(round_id, &update).await?;
        selection.saved();
        Ok(saved)
    }

    /// Explicit entry for the selected hole with every field filled in.
    pub async fn record_full_form(
        &self,
        round_id: &str,
        selection: &mut HoleSelection,
        entry: &FullFormEntry,
    ) -> Result<HoleStats> {
        let hole = selection.context().ok_or(ScorecardError::NoHoleSelected)?;
        entry.validate()?;
        self.require_round(round_id).await?;

        let existing = self.store.get_hole(round_id, hole).await?;
        let update = entry.to_update(hole, existing.as_ref());
        let saved = self.write(round_id, existing.as_ref(), &update).await?;
        selection.saved();
        Ok(saved)
    }

    async fn apply(&self, round_id: &str, update: &PartialHoleUpdate) -> Result<HoleStats> {
        let existing = self.store.get_hole(round_id, update.hole).await?;
        self.write(round_id, existing.as_ref(), update).await
    }

    async fn write(
        &self,
        round_id: &str,
        existing: Option<&HoleStats>,
        update: &PartialHoleUpdate,
    ) -> Result<HoleStats> {
        let merged = HoleMerger::merge(round_id, existing, update, Utc::now());
        self.store.put_hole(&merged).await?;
        tracing::info!(
            round_id,
            hole = merged.hole,
            strokes = merged.strokes,
            putts = merged.putts,
            balls_lost = merged.balls_lost,
            "saved hole"
        );
        Ok(merged)
    }

    async fn require_round(&self, round_id: &str) -> Result<Round> {
        self.store
            .get_round(round_id)
            .await?
            .ok_or_else(|| ScorecardError::RoundNotFound {
                round_id: round_id.to_string(),
            })
    }
}
