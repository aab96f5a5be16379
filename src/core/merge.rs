use crate::domain::model::{HoleStats, PartialHoleUpdate};
use crate::utils::error::{Result, ScorecardError};
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Combines a partial update with whatever is already stored for the hole.
///
/// Every field is overwritten when the update mentions it, except balls lost,
/// which accumulates: text entries describe events, not a restated total.
pub struct HoleMerger;

impl HoleMerger {
    pub fn merge(
        round_id: &str,
        existing: Option<&HoleStats>,
        update: &PartialHoleUpdate,
        now: DateTime<Utc>,
    ) -> HoleStats {
        let counter = |new: Option<u8>, old: Option<u32>| new.map(u32::from).or(old).unwrap_or(0);
        let flag = |new: Option<bool>, old: Option<bool>| new.or(old).unwrap_or(false);

        let base_balls_lost = existing.map(|e| e.balls_lost).unwrap_or(0);
        let balls_lost =
            base_balls_lost.saturating_add_signed(update.balls_lost_increment.unwrap_or(0));

        let merged = HoleStats {
            round_id: existing
                .map(|e| e.round_id.clone())
                .unwrap_or_else(|| round_id.to_string()),
            hole: update.hole,
            strokes: counter(update.strokes, existing.map(|e| e.strokes)),
            putts: counter(update.putts, existing.map(|e| e.putts)),
            within_100: flag(update.within_100, existing.map(|e| e.within_100)),
            fairway: flag(update.fairway, existing.map(|e| e.fairway)),
            gir: flag(update.gir, existing.map(|e| e.gir)),
            hazard: flag(update.hazard, existing.map(|e| e.hazard)),
            balls_lost,
            updated_at: now,
        };

        tracing::debug!(
            round_id = %merged.round_id,
            hole = merged.hole,
            created = existing.is_none(),
            balls_lost_before = base_balls_lost,
            balls_lost_after = merged.balls_lost,
            "merged hole update"
        );
        merged
    }
}

/// The explicit per-hole form. Every field is given, and balls lost is an
/// absolute total rather than an event count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullFormEntry {
    pub strokes: u32,
    pub putts: u32,
    pub within_100: bool,
    pub fairway: bool,
    pub gir: bool,
    pub hazard: bool,
    pub balls_lost: u32,
}

impl FullFormEntry {
    /// Converts the form into the same delta shape text entry produces, so
    /// the merger only ever has one accumulation rule.
    pub fn to_update(&self, hole: u8, existing: Option<&HoleStats>) -> PartialHoleUpdate {
        let previous = i64::from(existing.map(|e| e.balls_lost).unwrap_or(0));
        let delta = i64::from(self.balls_lost) - previous;
        let delta = i32::try_from(delta).unwrap_or(if delta < 0 { i32::MIN } else { i32::MAX });

        // validate() bounds strokes and putts well inside u8
        PartialHoleUpdate {
            hole,
            strokes: Some(self.strokes.min(u32::from(u8::MAX)) as u8),
            putts: Some(self.putts.min(u32::from(u8::MAX)) as u8),
            within_100: Some(self.within_100),
            fairway: Some(self.fairway),
            gir: Some(self.gir),
            hazard: Some(self.hazard),
            balls_lost_increment: Some(delta),
        }
    }
}

impl Validate for FullFormEntry {
    fn validate(&self) -> Result<()> {
        if !(1..=30).contains(&self.strokes) {
            return Err(ScorecardError::validation(
                "Please enter a valid stroke count",
            ));
        }
        if self.putts > 10 {
            return Err(ScorecardError::validation("Please enter a valid putt count"));
        }
        Ok(())
    }
}
