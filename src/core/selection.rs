use crate::domain::model::HOLES_PER_ROUND;
use crate::utils::error::{ParseError, Result};

/// Which hole the golfer has picked on the card, if any.
///
/// `Unselected -> Selected(n)` on a pick, back to `Unselected` on save or cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HoleSelection {
    #[default]
    Unselected,
    Selected(u8),
}

impl HoleSelection {
    pub fn select(&mut self, hole: u8) -> Result<()> {
        if !(1..=HOLES_PER_ROUND).contains(&hole) {
            return Err(ParseError::OutOfRangeHole.into());
        }
        *self = HoleSelection::Selected(hole);
        Ok(())
    }

    /// Tapping the already selected hole deselects it.
    pub fn toggle(&mut self, hole: u8) -> Result<()> {
        if *self == HoleSelection::Selected(hole) {
            self.cancel();
            return Ok(());
        }
        self.select(hole)
    }

    pub fn cancel(&mut self) {
        *self = HoleSelection::Unselected;
    }

    pub fn saved(&mut self) {
        *self = HoleSelection::Unselected;
    }

    /// The hole-number fallback handed to the line parser.
    pub fn context(&self) -> Option<u8> {
        match self {
            HoleSelection::Unselected => None,
            HoleSelection::Selected(hole) => Some(*hole),
        }
    }
}
