use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const HOLES_PER_ROUND: u8 = 18;

pub const DEFAULT_PARS: [u8; 18] = [4, 4, 3, 5, 4, 4, 3, 5, 4, 4, 4, 3, 5, 4, 4, 3, 5, 4];

/// A transient delta produced from one line of text (or one form submit).
///
/// `None` means "not mentioned"; the merge decides what that turns into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialHoleUpdate {
    pub hole: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strokes: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub putts: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_100: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fairway: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gir: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hazard: Option<bool>,
    /// Signed so a corrected total from the full form can lower the count.
    /// Text parsing only ever yields non-negative values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balls_lost_increment: Option<i32>,
}

impl PartialHoleUpdate {
    pub fn for_hole(hole: u8) -> Self {
        Self {
            hole,
            ..Default::default()
        }
    }
}

/// The stored record for one hole of one round, keyed by `(round_id, hole)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleStats {
    pub round_id: String,
    pub hole: u8,
    pub strokes: u32,
    pub putts: u32,
    pub within_100: bool,
    pub fairway: bool,
    pub gir: bool,
    pub hazard: bool,
    pub balls_lost: u32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeeBox {
    Championship,
    Back,
    #[default]
    Middle,
    Forward,
    Junior,
}

impl TeeBox {
    pub const ALL: [TeeBox; 5] = [
        TeeBox::Championship,
        TeeBox::Back,
        TeeBox::Middle,
        TeeBox::Forward,
        TeeBox::Junior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeeBox::Championship => "Championship",
            TeeBox::Back => "Back",
            TeeBox::Middle => "Middle",
            TeeBox::Forward => "Forward",
            TeeBox::Junior => "Junior",
        }
    }
}

impl std::str::FromStr for TeeBox {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TeeBox::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| {
                let names: Vec<&str> = TeeBox::ALL.iter().map(|t| t.as_str()).collect();
                format!("Unknown tee box '{}'. Valid tee boxes: {}", s, names.join(", "))
            })
    }
}

impl std::fmt::Display for TeeBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub name: Option<String>,
    pub players: Vec<String>,
    pub pars: Vec<u8>,
    #[serde(default)]
    pub tee_box: TeeBox,
}

impl Round {
    /// Par for a 1-based hole number. Falls back to the default layout
    /// for rounds saved with a short pars list.
    pub fn par_for(&self, hole: u8) -> u8 {
        let index = usize::from(hole.saturating_sub(1));
        self.pars
            .get(index)
            .or_else(|| DEFAULT_PARS.get(index))
            .copied()
            .unwrap_or(4)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled round")
    }
}
