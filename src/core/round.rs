use crate::domain::model::{Round, TeeBox, DEFAULT_PARS, HOLES_PER_ROUND};
use crate::utils::error::{Result, ScorecardError};
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};

pub const MIN_PAR: u8 = 3;
pub const MAX_PAR: u8 = 6;

/// What the golfer fills in before teeing off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRound {
    pub name: Option<String>,
    pub players: Vec<String>,
    pub pars: Vec<u8>,
    pub tee_box: TeeBox,
}

impl Default for NewRound {
    fn default() -> Self {
        Self {
            name: None,
            players: Vec::new(),
            pars: DEFAULT_PARS.to_vec(),
            tee_box: TeeBox::default(),
        }
    }
}

impl NewRound {
    /// Trimmed, non-empty, first occurrence wins.
    pub fn normalized_players(&self) -> Vec<String> {
        let mut players: Vec<String> = Vec::with_capacity(self.players.len());
        for player in &self.players {
            let trimmed = player.trim();
            if !trimmed.is_empty() && !players.iter().any(|p| p == trimmed) {
                players.push(trimmed.to_string());
            }
        }
        players
    }

    pub fn into_round(self, id: String, created_at: DateTime<Utc>) -> Result<Round> {
        self.validate()?;
        let players = self.normalized_players();
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Round {
            id,
            created_at,
            name,
            players,
            pars: self.pars,
            tee_box: self.tee_box,
        })
    }
}

impl Validate for NewRound {
    fn validate(&self) -> Result<()> {
        if self.normalized_players().is_empty() {
            return Err(ScorecardError::validation("Please add at least one player"));
        }
        if self.pars.len() != usize::from(HOLES_PER_ROUND) {
            return Err(ScorecardError::validation(format!(
                "Expected {} pars, got {}",
                HOLES_PER_ROUND,
                self.pars.len()
            )));
        }
        if let Some((index, par)) = self
            .pars
            .iter()
            .enumerate()
            .find(|(_, par)| !(MIN_PAR..=MAX_PAR).contains(*par))
        {
            return Err(ScorecardError::validation(format!(
                "Par for hole {} must be {}-{}, got {}",
                index + 1,
                MIN_PAR,
                MAX_PAR,
                par
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_a_player() {
        let round = NewRound {
            players: vec!["  ".to_string()],
            ..Default::default()
        };
        assert_eq!(
            round.validate().unwrap_err().to_string(),
            "Please add at least one player"
        );
    }

    #[test]
    fn test_players_are_trimmed_and_deduplicated() {
        let round = NewRound {
            name: Some("  Saturday Morning  ".to_string()),
            players: vec![" Ana ".to_string(), "Ben".to_string(), "Ana".to_string()],
            ..Default::default()
        };
        let round = round.into_round("r1".to_string(), Utc::now()).unwrap();
        assert_eq!(round.players, vec!["Ana".to_string(), "Ben".to_string()]);
        assert_eq!(round.name.as_deref(), Some("Saturday Morning"));
        assert_eq!(round.pars, DEFAULT_PARS.to_vec());
    }

    #[test]
    fn test_par_bounds() {
        let mut pars = DEFAULT_PARS.to_vec();
        pars[17] = 7;
        let round = NewRound {
            players: vec!["Ana".to_string()],
            pars,
            ..Default::default()
        };
        let err = round.validate().unwrap_err().to_string();
        assert!(err.contains("hole 18"));

        let short = NewRound {
            players: vec!["Ana".to_string()],
            pars: vec![4; 9],
            ..Default::default()
        };
        assert!(short.validate().is_err());
    }
}
