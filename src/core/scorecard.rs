use crate::domain::model::{HoleStats, Round, HOLES_PER_ROUND};
use crate::utils::error::{Result, ScorecardError};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreToPar {
    EagleOrBetter,
    Birdie,
    Par,
    Bogey,
    DoubleBogeyOrWorse,
}

impl ScoreToPar {
    /// `None` for a hole with no strokes recorded yet.
    pub fn classify(strokes: u32, par: u8) -> Option<Self> {
        if strokes == 0 {
            return None;
        }
        let diff = i64::from(strokes) - i64::from(par);
        Some(match diff {
            d if d <= -2 => ScoreToPar::EagleOrBetter,
            -1 => ScoreToPar::Birdie,
            0 => ScoreToPar::Par,
            1 => ScoreToPar::Bogey,
            _ => ScoreToPar::DoubleBogeyOrWorse,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreToPar::EagleOrBetter => "eagle-",
            ScoreToPar::Birdie => "birdie",
            ScoreToPar::Par => "par",
            ScoreToPar::Bogey => "bogey",
            ScoreToPar::DoubleBogeyOrWorse => "double+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoleLine {
    pub hole: u8,
    pub par: u8,
    pub stats: Option<HoleStats>,
}

impl HoleLine {
    pub fn strokes(&self) -> Option<u32> {
        self.stats.as_ref().map(|s| s.strokes).filter(|s| *s > 0)
    }

    pub fn to_par(&self) -> Option<ScoreToPar> {
        self.strokes().and_then(|s| ScoreToPar::classify(s, self.par))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub holes_played: u32,
    pub strokes: u32,
    pub putts: u32,
    /// Par over every hole in the range, played or not.
    pub par: u32,
    /// Par over played holes only, the base for [`Totals::relative_to_par`].
    pub par_played: u32,
    pub fairways: u32,
    pub greens_in_regulation: u32,
    pub hazards: u32,
    pub balls_lost: u32,
}

impl Totals {
    fn add(&mut self, line: &HoleLine) {
        self.par += u32::from(line.par);
        let Some(stats) = &line.stats else {
            return;
        };
        if stats.strokes > 0 {
            self.holes_played += 1;
            self.par_played += u32::from(line.par);
        }
        self.strokes += stats.strokes;
        self.putts += stats.putts;
        self.fairways += u32::from(stats.fairway);
        self.greens_in_regulation += u32::from(stats.gir);
        self.hazards += u32::from(stats.hazard);
        self.balls_lost += stats.balls_lost;
    }

    pub fn relative_to_par(&self) -> i64 {
        i64::from(self.strokes) - i64::from(self.par_played)
    }
}

#[derive(Debug, Clone)]
pub struct Scorecard {
    pub round: Round,
    pub holes: Vec<HoleLine>,
    pub out: Totals,
    pub inward: Totals,
    pub total: Totals,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    hole: u8,
    par: u8,
    strokes: u32,
    putts: u32,
    within_100: bool,
    fairway: bool,
    gir: bool,
    hazard: bool,
    balls_lost: u32,
    to_par: &'a str,
}

impl Scorecard {
    pub fn build(round: Round, stats: Vec<HoleStats>) -> Self {
        let mut holes: Vec<HoleLine> = (1..=HOLES_PER_ROUND)
            .map(|hole| HoleLine {
                hole,
                par: round.par_for(hole),
                stats: None,
            })
            .collect();

        for record in stats {
            if let Some(line) = holes.get_mut(usize::from(record.hole.saturating_sub(1))) {
                line.stats = Some(record);
            }
        }

        let mut out = Totals::default();
        let mut inward = Totals::default();
        for line in &holes {
            if line.hole <= 9 {
                out.add(line);
            } else {
                inward.add(line);
            }
        }

        let mut total = Totals::default();
        for line in &holes {
            total.add(line);
        }

        Self {
            round,
            holes,
            out,
            inward,
            total,
        }
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for line in &self.holes {
            let stats = line.stats.as_ref();
            writer.serialize(CsvRow {
                hole: line.hole,
                par: line.par,
                strokes: stats.map(|s| s.strokes).unwrap_or(0),
                putts: stats.map(|s| s.putts).unwrap_or(0),
                within_100: stats.is_some_and(|s| s.within_100),
                fairway: stats.is_some_and(|s| s.fairway),
                gir: stats.is_some_and(|s| s.gir),
                hazard: stats.is_some_and(|s| s.hazard),
                balls_lost: stats.map(|s| s.balls_lost).unwrap_or(0),
                to_par: line.to_par().map(|t| t.label()).unwrap_or(""),
            })?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ScorecardError::IoError(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn render_nine(&self, out: &mut String, label: &str, lines: &[HoleLine], totals: &Totals) {
        let _ = write!(out, "{:<6}", label);
        for line in lines {
            let _ = write!(out, "{:>4}", line.hole);
        }
        let _ = writeln!(out, "{:>6}", "TOT");

        let _ = write!(out, "{:<6}", "PAR");
        for line in lines {
            let _ = write!(out, "{:>4}", line.par);
        }
        let _ = writeln!(out, "{:>6}", totals.par);

        let _ = write!(out, "{:<6}", "SCORE");
        for line in lines {
            match line.strokes() {
                Some(strokes) => {
                    let _ = write!(out, "{:>4}", strokes);
                }
                None => {
                    let _ = write!(out, "{:>4}", "-");
                }
            }
        }
        if totals.strokes > 0 {
            let _ = writeln!(out, "{:>6}", totals.strokes);
        } else {
            let _ = writeln!(out, "{:>6}", "-");
        }
    }

    /// Plain-text card in the usual OUT / IN layout.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} ({} tees) - {}",
            self.round.display_name(),
            self.round.tee_box,
            self.round.players.join(", ")
        );
        self.render_nine(&mut out, "OUT", &self.holes[..9], &self.out);
        out.push('\n');
        self.render_nine(&mut out, "IN", &self.holes[9..], &self.inward);
        out.push('\n');

        let t = &self.total;
        let relative = t.relative_to_par();
        let relative = match relative {
            0 => "E".to_string(),
            r if r > 0 => format!("+{}", r),
            r => r.to_string(),
        };
        let _ = writeln!(
            out,
            "Total: Strokes {} ({}) | Putts {} | FW {} | GIR {} | Haz {} | Balls lost {}",
            t.strokes, relative, t.putts, t.fairways, t.greens_in_regulation, t.hazards, t.balls_lost
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{TeeBox, DEFAULT_PARS};
    use chrono::Utc;

    fn round() -> Round {
        Round {
            id: "r1".to_string(),
            created_at: Utc::now(),
            name: Some("Club medal".to_string()),
            players: vec!["Ana".to_string()],
            pars: DEFAULT_PARS.to_vec(),
            tee_box: TeeBox::Back,
        }
    }

    fn stats(hole: u8, strokes: u32, putts: u32) -> HoleStats {
        HoleStats {
            round_id: "r1".to_string(),
            hole,
            strokes,
            putts,
            within_100: false,
            fairway: hole % 2 == 0,
            gir: false,
            hazard: false,
            balls_lost: 0,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(ScoreToPar::classify(0, 4), None);
        assert_eq!(ScoreToPar::classify(2, 4), Some(ScoreToPar::EagleOrBetter));
        assert_eq!(ScoreToPar::classify(3, 4), Some(ScoreToPar::Birdie));
        assert_eq!(ScoreToPar::classify(4, 4), Some(ScoreToPar::Par));
        assert_eq!(ScoreToPar::classify(5, 4), Some(ScoreToPar::Bogey));
        assert_eq!(ScoreToPar::classify(8, 4), Some(ScoreToPar::DoubleBogeyOrWorse));
    }

    #[test]
    fn test_nine_and_round_totals() {
        let card = Scorecard::build(
            round(),
            vec![stats(1, 5, 2), stats(2, 4, 2), stats(10, 3, 1)],
        );
        assert_eq!(card.out.strokes, 9);
        assert_eq!(card.out.par, 36);
        assert_eq!(card.out.holes_played, 2);
        assert_eq!(card.inward.strokes, 3);
        assert_eq!(card.total.strokes, 12);
        assert_eq!(card.total.putts, 5);
        assert_eq!(card.total.par, 72);
        assert_eq!(card.total.fairways, 2);
        // holes 1, 2, 10 are all par 4
        assert_eq!(card.total.relative_to_par(), 0);
        assert_eq!(card.holes[9].to_par(), Some(ScoreToPar::Birdie));
        assert_eq!(card.holes[2].to_par(), None);
    }

    #[test]
    fn test_csv_export_has_a_row_per_hole() {
        let card = Scorecard::build(round(), vec![stats(3, 4, 2)]);
        let csv = card.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 19);
        assert_eq!(
            lines[0],
            "hole,par,strokes,putts,within_100,fairway,gir,hazard,balls_lost,to_par"
        );
        assert_eq!(lines[3], "3,3,4,2,false,false,false,false,0,bogey");
    }

    #[test]
    fn test_render_contains_totals() {
        let card = Scorecard::build(round(), vec![stats(1, 6, 3)]);
        let text = card.render();
        assert!(text.contains("Club medal (Back tees) - Ana"));
        assert!(text.contains("Strokes 6 (+2)"));
    }
}
