//! Free-text score line interpretation.
//!
//! A line such as `"hole 4 six strokes 2 putts fairway lost ball"` becomes a
//! [`PartialHoleUpdate`] holding only the fields the line actually mentions.
//! Extraction runs in a fixed order over a lower-cased copy:
//!
//! 1. boolean flags, by substring from [`FLAG_KEYWORDS`]
//! 2. `hole <N>`
//! 3. strokes and putts, keyword-anchored in either orientation
//! 4. positional `hole strokes putts`, only when step 2 and 3 found nothing
//! 5. balls lost, using whatever numbers are still unclaimed
//!
//! A number is claimed by at most one field.

use crate::domain::model::{PartialHoleUpdate, HOLES_PER_ROUND};
use crate::utils::error::ParseError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

pub type ParseResult = std::result::Result<PartialHoleUpdate, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Within100,
    Fairway,
    Gir,
    Hazard,
}

/// A flag is set when any of its synonyms appears anywhere in the line.
pub const FLAG_KEYWORDS: &[(Flag, &[&str])] = &[
    (Flag::Within100, &["within 100", "within100", "w100"]),
    (Flag::Fairway, &["fairway", "fairways", "fw"]),
    (Flag::Gir, &["gir", "green in reg", "greens in reg"]),
    (Flag::Hazard, &["hazard", "water", "penalty", "haz"]),
];

pub const STROKES_KEYWORDS: &[&str] = &["strokes", "stroke", "score"];
pub const PUTTS_KEYWORDS: &[&str] = &["putts", "putt"];

/// Spoken numbers as they come out of a transcript.
pub const NUMBER_WORDS: &[(&str, &str)] = &[
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("ten", "10"),
    ("eleven", "11"),
    ("twelve", "12"),
    ("thirteen", "13"),
    ("fourteen", "14"),
    ("fifteen", "15"),
    ("sixteen", "16"),
    ("seventeen", "17"),
    ("eighteen", "18"),
    ("nineteen", "19"),
    ("twenty", "20"),
];

const STROKES_RANGE: std::ops::RangeInclusive<u32> = 1..=30;
const PUTTS_RANGE: std::ops::RangeInclusive<u32> = 0..=10;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("score line patterns are static")
}

fn alternation(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

static NUMBER_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let words: Vec<&str> = NUMBER_WORDS.iter().map(|(word, _)| *word).collect();
    compile(&format!(r"\b(?:{})\b", alternation(&words)))
});

static HOLE_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\bhole\s*#?\s*(\d+)\b"));

static STROKES_KEYWORD_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"\b(?:{})\b\s*[:=]?\s*(\d+)\b",
        alternation(STROKES_KEYWORDS)
    ))
});

static STROKES_NUMBER_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"\b(\d+)\s*(?:{})\b", alternation(STROKES_KEYWORDS)))
});

static PUTTS_KEYWORD_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"\b(?:{})\b\s*[:=]?\s*(\d+)\b",
        alternation(PUTTS_KEYWORDS)
    ))
});

static PUTTS_NUMBER_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"\b(\d+)\s*(?:{})\b", alternation(PUTTS_KEYWORDS)))
});

static BARE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\b\d{1,2}\b"));

// "2 balls lost", "ball lost 2", "lost balls", "lost 2 balls"
static BALLS_LOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?:\b(\d{1,2})\s*)?(?:balls?\s+lost|lost\s+balls?)\b(?:\s*(\d{1,2})\b)?|\blost\s+(\d{1,2})\s+balls?\b",
    )
});

/// Digits that do not fit are reported as out of range rather than truncated.
fn to_number(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

fn normalize_number_words(text: &str) -> String {
    NUMBER_WORD_RE
        .replace_all(text, |caps: &regex::Captures| {
            let word = &caps[0];
            NUMBER_WORDS
                .iter()
                .find(|(w, _)| *w == word)
                .map(|(_, digits)| (*digits).to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .into_owned()
}

pub fn detect_flag(text: &str, flag: Flag) -> bool {
    FLAG_KEYWORDS
        .iter()
        .filter(|(f, _)| *f == flag)
        .flat_map(|(_, synonyms)| synonyms.iter())
        .any(|synonym| text.contains(synonym))
}

/// Numbers are identified by the byte offset where their digits start.
type Claims = HashSet<usize>;

#[derive(Debug, Clone, Copy)]
struct Binding {
    value: u32,
    at: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    KeywordFirst,
    NumberFirst,
}

impl Orientation {
    fn other(self) -> Self {
        match self {
            Orientation::KeywordFirst => Orientation::NumberFirst,
            Orientation::NumberFirst => Orientation::KeywordFirst,
        }
    }
}

#[derive(Debug, Default)]
struct Candidates {
    keyword_first: Vec<Binding>,
    number_first: Vec<Binding>,
}

impl Candidates {
    fn collect(text: &str, keyword_first: &Regex, number_first: &Regex) -> Self {
        let bindings = |re: &Regex| -> Vec<Binding> {
            re.captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| Binding {
                    value: to_number(m.as_str()),
                    at: m.start(),
                })
                .collect()
        };
        Self {
            keyword_first: bindings(keyword_first),
            number_first: bindings(number_first),
        }
    }

    fn oriented(&self, orientation: Orientation) -> &[Binding] {
        match orientation {
            Orientation::KeywordFirst => &self.keyword_first,
            Orientation::NumberFirst => &self.number_first,
        }
    }
}

#[derive(Debug)]
struct Assignment {
    values: [Option<u32>; 2],
    primary_bindings: usize,
    claims: Claims,
}

fn assign(fields: [&Candidates; 2], primary: Orientation, claims: &Claims) -> Assignment {
    let mut assignment = Assignment {
        values: [None, None],
        primary_bindings: 0,
        claims: claims.clone(),
    };

    for orientation in [primary, primary.other()] {
        for (slot, field) in fields.iter().enumerate() {
            if assignment.values[slot].is_some() {
                continue;
            }
            let free = field
                .oriented(orientation)
                .iter()
                .find(|b| !assignment.claims.contains(&b.at));
            if let Some(binding) = free {
                assignment.values[slot] = Some(binding.value);
                assignment.claims.insert(binding.at);
                if orientation == primary {
                    assignment.primary_bindings += 1;
                }
            }
        }
    }

    assignment
}

/// Strokes and putts. The whole line is read in one orientation, whichever
/// binds more keywords; keyword-first wins a tie.
fn extract_counts(text: &str, claims: &mut Claims) -> (Option<u32>, Option<u32>) {
    let strokes = Candidates::collect(text, &STROKES_KEYWORD_FIRST_RE, &STROKES_NUMBER_FIRST_RE);
    let putts = Candidates::collect(text, &PUTTS_KEYWORD_FIRST_RE, &PUTTS_NUMBER_FIRST_RE);

    let keyword_first = assign([&strokes, &putts], Orientation::KeywordFirst, claims);
    let number_first = assign([&strokes, &putts], Orientation::NumberFirst, claims);

    let chosen = if number_first.primary_bindings > keyword_first.primary_bindings {
        number_first
    } else {
        keyword_first
    };

    *claims = chosen.claims;
    (chosen.values[0], chosen.values[1])
}

fn extract_hole(text: &str, claims: &mut Claims) -> Option<u32> {
    let m = HOLE_RE.captures(text)?.get(1)?;
    claims.insert(m.start());
    Some(to_number(m.as_str()))
}

fn extract_positional(text: &str, claims: &mut Claims) -> Option<[u32; 3]> {
    let numbers: Vec<regex::Match> = BARE_NUMBER_RE
        .find_iter(text)
        .filter(|m| !claims.contains(&m.start()))
        .take(3)
        .collect();

    if numbers.len() < 3 {
        return None;
    }

    let mut values = [0u32; 3];
    for (value, m) in values.iter_mut().zip(&numbers) {
        *value = to_number(m.as_str());
        claims.insert(m.start());
    }
    Some(values)
}

/// Total balls lost across every mention; a mention without a free number counts as one.
fn extract_balls_lost(text: &str, claims: &Claims) -> Option<u32> {
    let mut total: Option<u32> = None;

    for caps in BALLS_LOST_RE.captures_iter(text) {
        let count = [caps.get(1), caps.get(2), caps.get(3)]
            .into_iter()
            .flatten()
            .find(|m| !claims.contains(&m.start()))
            .map(|m| to_number(m.as_str()))
            .unwrap_or(1);
        total = Some(total.unwrap_or(0).saturating_add(count));
    }

    total
}

/// Interprets one score line.
///
/// `selected_hole` is the hole currently picked in the UI, used only when the
/// line itself names no hole.
pub fn parse_line(line: &str, selected_hole: Option<u8>) -> ParseResult {
    let lowered = line.trim().to_lowercase();
    if lowered.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let flag = |f: Flag| detect_flag(&lowered, f).then_some(true);
    let within_100 = flag(Flag::Within100);
    let fairway = flag(Flag::Fairway);
    let gir = flag(Flag::Gir);
    let hazard = flag(Flag::Hazard);

    let text = normalize_number_words(&lowered);
    let mut claims = Claims::new();

    let mut hole = extract_hole(&text, &mut claims);
    let (mut strokes, mut putts) = extract_counts(&text, &mut claims);

    // Positional reading is all-or-nothing: never mixed with keywords.
    if hole.is_none() && strokes.is_none() && putts.is_none() {
        if let Some([h, s, p]) = extract_positional(&text, &mut claims) {
            hole = Some(h);
            strokes = Some(s);
            putts = Some(p);
        }
    }

    let balls_lost = extract_balls_lost(&text, &claims);

    let hole = hole
        .or_else(|| selected_hole.map(u32::from))
        .ok_or(ParseError::MissingHole)?;

    if !(1..=u32::from(HOLES_PER_ROUND)).contains(&hole) {
        return Err(ParseError::OutOfRangeHole);
    }
    if strokes.is_some_and(|s| !STROKES_RANGE.contains(&s)) {
        return Err(ParseError::OutOfRangeStrokes);
    }
    if putts.is_some_and(|p| !PUTTS_RANGE.contains(&p)) {
        return Err(ParseError::OutOfRangePutts);
    }

    // Ranges were checked above, so the narrowing casts are lossless.
    let update = PartialHoleUpdate {
        hole: hole as u8,
        strokes: strokes.map(|s| s as u8),
        putts: putts.map(|p| p as u8),
        within_100,
        fairway,
        gir,
        hazard,
        balls_lost_increment: balls_lost.map(|n| i32::try_from(n).unwrap_or(i32::MAX)),
    };

    tracing::debug!(?update, "parsed score line");
    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(line: &str) -> PartialHoleUpdate {
        parse_line(line, None).unwrap()
    }

    #[test]
    fn test_explicit_keywords_for_every_hole() {
        for hole in 1..=18u8 {
            let update = parsed(&format!("hole {} strokes 5 putts 2", hole));
            assert_eq!(
                update,
                PartialHoleUpdate {
                    strokes: Some(5),
                    putts: Some(2),
                    ..PartialHoleUpdate::for_hole(hole)
                }
            );
        }
    }

    #[test]
    fn test_case_and_order_insensitive() {
        let a = parsed("HOLE 4 FAIRWAY strokes 5 putts 2");
        let b = parsed("fairway hole 4 putts 2 strokes 5");
        assert_eq!(a, b);
        assert_eq!(a.strokes, Some(5));
        assert_eq!(a.putts, Some(2));
        assert_eq!(a.fairway, Some(true));
    }

    #[test]
    fn test_number_before_keyword() {
        let update = parsed("hole 7 6 strokes 2 putts");
        assert_eq!(update.hole, 7);
        assert_eq!(update.strokes, Some(6));
        assert_eq!(update.putts, Some(2));
    }

    #[test]
    fn test_score_is_a_strokes_synonym() {
        let update = parsed("hole 3 score 4 putt 1");
        assert_eq!(update.strokes, Some(4));
        assert_eq!(update.putts, Some(1));
    }

    #[test]
    fn test_mixed_orientation_fills_remaining_field() {
        let update = parsed("hole 2 strokes 6, 2 putts");
        assert_eq!(update.strokes, Some(6));
        assert_eq!(update.putts, Some(2));
    }

    #[test]
    fn test_positional_fallback() {
        let update = parsed("4 6 2 fw");
        assert_eq!(
            update,
            PartialHoleUpdate {
                strokes: Some(6),
                putts: Some(2),
                fairway: Some(true),
                ..PartialHoleUpdate::for_hole(4)
            }
        );
    }

    #[test]
    fn test_no_positional_when_hole_keyword_present() {
        let update = parsed("hole 4 6 2");
        assert_eq!(update, PartialHoleUpdate::for_hole(4));
    }

    #[test]
    fn test_positional_beats_selected_hole() {
        let update = parse_line("5 4 1", Some(9)).unwrap();
        assert_eq!(update.hole, 5);
        assert_eq!(update.strokes, Some(4));
        assert_eq!(update.putts, Some(1));
    }

    #[test]
    fn test_flags_are_only_ever_set_true() {
        let update = parsed("hole 1 w100 gir water");
        assert_eq!(update.within_100, Some(true));
        assert_eq!(update.gir, Some(true));
        assert_eq!(update.hazard, Some(true));
        assert_eq!(update.fairway, None);
        assert_eq!(update.strokes, None);
    }

    #[test]
    fn test_within_100_number_is_not_a_score() {
        let update = parsed("hole 6 within 100 strokes 4");
        assert_eq!(update.within_100, Some(true));
        assert_eq!(update.strokes, Some(4));
        assert_eq!(update.putts, None);
    }

    #[test]
    fn test_balls_lost_variants() {
        assert_eq!(parsed("hole 1 lost ball").balls_lost_increment, Some(1));
        assert_eq!(parsed("hole 1 2 balls lost").balls_lost_increment, Some(2));
        assert_eq!(parsed("hole 1 lost balls 3").balls_lost_increment, Some(3));
        assert_eq!(parsed("hole 1 lost 2 balls").balls_lost_increment, Some(2));
        assert_eq!(parsed("hole 1 ball lost").balls_lost_increment, Some(1));
        assert_eq!(parsed("hole 1 strokes 5").balls_lost_increment, None);
    }

    #[test]
    fn test_balls_lost_does_not_steal_claimed_numbers() {
        let update = parsed("hole 4 strokes 5 putts 2 lost ball");
        assert_eq!(update.putts, Some(2));
        assert_eq!(update.balls_lost_increment, Some(1));

        let update = parsed("4 6 2 ball lost");
        assert_eq!(update.hole, 4);
        assert_eq!(update.putts, Some(2));
        assert_eq!(update.balls_lost_increment, Some(1));
    }

    #[test]
    fn test_spoken_numbers() {
        let update = parsed("Hole four, six strokes, two putts, hit the fairway");
        assert_eq!(update.hole, 4);
        assert_eq!(update.strokes, Some(6));
        assert_eq!(update.putts, Some(2));
        assert_eq!(update.fairway, Some(true));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_line("", Some(3)), Err(ParseError::EmptyInput));
        assert_eq!(parse_line("   ", None), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_missing_hole_uses_selection() {
        assert_eq!(
            parse_line("strokes 5 putts 2", None),
            Err(ParseError::MissingHole)
        );
        let update = parse_line("strokes 5 putts 2", Some(7)).unwrap();
        assert_eq!(update.hole, 7);
        assert_eq!(update.strokes, Some(5));
    }

    #[test]
    fn test_range_violations() {
        assert_eq!(
            parse_line("hole 19 strokes 5 putts 2", None),
            Err(ParseError::OutOfRangeHole)
        );
        assert_eq!(
            parse_line("hole 0 strokes 5", None),
            Err(ParseError::OutOfRangeHole)
        );
        assert_eq!(
            parse_line("hole 4 strokes 99 putts 2", None),
            Err(ParseError::OutOfRangeStrokes)
        );
        assert_eq!(
            parse_line("hole 4 strokes 0", None),
            Err(ParseError::OutOfRangeStrokes)
        );
        assert_eq!(
            parse_line("hole 4 strokes 5 putts 11", None),
            Err(ParseError::OutOfRangePutts)
        );
        assert_eq!(
            parse_line("hole 99999999999 strokes 5", None),
            Err(ParseError::OutOfRangeHole)
        );
    }

    #[test]
    fn test_zero_putts_is_valid() {
        let update = parsed("hole 8 strokes 3 putts 0");
        assert_eq!(update.putts, Some(0));
    }
}
