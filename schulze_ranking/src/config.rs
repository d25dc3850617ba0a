// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A table of scores: one column per subject, one row per voter.
///
/// A cell is `None` when the voter did not score that subject. NaN values are
/// treated as absent as well.
///
/// In most cases, it is easier to use the [`crate::builder::Builder`] API.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoreTable {
    pub(crate) subjects: Vec<String>,
    pub(crate) rows: Vec<Vec<Option<f64>>>,
}

impl ScoreTable {
    /// Creates a table after checking that the subject names are unique and that
    /// every row has one cell per subject.
    pub fn new(
        subjects: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<ScoreTable, RankingErrors> {
        for (idx, name) in subjects.iter().enumerate() {
            if subjects[..idx].contains(name) {
                return Err(RankingErrors::DuplicateSubject(name.clone()));
            }
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != subjects.len() {
                return Err(RankingErrors::MalformedRow {
                    row: idx,
                    expected: subjects.len(),
                    found: row.len(),
                });
            }
        }
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.filter(|x| !x.is_nan()))
                    .collect()
            })
            .collect();
        Ok(ScoreTable { subjects, rows })
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    pub fn num_voters(&self) -> usize {
        self.rows.len()
    }

    /// The scores given to one subject, absent cells skipped.
    pub fn column(&self, subject: &str) -> Option<Vec<f64>> {
        let idx = self.subjects.iter().position(|s| s == subject)?;
        Some(self.rows.iter().filter_map(|row| row[idx]).collect())
    }

    /// A copy of this table without the given subject.
    pub fn without_subject(&self, subject: &str) -> ScoreTable {
        match self.subjects.iter().position(|s| s == subject) {
            None => self.clone(),
            Some(idx) => {
                let mut subjects = self.subjects.clone();
                subjects.remove(idx);
                let rows = self
                    .rows
                    .iter()
                    .map(|row| {
                        let mut r = row.clone();
                        r.remove(idx);
                        r
                    })
                    .collect();
                ScoreTable { subjects, rows }
            }
        }
    }
}

// ******** Output data structures *********

/// Statistics for one extraction round of the full ranking.
#[derive(PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    /// The subjects still in the running at the start of the round, in column order.
    pub remaining: Vec<String>,
    pub winner: String,
    /// The smallest set of subjects beating every subject outside of it.
    /// A single element means that the winner was a Condorcet winner.
    pub dominant_set: Vec<String>,
}

/// Victory count of one subject in the simple ranking.
#[derive(PartialEq, Debug, Clone)]
pub struct SubjectVictories {
    pub name: String,
    pub victories: u32,
    pub average: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankingResult {
    pub ranking: Vec<String>,
    pub round_stats: Vec<RoundStats>,
    /// Only filled in simple mode.
    pub victories: Vec<SubjectVictories>,
}

/// Errors that prevent the algorithm from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RankingErrors {
    /// Fewer than two subjects, or no voters at all.
    InsufficientData,
    /// Two subjects have no voter in common, so their preferences cannot be normalized.
    DisjointComparison { first: String, second: String },
    /// A programming error in the resolution of cycles.
    InvariantViolation(String),
    DuplicateSubject(String),
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl Error for RankingErrors {}

impl Display for RankingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingErrors::InsufficientData => {
                write!(f, "at least two subjects and one voter are required")
            }
            RankingErrors::DisjointComparison { first, second } => write!(
                f,
                "subjects {:?} and {:?} have no voter in common",
                first, second
            ),
            RankingErrors::InvariantViolation(msg) => write!(f, "invariant violation: {}", msg),
            RankingErrors::DuplicateSubject(name) => write!(f, "duplicate subject {:?}", name),
            RankingErrors::MalformedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
        }
    }
}

// ********* Configuration **********

/// The ranking procedure to apply.
///
/// - Full extracts one winner at a time. The preferences are recomputed over the
/// remaining subjects at every round, and majority cycles are resolved with the
/// smallest dominant set and the tiebreaker.
///
/// - Simple computes the strongest paths once and sorts the subjects by number of
/// pairwise victories, then by average score. It does not resolve cycles.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RankingMode {
    Full,
    Simple,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankingRules {
    pub mode: RankingMode,
    /// Divide the preference counts by the number of voters who scored both subjects.
    pub normalize_preferences: bool,
}

impl RankingRules {
    pub const DEFAULT_RULES: RankingRules = RankingRules {
        mode: RankingMode::Full,
        normalize_preferences: true,
    };
}
