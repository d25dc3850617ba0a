pub use crate::config::*;

/// A builder for adding the scores of voters.
///
/// Rows can be added by position, following the declared subjects, or by
/// subject name. Named rows may introduce new subjects: the voters added
/// before are then considered absent for these subjects.
///
/// ```
/// use schulze_ranking::builder::Builder;
/// # use schulze_ranking::RankingErrors;
///
/// let mut builder = Builder::new()
///     .subjects(&["Math".to_string(), "Art".to_string()])?;
///
/// builder.add_voter(&[Some(8.0), Some(5.0)])?;
/// builder.add_voter_named(&[("Art".to_string(), 9.0)])?;
///
/// let table = builder.build()?;
/// assert_eq!(table.num_voters(), 2);
/// # Ok::<(), RankingErrors>(())
/// ```
#[derive(Default)]
pub struct Builder {
    pub(crate) _subjects: Vec<String>,
    pub(crate) _rows: Vec<Vec<Option<f64>>>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _subjects: Vec::new(),
            _rows: Vec::new(),
        }
    }

    /// Declares the subjects, in column order. Any row added previously is dropped.
    pub fn subjects(self, names: &[String]) -> Result<Builder, RankingErrors> {
        for (idx, name) in names.iter().enumerate() {
            if names[..idx].contains(name) {
                return Err(RankingErrors::DuplicateSubject(name.clone()));
            }
        }
        Ok(Builder {
            _subjects: names.to_vec(),
            _rows: Vec::new(),
        })
    }

    /// Adds the scores of one voter, in the order of the declared subjects.
    pub fn add_voter(&mut self, scores: &[Option<f64>]) -> Result<(), RankingErrors> {
        if scores.len() != self._subjects.len() {
            return Err(RankingErrors::MalformedRow {
                row: self._rows.len(),
                expected: self._subjects.len(),
                found: scores.len(),
            });
        }
        self._rows.push(scores.to_vec());
        Ok(())
    }

    /// Adds the scores of one voter, keyed by subject name.
    ///
    /// The subjects that are not mentioned are absent for this voter.
    pub fn add_voter_named(&mut self, scores: &[(String, f64)]) -> Result<(), RankingErrors> {
        let mut row: Vec<Option<f64>> = vec![None; self._subjects.len()];
        for (name, score) in scores {
            let idx = match self._subjects.iter().position(|s| s == name) {
                Some(idx) => idx,
                None => {
                    self._subjects.push(name.clone());
                    for r in self._rows.iter_mut() {
                        r.push(None);
                    }
                    row.push(None);
                    self._subjects.len() - 1
                }
            };
            if row[idx].is_some() {
                return Err(RankingErrors::DuplicateSubject(name.clone()));
            }
            row[idx] = Some(*score);
        }
        self._rows.push(row);
        Ok(())
    }

    pub fn build(self) -> Result<ScoreTable, RankingErrors> {
        ScoreTable::new(self._subjects, self._rows)
    }
}
