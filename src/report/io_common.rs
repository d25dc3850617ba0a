use std::collections::HashSet;
use std::num::ParseFloatError;
use std::path::Path;

use schulze_ranking::builder::Builder;

use crate::report::*;

/// The scores of one voter, as parsed by the readers.
#[derive(PartialEq, Debug, Clone)]
pub struct ParsedVoter {
    pub id: String,
    pub scores: Vec<(String, f64)>,
}

/// The content of one score file.
#[derive(PartialEq, Debug, Clone)]
pub struct ParsedSource {
    /// All the subject columns, including the ones that nobody scored.
    pub subjects: Vec<String>,
    pub voters: Vec<ParsedVoter>,
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

/// Finds the columns holding subjects: every named column that is not excluded.
pub fn subject_columns(
    header: &[String],
    excluded: &[String],
) -> ReportResult<Vec<(usize, String)>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut res: Vec<(usize, String)> = Vec::new();
    for (idx, name) in header.iter().enumerate() {
        let name = name.trim();
        if name.is_empty() || excluded.iter().any(|e| e == name) {
            continue;
        }
        ensure!(seen.insert(name.to_string()), DuplicateColumnSnafu { name });
        res.push((idx, name.to_string()));
    }
    debug!("subject_columns: {:?}", res);
    Ok(res)
}

/// Parses the content of a cell. An empty cell is an absent score.
///
/// Both the decimal point and the decimal comma are accepted.
pub fn parse_score(content: &str) -> Result<Option<f64>, ParseFloatError> {
    let s = content.trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<f64>()
        .or_else(|_| s.replace(',', ".").parse::<f64>())
        .map(Some)
}

/// Merges the sources into a single table. Subjects are matched by name, and the
/// subjects missing from a source are absent for the voters of this source.
pub fn assemble_table(sources: &[ParsedSource]) -> ReportResult<ScoreTable> {
    let mut subjects: Vec<String> = Vec::new();
    for source in sources.iter() {
        for s in source.subjects.iter() {
            if !subjects.contains(s) {
                subjects.push(s.clone());
            }
        }
    }
    let mut builder = Builder::new().subjects(&subjects).context(ScoreTableSnafu {})?;
    for source in sources.iter() {
        for voter in source.voters.iter() {
            debug!("assemble_table: voter {:?}", voter);
            builder
                .add_voter_named(&voter.scores)
                .context(ScoreTableSnafu {})?;
        }
    }
    builder.build().context(ScoreTableSnafu {})
}
