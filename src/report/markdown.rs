// Rendering of the report in Markdown.

use crate::report::statistics::{format_number, sorted_averages, SubjectStatistics};
use crate::report::*;

/// The content of the template sections. A missing section is skipped.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ReportTemplates {
    pub beginning: Option<String>,
    pub average: Option<String>,
    pub ranking: Option<String>,
    pub statistics: Option<String>,
}

fn read_template(root: Option<&Path>, path: &Option<String>) -> ReportResult<Option<String>> {
    match path {
        None => Ok(None),
        Some(p) => {
            let full_p = resolve_path(root, p);
            debug!("read_template: {:?}", full_p);
            let contents =
                fs::read_to_string(&full_p).context(OpeningFileSnafu { path: full_p.clone() })?;
            Ok(Some(contents.trim_end_matches('\n').to_string()))
        }
    }
}

pub fn load_templates(templates: &Templates, root: Option<&Path>) -> ReportResult<ReportTemplates> {
    Ok(ReportTemplates {
        beginning: read_template(root, &templates.beginning)?,
        average: read_template(root, &templates.average)?,
        ranking: read_template(root, &templates.ranking)?,
        statistics: read_template(root, &templates.statistics)?,
    })
}

/// Renders the columns as a Markdown table.
///
/// The headers are centered images so that the columns take the full width of the
/// page once rendered by GitHub. Extra cells in a longer column are dropped.
pub fn markdown_table(columns: &[(String, Vec<String>)]) -> String {
    let mut rows: Vec<String> = Vec::new();

    let header = columns
        .iter()
        .map(|(key, _)| format!("| <img width=\"1000\"><br><p align=\"center\">{} ", key))
        .collect::<Vec<String>>()
        .join(" ")
        + "|";
    rows.push(header);

    let separator = match columns.len() {
        1 => "|:--:|".to_string(),
        2 => "|:--|--:|".to_string(),
        n => format!("|:--|{}|--:|", vec![":--:"; n.saturating_sub(2)].join("|")),
    };
    rows.push(separator);

    let num_rows = columns.iter().map(|(_, c)| c.len()).min().unwrap_or(0);
    for idx in 0..num_rows {
        let row = columns
            .iter()
            .map(|(_, c)| format!("| {} ", c[idx]))
            .collect::<Vec<String>>()
            .join(" ")
            + "|";
        rows.push(row);
    }
    rows.join("\n")
}

fn averages_table(stats: &[SubjectStatistics]) -> String {
    let averages = sorted_averages(stats);
    markdown_table(&[
        (
            "Asignatura".to_string(),
            averages.iter().map(|(name, _)| name.clone()).collect(),
        ),
        (
            "Media".to_string(),
            averages.iter().map(|(_, avg)| format_number(*avg)).collect(),
        ),
    ])
}

fn ranking_table(ranking: &[String]) -> String {
    markdown_table(&[
        (
            "Puesto".to_string(),
            (1..=ranking.len()).map(|p| p.to_string()).collect(),
        ),
        ("Asignatura".to_string(), ranking.to_vec()),
    ])
}

fn stat_column(stats: &[SubjectStatistics], f: impl Fn(&SubjectStatistics) -> String) -> Vec<String> {
    stats.iter().map(f).collect()
}

fn statistics_table(stats: &[SubjectStatistics]) -> String {
    markdown_table(&[
        ("Asignatura".to_string(), stat_column(stats, |s| s.name.clone())),
        ("Votos".to_string(), stat_column(stats, |s| s.count.to_string())),
        ("Media".to_string(), stat_column(stats, |s| format_number(s.mean))),
        ("Mediana".to_string(), stat_column(stats, |s| format_number(s.median))),
        ("Moda".to_string(), stat_column(stats, |s| format_number(s.mode))),
        ("Desviación".to_string(), stat_column(stats, |s| format_number(s.std_dev))),
        ("Mínimo".to_string(), stat_column(stats, |s| format_number(s.min))),
        ("Máximo".to_string(), stat_column(stats, |s| format_number(s.max))),
    ])
}

/// Assembles the report: the beginning, the averages, the ranking and the statistics.
///
/// Without a `beginning` template, the title (if any) is used as a heading.
pub fn render_report(
    title: Option<&str>,
    templates: &ReportTemplates,
    stats: &[SubjectStatistics],
    result: &RankingResult,
) -> String {
    let mut sections: Vec<String> = Vec::new();
    match (&templates.beginning, title) {
        (Some(b), _) => sections.push(b.clone()),
        (None, Some(t)) => sections.push(format!("# {}", t)),
        (None, None) => {}
    }
    sections.extend(templates.average.clone());
    sections.push(averages_table(stats));
    sections.extend(templates.ranking.clone());
    sections.push(ranking_table(&result.ranking));
    sections.extend(templates.statistics.clone());
    sections.push(statistics_table(stats));
    sections.join("\n") + "\n"
}
