use log::{debug, info, warn};

use schulze_ranking::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod markdown;
pub mod statistics;

use crate::args::Args;
use crate::report::config_reader::*;
use crate::report::io_common::{assemble_table, ParsedSource};
use crate::report::markdown::{load_templates, render_report};
use crate::report::statistics::{describe, SubjectStatistics};

/// The column added by Google Forms to every export.
pub const DEFAULT_EXCLUDED_COLUMN: &str = "Marca temporal";

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Empty Excel file or worksheet"))]
    EmptyExcel {},
    #[snafu(display("Several worksheets found ({names:?}), the worksheet name must be provided"))]
    AmbiguousWorksheet { names: Vec<String> },
    #[snafu(display("Excel line {lineno}: could not understand cell {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Missing header row"))]
    MissingHeader {},
    #[snafu(display("Column {name:?} appears twice in the header"))]
    DuplicateColumn { name: String },
    #[snafu(display("Line {lineno}, column {column:?}: invalid score {content:?}"))]
    InvalidScore {
        lineno: usize,
        column: String,
        content: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Invalid number in the configuration"))]
    ParsingJsonNumber {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("No score source: use --input or --config"))]
    MissingInput {},
    #[snafu(display("Could not assemble the score table: {source}"))]
    ScoreTable { source: RankingErrors },
    #[snafu(display("Ranking failed: {source}"))]
    Ranking { source: RankingErrors },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

fn ranking_mode_name(mode: RankingMode) -> &'static str {
    match mode {
        RankingMode::Full => "full",
        RankingMode::Simple => "simple",
    }
}

fn result_rounds_to_json(rr: &RankingResult) -> Vec<JSValue> {
    rr.round_stats
        .iter()
        .map(|rs| {
            json!({
                "round": rs.round,
                "remaining": rs.remaining,
                "winner": rs.winner,
                "dominantSet": rs.dominant_set,
            })
        })
        .collect()
}

fn result_victories_to_json(rr: &RankingResult) -> Vec<JSValue> {
    rr.victories
        .iter()
        .map(|v| {
            json!({
                "subject": v.name,
                "victories": v.victories,
                "average": statistics::rounded(v.average),
            })
        })
        .collect()
}

fn build_summary_js(
    title: Option<String>,
    rules: &RankingRules,
    num_voters: usize,
    rr: &RankingResult,
    stats: &[SubjectStatistics],
) -> JSValue {
    let c = OutputConfig {
        title,
        ranking_mode: ranking_mode_name(rules.mode).to_string(),
        normalize_preferences: rules.normalize_preferences,
        voters: num_voters,
    };
    let stats_js: Vec<JSValue> = stats.iter().map(|s| s.to_json()).collect();
    json!({
        "config": c,
        "ranking": rr.ranking,
        "rounds": result_rounds_to_json(rr),
        "victories": result_victories_to_json(rr),
        "statistics": stats_js,
    })
}

/// Writes the content to the given file, or to the standard output for `stdout`.
fn write_output(dest: &str, content: &str) -> ReportResult<()> {
    if dest == "stdout" {
        println!("{}", content);
        Ok(())
    } else {
        info!("Writing {:?}", dest);
        fs::write(dest, content).context(WritingFileSnafu { path: dest })
    }
}

pub(crate) fn resolve_path(root: Option<&Path>, path: &str) -> String {
    match root {
        Some(r) => r.join(path).display().to_string(),
        None => path.to_string(),
    }
}

fn read_score_source(root: Option<&Path>, cfs: &FileSource) -> ReportResult<ParsedSource> {
    let p = resolve_path(root, &cfs.file_path);
    info!("Attempting to read score file {:?}", p);
    match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_scores(p, cfs),
        "excel" => io_excel::read_excel_scores(p, cfs),
        x => whatever!("Provider not implemented {:?}", x),
    }
}

// The source described by the command line.
fn source_from_args(args: &Args, input: &str) -> ReportResult<FileSource> {
    let provider = match args.input_type.as_deref() {
        Some("csv") => "csv",
        Some("excel") => "excel",
        Some(x) => whatever!("Unknown input type {:?}", x),
        None if input.ends_with(".xlsx") => "excel",
        None => "csv",
    };
    Ok(FileSource {
        provider: provider.to_string(),
        file_path: input.to_string(),
        excluded_columns: Some(
            args.exclude
                .clone()
                .unwrap_or_else(|| vec![DEFAULT_EXCLUDED_COLUMN.to_string()]),
        ),
        excel_worksheet_name: args.excel_worksheet_name.clone(),
        first_score_row_index: None,
    })
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> ReportResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu {}.fail();
    }
    info!("The summary matches the reference {:?}", reference_path);
    Ok(())
}

/// Reads the scores, ranks the subjects and writes the report.
///
/// The command line arguments take precedence over the configuration file.
pub fn run_report(args: &Args) -> ReportResult<()> {
    let config: Option<ReportConfig> = match args.config.as_deref() {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    info!("config: {:?}", config);

    let root_p: Option<&Path> = match args.config.as_deref() {
        Some(p) => Some(Path::new(p).parent().context(MissingParentDirSnafu {})?),
        None => None,
    };

    let mut rules = match config.as_ref().and_then(|c| c.rules.as_ref()) {
        Some(r) => validate_rules(r)?,
        None => RankingRules::DEFAULT_RULES,
    };
    if let Some(mode) = args.mode.as_deref() {
        rules.mode = parse_ranking_mode(mode)?;
    }
    if args.raw_preferences {
        rules.normalize_preferences = false;
    }
    debug!("rules: {:?}", rules);

    let mut parsed: Vec<ParsedSource> = Vec::new();
    if let Some(input) = args.input.as_deref() {
        let cfs = source_from_args(args, input)?;
        parsed.push(read_score_source(None, &cfs)?);
    } else {
        let sources: Vec<FileSource> = config
            .as_ref()
            .map(|c| c.score_sources.clone())
            .unwrap_or_default();
        ensure!(!sources.is_empty(), MissingInputSnafu {});
        for cfs in sources.iter() {
            parsed.push(read_score_source(root_p, cfs)?);
        }
    }

    let table = assemble_table(&parsed)?;
    info!(
        "Read {} voters for {} subjects",
        table.num_voters(),
        table.subjects().len()
    );

    let stats = describe(&table);
    let result = run_ranking(&table, &rules).context(RankingSnafu {})?;
    info!("ranking: {:?}", result.ranking);

    let output_settings = config.as_ref().and_then(|c| c.output_settings.clone());
    let title = output_settings.as_ref().and_then(|o| o.report_title.clone());

    let templates = match config.as_ref().and_then(|c| c.templates.as_ref()) {
        Some(t) => load_templates(t, root_p)?,
        None => Default::default(),
    };
    let report = render_report(title.as_deref(), &templates, &stats, &result);

    let out = args
        .out
        .clone()
        .or_else(|| {
            output_settings
                .as_ref()
                .and_then(|o| o.output_path.clone())
                .map(|p| resolve_path(root_p, &p))
        })
        .unwrap_or_else(|| "stdout".to_string());
    write_output(&out, &report)?;

    let result_js = build_summary_js(title, &rules, table.num_voters(), &result, &stats);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    let summary_out = args.summary.clone().or_else(|| {
        output_settings
            .as_ref()
            .and_then(|o| o.summary_path.clone())
            .map(|p| resolve_path(root_p, &p))
    });
    if let Some(summary_p) = summary_out {
        write_output(&summary_p, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(reference_p) = args.reference.as_deref() {
        check_reference(reference_p, &pretty_js_stats)?;
    }

    Ok(())
}
