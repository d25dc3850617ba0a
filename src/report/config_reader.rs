use crate::report::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "reportTitle")]
    pub report_title: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    #[serde(rename = "summaryPath")]
    pub summary_path: Option<String>,
}

/// The configuration as written in the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub title: Option<String>,
    #[serde(rename = "rankingMode")]
    pub ranking_mode: String,
    #[serde(rename = "normalizePreferences")]
    pub normalize_preferences: bool,
    pub voters: usize,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excludedColumns")]
    pub excluded_columns: Option<Vec<String>>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "firstScoreRowIndex")]
    pub first_score_row_index: Option<JSValue>,
}

impl FileSource {
    /// The first row with scores, starting at 1. The header is the row just before.
    pub fn first_score_row(&self) -> ReportResult<usize> {
        if self.first_score_row_index.is_none() {
            return Ok(2);
        }
        let x = read_js_int(&self.first_score_row_index)?;
        ensure!(x >= 2, ParsingJsonNumberSnafu {});
        Ok(x)
    }

    pub fn excluded_columns(&self) -> Vec<String> {
        self.excluded_columns
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_EXCLUDED_COLUMN.to_string()])
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Templates {
    pub beginning: Option<String>,
    pub average: Option<String>,
    pub ranking: Option<String>,
    pub statistics: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportRules {
    #[serde(rename = "rankingMode")]
    pub ranking_mode: Option<String>,
    #[serde(rename = "normalizePreferences")]
    pub normalize_preferences: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "scoreSources", default)]
    pub score_sources: Vec<FileSource>,
    pub templates: Option<Templates>,
    pub rules: Option<ReportRules>,
}

pub fn read_config(path: &str) -> ReportResult<ReportConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    serde_json::from_str(&contents).context(ParsingJsonSnafu {})
}

pub fn read_summary(path: &str) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}

pub fn parse_ranking_mode(mode: &str) -> ReportResult<RankingMode> {
    match mode {
        "full" => Ok(RankingMode::Full),
        "simple" => Ok(RankingMode::Simple),
        x => whatever!("Unknown ranking mode {:?}", x),
    }
}

pub fn validate_rules(rules: &ReportRules) -> ReportResult<RankingRules> {
    let res = RankingRules {
        mode: match rules.ranking_mode.as_deref() {
            Some(m) => parse_ranking_mode(m)?,
            None => RankingRules::DEFAULT_RULES.mode,
        },
        normalize_preferences: rules
            .normalize_preferences
            .unwrap_or(RankingRules::DEFAULT_RULES.normalize_preferences),
    };
    Ok(res)
}

fn read_js_int(x: &Option<JSValue>) -> ReportResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s.parse::<usize>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
