use clap::Parser;

/// Ranks courses (or any other subjects) from the scores given by voters, using the Schulze method.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration describing the score sources, the templates and the rules.
    /// For more information about the file format, read the manual of the schulze_ranking crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A file with the scores: one column per subject, one row per voter. Setting this option
    /// overrides the sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or excel, default guessed from the extension) The type of the input.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file with several worksheets, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (list of comma-separated values, default 'Marca temporal') The columns that do not contain scores.
    #[clap(long, value_parser, use_value_delimiter = true)]
    pub exclude: Option<Vec<String>>,

    /// (full or simple, default full) full repeatedly extracts the Schulze winner, simple sorts the
    /// subjects by number of pairwise victories.
    #[clap(long, value_parser)]
    pub mode: Option<String>,

    /// If passed as an argument, the preferences are raw counts instead of being divided by the number
    /// of voters who scored both subjects.
    #[clap(long, takes_value = false)]
    pub raw_preferences: bool,

    /// (file path or 'stdout') Where the Markdown report is written. Setting this option overrides the path
    /// that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the ranking will be written in JSON format
    /// to the given location.
    #[clap(long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, courserank will check that the computed
    /// summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
