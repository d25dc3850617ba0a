// Primitives for reading CSV files.

use std::io::Read;

use crate::report::{
    io_common::{make_default_id, parse_score, subject_columns, ParsedSource, ParsedVoter},
    *,
};

pub fn read_csv_scores(path: String, cfs: &FileSource) -> ReportResult<ParsedSource> {
    let rdr = csv_reader_builder()
        .from_path(&path)
        .context(CsvOpenSnafu { path: path.clone() })?;
    parse_csv_scores(rdr, &path, cfs)
}

fn csv_reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // The header is located with the configuration, and rows may be shorter than the header.
    builder.has_headers(false).flexible(true);
    builder
}

pub fn parse_csv_scores<R: Read>(
    rdr: csv::Reader<R>,
    path: &str,
    cfs: &FileSource,
) -> ReportResult<ParsedSource> {
    let default_id = make_default_id(path);
    let first_row = cfs.first_score_row()?;

    let mut records = rdr.into_records();
    // The index starts at 1 to respect most conventions in the excel world
    for _ in 1..(first_row - 1) {
        _ = records.next();
    }
    let header: Vec<String> = records
        .next()
        .context(MissingHeaderSnafu {})?
        .context(CsvLineParseSnafu {})?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("parse_csv_scores: header: {:?}", header);
    let columns = subject_columns(&header, &cfs.excluded_columns())?;

    let mut voters: Vec<ParsedVoter> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + first_row;
        let line = line_r.context(CsvLineParseSnafu {})?;
        let mut scores: Vec<(String, f64)> = Vec::new();
        for (col_idx, name) in columns.iter() {
            let content = line.get(*col_idx).unwrap_or("");
            let score = parse_score(content).ok().context(InvalidScoreSnafu {
                lineno,
                column: name,
                content,
            })?;
            if let Some(s) = score {
                scores.push((name.clone(), s));
            }
        }
        debug!("parse_csv_scores: lineno: {:?} scores: {:?}", lineno, &scores);
        voters.push(ParsedVoter {
            id: default_id(lineno),
            scores,
        });
    }
    Ok(ParsedSource {
        subjects: columns.into_iter().map(|(_, name)| name).collect(),
        voters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(first_row: Option<usize>, excluded: Option<Vec<String>>) -> FileSource {
        FileSource {
            provider: "csv".to_string(),
            file_path: "scores.csv".to_string(),
            excluded_columns: excluded,
            excel_worksheet_name: None,
            first_score_row_index: first_row.map(|x| serde_json::json!(x)),
        }
    }

    fn parse(data: &str, cfs: &FileSource) -> ReportResult<ParsedSource> {
        let rdr = csv_reader_builder().from_reader(data.as_bytes());
        parse_csv_scores(rdr, "scores.csv", cfs)
    }

    #[test]
    fn google_forms_export() {
        let data = "Marca temporal,Cálculo,Álgebra,Física\n\
                    2024/01/10 10:00:00,8,\"7,5\",\n\
                    2024/01/10 10:05:00,6,9,7\n";
        let parsed = parse(data, &source(None, None)).unwrap();
        assert_eq!(
            parsed.subjects,
            vec![
                "Cálculo".to_string(),
                "Álgebra".to_string(),
                "Física".to_string()
            ]
        );
        assert_eq!(parsed.voters.len(), 2);
        assert_eq!(parsed.voters[0].id, "scores.csv-00000002");
        assert_eq!(
            parsed.voters[0].scores,
            vec![("Cálculo".to_string(), 8.0), ("Álgebra".to_string(), 7.5)]
        );
        assert_eq!(parsed.voters[1].scores.len(), 3);
    }

    #[test]
    fn short_rows_are_absent_scores() {
        let data = "Math,Art\n8\n";
        let parsed = parse(data, &source(None, Some(vec![]))).unwrap();
        assert_eq!(parsed.voters[0].scores, vec![("Math".to_string(), 8.0)]);
    }

    #[test]
    fn header_after_preamble() {
        let data = "Encuesta 2024\nMath,Art\n8,5\n";
        let parsed = parse(data, &source(Some(3), Some(vec![]))).unwrap();
        assert_eq!(parsed.subjects, vec!["Math".to_string(), "Art".to_string()]);
        assert_eq!(parsed.voters.len(), 1);
        assert_eq!(parsed.voters[0].id, "scores.csv-00000003");
    }

    #[test]
    fn invalid_score() {
        let data = "Math,Art\n8,5\n7,bien\n";
        match parse(data, &source(None, None)) {
            Err(ReportError::InvalidScore {
                lineno,
                column,
                content,
            }) => {
                assert_eq!(lineno, 3);
                assert_eq!(column, "Art");
                assert_eq!(content, "bien");
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn empty_file() {
        assert!(matches!(
            parse("", &source(None, None)),
            Err(ReportError::MissingHeader {})
        ));
    }
}
