use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::report::{
    io_common::{make_default_id, parse_score, subject_columns, ParsedSource, ParsedVoter},
    *,
};

pub fn read_excel_scores(path: String, cfs: &FileSource) -> ReportResult<ParsedSource> {
    let wrange = get_range(&path, cfs)?;
    parse_excel_scores(&wrange, &path, cfs)
}

fn get_range(path: &str, cfs: &FileSource) -> ReportResult<calamine::Range<DataType>> {
    let worksheet_name_o = cfs.excel_worksheet_name.clone();
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu {}.fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: path: {:?} worksheet: {:?}", &path, &worksheet_name);
                Ok(wrange.clone())
            }
            _ => AmbiguousWorksheetSnafu {
                names: all_worksheets
                    .iter()
                    .map(|(name, _)| name.clone())
                    .collect::<Vec<String>>(),
            }
            .fail(),
        }
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Empty => String::new(),
        x => format!("{:?}", x),
    }
}

fn cell_to_score(cell: &DataType, lineno: u64) -> ReportResult<Option<f64>> {
    match cell {
        DataType::Int(i) => Ok(Some(*i as f64)),
        DataType::Float(f) => Ok(Some(*f)),
        DataType::Empty => Ok(None),
        DataType::String(s) => parse_score(s).ok().context(ExcelWrongCellTypeSnafu {
            lineno,
            content: s.clone(),
        }),
        x => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", x),
        }
        .fail(),
    }
}

pub fn parse_excel_scores(
    wrange: &calamine::Range<DataType>,
    path: &str,
    cfs: &FileSource,
) -> ReportResult<ParsedSource> {
    let default_id = make_default_id(path);
    let first_row = cfs.first_score_row()?;

    let mut iter = wrange.rows();
    // The index starts at 1 to respect most conventions in the excel world
    for _ in 1..(first_row - 1) {
        iter.next();
    }
    let header: Vec<String> = iter
        .next()
        .context(EmptyExcelSnafu {})?
        .iter()
        .map(cell_to_string)
        .collect();
    debug!("parse_excel_scores: header: {:?}", header);
    let columns = subject_columns(&header, &cfs.excluded_columns())?;

    let mut voters: Vec<ParsedVoter> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + first_row;
        let mut scores: Vec<(String, f64)> = Vec::new();
        for (col_idx, name) in columns.iter() {
            let cell = row.get(*col_idx).unwrap_or(&DataType::Empty);
            if let Some(s) = cell_to_score(cell, lineno as u64)? {
                scores.push((name.clone(), s));
            }
        }
        debug!("parse_excel_scores: lineno: {:?} scores: {:?}", lineno, &scores);
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
    use calamine::Range;

    fn source() -> FileSource {
        FileSource {
            provider: "excel".to_string(),
            file_path: "scores.xlsx".to_string(),
            excluded_columns: None,
            excel_worksheet_name: None,
            first_score_row_index: None,
        }
    }

    fn sheet(cells: Vec<Vec<DataType>>) -> Range<DataType> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), cell);
            }
        }
        range
    }

    fn text(s: &str) -> DataType {
        DataType::String(s.to_string())
    }

    #[test]
    fn numeric_and_text_cells() {
        let range = sheet(vec![
            vec![text("Marca temporal"), text("Math"), text("Art")],
            vec![text("2024/01/10"), DataType::Int(8), DataType::Float(6.5)],
            vec![text("2024/01/11"), DataType::Empty, text("7,5")],
        ]);
        let parsed = parse_excel_scores(&range, "scores.xlsx", &source()).unwrap();
        assert_eq!(parsed.subjects, vec!["Math".to_string(), "Art".to_string()]);
        assert_eq!(
            parsed.voters[0].scores,
            vec![("Math".to_string(), 8.0), ("Art".to_string(), 6.5)]
        );
        assert_eq!(parsed.voters[1].scores, vec![("Art".to_string(), 7.5)]);
        assert_eq!(parsed.voters[1].id, "scores.xlsx-00000003");
    }

    #[test]
    fn wrong_cell_type() {
        let range = sheet(vec![
            vec![text("Math"), text("Art")],
            vec![DataType::Bool(true), DataType::Int(3)],
        ]);
        assert!(matches!(
            parse_excel_scores(&range, "scores.xlsx", &source()),
            Err(ReportError::ExcelWrongCellType { lineno: 2, .. })
        ));
    }
}
