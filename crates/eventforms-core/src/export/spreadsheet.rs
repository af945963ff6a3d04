//! Excel rendering
//!
//! Cell text is cut to the 32,767 characters a cell holds. Answer columns past
//! what one worksheet holds spill onto further sheets, each led by the
//! Timestamp column.

use rust_xlsxwriter::{Format, Workbook};

use super::{truncate, ExportError, ResponseTable};

const SHEET_NAME: &str = "Responses";
const MAX_CELL_CHARS: usize = 32_767;
const MAX_SHEET_COLUMNS: usize = 16_384;
const MAX_COLUMN_WIDTH: usize = 60;

/// One worksheet: its name and the table columns it carries, in order
#[derive(Debug, PartialEq)]
struct SheetPlan {
    name: String,
    columns: Vec<usize>,
}

fn plan_sheets(column_count: usize) -> Vec<SheetPlan> {
    let answer_columns: Vec<usize> = (1..column_count).collect();
    if answer_columns.is_empty() {
        return vec![SheetPlan { name: SHEET_NAME.to_string(), columns: vec![0] }];
    }

    answer_columns
        .chunks(MAX_SHEET_COLUMNS - 1)
        .enumerate()
        .map(|(index, chunk)| {
            let name = match index {
                0 => SHEET_NAME.to_string(),
                n => format!("{} {}", SHEET_NAME, n + 1),
            };
            let mut columns = Vec::with_capacity(chunk.len() + 1);
            columns.push(0);
            columns.extend_from_slice(chunk);
            SheetPlan { name, columns }
        })
        .collect()
}

fn header_format() -> Format {
    Format::new().set_bold()
}

pub(super) fn render(table: &ResponseTable) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = header_format();

    for sheet in plan_sheets(table.columns().len()) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (position, &index) in sheet.columns.iter().enumerate() {
            let col = column(position)?;
            let title = &table.columns()[index];
            worksheet.write_string_with_format(0, col, truncate(title, MAX_CELL_CHARS), &header)?;

            let widest = table
                .rows()
                .iter()
                .filter_map(|row| row[index].as_deref())
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(title.chars().count()))
                .max()
                .unwrap_or(0);
            worksheet.set_column_width(col, (widest.min(MAX_COLUMN_WIDTH) + 2) as f64)?;
        }

        for (offset, row) in table.rows().iter().enumerate() {
            let row_num = offset as u32 + 1;
            for (position, &index) in sheet.columns.iter().enumerate() {
                if let Some(text) = &row[index] {
                    worksheet.write_string(row_num, column(position)?, truncate(text, MAX_CELL_CHARS))?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn column(position: usize) -> Result<u16, ExportError> {
    if position >= MAX_SHEET_COLUMNS {
        return Err(ExportError::TooManyColumns(position + 1));
    }
    Ok(position as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Response;
    use crate::domain::value_objects::{Answer, Answers, EntityId};
    use chrono::Utc;

    fn table_of(answers: Vec<Answers>) -> ResponseTable {
        let responses: Vec<Response> = answers
            .into_iter()
            .map(|a| Response::submit(EntityId::new(), a, Utc::now()))
            .collect();
        ResponseTable::build(&responses)
    }

    #[test]
    fn test_renders_xlsx_archive() {
        let mut answers = Answers::new();
        answers.insert("Comment".into(), Answer::from("Great event"));

        let bytes = render(&table_of(vec![answers])).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_renders_header_only_workbook() {
        let bytes = render(&ResponseTable::build(&[])).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_single_sheet_named_responses_with_bold_header() {
        assert_eq!(plan_sheets(1), [SheetPlan { name: "Responses".into(), columns: vec![0] }]);
        assert_eq!(plan_sheets(4), [SheetPlan { name: "Responses".into(), columns: vec![0, 1, 2, 3] }]);
        assert_eq!(header_format(), Format::new().set_bold());
    }

    #[test]
    fn test_wide_tables_spill_onto_more_sheets() {
        let sheets = plan_sheets(17_001);
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "Responses");
        assert_eq!(sheets[0].columns.len(), MAX_SHEET_COLUMNS);
        assert_eq!(sheets[1].name, "Responses 2");
        assert_eq!(sheets[1].columns[0], 0);
        assert_eq!(sheets[1].columns[1], MAX_SHEET_COLUMNS);
        assert_eq!(sheets[1].columns.last(), Some(&17_000));
    }

    #[test]
    fn test_overlong_answer_still_exports() {
        let mut answers = Answers::new();
        answers.insert("Essay".into(), Answer::Text("x".repeat(40_000)));
        answers.insert("y".repeat(40_000), Answer::from("long label"));

        let bytes = render(&table_of(vec![answers])).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_seventeen_thousand_keys_still_export() {
        let answers: Answers = (0..17_000).map(|i| (format!("k{i}"), Answer::from("v"))).collect();

        let bytes = render(&table_of(vec![answers])).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_column_limit() {
        assert_eq!(column(16_383).unwrap(), 16_383);
        assert!(matches!(column(16_384), Err(ExportError::TooManyColumns(16_385))));
    }
}
