//! PDF rendering
//!
//! A4 landscape, builtin Helvetica, fixed-width columns. The header row is
//! repeated at the top of every page.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use super::{truncate, ExportError, ResponseTable};

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 12.0;
const TITLE_SIZE: f32 = 14.0;
const CELL_SIZE: f32 = 8.0;
const ROW_HEIGHT: f32 = 6.0;
// Average Helvetica glyph width at CELL_SIZE
const CHAR_WIDTH: f32 = 1.6;
// Body rows below the header: the first page also carries the title
const FIRST_PAGE_ROWS: usize = 27;
const PAGE_ROWS: usize = 31;
const MISSING: &str = "-";
const LAYER: &str = "Responses";

/// Cell text written on one page, line by line; line 0 is the header
type PageLines = Vec<Vec<String>>;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn plan_pages(table: &ResponseTable, max_chars: usize) -> Vec<PageLines> {
    let header: Vec<String> = table.columns().iter().map(|title| truncate(title, max_chars)).collect();
    let mut rows = table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| truncate(cell.as_deref().unwrap_or(MISSING), max_chars))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .into_iter();

    let mut pages = Vec::new();
    let mut capacity = FIRST_PAGE_ROWS;
    loop {
        let mut lines = vec![header.clone()];
        lines.extend(rows.by_ref().take(capacity));
        pages.push(lines);
        if rows.len() == 0 {
            return pages;
        }
        capacity = PAGE_ROWS;
    }
}

pub(super) fn render(title: &str, table: &ResponseTable) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / table.columns().len() as f32;
    let max_chars = ((column_width / CHAR_WIDTH) as usize).max(4);

    for (number, lines) in plan_pages(table, max_chars).iter().enumerate() {
        let (layer, top) = if number == 0 {
            let layer = doc.get_page(first_page).get_layer(first_layer);
            layer.use_text(title, TITLE_SIZE, Mm(MARGIN), Mm(PAGE_HEIGHT - MARGIN), &fonts.bold);
            (layer, PAGE_HEIGHT - MARGIN - 2.0 * ROW_HEIGHT)
        } else {
            (new_page(&doc), PAGE_HEIGHT - MARGIN)
        };

        for (index, line) in lines.iter().enumerate() {
            let font = if index == 0 { &fonts.bold } else { &fonts.regular };
            write_row(&layer, font, line, top - index as f32 * ROW_HEIGHT, column_width);
        }
    }

    Ok(doc.save_to_bytes()?)
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
    doc.get_page(page).get_layer(layer)
}

fn write_row(layer: &PdfLayerReference, font: &IndirectFontRef, cells: &[String], y: f32, column_width: f32) {
    for (index, cell) in cells.iter().enumerate() {
        let x = MARGIN + index as f32 * column_width;
        layer.use_text(cell.as_str(), CELL_SIZE, Mm(x), Mm(y), font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Response;
    use crate::domain::value_objects::{Answer, Answers, EntityId};
    use chrono::Utc;

    fn signups(count: usize) -> ResponseTable {
        let responses: Vec<Response> = (0..count)
            .map(|i| {
                let mut answers = Answers::new();
                answers.insert("Name".into(), Answer::Text(format!("Respondent {i}")));
                if i % 2 == 0 {
                    answers.insert("Interests".into(), Answer::choices(["AI", "Web"]));
                }
                Response::submit(EntityId::new(), answers, Utc::now())
            })
            .collect();
        ResponseTable::build(&responses)
    }

    #[test]
    fn test_header_repeated_on_every_page() {
        let pages = plan_pages(&signups(80), 40);
        let body: Vec<usize> = pages.iter().map(|lines| lines.len() - 1).collect();
        assert_eq!(body, [FIRST_PAGE_ROWS, PAGE_ROWS, 80 - FIRST_PAGE_ROWS - PAGE_ROWS]);
        for lines in &pages {
            assert_eq!(lines[0], ["Timestamp", "Name", "Interests"]);
        }
        assert_eq!(pages[1][1][1], format!("Respondent {FIRST_PAGE_ROWS}"));
    }

    #[test]
    fn test_missing_cells_render_as_dash() {
        let pages = plan_pages(&signups(2), 40);
        assert_eq!(pages[0][1][2], "AI, Web");
        assert_eq!(pages[0][2][2], "-");
    }

    #[test]
    fn test_cells_cut_to_column_width() {
        let pages = plan_pages(&signups(1), 8);
        assert_eq!(pages[0][0][0], "Times...");
        assert_eq!(pages[0][1][1], "Respo...");
    }

    #[test]
    fn test_empty_table_is_one_header_page() {
        let pages = plan_pages(&ResponseTable::build(&[]), 40);
        assert_eq!(pages, [vec![vec!["Timestamp".to_string()]]]);
    }

    #[test]
    fn test_full_first_page_does_not_add_blank_page() {
        assert_eq!(plan_pages(&signups(FIRST_PAGE_ROWS), 40).len(), 1);
        assert_eq!(plan_pages(&signups(FIRST_PAGE_ROWS + 1), 40).len(), 2);
    }

    #[test]
    fn test_renders_multi_page_pdf() {
        let bytes = render("Signups", &signups(80)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
