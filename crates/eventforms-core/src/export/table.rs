//! Tabular view of a form's responses

use indexmap::IndexSet;

use crate::domain::aggregates::Response;

pub const TIMESTAMP_COLUMN: &str = "Timestamp";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Header plus one row per response, in listing order.
///
/// A `None` cell means the response has no answer under that column.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl ResponseTable {
    pub fn build(responses: &[Response]) -> Self {
        let keys: IndexSet<&str> = responses
            .iter()
            .flat_map(|r| r.answers().keys().map(String::as_str))
            .collect();

        let rows = responses
            .iter()
            .map(|response| {
                let mut row = Vec::with_capacity(keys.len() + 1);
                row.push(Some(response.created_at().format(TIMESTAMP_FORMAT).to_string()));
                row.extend(keys.iter().map(|key| response.answer(key).map(|a| a.render())));
                row
            })
            .collect();

        let mut columns = Vec::with_capacity(keys.len() + 1);
        columns.push(TIMESTAMP_COLUMN.to_string());
        columns.extend(keys.into_iter().map(str::to_string));

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }
}
