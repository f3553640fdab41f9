//! Tabular query results
//!
//! A `Table` is what every read returns: column names taken from the
//! statement metadata plus rows of dynamically typed cells.

use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single value in a result row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value of an Integer or Real cell
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(v) => Some(*v as f64),
            Cell::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Textual form used for equality predicates. NULL has none.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            Cell::Null => None,
            Cell::Integer(v) => Some(Cow::Owned(v.to_string())),
            Cell::Real(v) => Some(Cow::Owned(v.to_string())),
            Cell::Text(s) => Some(Cow::Borrowed(s)),
        }
    }
}

impl From<ValueRef<'_>> for Cell {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Cell::Null,
            ValueRef::Integer(v) => Cell::Integer(v),
            ValueRef::Real(v) => Cell::Real(v),
            ValueRef::Text(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => Cell::Text(format!("<{} bytes>", bytes.len())),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Real(v) => write!(f, "{:.2}", v),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Rows with named columns, in result order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// A table with no columns and no rows
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in the named column
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// All cells of the named column, top to bottom
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(move |r| r.get(idx)))
    }

    /// Same columns, only the rows matching `keep`
    pub fn retain_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[Cell]) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["Food_ID".into(), "Food_Name".into()],
            vec![
                vec![Cell::Integer(1), Cell::Text("Bread".into())],
                vec![Cell::Integer(2), Cell::Null],
            ],
        )
    }

    #[test]
    fn test_lookup() {
        let table = sample();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "Food_Name"), Some(&Cell::Text("Bread".into())));
        assert_eq!(table.get(1, "Food_ID").and_then(Cell::as_i64), Some(2));
        assert!(table.get(0, "Missing").is_none());
        assert_eq!(table.column("Food_ID").unwrap().count(), 2);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(Cell::Integer(42).text().as_deref(), Some("42"));
        assert_eq!(Cell::Text("Pune".into()).text().as_deref(), Some("Pune"));
        assert!(Cell::Null.text().is_none());
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "columns": ["Food_ID", "Food_Name"],
                "rows": [[1, "Bread"], [2, null]],
            })
        );
    }
}
