//! In-memory relation of variable bindings
//!
//! A relation holds an ordered set of column names and rows of optional wire
//! tokens, one cell per column. Column names may be written with or without
//! the leading `?`; `?X` and `X` name the same column.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{strip_marker, BindingTable};
use crate::error::{ErrorCode, SwrlError, SwrlResult};
use crate::swrl_ensure;

/// One row of a relation
pub type Row = Vec<Option<String>>;

/// A table of bindings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRelation", into = "RawRelation")]
pub struct Relation {
    /// Column names keyed by the name without `?`
    columns: IndexMap<String, String>,
    rows: Vec<Row>,
}

/// Serialized form: `{"columns": [...], "rows": [[token|null, ...]]}`
#[derive(Serialize, Deserialize)]
struct RawRelation {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

impl TryFrom<RawRelation> for Relation {
    type Error = SwrlError;

    fn try_from(raw: RawRelation) -> SwrlResult<Self> {
        Relation::with_rows(raw.columns, raw.rows)
    }
}

impl From<Relation> for RawRelation {
    fn from(relation: Relation) -> Self {
        RawRelation {
            columns: relation.columns.into_values().collect(),
            rows: relation.rows,
        }
    }
}

impl Relation {
    /// Create an empty relation with the given columns
    pub fn new<I, S>(columns: I) -> SwrlResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = IndexMap::new();
        for column in columns {
            let column = column.into();
            let key = strip_marker(&column).to_string();
            if map.contains_key(&key) {
                return Err(SwrlError::new(
                    ErrorCode::DuplicateColumn,
                    format!("Column {} appears more than once", column),
                )
                .with_context("column", column));
            }
            map.insert(key, column);
        }
        Ok(Relation {
            columns: map,
            rows: Vec::new(),
        })
    }

    /// Create a relation and fill it with rows
    pub fn with_rows<I, S>(columns: I, rows: impl IntoIterator<Item = Row>) -> SwrlResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut relation = Relation::new(columns)?;
        for row in rows {
            relation.push_row(row)?;
        }
        Ok(relation)
    }

    /// A relation with the same columns and no rows
    pub fn empty_like(&self) -> Self {
        Relation {
            columns: self.columns.clone(),
            rows: Vec::new(),
        }
    }

    /// Append a row; it must hold exactly one cell per column
    pub fn push_row(&mut self, row: Row) -> SwrlResult<()> {
        swrl_ensure!(
            row.len() == self.columns.len(),
            ErrorCode::RowWidthMismatch,
            "Row {} has {} cells but the relation has {} columns",
            self.rows.len(),
            row.len(),
            self.columns.len()
        );
        self.rows.push(row);
        Ok(())
    }

    /// Append a row of tokens, all present
    pub fn push_tokens<S: Into<String>>(&mut self, tokens: impl IntoIterator<Item = S>) -> SwrlResult<()> {
        self.push_row(tokens.into_iter().map(|t| Some(t.into())).collect())
    }

    /// Column names as given
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.values().map(String::as_str)
    }

    /// Position of a column; the leading `?` is ignored
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.get_index_of(strip_marker(column))
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value by row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)?.as_deref()
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Parse the JSON form
    pub fn from_json(input: &str) -> SwrlResult<Self> {
        let raw: RawRelation = serde_json::from_str(input)?;
        Relation::try_from(raw)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> SwrlResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to CSV; absent cells are empty fields
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        let header: Vec<String> = self.columns().map(csv_field).collect();
        output.push_str(&header.join(","));
        output.push('\n');
        for row in &self.rows {
            let fields: Vec<String> = row
                .iter()
                .map(|cell| cell.as_deref().map(csv_field).unwrap_or_default())
                .collect();
            output.push_str(&fields.join(","));
            output.push('\n');
        }
        output
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(|c| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

impl BindingTable for Relation {
    fn columns(&self) -> Vec<&str> {
        Relation::columns(self).collect()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, column: &str) -> Option<&str> {
        self.get(row, column)
    }
}

/// Formats as an aligned text table; absent cells show as `-`
impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.columns().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                let len = cell.as_deref().map_or(1, |c| c.chars().count());
                *width = (*width).max(len);
            }
        }

        let header: Vec<String> = self
            .columns()
            .zip(&widths)
            .map(|(c, w)| format!("{:<w$}", c, w = *w))
            .collect();
        writeln!(f, "{}", header.join(" | ").trim_end())?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:<w$}", cell.as_deref().unwrap_or("-"), w = *w))
                .collect();
            writeln!(f, "{}", cells.join(" | ").trim_end())?;
        }
        write!(f, "({} rows)", self.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Relation {
        Relation::with_rows(
            ["?X", "?Y"],
            vec![
                vec![Some("3^^int".to_string()), Some("13^^int".to_string())],
                vec![None, Some("a,b".to_string())],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_column() {
        let err = Relation::new(["?X", "X"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateColumn);
    }

    #[test]
    fn test_row_width_mismatch() {
        let mut relation = Relation::new(["?X", "?Y"]).unwrap();
        let err = relation.push_tokens(["1"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::RowWidthMismatch);
        assert!(relation.is_empty());
    }

    #[test]
    fn test_cell_lookup_ignores_marker() {
        let relation = sample();
        assert_eq!(relation.get(0, "X"), Some("3^^int"));
        assert_eq!(relation.get(0, "?Y"), Some("13^^int"));
        assert_eq!(relation.get(1, "X"), None);
        assert_eq!(relation.get(2, "X"), None);
        assert_eq!(relation.get(0, "Z"), None);
        assert_eq!(relation.column_index("?Y"), Some(1));
    }

    #[test]
    fn test_json_round_trip() {
        let relation = sample();
        let json = relation.to_json().unwrap();
        assert_eq!(Relation::from_json(&json).unwrap(), relation);
    }

    #[test]
    fn test_json_rejects_ragged_rows() {
        let err = Relation::from_json(r#"{"columns":["?X"],"rows":[["1","2"]]}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::RowWidthMismatch);
        assert!(err.message.contains("cells"));

        let err = Relation::from_json("{\"columns\":").unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseError);
    }

    #[test]
    fn test_json_rows_default_to_empty() {
        let relation = Relation::from_json(r#"{"columns":["?X","?Y"]}"#).unwrap();
        assert_eq!(relation.width(), 2);
        assert!(relation.is_empty());
    }

    #[test]
    fn test_csv() {
        let csv = sample().to_csv();
        assert_eq!(csv, "?X,?Y\n3^^int,13^^int\n,\"a,b\"\n");
    }

    #[test]
    fn test_display_table() {
        let table = sample().to_string();
        assert!(table.starts_with("?X     | ?Y"));
        assert!(table.contains("-      | a,b"));
        assert!(table.ends_with("(2 rows)"));
    }
}
