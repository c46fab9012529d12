//! Source document snapshot handed over by the document loader.

use serde::{Deserialize, Serialize};

/// A table from the source document as a grid of cell strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from raw rows, trimming every cell.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.as_ref().trim().to_string()).collect())
            .collect();
        Self { rows }
    }

    /// Rows of the table, top to bottom.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cell at (`row`, `col`), if present.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }
}

/// Immutable text and table snapshot of one loan-application document.
///
/// `full_text` holds the non-empty paragraphs in document order, one per
/// line. Tables are carried along but no extractor reads them yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    full_text: String,

    #[serde(default)]
    tables: Vec<Table>,
}

impl SourceDocument {
    /// Create a document from an already joined text blob.
    pub fn new(full_text: impl Into<String>, tables: Vec<Table>) -> Self {
        Self {
            full_text: full_text.into(),
            tables,
        }
    }

    /// Create a document from raw paragraphs.
    ///
    /// Paragraphs are trimmed, empty ones dropped, and the rest joined
    /// with `\n`.
    pub fn from_paragraphs<I>(paragraphs: I, tables: Vec<Table>) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let full_text = paragraphs
            .into_iter()
            .filter_map(|p| {
                let p = p.as_ref().trim();
                (!p.is_empty()).then(|| p.to_string())
            })
            .collect::<Vec<_>>()
            .join("\n");

        Self { full_text, tables }
    }

    /// Create a table-less document from plain text, one paragraph per line.
    pub fn from_plain_text(text: &str) -> Self {
        Self::from_paragraphs(text.lines(), Vec::new())
    }

    /// Parse a serialized document (`{"full_text": ..., "tables": [...]}`).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }
}
