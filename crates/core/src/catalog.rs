//! In-memory catalog dataset and the tab-separated loader that builds it.
//!
//! The whole file is read before any rule runs. Cells are kept as the literal
//! text from the file so that rules can tell `3` from `3.0`; missing-value
//! markers are resolved lazily through [`RowRef::value`].

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::LoadError;
use crate::types::{is_missing_marker, CatalogField, RowIndex};

/// UTF-8 byte order mark some spreadsheet exports prepend to the header.
const BOM: char = '\u{feff}';

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Column names in file order, plus a name -> position lookup.
///
/// When a name is repeated, lookups resolve to its first occurrence; the
/// schema check reports the duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Header {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut positions = HashMap::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            positions.entry(name.clone()).or_insert(idx);
        }
        Self { columns, positions }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One data line of the catalog, padded to the header width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub index: RowIndex,
    /// 1-based physical line in the source (the header is line 1).
    pub line: u64,
    pub cells: Vec<String>,
}

/// A row paired with the header it belongs to, so rules can address cells by
/// column name.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    header: &'a Header,
    row: &'a CatalogRow,
}

impl<'a> RowRef<'a> {
    pub fn new(header: &'a Header, row: &'a CatalogRow) -> Self {
        Self { header, row }
    }

    pub fn index(&self) -> RowIndex {
        self.row.index
    }

    pub fn line(&self) -> u64 {
        self.row.line
    }

    /// Literal cell text for `column`, or `None` if the header lacks it.
    pub fn raw(&self, column: &str) -> Option<&'a str> {
        let pos = self.header.position(column)?;
        self.row.cells.get(pos).map(String::as_str)
    }

    /// Cell value for `field`, with missing markers and absent columns both
    /// mapped to `None`.
    pub fn value(&self, field: CatalogField) -> Option<&'a str> {
        self.raw(field.as_str()).filter(|raw| !is_missing_marker(raw))
    }

    /// Every `(column, literal text)` pair of the row in header order.
    pub fn payload(&self) -> Vec<(String, String)> {
        self.header
            .columns()
            .iter()
            .zip(self.row.cells.iter())
            .map(|(column, cell)| (column.clone(), cell.clone()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// A fully loaded catalog: header plus every data row, immutable once built.
#[derive(Debug, Clone)]
pub struct CatalogDataset {
    source: String,
    header: Header,
    rows: Vec<CatalogRow>,
}

impl CatalogDataset {
    /// Build a dataset directly from in-memory parts. Rows shorter than the
    /// header are padded with empty (missing) cells.
    pub fn from_parts(source: impl Into<String>, header: Header, rows: Vec<Vec<String>>) -> Self {
        let width = header.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, mut cells)| {
                if cells.len() < width {
                    cells.resize(width, String::new());
                }
                CatalogRow {
                    index,
                    line: index as u64 + 2,
                    cells,
                }
            })
            .collect();
        Self {
            source: source.into(),
            header,
            rows,
        }
    }

    /// Open and load a tab-separated catalog file.
    pub fn load_tsv(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_tsv_reader(file, &path.display().to_string())
    }

    /// Load a tab-separated catalog from any reader.
    ///
    /// `"` has no special meaning. Blank lines are skipped. A row with more
    /// fields than the header is rejected; a shorter row is padded with
    /// missing cells.
    pub fn from_tsv_reader<R: Read>(reader: R, source_name: &str) -> Result<Self, LoadError> {
        tracing::info!(source = %source_name, "Loading catalog");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header_record = reader
            .headers()
            .map_err(|e| LoadError::from_csv(source_name, e))?
            .clone();

        let columns: Vec<String> = header_record
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                if idx == 0 {
                    name.trim_start_matches(BOM).to_string()
                } else {
                    name.to_string()
                }
            })
            .collect();

        if columns.iter().all(String::is_empty) {
            return Err(LoadError::EmptyInput {
                source_name: source_name.to_string(),
            });
        }

        let header = Header::new(columns);
        let width = header.len();
        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record.map_err(|e| LoadError::from_csv(source_name, e))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() > width {
                return Err(LoadError::RaggedRow {
                    source_name: source_name.to_string(),
                    line,
                    expected: width,
                    found: record.len(),
                });
            }

            let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
            cells.resize(width, String::new());
            rows.push(CatalogRow {
                index: rows.len(),
                line,
                cells,
            });
        }

        tracing::info!(
            source = %source_name,
            columns = width,
            rows = rows.len(),
            "Catalog loaded",
        );

        Ok(Self {
            source: source_name.to_string(),
            header,
            rows,
        })
    }

    /// Where the dataset was loaded from (a path, or a caller-chosen label).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in file order, each bound to the header.
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> + '_ {
        self.rows.iter().map(|row| RowRef::new(&self.header, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn load(text: &str) -> Result<CatalogDataset, LoadError> {
        CatalogDataset::from_tsv_reader(text.as_bytes(), "inline")
    }

    #[test]
    fn reads_header_and_rows_in_order() {
        let ds = load("id\ttitle\na1\tFirst\na2\tSecond\n").unwrap();
        assert_eq!(ds.header().columns(), &["id", "title"]);
        assert_eq!(ds.len(), 2);

        let rows: Vec<_> = ds.rows().collect();
        assert_eq!(rows[0].index(), 0);
        assert_eq!(rows[0].line(), 2);
        assert_eq!(rows[1].value(CatalogField::Title), Some("Second"));
    }

    #[test]
    fn quotes_are_ordinary_characters() {
        let ds = load("id\ttitle\na1\t\"Quoted\ttitle\n");
        // The tab inside the quotes still splits the field, so the row is too wide.
        assert_matches!(ds, Err(LoadError::RaggedRow { expected: 2, found: 3, .. }));

        let ds = load("id\ttitle\na1\t\"Quoted\" title\n").unwrap();
        let row = ds.rows().next().unwrap();
        assert_eq!(row.raw("title"), Some("\"Quoted\" title"));
    }

    #[test]
    fn short_rows_are_padded_with_missing_cells() {
        let ds = load("id\ttitle\tbrand\na1\tFirst\n").unwrap();
        let row = ds.rows().next().unwrap();
        assert_eq!(row.raw("brand"), Some(""));
        assert_eq!(row.value(CatalogField::Brand), None);
    }

    #[test]
    fn missing_markers_read_as_none_but_payload_keeps_text() {
        let ds = load("id\tbrand\na1\tNaN\n").unwrap();
        let row = ds.rows().next().unwrap();
        assert_eq!(row.value(CatalogField::Brand), None);
        assert_eq!(
            row.payload(),
            vec![
                ("id".to_string(), "a1".to_string()),
                ("brand".to_string(), "NaN".to_string()),
            ]
        );
    }

    #[test]
    fn absent_column_reads_as_none() {
        let ds = load("id\na1\n").unwrap();
        let row = ds.rows().next().unwrap();
        assert_eq!(row.raw("brand"), None);
        assert_eq!(row.value(CatalogField::Brand), None);
    }

    #[test]
    fn strips_byte_order_mark_from_first_column() {
        let ds = load("\u{feff}id\ttitle\na1\tFirst\n").unwrap();
        assert_eq!(ds.header().columns()[0], "id");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_matches!(load(""), Err(LoadError::EmptyInput { .. }));
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let bytes: &[u8] = b"id\ttitle\na1\t\xff\xfe\n";
        let result = CatalogDataset::from_tsv_reader(bytes, "inline");
        assert_matches!(result, Err(LoadError::Encoding { .. }));
    }

    #[test]
    fn duplicate_header_names_resolve_to_first_occurrence() {
        let header = Header::new(["id", "title", "id"]);
        assert_eq!(header.position("id"), Some(0));
        assert_eq!(header.len(), 3);
    }

    #[test]
    fn from_parts_pads_and_numbers_rows() {
        let header = Header::new(["id", "title"]);
        let ds = CatalogDataset::from_parts("mem", header, vec![vec!["a1".into()]]);
        let row = ds.rows().next().unwrap();
        assert_eq!(row.line(), 2);
        assert_eq!(row.raw("title"), Some(""));
    }
}
