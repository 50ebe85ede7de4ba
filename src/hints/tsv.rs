//! Row-oriented tab-separated table file with preserved comment lines.
//!
//! The on-disk shape is a sequence of named tables. A table starts with a
//! `== name` line, followed by its `#` comment lines and one row per line:
//! the row key, then its cells, all tab-separated. Comments captured at read
//! time are written back verbatim.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HintError {
    #[error("failed to read hint store {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write hint store {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type TableId = usize;
pub type RowId = usize;

#[derive(Debug, Default)]
struct Table {
    name: String,
    comments: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
    by_key: HashMap<String, RowId>,
}

#[derive(Debug, Default)]
pub struct TsvFile {
    tables: Vec<Table>,
    by_name: HashMap<String, TableId>,
}

impl TsvFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a table file; a missing file yields an empty one.
    pub fn read(path: &Path) -> Result<Self, HintError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(source) => Err(HintError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn parse(text: &str) -> Self {
        let mut file = Self::new();
        let mut current: Option<TableId> = None;
        for line in text.lines() {
            if let Some(name) = line.strip_prefix("== ") {
                let (table, _) = file.add_table(name.trim());
                current = Some(table);
            } else if let Some(comment) = line.strip_prefix('#') {
                if let Some(table) = current {
                    file.add_table_comment(table, comment.strip_prefix(' ').unwrap_or(comment));
                }
            } else if !line.is_empty() {
                if let Some(table) = current {
                    let mut cells = line.split('\t');
                    let key = cells.next().unwrap_or("").to_string();
                    let values: Vec<String> = cells.map(str::to_string).collect();
                    file.insert_row(table, key, values);
                }
            }
        }
        file
    }

    /// Look up or create a table, reporting whether it already existed.
    pub fn add_table(&mut self, name: &str) -> (TableId, bool) {
        if let Some(&table) = self.by_name.get(name) {
            return (table, true);
        }
        let table = self.tables.len();
        self.by_name.insert(name.to_string(), table);
        self.tables.push(Table {
            name: name.to_string(),
            ..Table::default()
        });
        (table, false)
    }

    pub fn add_table_comment(&mut self, table: TableId, text: &str) {
        self.tables[table].comments.push(text.to_string());
    }

    /// Look up or create a row under `key`, returning its id.
    pub fn add_row(&mut self, table: TableId, key: &str) -> RowId {
        if let Some(row) = self.find_row(table, key) {
            return row;
        }
        let t = &mut self.tables[table];
        let row = t.rows.len();
        t.by_key.insert(key.to_string(), row);
        t.rows.push((key.to_string(), Vec::new()));
        row
    }

    pub fn find_row(&self, table: TableId, key: &str) -> Option<RowId> {
        self.tables[table].by_key.get(key).copied()
    }

    pub fn row(&self, table: TableId, row: RowId) -> &[String] {
        &self.tables[table].rows[row].1
    }

    pub fn row_mut(&mut self, table: TableId, row: RowId) -> &mut Vec<String> {
        &mut self.tables[table].rows[row].1
    }

    pub fn write(&self, path: &Path) -> Result<(), HintError> {
        let mut out = String::new();
        for table in &self.tables {
            out.push_str("== ");
            out.push_str(&table.name);
            out.push('\n');
            for comment in &table.comments {
                if comment.is_empty() {
                    out.push_str("#\n");
                } else {
                    out.push_str("# ");
                    out.push_str(comment);
                    out.push('\n');
                }
            }
            for (key, cells) in &table.rows {
                out.push_str(key);
                for cell in cells {
                    out.push('\t');
                    out.push_str(cell);
                }
                out.push('\n');
            }
            out.push('\n');
        }
        fs::write(path, out).map_err(|source| HintError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn insert_row(&mut self, table: TableId, key: String, values: Vec<String>) {
        let t = &mut self.tables[table];
        if t.by_key.contains_key(&key) {
            return;
        }
        t.by_key.insert(key.clone(), t.rows.len());
        t.rows.push((key, values));
    }
}
