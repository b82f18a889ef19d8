//! Tabular cleaning utilities used to prepare the catalog's source spreadsheets.
//! Stateless row/column transforms over a small in-memory [`Table`].

pub mod clean;
pub mod reshape;

use std::fs;
use std::path::Path;

use calamine::Reader;

use crate::error::{CordataError, Result};

pub use clean::{
    is_bad_url, parse_iso_date, parse_pub_date, split_delimited, std_date, std_string, Case,
};
pub use reshape::{
    cross_join, cross_join_columns, hash_rows, one_hot, options_to_list,
    select_columns_by_regex, ColumnOrder,
};

/// Column-named rows of optional text cells. Blank cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Table { columns, rows }
    }

    /// Build from string literals; empty strings become `None`.
    pub fn from_strs(columns: &[&str], rows: &[&[&str]]) -> Self {
        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| non_blank(cell)).collect())
                .collect(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| CordataError::InvalidInput(format!("no column named '{name}'")))
    }

    pub fn column(&self, name: &str) -> Result<Vec<Option<&str>>> {
        let index = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| row[index].as_deref()).collect())
    }

    /// Rewrite every cell of column `name` in place.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(Option<&str>) -> Result<Option<String>>,
    {
        let index = self.require_column(name)?;
        for row in &mut self.rows {
            row[index] = f(row[index].as_deref())?;
        }
        Ok(())
    }

    /// Sub-table with the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let indices = names
            .iter()
            .map(|name| self.require_column(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(Table {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    /// Dispatch on extension: spreadsheets via calamine, everything else as CSV.
    pub fn read(path: &Path) -> Result<Table> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") | Some("xls") | Some("ods") => Self::read_spreadsheet(path),
            _ => Self::read_csv(path),
        }
    }

    pub fn read_csv(path: &Path) -> Result<Table> {
        let raw = fs::read_to_string(path)?;
        Self::from_csv_str(&raw)
    }

    pub fn from_csv_str(raw: &str) -> Result<Table> {
        let mut reader = csv::Reader::from_reader(raw.as_bytes());
        let columns = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<Option<String>> = record.iter().map(non_blank).collect();
            row.resize(columns.len(), None);
            rows.push(row);
        }
        Ok(Table { columns, rows })
    }

    /// First worksheet; the first row holds the column names.
    pub fn read_spreadsheet(path: &Path) -> Result<Table> {
        let mut workbook = calamine::open_workbook_auto(path)
            .map_err(|err| CordataError::Spreadsheet(err.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| CordataError::Spreadsheet(format!("{} has no sheets", path.display())))?
            .map_err(|err| CordataError::Spreadsheet(err.to_string()))?;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Table::default());
        };
        let columns: Vec<String> = header
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect();
        let rows = rows
            .map(|row| {
                let mut cells: Vec<Option<String>> = row.iter().map(cell_text).collect();
                cells.resize(columns.len(), None);
                cells
            })
            .collect();
        Ok(Table { columns, rows })
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| CordataError::Io(err.into_error()))?;
        String::from_utf8(bytes).map_err(|err| CordataError::InvalidInput(err.to_string()))
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_csv_string()?)?;
        Ok(())
    }
}

fn non_blank(cell: &str) -> Option<String> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

fn cell_text(cell: &calamine::Data) -> Option<String> {
    match cell {
        calamine::Data::Empty => None,
        calamine::Data::String(s) => non_blank(s),
        calamine::Data::Int(i) => Some(i.to_string()),
        calamine::Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        calamine::Data::Float(f) => Some(f.to_string()),
        calamine::Data::Bool(b) => Some(b.to_string()),
        other => non_blank(&other.to_string()),
    }
}
