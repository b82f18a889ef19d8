//! Portuguese -> Spanish lookup for controlled-vocabulary fields.
//! Built from a table with columns `campo` (field name), `texto_pt` and `texto_es`.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CordataError, Result};
use crate::tabular::Table;

pub const DEFAULT_TRANSLATIONS_PATH: &str = "data/translations.csv";

const FIELD_COLUMN: &str = "campo";
const SOURCE_COLUMN: &str = "texto_pt";
const TARGET_COLUMN: &str = "texto_es";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRow {
    pub campo: String,
    pub texto_pt: String,
    pub texto_es: String,
}

/// Source -> target map from the rows whose field name matches `field_pattern`.
/// Later rows override earlier ones for the same source text.
pub fn build_translation_table(
    rows: &[TranslationRow],
    field_pattern: &str,
    lowercase: bool,
) -> Result<HashMap<String, String>> {
    let pattern = Regex::new(field_pattern)?;
    let table = rows
        .iter()
        .filter(|row| pattern.is_match(&row.campo))
        .map(|row| {
            if lowercase {
                (row.texto_pt.to_lowercase(), row.texto_es.to_lowercase())
            } else {
                (row.texto_pt.clone(), row.texto_es.clone())
            }
        })
        .collect();
    Ok(table)
}

/// Read translation rows from a CSV file or a spreadsheet (first sheet).
pub fn load_translation_rows(path: impl AsRef<Path>) -> Result<Vec<TranslationRow>> {
    let table = Table::read(path.as_ref())?;
    rows_from_table(&table)
}

pub fn rows_from_table(table: &Table) -> Result<Vec<TranslationRow>> {
    let column_index = |name: &str| {
        table.column_index(name).ok_or_else(|| {
            CordataError::InvalidInput(format!("translation table has no '{name}' column"))
        })
    };
    let field = column_index(FIELD_COLUMN)?;
    let source = column_index(SOURCE_COLUMN)?;
    let target = column_index(TARGET_COLUMN)?;

    let cell = |row: &[Option<String>], index: usize| row[index].clone().unwrap_or_default();
    Ok(table
        .rows
        .iter()
        .filter(|row| row[source].is_some())
        .map(|row| TranslationRow {
            campo: cell(row, field),
            texto_pt: cell(row, source),
            texto_es: cell(row, target),
        })
        .collect())
}

/// Strict lookup: an untranslated value is an error, never passed through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translator {
    table: HashMap<String, String>,
}

impl Translator {
    pub fn new(table: HashMap<String, String>) -> Self {
        Translator { table }
    }

    pub fn from_rows(rows: &[TranslationRow]) -> Result<Self> {
        Ok(Self::new(build_translation_table(rows, ".*", false)?))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rows = load_translation_rows(path)?;
        tracing::debug!(path = %path.display(), entries = rows.len(), "loaded translation table");
        Self::from_rows(&rows)
    }

    /// `field` only names the offending field in the error.
    pub fn translate(&self, field: &str, value: &str) -> Result<String> {
        self.table
            .get(value)
            .cloned()
            .ok_or_else(|| CordataError::TranslationMissing {
                field: field.to_string(),
                value: value.to_string(),
            })
    }

    pub fn translate_all(&self, field: &str, values: &[String]) -> Result<Vec<String>> {
        values
            .iter()
            .map(|value| self.translate(field, value))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
