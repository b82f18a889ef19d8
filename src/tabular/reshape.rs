//! Table reshaping: one-hot encoding, dummy columns to lists, cross joins, row hashing.

use std::collections::{BTreeSet, HashSet};

use regex::Regex;

use super::Table;
use crate::data::store::checksum32;
use crate::error::{CordataError, Result};

/// How the distinct values of one column are ordered in [`cross_join_columns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnOrder {
    #[default]
    FirstSeen,
    Ascending,
    Descending,
}

fn distinct_in_order(values: impl Iterator<Item = Option<String>>) -> Vec<Option<String>> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}

/// One 0/1 column named `<column>_<value>` per distinct non-blank value of every column.
/// Values within a column are sorted; blank cells encode as all zeros. With
/// `sort_by_cardinality`, columns with fewer distinct values come first.
pub fn one_hot(table: &Table, sort_by_cardinality: bool) -> Table {
    let mut encoded: Vec<(usize, &str, Vec<String>)> = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let categories: BTreeSet<String> = table
                .rows
                .iter()
                .filter_map(|row| row[index].clone())
                .collect();
            (index, name.as_str(), categories.into_iter().collect())
        })
        .collect();
    if sort_by_cardinality {
        encoded.sort_by_key(|(_, _, categories)| categories.len());
    }

    let columns = encoded
        .iter()
        .flat_map(|(_, name, categories)| {
            categories.iter().map(move |value| format!("{name}_{value}"))
        })
        .collect();
    let rows = table
        .rows
        .iter()
        .map(|row| {
            encoded
                .iter()
                .flat_map(|(index, _, categories)| {
                    categories.iter().map(move |value| {
                        let hit = row[*index].as_deref() == Some(value.as_str());
                        Some(if hit { "1" } else { "0" }.to_string())
                    })
                })
                .collect()
        })
        .collect();
    Table::new(columns, rows)
}

fn dummy_is_set(raw: Option<&str>, column: &str) -> Result<bool> {
    match raw.map(str::trim) {
        None | Some("0") | Some("0.0") => Ok(false),
        Some("1") | Some("1.0") => Ok(true),
        Some(other) => Err(CordataError::InvalidInput(format!(
            "column '{column}' holds '{other}', expected a 0/1 dummy"
        ))),
    }
}

/// Collapse dummy (0/1) columns into one list of labels per row, in `labels` order.
pub fn options_to_list(table: &Table, labels: &[(&str, &str)]) -> Result<Vec<Vec<String>>> {
    let indices = labels
        .iter()
        .map(|(column, label)| {
            table
                .column_index(column)
                .map(|index| (index, *column, *label))
                .ok_or_else(|| CordataError::InvalidInput(format!("no column named '{column}'")))
        })
        .collect::<Result<Vec<_>>>()?;

    table
        .rows
        .iter()
        .map(|row| {
            let mut selected = Vec::new();
            for (index, column, label) in &indices {
                if dummy_is_set(row[*index].as_deref(), column)? {
                    selected.push(label.to_string());
                }
            }
            Ok(selected)
        })
        .collect()
}

/// Every combination of the distinct values of all columns; the first column varies
/// slowest. `ordering` is either empty (first-seen order everywhere), a single entry
/// applied to every column, or one entry per column.
pub fn cross_join_columns(table: &Table, ordering: &[ColumnOrder]) -> Result<Table> {
    let width = table.columns.len();
    let order_for = |index: usize| match ordering.len() {
        0 => Ok(ColumnOrder::FirstSeen),
        1 => Ok(ordering[0]),
        n if n == width => Ok(ordering[index]),
        n => Err(CordataError::InvalidInput(format!(
            "{n} orderings given for {width} columns"
        ))),
    };

    let mut rows: Vec<Vec<Option<String>>> = vec![Vec::new()];
    for index in 0..width {
        let mut values = distinct_in_order(table.rows.iter().map(|row| row[index].clone()));
        match order_for(index)? {
            ColumnOrder::FirstSeen => {}
            ColumnOrder::Ascending => values.sort(),
            ColumnOrder::Descending => values.sort_by(|a, b| b.cmp(a)),
        }
        rows = rows
            .into_iter()
            .flat_map(|prefix| {
                values.iter().map(move |value| {
                    let mut row = prefix.clone();
                    row.push(value.clone());
                    row
                })
            })
            .collect();
    }
    Ok(Table::new(table.columns.clone(), rows))
}

/// Every row of `left` combined with every row of `right`.
pub fn cross_join(left: &Table, right: &Table) -> Result<Table> {
    if let Some(shared) = left.columns.iter().find(|c| right.columns.contains(c)) {
        return Err(CordataError::InvalidInput(format!(
            "column '{shared}' exists on both sides of the cross join"
        )));
    }
    let columns = left.columns.iter().chain(&right.columns).cloned().collect();
    let rows = left
        .rows
        .iter()
        .flat_map(|l| {
            right
                .rows
                .iter()
                .map(move |r| l.iter().chain(r).cloned().collect())
        })
        .collect();
    Ok(Table::new(columns, rows))
}

/// Checksum of each row's concatenated cells; blank cells contribute nothing.
pub fn hash_rows(table: &Table) -> Vec<u32> {
    table
        .rows
        .iter()
        .map(|row| {
            let joined: String = row.iter().flatten().map(String::as_str).collect();
            checksum32(&joined)
        })
        .collect()
}

pub fn select_columns_by_regex(table: &Table, pattern: &str) -> Result<Vec<String>> {
    let pattern = Regex::new(pattern)?;
    Ok(table
        .columns
        .iter()
        .filter(|name| pattern.is_match(name))
        .cloned()
        .collect())
}
