//! Record store: identity assignment, positional lookup, insertion, replacement,
//! removal and status filtering over the catalog's record list.
//! Persisting after a mutation is the caller's job (see `session`).

use std::collections::{BTreeMap, BTreeSet};

use crate::data::usecase::{Catalog, Status, StatusAxis, UseCase};
use crate::error::{CordataError, Result};

/// Allowed statuses per axis. An axis missing from the map imposes no constraint.
pub type StatusFilter = BTreeMap<StatusAxis, BTreeSet<Status>>;

/// CRC-32 (IEEE) over the UTF-8 bytes of `text`, used purely as an identifier generator.
pub fn checksum32(text: &str) -> u32 {
    crc32fast::hash(text.as_bytes())
}

/// Identity of a record: checksum of its name followed by its creation date.
pub fn usecase_hash_id(name: &str, record_date: &str) -> u32 {
    checksum32(&format!("{name}{record_date}"))
}

/// Position of the record with `hash_id`. More than one match means the store is corrupt.
pub fn find_position(records: &[UseCase], hash_id: u32) -> Result<usize> {
    let mut matches = records
        .iter()
        .enumerate()
        .filter(|(_, uc)| uc.hash_id == hash_id)
        .map(|(index, _)| index);
    let Some(first) = matches.next() else {
        return Err(CordataError::NotFound { hash_id });
    };
    let extra = matches.count();
    if extra > 0 {
        return Err(CordataError::DuplicateId {
            hash_id,
            count: extra + 1,
        });
    }
    Ok(first)
}

/// Every record must carry its own id; reports the first id that repeats.
pub fn ensure_unique_ids(records: &[UseCase]) -> Result<()> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.hash_id).or_default() += 1;
    }
    match records.iter().find(|uc| counts[&uc.hash_id] > 1) {
        Some(repeated) => Err(CordataError::DuplicateId {
            hash_id: repeated.hash_id,
            count: counts[&repeated.hash_id],
        }),
        None => Ok(()),
    }
}

pub fn select_by_id(records: &[UseCase], hash_id: u32) -> Result<&UseCase> {
    let index = find_position(records, hash_id)?;
    Ok(&records[index])
}

/// New records surface first.
pub fn insert(catalog: &mut Catalog, record: UseCase) {
    catalog.records.insert(0, record);
}

/// Overwrite the slot holding `record.hash_id`, stamping `modified_date` on the stored copy.
pub fn replace(catalog: &mut Catalog, mut record: UseCase, today: &str) -> Result<()> {
    let index = find_position(&catalog.records, record.hash_id)?;
    record.modified_date = today.to_string();
    catalog.records[index] = record;
    Ok(())
}

pub fn remove(catalog: &mut Catalog, hash_id: u32) -> Result<UseCase> {
    let index = find_position(&catalog.records, hash_id)?;
    Ok(catalog.records.remove(index))
}

pub fn status_selected(record: &UseCase, filter: &StatusFilter) -> bool {
    filter
        .iter()
        .all(|(axis, allowed)| allowed.contains(&record.status(*axis)))
}

/// Records passing every axis of `filter`, in catalog order.
pub fn filter_by_status<'a>(records: &'a [UseCase], filter: &StatusFilter) -> Vec<&'a UseCase> {
    records
        .iter()
        .filter(|record| status_selected(record, filter))
        .collect()
}

/// Parse a filter from `axis=Label,Label` pairs, e.g. a URL query string.
/// Unknown axes and labels are rejected.
pub fn parse_status_filter<'a, I>(pairs: I) -> Result<StatusFilter>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut filter = StatusFilter::new();
    for (key, raw_values) in pairs {
        let axis = StatusAxis::from_key(key)
            .ok_or_else(|| CordataError::InvalidInput(format!("unknown status axis '{key}'")))?;
        let allowed = filter.entry(axis).or_default();
        for raw in raw_values.split(',').filter(|v| !v.trim().is_empty()) {
            let status = Status::parse(raw).ok_or_else(|| {
                CordataError::InvalidInput(format!("unknown status '{raw}' for {key}"))
            })?;
            allowed.insert(status);
        }
    }
    Ok(filter)
}
