//! Normalization pipeline run over the whole catalog before every persisted write.
//!
//! Stage A ([`standardize`]) enforces record-level invariants: empty values become null,
//! placeholder dataset links are dropped, geographic fields are made consistent with the
//! record's geo-level and null links get the renderer placeholder.
//! Stage B ([`derive`]) recomputes the Spanish translations and the author id stubs.
//!
//! Both stages are idempotent; every save re-runs them over every record.

use std::collections::BTreeSet;

use crate::data::translation::Translator;
use crate::data::usecase::{Catalog, Dataset, GeoLevel, UseCase, URL_PLACEHOLDER};
use crate::data::vocab::HOME_COUNTRY;
use crate::error::Result;

/// Trailing two-letter state codes of entries formatted `"<name> (<UF>)"`, deduplicated
/// and sorted. The format is not checked: a malformed entry yields whatever sits in
/// the two characters before its last character.
pub fn extract_state_codes(municipalities: Option<&[String]>) -> Option<Vec<String>> {
    let municipalities = municipalities?;
    let codes: BTreeSet<String> = municipalities
        .iter()
        .map(|entry| {
            let chars: Vec<char> = entry.chars().collect();
            let end = chars.len().saturating_sub(1);
            let start = end.saturating_sub(2);
            chars[start..end].iter().collect()
        })
        .collect();
    Some(codes.into_iter().collect())
}

fn null_if_empty(value: &mut Option<String>) {
    if value.as_deref() == Some("") {
        *value = None;
    }
}

fn null_if_empty_list<T>(value: &mut Option<Vec<T>>) {
    if value.as_ref().is_some_and(Vec::is_empty) {
        *value = None;
    }
}

fn placeholder_if_null(value: &mut Option<String>) {
    if value.is_none() {
        *value = Some(URL_PLACEHOLDER.to_string());
    }
}

fn standardize_dataset(dataset: &mut Dataset) {
    null_if_empty(&mut dataset.data_name);
    null_if_empty(&mut dataset.data_institution);
    null_if_empty(&mut dataset.data_url);
    if matches!(dataset.data_url.as_deref(), Some("http://") | Some("https://")) {
        dataset.data_url = None;
    }
}

/// Null out the geographic fields that do not belong to the selected geo-level.
pub fn clear_inactive_geo_fields(record: &mut UseCase) {
    let level = record.geo_level;
    if level != Some(GeoLevel::Countries) {
        record.countries = None;
    }
    if level != Some(GeoLevel::FederalUnits) {
        record.fed_units = None;
    }
    if level != Some(GeoLevel::Municipalities) {
        record.municipalities = None;
    }
}

fn apply_geo_level(record: &mut UseCase) {
    clear_inactive_geo_fields(record);
    let Some(level) = record.geo_level else {
        return;
    };
    if level == GeoLevel::Municipalities {
        record.fed_units = extract_state_codes(record.municipalities.as_deref());
    }
    if level.implies_home_country() {
        record.countries = Some(vec![HOME_COUNTRY.to_string()]);
    }
}

pub fn standardize_record(record: &mut UseCase) {
    null_if_empty(&mut record.url);
    null_if_empty(&mut record.description);
    null_if_empty(&mut record.url_source);
    null_if_empty(&mut record.comment);

    for dataset in &mut record.datasets {
        standardize_dataset(dataset);
    }

    null_if_empty_list(&mut record.authors);
    null_if_empty_list(&mut record.email);
    null_if_empty_list(&mut record.countries);
    null_if_empty_list(&mut record.fed_units);
    null_if_empty_list(&mut record.municipalities);
    null_if_empty_list(&mut record.usecase_type);
    null_if_empty_list(&mut record.topics);
    null_if_empty_list(&mut record.tags);

    // Must follow the empty-list pass.
    apply_geo_level(record);

    placeholder_if_null(&mut record.url);
    placeholder_if_null(&mut record.url_source);
}

/// Stage A, in place.
pub fn standardize(catalog: &mut Catalog) {
    for record in &mut catalog.records {
        standardize_record(record);
    }
}

fn translate_field(
    translator: &Translator,
    field: &str,
    source: Option<&[String]>,
) -> Result<Option<Vec<String>>> {
    source
        .map(|values| translator.translate_all(field, values))
        .transpose()
}

pub fn derive_record(record: &mut UseCase, translator: &Translator) -> Result<()> {
    let type_es = translate_field(translator, "type", record.usecase_type.as_deref())?;
    let topics_es = translate_field(translator, "topics", record.topics.as_deref())?;
    let countries_es = translate_field(translator, "countries", record.countries.as_deref())?;
    record.type_es = type_es;
    record.topics_es = topics_es;
    record.countries_es = countries_es;

    // External author ids are not resolved yet; keep one null slot per author.
    record.authors_id = record
        .authors
        .as_ref()
        .map(|authors| vec![None; authors.len()]);
    Ok(())
}

/// Stage B, in place. Stops at the first untranslated value.
pub fn derive(catalog: &mut Catalog, translator: &Translator) -> Result<()> {
    for record in &mut catalog.records {
        derive_record(record, translator)?;
    }
    Ok(())
}

/// Run both stages and stamp `last_update`. Works on a copy: on error `catalog` is left
/// exactly as it was.
pub fn prepare_for_save(catalog: &mut Catalog, translator: &Translator, today: &str) -> Result<()> {
    let mut working = catalog.clone();
    standardize(&mut working);
    derive(&mut working, translator)?;
    working.metadata.last_update = today.to_string();
    tracing::debug!(records = working.records.len(), "catalog normalized");
    *catalog = working;
    Ok(())
}
