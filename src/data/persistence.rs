//! Persistence gateway: the catalog as a JSON document on disk, or fetched over HTTP.
//! Documents are deserialized straight into the typed model, so a malformed document is
//! rejected here instead of failing deep inside the pipeline.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::data::normalize::prepare_for_save;
use crate::data::translation::Translator;
use crate::data::usecase::Catalog;
use crate::error::{CordataError, Result};

pub const DEFAULT_DATA_PATH: &str = "data/usecases_temp.json";
pub const DEFAULT_REMOTE_URL: &str =
    "https://raw.githubusercontent.com/cewebbr/cordata/refs/heads/main/dados/limpos/usecases_current.json";

pub fn parse_catalog(raw: &str) -> Result<Catalog> {
    Ok(serde_json::from_str(raw)?)
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "loading catalog");
    let raw = fs::read_to_string(path)?;
    parse_catalog(&raw)
}

/// One-space indentation, non-ASCII text kept as is.
pub fn to_document_string(catalog: &Catalog) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    catalog.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|err| CordataError::InvalidInput(err.to_string()))
}

/// Plain write, no temp file or rename: a crash mid-write can corrupt the document.
pub fn save_catalog(path: impl AsRef<Path>, catalog: &Catalog) -> Result<()> {
    let path = path.as_ref();
    let document = to_document_string(catalog)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document)?;
    tracing::info!(path = %path.display(), records = catalog.records.len(), "saved catalog");
    Ok(())
}

/// Normalize, derive and write. `catalog` is replaced by the written version only once
/// the write succeeded; on any error neither the file nor `catalog` change.
pub fn persist(
    path: impl AsRef<Path>,
    catalog: &mut Catalog,
    translator: &Translator,
    today: &str,
) -> Result<()> {
    let mut prepared = catalog.clone();
    prepare_for_save(&mut prepared, translator, today)?;
    save_catalog(path, &prepared)?;
    *catalog = prepared;
    Ok(())
}

/// Blocking GET with no timeout or retry. Anything but 200 is a [`CordataError::RemoteFetch`].
pub fn fetch_remote_catalog(url: &str) -> Result<Catalog> {
    tracing::info!(url, "fetching remote catalog");
    let response = reqwest::blocking::get(url)?;
    let status = response.status().as_u16();
    if status != 200 {
        tracing::warn!(url, status, "remote catalog fetch failed");
        return Err(CordataError::RemoteFetch { status });
    }
    let body = response.text()?;
    parse_catalog(&body)
}
