use serde::{Deserialize, Serialize};

use crate::data::persistence::parse_catalog;
use crate::data::store::{parse_status_filter, StatusFilter};
use crate::data::usecase::UseCase;
use crate::data::validate::{validate_catalog, ValidationDiagnostic};
use crate::error::{CordataError, Result};
use crate::server::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchRequest {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UseCaseListResponse<'a> {
    pub last_update: &'a str,
    pub total: usize,
    pub count: usize,
    pub records: Vec<&'a UseCase>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary<'a> {
    pub status: &'static str,
    pub last_update: &'a str,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse<'a> {
    pub status: &'static str,
    pub errors: usize,
    pub diagnostics: &'a [ValidationDiagnostic],
}

pub fn health_payload() -> Result<String> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "cordata-api",
        "version": env!("CARGO_PKG_VERSION")
    }))?)
}

/// Status filter from the query part of a request target, e.g.
/// `/api/usecases?status_published=Publicado,Oculto`.
pub fn parse_query_filter(path: &str) -> Result<StatusFilter> {
    let url = reqwest::Url::parse(&format!("http://localhost{path}"))
        .map_err(|err| CordataError::InvalidInput(format!("bad request target: {err}")))?;
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    parse_status_filter(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

/// Numeric id segment following `prefix` in the request path.
pub fn parse_id_segment(path: &str, prefix: &str) -> Result<u32> {
    let raw = path
        .trim_start_matches(prefix)
        .split(['/', '?'])
        .next()
        .unwrap_or("");
    raw.parse()
        .map_err(|_| CordataError::InvalidInput(format!("'{raw}' is not a use case id")))
}

pub fn usecases_payload(state: &AppState, path: &str) -> Result<String> {
    let filter = parse_query_filter(path)?;
    let catalog = state.session.catalog();
    let records = state.session.list_records(&filter);
    let response = UseCaseListResponse {
        last_update: &catalog.metadata.last_update,
        total: catalog.len(),
        count: records.len(),
        records,
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

pub fn usecase_get_payload(state: &AppState, hash_id: u32) -> Result<String> {
    Ok(serde_json::to_string_pretty(state.session.get_record(hash_id)?)?)
}

pub fn usecase_create_payload(state: &mut AppState, body: &str) -> Result<String> {
    let request: CreateRequest = serde_json::from_str(body)?;
    let record = state.session.create_record(&request.name)?;
    Ok(serde_json::to_string_pretty(&record)?)
}

/// The body must describe the record named by the path.
pub fn usecase_put_payload(state: &mut AppState, hash_id: u32, body: &str) -> Result<String> {
    let record: UseCase = serde_json::from_str(body)?;
    if record.hash_id != hash_id {
        return Err(CordataError::InvalidInput(format!(
            "body describes use case {} but the path names {hash_id}",
            record.hash_id
        )));
    }
    state.session.update_record(record)?;
    usecase_get_payload(state, hash_id)
}

pub fn usecase_delete_payload(state: &mut AppState, hash_id: u32) -> Result<String> {
    state.session.delete_record(hash_id)?;
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "deleted": hash_id
    }))?)
}

fn catalog_summary(state: &AppState) -> Result<String> {
    let catalog = state.session.catalog();
    Ok(serde_json::to_string_pretty(&CatalogSummary {
        status: "ok",
        last_update: &catalog.metadata.last_update,
        records: catalog.len(),
    })?)
}

/// Empty body fetches from the configured remote.
pub fn catalog_fetch_payload(state: &mut AppState, body: &str) -> Result<String> {
    let request: FetchRequest = if body.trim().is_empty() {
        FetchRequest::default()
    } else {
        serde_json::from_str(body)?
    };
    let url = request.url.unwrap_or_else(|| state.remote_url.clone());
    state.session.load_from_remote(&url)?;
    catalog_summary(state)
}

pub fn catalog_upload_payload(state: &mut AppState, body: &str) -> Result<String> {
    let catalog = parse_catalog(body)?;
    state.session.replace_catalog(catalog)?;
    catalog_summary(state)
}

pub fn catalog_erase_payload(state: &mut AppState) -> Result<String> {
    state.session.erase_all()?;
    catalog_summary(state)
}

pub fn catalog_validate_payload(state: &AppState) -> Result<String> {
    let report = validate_catalog(state.session.catalog());
    Ok(serde_json::to_string_pretty(&ValidationResponse {
        status: if report.has_errors() { "invalid" } else { "ok" },
        errors: report.errors().count(),
        diagnostics: &report.diagnostics,
    })?)
}
