use crate::error::{CordataError, Result};
use crate::server::api;
use crate::server::AppState;

const USECASE_PREFIX: &str = "/api/usecases/";

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(state: &mut AppState, method: &str, path: &str, body: &str) -> HttpResponse {
    let route = path.split('?').next().unwrap_or("");
    let result = match (method, route) {
        ("GET", "/api/health") => api::health_payload(),
        ("GET", "/api/usecases") => api::usecases_payload(state, path),
        ("POST", "/api/usecases") => api::usecase_create_payload(state, body),
        ("GET", r) if r.starts_with(USECASE_PREFIX) => {
            api::parse_id_segment(route, USECASE_PREFIX)
                .and_then(|id| api::usecase_get_payload(state, id))
        }
        ("PUT", r) if r.starts_with(USECASE_PREFIX) => {
            api::parse_id_segment(route, USECASE_PREFIX)
                .and_then(|id| api::usecase_put_payload(state, id, body))
        }
        ("DELETE", r) if r.starts_with(USECASE_PREFIX) => {
            api::parse_id_segment(route, USECASE_PREFIX)
                .and_then(|id| api::usecase_delete_payload(state, id))
        }
        ("POST", "/api/catalog/fetch") => api::catalog_fetch_payload(state, body),
        ("POST", "/api/catalog/upload") => api::catalog_upload_payload(state, body),
        ("POST", "/api/catalog/erase") => api::catalog_erase_payload(state),
        ("GET", "/api/catalog/validate") => api::catalog_validate_payload(state),
        _ => return error_response(404, "Route not found"),
    };
    respond(method, route, result)
}

fn respond(method: &str, route: &str, result: Result<String>) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body: payload,
        },
        Err(err) => {
            let status_code = err.status_code();
            tracing::warn!(method, route, status_code, error = %err, "request rejected");
            error_response(status_code, &error_message(&err))
        }
    }
}

fn error_message(err: &CordataError) -> String {
    match err {
        CordataError::Parse(inner) => format!("Invalid request body: {inner}"),
        other => other.to_string(),
    }
}

fn status_text(status_code: u16) -> &'static str {
    match status_code {
        400 => "Bad Request",
        404 => "Not Found",
        413 => "Payload Too Large",
        422 => "Unprocessable Entity",
        502 => "Bad Gateway",
        _ => "Internal Server Error",
    }
}

pub fn bad_request(message: &str) -> HttpResponse {
    error_response(400, message)
}

pub fn payload_too_large(limit: usize) -> HttpResponse {
    error_response(413, &format!("Request body exceeds {limit} bytes"))
}

fn error_response(status_code: u16, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text: status_text(status_code),
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
