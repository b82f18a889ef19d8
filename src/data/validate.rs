use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::data::normalize::extract_state_codes;
use crate::data::store::usecase_hash_id;
use crate::data::usecase::{Catalog, GeoLevel, UseCase, URL_PLACEHOLDER};
use crate::data::vocab::{is_known, Vocabulary, HOME_COUNTRY};
use crate::tabular::{is_bad_url, parse_iso_date, parse_pub_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Check a catalog against the record invariants and controlled vocabularies without
/// modifying it. Intended for documents loaded from outside the editor.
pub fn validate_catalog(catalog: &Catalog) -> ValidationReport {
    let mut report = ValidationReport::default();

    if parse_iso_date(&catalog.metadata.last_update).is_err() {
        report.push(
            ValidationSeverity::Error,
            "metadata.last_update",
            format!("malformed date '{}'", catalog.metadata.last_update),
        );
    }

    let mut id_counts: HashMap<u32, usize> = HashMap::new();
    for record in &catalog.records {
        *id_counts.entry(record.hash_id).or_default() += 1;
    }

    for (index, record) in catalog.records.iter().enumerate() {
        let context = format!("data[{index}]");
        if id_counts.get(&record.hash_id).copied().unwrap_or(0) > 1 {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.hash_id"),
                format!("duplicate id {}", record.hash_id),
            );
        }
        validate_record(&mut report, &context, record);
    }

    report
}

fn validate_record(report: &mut ValidationReport, context: &str, record: &UseCase) {
    if record.name.trim().is_empty() {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.name"),
            "missing non-empty 'name'",
        );
    }

    for (field, value) in [
        ("record_date", &record.record_date),
        ("modified_date", &record.modified_date),
    ] {
        if parse_iso_date(value).is_err() {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.{field}"),
                format!("malformed date '{value}'"),
            );
        }
    }

    if let Some(pub_date) = &record.pub_date {
        if parse_pub_date(pub_date).is_err() {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.pub_date"),
                format!("expected MM/YYYY, got '{pub_date}'"),
            );
        }
    }

    if usecase_hash_id(&record.name, &record.record_date) != record.hash_id {
        report.push(
            ValidationSeverity::Info,
            format!("{context}.hash_id"),
            "id does not match name + record_date (record renamed after creation?)",
        );
    }

    for (field, value) in [
        ("url", &record.url),
        ("url_archive", &record.url_archive),
        ("url_source", &record.url_source),
        ("url_image", &record.url_image),
    ] {
        if value.as_deref() != Some(URL_PLACEHOLDER) && is_bad_url(value.as_deref()) {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.{field}"),
                format!("'{}' does not look like a link", value.as_deref().unwrap_or("")),
            );
        }
    }

    check_vocabulary(report, context, Vocabulary::Type, record.usecase_type.as_deref());
    check_vocabulary(report, context, Vocabulary::Topic, record.topics.as_deref());
    check_vocabulary(report, context, Vocabulary::Country, record.countries.as_deref());
    check_vocabulary(report, context, Vocabulary::FederalUnit, record.fed_units.as_deref());

    for (dataset_index, dataset) in record.datasets.iter().enumerate() {
        let dataset_context = format!("{context}.datasets[{dataset_index}]");
        if let Some(license) = &dataset.data_license {
            if !is_known(Vocabulary::License, license) {
                report.push(
                    ValidationSeverity::Error,
                    format!("{dataset_context}.data_license"),
                    format!("unknown license '{license}'"),
                );
            }
        }
        check_vocabulary(
            report,
            &dataset_context,
            Vocabulary::Format,
            dataset.data_format.as_deref(),
        );
    }

    validate_geo_level(report, context, record);
}

fn check_vocabulary(
    report: &mut ValidationReport,
    context: &str,
    vocabulary: Vocabulary,
    values: Option<&[String]>,
) {
    for value in values.unwrap_or_default() {
        if !is_known(vocabulary, value) {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.{}", vocabulary.as_str()),
                format!("'{value}' is not in the controlled vocabulary"),
            );
        }
    }
}

fn validate_geo_level(report: &mut ValidationReport, context: &str, record: &UseCase) {
    let level = record.geo_level;
    let populated = [
        ("countries", GeoLevel::Countries, record.countries.is_some()),
        ("fed_units", GeoLevel::FederalUnits, record.fed_units.is_some()),
        (
            "municipalities",
            GeoLevel::Municipalities,
            record.municipalities.is_some(),
        ),
    ];
    for (field, owner, is_set) in populated {
        // Derived fields are allowed outside their own level.
        let derived = match field {
            "countries" => level.is_some_and(GeoLevel::implies_home_country),
            "fed_units" => level == Some(GeoLevel::Municipalities),
            _ => false,
        };
        if is_set && level != Some(owner) && !derived {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.{field}"),
                format!(
                    "set while geo_level is {}",
                    level.map(GeoLevel::label).unwrap_or("null")
                ),
            );
        }
    }

    if level.is_some_and(GeoLevel::implies_home_country)
        && record.countries.as_deref() != Some(&[HOME_COUNTRY.to_string()][..])
    {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.countries"),
            format!("must be ['{HOME_COUNTRY}'] at this geo_level"),
        );
    }

    if level == Some(GeoLevel::Municipalities) {
        let mut expected = extract_state_codes(record.municipalities.as_deref());
        let mut actual = record.fed_units.clone();
        if let Some(codes) = expected.as_mut() {
            codes.sort();
        }
        if let Some(codes) = actual.as_mut() {
            codes.sort();
        }
        if expected != actual {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.fed_units"),
                "does not match the states of the listed municipalities",
            );
        }
    }
}
