//! Catalog document model: use-case records, their datasets and the catalog envelope.
//! Field names and enumeration labels match the persisted JSON document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder stored in link fields that would otherwise be null; the site renderer
/// cannot handle null links.
pub const URL_PLACEHOLDER: &str = "https://";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoLevel {
    #[serde(rename = "Não se aplica")]
    NotApplicable,
    #[serde(rename = "Mundial")]
    World,
    #[serde(rename = "Países")]
    Countries,
    #[serde(rename = "Unidades federativas")]
    FederalUnits,
    #[serde(rename = "Municípios")]
    Municipalities,
}

impl GeoLevel {
    pub const ALL: [GeoLevel; 5] = [
        Self::NotApplicable,
        Self::World,
        Self::Countries,
        Self::FederalUnits,
        Self::Municipalities,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::NotApplicable => "Não se aplica",
            Self::World => "Mundial",
            Self::Countries => "Países",
            Self::FederalUnits => "Unidades federativas",
            Self::Municipalities => "Municípios",
        }
    }

    /// Levels at which the covered country is necessarily the home country.
    pub fn implies_home_country(self) -> bool {
        matches!(self, Self::FederalUnits | Self::Municipalities)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Oculto")]
    Hidden,
    #[serde(rename = "Em revisão")]
    InReview,
    #[serde(rename = "Em validação")]
    InValidation,
    #[serde(rename = "Publicado")]
    Published,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Self::Hidden,
        Self::InReview,
        Self::InValidation,
        Self::Published,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Hidden => "Oculto",
            Self::InReview => "Em revisão",
            Self::InValidation => "Em validação",
            Self::Published => "Publicado",
        }
    }

    /// Parse either the stored label or the English variant name (case-insensitive).
    pub fn parse(raw: &str) -> Option<Status> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|status| {
            status.label().eq_ignore_ascii_case(raw)
                || format!("{status:?}").eq_ignore_ascii_case(raw)
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two independent visibility axes of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusAxis {
    Published,
    Review,
}

impl StatusAxis {
    pub fn key(self) -> &'static str {
        match self {
            Self::Published => "status_published",
            Self::Review => "status_review",
        }
    }

    pub fn from_key(key: &str) -> Option<StatusAxis> {
        match key {
            "status_published" => Some(Self::Published),
            "status_review" => Some(Self::Review),
            _ => None,
        }
    }
}

/// One data source used by a use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub data_name: Option<String>,
    #[serde(default)]
    pub data_institution: Option<String>,
    #[serde(default)]
    pub data_url: Option<String>,
    #[serde(default)]
    pub data_license: Option<String>,
    #[serde(default)]
    pub data_format: Option<Vec<String>>,
    /// Periodic use: yes / no / unspecified.
    #[serde(default)]
    pub data_periodical: Option<bool>,
}

impl Dataset {
    pub fn default_dataset() -> Dataset {
        Dataset {
            data_name: None,
            data_institution: None,
            data_url: None,
            data_license: None,
            data_format: None,
            data_periodical: None,
        }
    }
}

/// One cataloged application of open data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
    pub hash_id: u32,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_archive: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `MM/YYYY`; null when the publication date is unknown.
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub authors_id: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub email: Option<Vec<String>>,
    #[serde(default)]
    pub geo_level: Option<GeoLevel>,
    #[serde(default)]
    pub countries: Option<Vec<String>>,
    #[serde(default)]
    pub countries_es: Option<Vec<String>>,
    #[serde(default)]
    pub fed_units: Option<Vec<String>>,
    #[serde(default)]
    pub municipalities: Option<Vec<String>>,
    #[serde(rename = "type", default)]
    pub usecase_type: Option<Vec<String>>,
    #[serde(default)]
    pub type_es: Option<Vec<String>>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub topics_es: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub url_source: Option<String>,
    #[serde(default)]
    pub url_image: Option<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub comment: Option<String>,
    pub status_published: Status,
    pub status_review: Status,
    pub record_date: String,
    pub modified_date: String,
}

impl UseCase {
    /// Fixed default structure for a fresh record. Identity and dates are assigned by
    /// the caller (see [`crate::session::EditorSession::create_record`]).
    pub fn default_record() -> UseCase {
        UseCase {
            hash_id: 0,
            name: String::new(),
            url: Some(URL_PLACEHOLDER.to_string()),
            url_archive: None,
            description: None,
            pub_date: None,
            authors: None,
            authors_id: None,
            email: None,
            geo_level: None,
            countries: None,
            countries_es: None,
            fed_units: None,
            municipalities: None,
            usecase_type: None,
            type_es: None,
            topics: None,
            topics_es: None,
            tags: None,
            url_source: Some(URL_PLACEHOLDER.to_string()),
            url_image: None,
            datasets: Vec::new(),
            comment: None,
            status_published: Status::Hidden,
            status_review: Status::InReview,
            record_date: String::new(),
            modified_date: String::new(),
        }
    }

    pub fn status(&self, axis: StatusAxis) -> Status {
        match axis {
            StatusAxis::Published => self.status_published,
            StatusAxis::Review => self.status_review,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// `YYYY-MM-DD` of the last persisted write.
    pub last_update: String,
}

/// Root aggregate: the full list of records plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub metadata: Metadata,
    #[serde(rename = "data")]
    pub records: Vec<UseCase>,
}

impl Catalog {
    pub fn empty(today: &str) -> Catalog {
        Catalog {
            metadata: Metadata {
                last_update: today.to_string(),
            },
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
