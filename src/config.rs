//! Runtime configuration from `CORDATA_*` environment variables.

use std::env;
use std::path::PathBuf;

use crate::data::persistence::{DEFAULT_DATA_PATH, DEFAULT_REMOTE_URL};
use crate::data::translation::DEFAULT_TRANSLATIONS_PATH;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Working copy of the catalog, rewritten after every mutation.
    pub data_file: PathBuf,
    pub translations_file: PathBuf,
    pub remote_url: String,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: PathBuf::from(DEFAULT_DATA_PATH),
            translations_file: PathBuf::from(DEFAULT_TRANSLATIONS_PATH),
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Config {
            data_file: get("CORDATA_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            translations_file: get("CORDATA_TRANSLATIONS")
                .map(PathBuf::from)
                .unwrap_or(defaults.translations_file),
            remote_url: get("CORDATA_REMOTE_URL").unwrap_or(defaults.remote_url),
            bind_addr: get("CORDATA_BIND").unwrap_or(defaults.bind_addr),
        }
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn with_translations_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.translations_file = path.into();
        self
    }

    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = url.into();
        self
    }
}
