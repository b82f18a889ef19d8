//! Editing session: the explicit context a front end drives the catalog through.
//!
//! Every mutating command works on a copy of the catalog, persists it through the
//! normalization pipeline and only then swaps it in. A failed command leaves both the
//! in-memory catalog and the document on disk as they were.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::data::persistence::{fetch_remote_catalog, load_catalog, persist};
use crate::data::store::{self, StatusFilter};
use crate::data::translation::Translator;
use crate::data::usecase::{Catalog, Dataset, UseCase};
use crate::error::{CordataError, Result};

/// Source of the `YYYY-MM-DD` dates stamped on records and on the catalog.
pub trait Clock: Send {
    fn today(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> String {
        chrono::Local::now().format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(today: impl Into<String>) -> Self {
        FixedClock(today.into())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.0.clone()
    }
}

pub struct EditorSession {
    catalog: Catalog,
    data_path: PathBuf,
    translator: Translator,
    clock: Box<dyn Clock>,
    /// Edit buffer for the selected record; not part of the catalog until saved.
    pub current_record: Option<UseCase>,
    /// Login state kept for the presentation layer. Commands never consult it.
    pub is_authenticated: bool,
    pub selection: Option<u32>,
}

impl EditorSession {
    pub fn new(catalog: Catalog, data_path: impl Into<PathBuf>, translator: Translator) -> Self {
        EditorSession {
            catalog,
            data_path: data_path.into(),
            translator,
            clock: Box::new(SystemClock),
            current_record: None,
            is_authenticated: false,
            selection: None,
        }
    }

    /// Open the document at `data_path`; the file must exist.
    pub fn open(data_path: impl Into<PathBuf>, translator: Translator) -> Result<Self> {
        let data_path = data_path.into();
        let catalog = load_catalog(&data_path)?;
        Ok(Self::new(catalog, data_path, translator))
    }

    /// A missing data file starts an empty catalog; it is written on the first mutation.
    pub fn from_config(config: &Config) -> Result<Self> {
        let translator = Translator::load(&config.translations_file)?;
        if config.data_file.exists() {
            return Self::open(&config.data_file, translator);
        }
        tracing::warn!(
            path = %config.data_file.display(),
            "data file not found, starting with an empty catalog"
        );
        let mut session = Self::new(Catalog::empty(""), &config.data_file, translator);
        session.catalog = Catalog::empty(&session.clock.today());
        Ok(session)
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn today(&self) -> String {
        self.clock.today()
    }

    fn commit(&mut self, mut working: Catalog) -> Result<()> {
        let today = self.clock.today();
        persist(&self.data_path, &mut working, &self.translator, &today)?;
        self.catalog = working;
        Ok(())
    }

    pub fn list_records(&self, filter: &StatusFilter) -> Vec<&UseCase> {
        store::filter_by_status(&self.catalog.records, filter)
    }

    pub fn get_record(&self, hash_id: u32) -> Result<&UseCase> {
        store::select_by_id(&self.catalog.records, hash_id)
    }

    /// New record with the default structure, prepended, persisted and selected.
    /// The name is hashed and stored exactly as entered.
    pub fn create_record(&mut self, name: &str) -> Result<UseCase> {
        if name.trim().is_empty() {
            return Err(CordataError::InvalidInput(
                "a use case needs a non-empty name".to_string(),
            ));
        }
        let today = self.clock.today();
        let hash_id = store::usecase_hash_id(name, &today);
        if self.catalog.records.iter().any(|uc| uc.hash_id == hash_id) {
            tracing::warn!(hash_id, name, "new use case collides with an existing id");
            return Err(CordataError::DuplicateId { hash_id, count: 2 });
        }

        let record = UseCase {
            hash_id,
            name: name.to_string(),
            record_date: today.clone(),
            modified_date: today,
            ..UseCase::default_record()
        };
        let mut working = self.catalog.clone();
        store::insert(&mut working, record);
        self.commit(working)?;

        let stored = self.get_record(hash_id)?.clone();
        tracing::info!(hash_id, name, "created use case");
        self.selection = Some(hash_id);
        self.current_record = Some(stored.clone());
        Ok(stored)
    }

    pub fn update_record(&mut self, record: UseCase) -> Result<()> {
        let hash_id = record.hash_id;
        let today = self.clock.today();
        let mut working = self.catalog.clone();
        store::replace(&mut working, record, &today)?;
        self.commit(working)?;
        if self.selection == Some(hash_id) {
            self.current_record = self.get_record(hash_id).ok().cloned();
        }
        tracing::info!(hash_id, "updated use case");
        Ok(())
    }

    pub fn delete_record(&mut self, hash_id: u32) -> Result<()> {
        let mut working = self.catalog.clone();
        let removed = store::remove(&mut working, hash_id)?;
        self.commit(working)?;
        if self.selection == Some(hash_id) {
            self.selection = None;
            self.current_record = None;
        }
        tracing::info!(hash_id, name = %removed.name, "deleted use case");
        Ok(())
    }

    /// Copy the stored record into the edit buffer.
    pub fn select(&mut self, hash_id: u32) -> Result<&UseCase> {
        let record = self.get_record(hash_id)?.clone();
        self.selection = Some(hash_id);
        self.current_record = Some(record);
        Ok(self.get_record(hash_id)?)
    }

    /// Records passing `filter`. Drops the selection if the selected record is filtered out.
    pub fn apply_filter(&mut self, filter: &StatusFilter) -> Vec<&UseCase> {
        if let Some(selected) = self.selection {
            let visible = self
                .catalog
                .records
                .iter()
                .any(|uc| uc.hash_id == selected && store::status_selected(uc, filter));
            if !visible {
                self.selection = None;
                self.current_record = None;
            }
        }
        self.list_records(filter)
    }

    /// Discard in-progress edits by reloading the selected record from the catalog.
    pub fn reset_current(&mut self) -> Result<()> {
        let hash_id = self
            .selection
            .ok_or_else(|| CordataError::InvalidInput("no use case selected".to_string()))?;
        self.current_record = Some(self.get_record(hash_id)?.clone());
        Ok(())
    }

    pub fn current_record_mut(&mut self) -> Result<&mut UseCase> {
        self.current_record
            .as_mut()
            .ok_or_else(|| CordataError::InvalidInput("no use case selected".to_string()))
    }

    pub fn add_dataset(&mut self) -> Result<()> {
        self.current_record_mut()?
            .datasets
            .push(Dataset::default_dataset());
        Ok(())
    }

    pub fn remove_dataset(&mut self, index: usize) -> Result<Dataset> {
        let record = self.current_record_mut()?;
        if index >= record.datasets.len() {
            return Err(CordataError::InvalidInput(format!(
                "dataset {index} does not exist ({} datasets)",
                record.datasets.len()
            )));
        }
        Ok(record.datasets.remove(index))
    }

    /// Write the edit buffer back to the catalog.
    pub fn save_current(&mut self) -> Result<()> {
        let record = self
            .current_record
            .clone()
            .ok_or_else(|| CordataError::InvalidInput("no use case selected".to_string()))?;
        self.update_record(record)
    }

    /// Swap in a whole new catalog (upload, remote load, erase). Clears the selection.
    /// A document with repeated ids is rejected before anything is written.
    pub fn replace_catalog(&mut self, catalog: Catalog) -> Result<()> {
        let records = catalog.records.len();
        store::ensure_unique_ids(&catalog.records)?;
        self.commit(catalog)?;
        self.selection = None;
        self.current_record = None;
        tracing::info!(records, path = %self.data_path.display(), "replaced catalog");
        Ok(())
    }

    pub fn load_from_remote(&mut self, url: &str) -> Result<()> {
        let catalog = fetch_remote_catalog(url)?;
        self.replace_catalog(catalog)
    }

    pub fn erase_all(&mut self) -> Result<()> {
        let today = self.clock.today();
        self.replace_catalog(Catalog::empty(&today))
    }

    /// Re-run the pipeline over the stored catalog and save it.
    pub fn normalize_and_save(&mut self) -> Result<()> {
        let working = self.catalog.clone();
        self.commit(working)
    }
}
