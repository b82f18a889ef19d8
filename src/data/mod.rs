pub mod normalize;
pub mod persistence;
pub mod store;
pub mod translation;
pub mod usecase;
pub mod validate;
pub mod vocab;

pub use normalize::{derive, extract_state_codes, prepare_for_save, standardize};
pub use persistence::{fetch_remote_catalog, load_catalog, persist, save_catalog};
pub use store::{checksum32, filter_by_status, find_position, StatusFilter};
pub use translation::{build_translation_table, TranslationRow, Translator};
pub use usecase::{Catalog, Dataset, GeoLevel, Metadata, Status, StatusAxis, UseCase};
