use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use cordata::data::store::{checksum32, filter_by_status, StatusFilter};
use cordata::data::translation::Translator;
use cordata::data::usecase::{Catalog, Status, StatusAxis, UseCase};
use cordata::session::{EditorSession, FixedClock};
use cordata::CordataError;

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("cordata-{name}-{stamp}.json"))
}

fn translator() -> Translator {
    Translator::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/translations.csv"))
        .expect("bundled translation table should load")
}

fn session(name: &str) -> EditorSession {
    EditorSession::new(
        Catalog::empty("2025-01-01"),
        unique_temp_path(name),
        translator(),
    )
    .with_clock(FixedClock::new("2025-01-01"))
}

fn record(hash_id: u32, published: Status, review: Status) -> UseCase {
    UseCase {
        hash_id,
        name: format!("caso {hash_id}"),
        status_published: published,
        status_review: review,
        record_date: "2025-01-01".to_string(),
        modified_date: "2025-01-01".to_string(),
        ..UseCase::default_record()
    }
}

fn filter(axis: StatusAxis, allowed: &[Status]) -> StatusFilter {
    let mut filter = StatusFilter::new();
    filter.insert(axis, allowed.iter().copied().collect());
    filter
}

#[test]
fn create_record_assigns_checksum_id_and_prepends() {
    let mut session = session("create");
    session.create_record("Primeiro").expect("first create should succeed");
    let created = session.create_record("Teste").expect("create should succeed");

    assert_eq!(created.hash_id, checksum32("Teste2025-01-01"));
    assert_eq!(session.catalog().records[0].hash_id, created.hash_id);
    assert_eq!(session.catalog().records.len(), 2);
    assert_eq!(session.selection, Some(created.hash_id));
    assert_eq!(created.status_published, Status::Hidden);
    assert_eq!(created.status_review, Status::InReview);
    assert_eq!(created.url.as_deref(), Some("https://"));
    assert_eq!(created.record_date, "2025-01-01");

    let on_disk = cordata::data::persistence::load_catalog(session.data_path())
        .expect("created catalog should be on disk");
    assert_eq!(&on_disk, session.catalog());
    assert_eq!(on_disk.metadata.last_update, "2025-01-01");

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn create_record_with_colliding_id_fails_fast() {
    let mut session = session("collision");
    session.create_record("Painel").expect("first create should succeed");
    let before = fs::read(session.data_path()).expect("catalog should be written");

    let err = session.create_record("Painel").expect_err("same name and day collides");
    assert!(matches!(err, CordataError::DuplicateId { .. }));
    assert_eq!(session.catalog().records.len(), 1);
    assert_eq!(fs::read(session.data_path()).expect("catalog still there"), before);

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn created_ids_never_repeat_within_a_catalog() {
    let mut session = session("identity");
    for index in 0..25 {
        session
            .create_record(&format!("Caso {index}"))
            .expect("create should succeed");
    }
    let mut ids: Vec<u32> = session.catalog().records.iter().map(|r| r.hash_id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 25);

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn update_of_unknown_id_leaves_disk_and_memory_untouched() {
    let mut session = session("update-missing");
    session.create_record("Existente").expect("create should succeed");
    let bytes_before = fs::read(session.data_path()).expect("catalog should be written");
    let catalog_before = session.catalog().clone();

    let err = session
        .update_record(record(42, Status::Published, Status::InReview))
        .expect_err("id 42 is not in the catalog");
    assert!(matches!(err, CordataError::NotFound { hash_id: 42 }));
    assert_eq!(fs::read(session.data_path()).expect("catalog still there"), bytes_before);
    assert_eq!(session.catalog(), &catalog_before);

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn update_normalizes_translates_and_stamps_modified_date() {
    let mut session = session("update");
    let created = session.create_record("Observatório").expect("create should succeed");
    let mut session = session.with_clock(FixedClock::new("2025-02-10"));

    let mut edited = created.clone();
    edited.description = Some(String::new());
    edited.usecase_type = Some(vec!["bot".to_string()]);
    edited.topics = Some(vec!["Educação".to_string(), "Saúde".to_string()]);
    edited.authors = Some(vec!["Ana".to_string(), "Rui".to_string()]);
    edited.status_published = Status::Published;
    session.update_record(edited).expect("update should succeed");

    let stored = session.get_record(created.hash_id).expect("record should exist");
    assert_eq!(stored.modified_date, "2025-02-10");
    assert_eq!(stored.record_date, "2025-01-01");
    assert_eq!(stored.hash_id, created.hash_id);
    assert_eq!(stored.description, None);
    assert_eq!(stored.type_es, Some(vec!["bot".to_string()]));
    assert_eq!(
        stored.topics_es,
        Some(vec!["Educación".to_string(), "Salud".to_string()])
    );
    assert_eq!(stored.authors_id, Some(vec![None, None]));
    assert_eq!(session.catalog().metadata.last_update, "2025-02-10");
    assert_eq!(
        session.current_record.as_ref().map(|r| r.status_published),
        Some(Status::Published)
    );

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn untranslatable_value_aborts_the_save() {
    let mut session = session("untranslatable");
    let created = session.create_record("Mapa").expect("create should succeed");
    let bytes_before = fs::read(session.data_path()).expect("catalog should be written");

    let mut edited = created.clone();
    edited.topics = Some(vec!["Astrologia".to_string()]);
    let err = session.update_record(edited).expect_err("topic has no translation");
    match err {
        CordataError::TranslationMissing { field, value } => {
            assert_eq!(field, "topics");
            assert_eq!(value, "Astrologia");
        }
        other => panic!("expected TranslationMissing, got {other:?}"),
    }
    assert_eq!(session.get_record(created.hash_id).expect("still there").topics, None);
    assert_eq!(fs::read(session.data_path()).expect("catalog still there"), bytes_before);

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn delete_removes_record_and_clears_selection() {
    let mut session = session("delete");
    let kept = session.create_record("Fica").expect("create should succeed");
    let gone = session.create_record("Sai").expect("create should succeed");
    assert_eq!(session.selection, Some(gone.hash_id));

    session.delete_record(gone.hash_id).expect("delete should succeed");
    assert_eq!(session.selection, None);
    assert!(session.current_record.is_none());
    assert!(matches!(
        session.get_record(gone.hash_id),
        Err(CordataError::NotFound { .. })
    ));
    assert!(session.get_record(kept.hash_id).is_ok());
    assert!(matches!(
        session.delete_record(gone.hash_id),
        Err(CordataError::NotFound { .. })
    ));

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn filter_with_single_published_record_returns_exactly_it() {
    let records = vec![
        record(1, Status::Hidden, Status::InReview),
        record(2, Status::Published, Status::InReview),
        record(3, Status::InValidation, Status::InReview),
    ];
    let selected = filter_by_status(&records, &filter(StatusAxis::Published, &[Status::Published]));
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].hash_id, 2);
}

#[test]
fn empty_filter_returns_everything_in_order() {
    let records = vec![
        record(9, Status::Hidden, Status::InReview),
        record(3, Status::Published, Status::Published),
        record(5, Status::InValidation, Status::Hidden),
    ];
    let selected = filter_by_status(&records, &StatusFilter::new());
    let ids: Vec<u32> = selected.iter().map(|r| r.hash_id).collect();
    assert_eq!(ids, vec![9, 3, 5]);
}

#[test]
fn filter_applies_every_named_axis() {
    let mut records = Vec::new();
    let mut next_id = 0;
    for published in Status::ALL {
        for review in Status::ALL {
            next_id += 1;
            records.push(record(next_id, published, review));
        }
    }
    let mut both = filter(StatusAxis::Published, &[Status::Published, Status::Hidden]);
    both.insert(StatusAxis::Review, [Status::InReview].into_iter().collect());

    let selected = filter_by_status(&records, &both);
    assert_eq!(selected.len(), 2);
    for record in &records {
        let passes = matches!(record.status_published, Status::Published | Status::Hidden)
            && record.status_review == Status::InReview;
        let returned = selected.iter().any(|r| r.hash_id == record.hash_id);
        assert_eq!(passes, returned, "record {} misfiltered", record.hash_id);
    }
}

#[test]
fn apply_filter_drops_hidden_selection() {
    let mut session = session("apply-filter");
    let created = session.create_record("Oculto").expect("create should succeed");
    assert_eq!(session.selection, Some(created.hash_id));

    let visible = session.apply_filter(&filter(StatusAxis::Review, &[Status::InReview]));
    assert_eq!(visible.len(), 1);
    assert_eq!(session.selection, Some(created.hash_id));

    let visible = session.apply_filter(&filter(StatusAxis::Published, &[Status::Published]));
    assert!(visible.is_empty());
    assert_eq!(session.selection, None);
    assert!(session.current_record.is_none());

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn edit_buffer_is_saved_only_on_request() {
    let mut session = session("buffer");
    let created = session.create_record("Rascunho").expect("create should succeed");
    session.current_record_mut().expect("record selected").comment = Some("nota".to_string());
    session.add_dataset().expect("record selected");
    assert_eq!(session.get_record(created.hash_id).expect("exists").comment, None);

    session.save_current().expect("save should succeed");
    let stored = session.get_record(created.hash_id).expect("exists");
    assert_eq!(stored.comment.as_deref(), Some("nota"));
    assert_eq!(stored.datasets.len(), 1);

    session.select(created.hash_id).expect("select should succeed");
    session.current_record_mut().expect("record selected").name = "Outro".to_string();
    session.reset_current().expect("reset should succeed");
    assert_eq!(session.current_record.as_ref().map(|r| r.name.as_str()), Some("Rascunho"));

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn replace_and_erase_reset_the_selection() {
    let mut session = session("replace");
    session.create_record("Antigo").expect("create should succeed");

    let mut incoming = Catalog::empty("2024-12-31");
    incoming.records.push(record(7, Status::Published, Status::Published));
    incoming.records.push(record(8, Status::Hidden, Status::InReview));
    session.replace_catalog(incoming).expect("replace should succeed");
    assert_eq!(session.catalog().records.len(), 2);
    assert_eq!(session.catalog().metadata.last_update, "2025-01-01");
    assert_eq!(session.selection, None);

    session.erase_all().expect("erase should succeed");
    assert!(session.catalog().is_empty());
    let on_disk = cordata::data::persistence::load_catalog(session.data_path())
        .expect("erased catalog should be written");
    assert!(on_disk.records.is_empty());

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn replace_rejects_catalog_with_repeated_ids() {
    let mut session = session("replace-dup");
    session.create_record("Antigo").expect("create should succeed");
    let before = fs::read(session.data_path()).expect("catalog should be written");

    let mut incoming = Catalog::empty("2024-12-31");
    incoming.records.push(record(7, Status::Published, Status::Published));
    incoming.records.push(record(7, Status::Hidden, Status::InReview));
    let err = session
        .replace_catalog(incoming)
        .expect_err("repeated ids must be rejected");
    assert!(matches!(err, CordataError::DuplicateId { hash_id: 7, count: 2 }));
    assert_eq!(session.catalog().records.len(), 1);
    assert_eq!(fs::read(session.data_path()).expect("catalog still there"), before);

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn create_record_hashes_name_as_entered() {
    let mut session = session("raw-name");
    let padded = session.create_record(" Teste").expect("create should succeed");
    assert_eq!(padded.hash_id, checksum32(" Teste2025-01-01"));
    assert_eq!(padded.name, " Teste");

    let plain = session.create_record("Teste").expect("distinct id for the trimmed name");
    assert_ne!(plain.hash_id, padded.hash_id);
    assert!(matches!(
        session.create_record("   "),
        Err(CordataError::InvalidInput(_))
    ));

    let _ = fs::remove_file(session.data_path());
}

#[test]
fn commands_persist_regardless_of_login_flag() {
    let mut session = session("login-flag");
    assert!(!session.is_authenticated);
    let created = session.create_record("Sem login").expect("create should succeed");
    let on_disk = cordata::data::persistence::load_catalog(session.data_path())
        .expect("catalog should be written");
    assert_eq!(on_disk.records[0].hash_id, created.hash_id);

    session.is_authenticated = true;
    session.delete_record(created.hash_id).expect("delete should succeed");
    assert!(session.catalog().is_empty());

    let _ = fs::remove_file(session.data_path());
}
