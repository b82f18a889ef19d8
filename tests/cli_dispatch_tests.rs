use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_cordata")
}

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("cordata-{name}-{stamp}.json"))
}

fn run(data_file: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env("CORDATA_DATA_FILE", data_file)
        .env(
            "CORDATA_TRANSLATIONS",
            concat!(env!("CARGO_MANIFEST_DIR"), "/data/translations.csv"),
        )
        .env("RUST_LOG", "warn")
        .output()
        .expect("cordata should run")
}

#[test]
fn unknown_command_prints_usage() {
    let output = Command::new(bin())
        .arg("frobnicate")
        .output()
        .expect("cordata should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: cordata"));
}

#[test]
fn create_list_show_delete_round_trip() {
    let path = unique_temp_path("cli-crud");

    let output = run(&path, &["create", "Painel", "de", "Saúde"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("created use case"));
    assert!(stdout.contains("(Painel de Saúde)"));
    assert!(path.exists());

    let output = run(&path, &["list", "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let listed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("list should emit json");
    let hash_id = listed[0]["hash_id"].as_u64().expect("numeric id");
    assert_eq!(listed[0]["name"], "Painel de Saúde");

    let output = run(&path, &["list", "status_published=Publicado"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1, "only the header row expected");

    let output = run(&path, &["show", &hash_id.to_string()]);
    assert_eq!(output.status.code(), Some(0));
    let shown: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("show should emit json");
    assert_eq!(shown["status_review"], "Em revisão");

    let output = run(&path, &["delete", &hash_id.to_string()]);
    assert_eq!(output.status.code(), Some(0));

    let output = run(&path, &["show", &hash_id.to_string()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("show failed"));

    let _ = fs::remove_file(path);
}

#[test]
fn id_commands_require_numeric_argument() {
    let path = unique_temp_path("cli-usage");
    assert_eq!(run(&path, &["show"]).status.code(), Some(2));
    assert_eq!(run(&path, &["delete", "abc"]).status.code(), Some(2));
    assert_eq!(run(&path, &["create"]).status.code(), Some(2));
    assert!(!path.exists());
}

#[test]
fn normalize_rewrites_stored_catalog() {
    let path = unique_temp_path("cli-normalize");
    fs::write(
        &path,
        r#"{"metadata":{"last_update":"2020-01-01"},"data":[
            {"hash_id":1,"name":"A","status_published":"Oculto","status_review":"Em revisão",
             "record_date":"2020-01-01","modified_date":"2020-01-01","url":"",
             "geo_level":"Municípios","municipalities":["Autazes (AM)"]}]}"#,
    )
    .expect("fixture should be written");

    let output = run(&path, &["normalize"]);
    assert_eq!(output.status.code(), Some(0));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("catalog should exist"))
            .expect("catalog should be json");
    assert_eq!(saved["data"][0]["url"], "https://");
    assert_eq!(saved["data"][0]["fed_units"], serde_json::json!(["AM"]));
    assert_eq!(saved["data"][0]["countries_es"], serde_json::json!(["Brasil"]));
    assert_ne!(saved["metadata"]["last_update"], "2020-01-01");

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_returns_non_zero_on_invalid_data() {
    let path = unique_temp_path("cli-invalid");
    fs::write(
        &path,
        r#"{"metadata":{"last_update":"2020-01-01"},"data":[
            {"hash_id":1,"name":"","status_published":"Oculto","status_review":"Em revisão",
             "record_date":"2020-01-01","modified_date":"ontem"}]}"#,
    )
    .expect("fixture should be written");

    let output = run(&path, &["validate", path.to_string_lossy().as_ref()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));
    assert!(stderr.contains("data[0].name"));

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_accepts_normalized_catalog() {
    let path = unique_temp_path("cli-valid");
    assert_eq!(run(&path, &["create", "Válido"]).status.code(), Some(0));

    let output = run(&path, &["validate"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("validation passed"));

    let _ = fs::remove_file(path);
}
