use crate::config::Config;
use crate::data::persistence::load_catalog;
use crate::data::store::parse_status_filter;
use crate::data::validate::validate_catalog;
use crate::error::Result;
use crate::server::{self, AppState};
use crate::session::EditorSession;

const USAGE: &str = "usage: cordata <serve|list|show|create|delete|normalize|fetch|validate>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    List,
    Show,
    Create,
    Delete,
    Normalize,
    Fetch,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("list") => Some(Command::List),
        Some("show") => Some(Command::Show),
        Some("create") => Some(Command::Create),
        Some("delete") => Some(Command::Delete),
        Some("normalize") => Some(Command::Normalize),
        Some("fetch") => Some(Command::Fetch),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let config = Config::from_env();
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(&config),
        Some(Command::List) => handle_list(&config, args),
        Some(Command::Show) => handle_show(&config, args),
        Some(Command::Create) => handle_create(&config, args),
        Some(Command::Delete) => handle_delete(&config, args),
        Some(Command::Normalize) => handle_normalize(&config),
        Some(Command::Fetch) => handle_fetch(&config, args),
        Some(Command::Validate) => handle_validate(&config, args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn report(result: Result<()>, action: &str) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{action} failed: {err}");
            1
        }
    }
}

fn parse_id_arg(raw: Option<&String>, command: &str) -> std::result::Result<u32, i32> {
    let Some(raw) = raw else {
        eprintln!("usage: cordata {command} <hash_id>");
        return Err(2);
    };
    raw.parse::<u32>().map_err(|_| {
        eprintln!("invalid hash_id '{raw}'");
        2
    })
}

fn handle_serve(config: &Config) -> i32 {
    let session = match EditorSession::from_config(config) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("failed to open catalog: {err}");
            return 1;
        }
    };
    let state = AppState::new(session, config.remote_url.clone());
    match server::run_server(&config.bind_addr, state) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

/// `cordata list [status_published=Publicado,Oculto] [status_review=...]`
fn handle_list(config: &Config, args: &[String]) -> i32 {
    let as_json = args.iter().any(|arg| arg == "--json");
    let pairs: Vec<(&str, &str)> = args
        .iter()
        .skip(2)
        .filter(|arg| !arg.starts_with("--"))
        .filter_map(|arg| arg.split_once('='))
        .collect();

    let result = parse_status_filter(pairs).and_then(|filter| {
        let session = EditorSession::from_config(config)?;
        let records = session.list_records(&filter);
        if as_json {
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else {
            println!("hash_id\tname\tstatus_published\tstatus_review");
            for record in records {
                println!(
                    "{}\t{}\t{}\t{}",
                    record.hash_id, record.name, record.status_published, record.status_review
                );
            }
        }
        Ok(())
    });
    report(result, "list")
}

fn handle_show(config: &Config, args: &[String]) -> i32 {
    let hash_id = match parse_id_arg(args.get(2), "show") {
        Ok(id) => id,
        Err(code) => return code,
    };
    let result = EditorSession::from_config(config).and_then(|session| {
        let record = session.get_record(hash_id)?;
        println!("{}", serde_json::to_string_pretty(record)?);
        Ok(())
    });
    report(result, "show")
}

fn handle_create(config: &Config, args: &[String]) -> i32 {
    let name = args.get(2..).unwrap_or_default().join(" ");
    if name.trim().is_empty() {
        eprintln!("usage: cordata create <name>");
        return 2;
    }
    let result = EditorSession::from_config(config).and_then(|mut session| {
        let record = session.create_record(&name)?;
        println!("created use case {} ({})", record.hash_id, record.name);
        Ok(())
    });
    report(result, "create")
}

fn handle_delete(config: &Config, args: &[String]) -> i32 {
    let hash_id = match parse_id_arg(args.get(2), "delete") {
        Ok(id) => id,
        Err(code) => return code,
    };
    let result = EditorSession::from_config(config).and_then(|mut session| {
        session.delete_record(hash_id)?;
        println!("deleted use case {hash_id}");
        Ok(())
    });
    report(result, "delete")
}

fn handle_normalize(config: &Config) -> i32 {
    let result = EditorSession::from_config(config).and_then(|mut session| {
        session.normalize_and_save()?;
        println!(
            "normalized {} use case(s) into {}",
            session.catalog().len(),
            session.data_path().display()
        );
        Ok(())
    });
    report(result, "normalize")
}

fn handle_fetch(config: &Config, args: &[String]) -> i32 {
    let url = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| config.remote_url.clone());
    let result = EditorSession::from_config(config).and_then(|mut session| {
        session.load_from_remote(&url)?;
        println!(
            "fetched {} use case(s) from {url}",
            session.catalog().len()
        );
        Ok(())
    });
    report(result, "fetch")
}

fn handle_validate(config: &Config, args: &[String]) -> i32 {
    let path = args
        .get(2)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| config.data_file.clone());

    let catalog = match load_catalog(&path) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };
    let report = validate_catalog(&catalog);
    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
    if report.has_errors() {
        eprintln!(
            "validation failed: {} error(s) in {}",
            report.errors().count(),
            path.display()
        );
        1
    } else {
        println!("validation passed: {}", path.display());
        0
    }
}
