//! Unit tests for quill-indexer module

use crate::*;
use quill_core::{KeyError, ResolveMode, SymbolKind};
use std::fs;
use tempfile::TempDir;

const NOMINAL_TOML: &str = r#"
name = "Nominal"
kind = "property"

[[entries]]
label = "Administrative expenses"
key = "administrative_expenses"

[[entries]]
label = "Administrative expenses - Staff"
key = "administrative_expenses_staff"
kind = "member"
"#;

const TABLES_JSON: &str = r#"{
  "name": "Tables",
  "entries": [
    { "label": "table 3", "key": "table_3" }
  ]
}"#;

const EVENTS_YAML: &str = r#"
name: Events
kind: event
entries:
  - label: Year end
    key: period_year_end
"#;

fn write_tables(root: &std::path::Path) -> std::path::PathBuf {
    let dir = root.join("tables");
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("nominal.toml"), NOMINAL_TOML).unwrap();
    fs::write(dir.join("nested/tables.json"), TABLES_JSON).unwrap();
    fs::write(dir.join("events.yml"), EVENTS_YAML).unwrap();
    fs::write(dir.join("README.md"), "not a table").unwrap();
    dir
}

#[test]
fn test_builtin_tables_build_cleanly() {
    let sources: Vec<&dyn KeySource> = vec![&BuiltinTable::Tables, &BuiltinTable::Nominal];
    let report = Coordinator::new().build(&sources).unwrap();

    assert_eq!(report.inserted, 19);
    assert!(report.rejected.is_empty());
    assert_eq!(report.sources, 2);
    assert_eq!(report.tree.key_count(), 19);
    assert!(report.tree.verify().is_ok());

    let roots: Vec<_> = report
        .tree
        .roots()
        .iter()
        .map(|&id| report.tree.node(id).unwrap().segment.as_str())
        .collect();
    assert_eq!(roots, vec!["table", "accruals", "administrative", "aggregated"]);
}

#[test]
fn test_builtin_kinds() {
    let tables = BuiltinTable::Tables.entries().unwrap();
    assert!(tables.iter().all(|e| e.kind == Some(SymbolKind::Member)));
    assert_eq!(BuiltinTable::Nominal.name(), "Nominal");
    assert_eq!(BuiltinTable::Nominal.entries().unwrap().len(), 14);
}

#[test]
fn test_rejected_keys_are_reported_not_fatal() {
    let source = StaticSource::new(
        "scratch",
        vec![
            KeyEntry::new("ok", "ledger_cash"),
            KeyEntry::new("blank", ""),
            KeyEntry::new("gap", "ledger__bank"),
            KeyEntry::new("spaced", "ledger bank"),
        ],
    );
    let report = Coordinator::new().build(&[&source]).unwrap();

    assert_eq!(report.inserted, 1);
    let errors: Vec<_> = report.rejected.iter().map(|r| r.error.clone()).collect();
    assert_eq!(
        errors,
        vec![
            KeyError::Empty,
            KeyError::EmptySegment("ledger__bank".into()),
            KeyError::Whitespace("ledger bank".into()),
        ]
    );
    assert_eq!(report.rejected[0].source, "scratch");
    assert!(report.tree.verify().is_ok());
}

#[test]
fn test_table_formats_parse() {
    let toml = TableFormat::Toml.parse(NOMINAL_TOML).unwrap();
    assert_eq!(toml.name, "Nominal");
    let entries = toml.key_entries();
    assert_eq!(entries[0].kind, Some(SymbolKind::Property));
    assert_eq!(entries[1].kind, Some(SymbolKind::Member));

    let json = TableFormat::Json.parse(TABLES_JSON).unwrap();
    assert_eq!(json.entries[0].key, "table_3");
    assert_eq!(json.key_entries()[0].kind, None);

    let yaml = TableFormat::Yaml.parse(EVENTS_YAML).unwrap();
    assert_eq!(yaml.key_entries()[0].kind, Some(SymbolKind::Event));
}

#[test]
fn test_table_rejects_unknown_fields() {
    let result = TableFormat::Json.parse(r#"{ "name": "x", "rows": [] }"#);
    assert!(matches!(result, Err(TableError::Json(_))));
}

#[test]
fn test_load_table_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("table.csv");
    fs::write(&path, "label,key").unwrap();
    assert!(matches!(load_table(&path), Err(TableError::Unsupported(_))));
}

#[test]
fn test_discover_tables_sorted_and_filtered() {
    let temp_dir = TempDir::new().unwrap();
    let dir = write_tables(temp_dir.path());

    let found = discover_tables(&dir).unwrap();
    let names: Vec<_> = found
        .iter()
        .map(|p| p.strip_prefix(&dir).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["events.yml", "nested/tables.json", "nominal.toml"]);
}

#[test]
fn test_discover_honours_ignore_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir = write_tables(temp_dir.path());
    fs::write(dir.join(".ignore"), "nested/\n").unwrap();

    let found = discover_tables(&dir).unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| !p.to_string_lossy().contains("nested")));
}

#[test]
fn test_discover_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    assert!(discover_tables(&temp_dir.path().join("absent")).is_err());
}

#[test]
fn test_build_from_table_files() {
    let temp_dir = TempDir::new().unwrap();
    let dir = write_tables(temp_dir.path());

    let files: Vec<TableFile> = discover_tables(&dir).unwrap().into_iter().map(TableFile::new).collect();
    let mut sources: Vec<&dyn KeySource> = vec![&BuiltinTable::Tables];
    sources.extend(files.iter().map(|f| f as &dyn KeySource));

    let report = Coordinator::new().build(&sources).unwrap();
    assert_eq!(report.inserted, 5 + 4);

    let tree = &report.tree;
    let table = tree.resolve("table", ResolveMode::FirstDivergence).unwrap();
    let labels: Vec<_> = tree.candidates(table).into_iter().map(|c| c.label).collect();
    assert_eq!(labels, vec!["table_1", "table_2", "table_3"]);
    assert_eq!(tree.lookup_tag("period_year_end"), Some("Year end"));
}

#[test]
fn test_unreadable_source_aborts_build() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "name = ").unwrap();

    let file = TableFile::new(&path);
    let err = Coordinator::new().build(&[&file]).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}
