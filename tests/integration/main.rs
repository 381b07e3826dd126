//! Integration tests for Quill
//!
//! These tests drive the indexer, the snapshot cache, the intellisense
//! controller, and the CLI binary together.

use quill_core::{load_snapshot, save_snapshot, clear_cache, index_cache_path, SymbolTree};
use quill_indexer::{BuiltinTable, Coordinator, KeySource};
use quill_intellisense::{
    parse_script, HeadlessPopup, HeadlessTooltip, Intellisense, IntellisenseConfig, MemoryBuffer, Outcome,
};
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

fn builtin_tree() -> SymbolTree {
    let sources: Vec<&dyn KeySource> = vec![&BuiltinTable::Tables, &BuiltinTable::Nominal];
    Coordinator::new().build(&sources).unwrap().tree
}

fn replay(tree: Arc<SymbolTree>, text: &str, script: &str) -> (MemoryBuffer, Vec<Outcome>, Intellisense<HeadlessPopup, HeadlessTooltip>) {
    let mut ctl = Intellisense::new(
        tree,
        IntellisenseConfig::default(),
        HeadlessPopup::default(),
        HeadlessTooltip::default(),
    );
    let mut buffer = MemoryBuffer::new(text);
    let outcomes = parse_script(script)
        .unwrap()
        .into_iter()
        .map(|event| ctl.handle(&mut buffer, event))
        .collect();
    (buffer, outcomes, ctl)
}

fn quill(root: &Path, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_quill"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("Failed to execute quill");
    assert!(
        output.status.success(),
        "quill {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Completing the first table from the built-ins
#[test]
fn test_builtin_table_completion() {
    let tree = Arc::new(builtin_tree());
    let (buffer, outcomes, _) = replay(tree, "use table", "<ctrl+_><enter>");

    assert_eq!(outcomes, vec![Outcome::Opened, Outcome::Committed]);
    assert_eq!(buffer.as_str(), "use table_1");
}

/// Filtering the reserves ledger down to nothing and closing
#[test]
fn test_builtin_reserves_session() {
    let tree = Arc::new(builtin_tree());
    let (_, _, ctl) = replay(Arc::clone(&tree), "aggregated_other_reserves", "<ctrl+_>");

    let labels: Vec<&str> = ctl.popup().items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "brought",
            "cancellation",
            "carried",
            "conversion",
            "dividends",
            "effects",
            "equity",
            "exercise",
            "expired",
        ]
    );

    let (buffer, outcomes, ctl) = replay(tree, "aggregated_other_reserves", "<ctrl+_>bx<enter>");
    assert_eq!(
        outcomes,
        vec![Outcome::Opened, Outcome::Filtered, Outcome::Filtered, Outcome::Closed]
    );
    assert_eq!(buffer.as_str(), "aggregated_other_reserves_bx");
    assert!(!ctl.popup().visible);
}

/// Walking a long key one trigger at a time
#[test]
fn test_chained_triggers_spell_a_key() {
    let tree = Arc::new(builtin_tree());
    let (buffer, _, ctl) = replay(
        tree,
        "",
        "aggregated<ctrl+_>o<enter><ctrl+_>r<enter><ctrl+_>b<enter><ctrl+_><enter><ctrl+_><enter><f1>",
    );

    assert_eq!(buffer.as_str(), "aggregated_other_reserves_brought_forward_restated");
    assert_eq!(
        ctl.tooltip().layout.as_ref().unwrap().lines,
        vec!["Aggregated other reserves - Brought forward", "restated"]
    );
}

/// Snapshot on disk rebuilds the same tree
#[test]
fn test_snapshot_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let tree = builtin_tree();

    let path = save_snapshot(&tree, temp_dir.path()).unwrap();
    assert_eq!(path, index_cache_path(temp_dir.path()));

    let loaded = load_snapshot(temp_dir.path()).unwrap().unwrap();
    assert!(loaded.verify().is_ok());
    assert_eq!(loaded.key_count(), 19);
    assert_eq!(loaded.render_outline(None), tree.render_outline(None));

    clear_cache(temp_dir.path()).unwrap();
    assert!(load_snapshot(temp_dir.path()).unwrap().is_none());
}

/// The CLI simulates a session end to end
#[test]
fn test_cli_simulate() {
    let temp_dir = TempDir::new().unwrap();
    let stdout = quill(
        temp_dir.path(),
        &["simulate", "--text", "use table", "--keys", "<ctrl+_>2"],
    );

    assert!(stdout.contains("buffer: \"use table_2\""), "{stdout}");
    assert!(stdout.contains("popup:\n    table_1\n  > table_2"), "{stdout}");
    assert!(stdout.contains("tooltip: hidden"));
}

/// Index with --save, then read the snapshot back through the CLI
#[test]
fn test_cli_index_save_and_clear() {
    let temp_dir = TempDir::new().unwrap();

    let stdout = quill(temp_dir.path(), &["index", "--save"]);
    assert!(stdout.contains("19 keys"), "{stdout}");
    assert!(index_cache_path(temp_dir.path()).exists());

    let stdout = quill(temp_dir.path(), &["complete", "table_2"]);
    assert_eq!(
        stdout,
        "table_2_first\tfirst\tmember\ntable_2_second\tsecond\tmember\ntable_2_syphon\tsyphon\tmember\n"
    );

    let stdout = quill(temp_dir.path(), &["define", "administrative_expenses"]);
    assert_eq!(stdout.trim(), "Administrative expenses");

    quill(temp_dir.path(), &["clear"]);
    assert!(!index_cache_path(temp_dir.path()).exists());
}

/// Config points at a table directory and disables the built-ins
#[test]
fn test_cli_config_tables() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("tables")).unwrap();
    fs::write(
        root.join("tables/ledger.toml"),
        r#"
name = "Ledger"
kind = "member"

[[entries]]
label = "Cash at bank"
key = "ledger.cash.bank"

[[entries]]
label = "Cash in hand"
key = "ledger.cash.hand"
"#,
    )
    .unwrap();
    fs::write(
        root.join("quill.toml"),
        "tables = \"tables\"\nbuiltin = false\n\n[intellisense]\ndelimiter = \".\"\n",
    )
    .unwrap();

    let stdout = quill(root, &["index"]);
    assert!(stdout.contains("2 keys"), "{stdout}");

    let stdout = quill(root, &["complete", "ledger.cash."]);
    assert_eq!(
        stdout,
        "ledger.cash.bank\tbank\tmember\nledger.cash.hand\thand\tmember\n"
    );

    let stdout = quill(root, &["define", "table_1"]);
    assert_eq!(stdout.trim(), "no definition");

    let stdout = quill(root, &["tree"]);
    assert_eq!(
        stdout,
        "ledger\n  cash\n    bank\n      = ledger.cash.bank [member] \"Cash at bank\"\n    hand\n      = ledger.cash.hand [member] \"Cash in hand\"\n"
    );
}

/// A bad config is reported, not ignored
#[test]
fn test_cli_rejects_unknown_config_fields() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("quill.toml"), "colour = \"blue\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_quill"))
        .arg("--root")
        .arg(temp_dir.path())
        .arg("index")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("quill.toml"));
}
