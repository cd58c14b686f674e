use super::*;

use std::fs;

use extup_core::{AppliedRoutines, LedgerStore, UpgradeVersion};

fn v(input: &str) -> UpgradeVersion {
    input.parse().expect("version should parse")
}

fn test_store() -> FileLedgerStore {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    let layout = StateLayout::new(std::env::temp_dir().join(format!("extup-cli-test-{nanos}")));
    FileLedgerStore::open(layout).expect("must open store")
}

#[test]
fn list_reports_empty_ledger() {
    let store = test_store();
    let lines = format_list_lines(&store).expect("must format");
    assert_eq!(lines, vec!["No recorded upgrade routines"]);
    let _ = fs::remove_dir_all(store.layout().root());
}

#[test]
fn list_names_every_tracked_extension() {
    let store = test_store();
    let mut applied = AppliedRoutines::new();
    applied.insert(v("1.0"), "update_task_2");
    applied.insert(v("1.1"), "update_task_3");
    store
        .put(&ExtensionKey::plugin("my-plugin/my-plugin.php"), &applied)
        .expect("must write");
    store
        .put(&ExtensionKey::theme("twentytwenty"), &applied)
        .expect("must write");

    let lines = format_list_lines(&store).expect("must format");
    assert_eq!(
        lines,
        vec![
            "plugin my-plugin/my-plugin.php (2 applied)",
            "theme twentytwenty (2 applied)",
        ]
    );
    let _ = fs::remove_dir_all(store.layout().root());
}

#[test]
fn status_groups_routines_by_version() {
    let store = test_store();
    let key = ExtensionKey::plugin("my-plugin/my-plugin.php");
    let mut applied = AppliedRoutines::new();
    applied.insert(v("1.1"), "update_task_4");
    applied.insert(v("1.1"), "update_task_3");
    applied.insert(v("0.3.2"), "update_task_5");
    store.put(&key, &applied).expect("must write");

    let lines = format_status_lines(&store, &key, OutputStyle::Plain).expect("must format");
    assert_eq!(
        lines,
        vec![
            "plugin 'my-plugin/my-plugin.php'",
            "  0.3.2: 1 routine",
            "    - update_task_5",
            "  1.1: 2 routines",
            "    - update_task_3",
            "    - update_task_4",
        ]
    );
    let _ = fs::remove_dir_all(store.layout().root());
}

#[test]
fn status_reports_unknown_extension() {
    let store = test_store();
    let key = ExtensionKey::theme("missing");
    let lines = format_status_lines(&store, &key, OutputStyle::Plain).expect("must format");
    assert_eq!(lines, vec!["No recorded upgrade routines for theme 'missing'"]);
    let _ = fs::remove_dir_all(store.layout().root());
}

#[test]
fn cli_args_parse() {
    use clap::Parser;

    let cli = Cli::parse_from([
        "extup",
        "--state-dir",
        "/tmp/extup-state",
        "status",
        "--kind",
        "plugin",
        "--id",
        "my-plugin/my-plugin.php",
    ]);
    assert_eq!(cli.state_dir.as_deref(), Some(std::path::Path::new("/tmp/extup-state")));
    match cli.command {
        Commands::Status { kind, id } => {
            assert_eq!(kind, "plugin");
            assert_eq!(id, "my-plugin/my-plugin.php");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
