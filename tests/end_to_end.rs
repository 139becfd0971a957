//! End-to-end tests through the umbrella crate: configure a sink, log through
//! the package-level functions and derived handles, read the output back.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use convlog::{Format, Level, Output, SinkConfig, kv};

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

fn file_config(path: &Path, level: Level, format: Format) -> SinkConfig {
    SinkConfig::default()
        .with_level(level)
        .with_format(format)
        .with_output(Output::File(path.to_path_buf()))
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

fn key_positions(line: &str, keys: &[&str]) -> Vec<usize> {
    keys.iter()
        .map(|key| {
            line.find(&format!("\"{key}\":"))
                .unwrap_or_else(|| panic!("{key} missing from {line}"))
        })
        .collect()
}

// ============================================================================
// JSON output
// ============================================================================

/// Verifies the wire order of a warning written through a derived handle.
#[test]
fn json_lines_follow_wire_order() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    convlog::install(&file_config(&path, Level::Info, Format::Json)).unwrap();

    let logger = convlog::with_name("svc").with_values(kv!["hi" => 42]);
    let line = line!() + 1;
    logger.warning("w", kv!["panda" => 2]);
    convlog::flush();
    convlog::uninstall();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    let positions = key_positions(
        &lines[0],
        &["level", "timestamp", "logger", "caller", "message", "hi", "warning", "panda"],
    );
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{}", lines[0]);

    let record: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(record["level"], "info");
    assert_eq!(record["logger"], "svc");
    assert_eq!(record["warning"], true);
    let caller = record["caller"].as_str().unwrap();
    assert!(caller.starts_with(&format!("tests/end_to_end.rs:{line}")), "{caller}");
}

/// Verifies error records end with the error field and gated levels are dropped.
#[test]
fn errors_are_always_written_and_gated_levels_are_not() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    convlog::install(&file_config(&path, Level::Warning, Format::Json)).unwrap();

    let err = io::Error::other("connection reset");
    convlog::info("dropped", kv![]);
    convlog::debug_err("dropped", Some(&err), kv![]);
    convlog::error("request failed", Some(&err), kv!["attempt" => 2]);
    convlog::always("shutting down", kv![]);
    convlog::flush();
    convlog::uninstall();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[0].ends_with(r#""message":"request failed","attempt":2,"error":"connection reset"}"#));
    let always: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(always["level"], "info");
    assert_eq!(always["message"], "shutting down");
}

// ============================================================================
// Text output
// ============================================================================

/// Verifies the text encoder writes one readable line per record.
#[test]
fn text_format_writes_readable_lines() {
    let _guard = serial();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.txt");
    convlog::install(&file_config(&path, Level::Debug, Format::Text)).unwrap();

    convlog::with_name("db").debug("query", kv!["table" => "users", "note" => "slow scan"]);
    convlog::flush();
    convlog::uninstall();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert!(line.contains(" DEBUG [db] tests/end_to_end.rs:"), "{line}");
    assert!(line.ends_with(r#" query table=users note="slow scan""#), "{line}");
}

// ============================================================================
// Configuration
// ============================================================================

/// Verifies an invalid configuration value is reported without touching the sink.
#[test]
fn invalid_configuration_is_rejected() {
    let err = SinkConfig::from_lookup(|key| (key == "LOG_FORMAT").then(|| "xml".to_owned()))
        .unwrap_err();
    assert!(err.to_string().contains("xml"), "{err}");
}
