use super::{Config, ConfigKey, models::*};
use crate::errors::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("weekgrid-config-test-{nanos}-{uniq}.json"))
}

fn sample_config_file(path: &std::path::Path) {
    let json = r#"{
  "hour_height_px": { "value": 48.0, "description": "hour" },
  "max_columns": { "value": 2, "description": "columns" },
  "column_gap_percent": { "value": 1.0, "description": "gap" },
  "stack_nudge_px": { "value": 6.0, "description": "nudge" },
  "file_logging_enabled": { "value": "False", "description": "file logging" }
}"#;
    fs::write(path, json).unwrap();
}

#[test]
fn load_from_reads_config_and_rows() {
    let path = temp_path();
    sample_config_file(&path);
    let cfg = Config::load_from(&path).expect("config should load");

    assert_eq!(cfg.hour_height_px(), 48.0);
    assert_eq!(cfg.max_columns(), 2);
    assert_eq!(cfg.column_gap_percent(), 1.0);
    assert_eq!(cfg.stack_nudge_px(), 6.0);
    assert!(!cfg.file_logging_enabled());

    let rows = cfg.rows();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].0, "HOUR_HEIGHT_PX");
    assert!(rows.iter().any(|(k, _, v)| k == "MAX_COLUMNS" && v == "2"));
}

#[test]
fn missing_items_fall_back_to_defaults() {
    let path = temp_path();
    fs::write(&path, r#"{ "max_columns": { "value": 4, "description": "c" } }"#).unwrap();
    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.max_columns(), 4);
    assert_eq!(cfg.hour_height_px(), 60.0);
    assert_eq!(cfg.column_gap_percent(), 0.5);
    assert_eq!(cfg.stack_nudge_px(), 4.0);
    assert!(cfg.file_logging_enabled());
}

#[test]
fn load_from_reports_missing_file() {
    let path = temp_path();
    let err = Config::load_from(&path).unwrap_err();
    match err {
        Error::Config(msg) => {
            let expected = format!("Configuration file '{}' not found.", path.display());
            assert_eq!(msg, expected);
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn load_from_reports_invalid_json() {
    let path = temp_path();
    fs::write(&path, "{").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    match err {
        Error::Config(msg) => {
            let prefix = format!("Invalid JSON in '{}':", path.display());
            assert!(msg.starts_with(&prefix));
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn load_from_rejects_out_of_range_values() {
    let path = temp_path();
    fs::write(
        &path,
        r#"{ "hour_height_px": { "value": -5.0, "description": "h" } }"#,
    )
    .unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("HOUR_HEIGHT_PX"));
}

#[test]
fn load_or_init_writes_defaults_when_absent() {
    let path = temp_path();
    assert!(!path.exists());
    let cfg = Config::load_or_init(&path).unwrap();
    assert!(path.exists());
    assert_eq!(cfg.max_columns(), 3);

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.hour_height_px(), 60.0);
}

#[test]
fn set_persists_and_records_change() {
    let path = temp_path();
    sample_config_file(&path);
    let mut cfg = Config::load_from(&path).unwrap();

    cfg.set("max_columns", "4").unwrap();
    assert_eq!(cfg.max_columns(), 4);
    assert_eq!(
        cfg.take_last_change(),
        Some(("MAX_COLUMNS".to_string(), "2".to_string(), "4".to_string()))
    );
    assert!(cfg.take_last_change().is_none());

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.max_columns(), 4);
}

#[test]
fn rejected_value_leaves_file_and_memory_untouched() {
    let path = temp_path();
    sample_config_file(&path);
    let before = fs::read_to_string(&path).unwrap();
    let mut cfg = Config::load_from(&path).unwrap();

    let err = cfg.set_key(ConfigKey::ColumnGapPercent, "12").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert_eq!(cfg.column_gap_percent(), 1.0);
    assert!(cfg.last_change.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn set_by_index_follows_row_order() {
    let path = temp_path();
    sample_config_file(&path);
    let mut cfg = Config::load_from(&path).unwrap();
    cfg.set_by_index(4, "true").unwrap();
    assert!(cfg.file_logging_enabled());

    let err = cfg.set_by_index(9, "1").unwrap_err();
    assert!(err.to_string().contains("Invalid ID: 9"));
}

#[test]
fn unknown_key_lists_valid_keys() {
    let mut cfg = Config::defaults_at(temp_path());
    let err = cfg.set("width", "3").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Unknown configuration key 'width'"));
    assert!(msg.contains("STACK_NUDGE_PX"));
}

#[test]
fn item_bounds_are_enforced() {
    let mut hour = HourHeightConfigItem::default();
    assert!(hour.set_value("0").is_err());
    assert!(hour.set_value("abc").is_err());
    hour.set_value(" 90 ").unwrap();
    assert_eq!(*hour.get_value(), 90.0);

    let mut cols = MaxColumnsConfigItem::default();
    assert!(cols.set_value("0").is_err());
    cols.set_value("1").unwrap();
    assert_eq!(*cols.get_value(), 1);

    let mut gap = ColumnGapConfigItem::default();
    assert!(gap.set_value("10").is_err());
    gap.set_value("0").unwrap();

    let mut nudge = StackNudgeConfigItem::default();
    assert!(nudge.set_value("-1").is_err());
    nudge.set_value("60").unwrap();
}

#[test]
fn bool_accepts_common_spellings() {
    assert_eq!(Bool::try_from_str("TRUE").unwrap(), Bool(true));
    assert_eq!(Bool::try_from_str("off").unwrap(), Bool(false));
    let err = Bool::try_from_str("maybe").unwrap_err();
    assert!(err.to_string().contains("Invalid string value for boolean"));
    assert_eq!(Bool(true).to_string(), "True");
}
