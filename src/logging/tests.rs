use crate::logging::{LogTarget, Logger};
use std::fs;
use std::path::PathBuf;

fn temp_log_dir(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("weekgrid-logs-{tag}-{nanos}"))
}

#[test]
fn logger_defers_file_creation_until_needed() {
    let logger = Logger::new();
    logger.set_log_dir(temp_log_dir("defer"));
    assert!(logger.log_path().is_none());

    logger.info("console only", LogTarget::ConsoleOnly);
    assert!(logger.log_path().is_none());

    logger.info("file line", LogTarget::FileOnly);
    let path = logger.log_path().expect("log path should be set");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("file line"));
    assert!(contents.contains("INFO"));
}

#[test]
fn scoped_logger_tags_lines_and_shares_the_file() {
    let logger = Logger::new();
    logger.set_log_dir(temp_log_dir("scoped"));
    let layout = logger.scoped("layout");
    assert_eq!(layout.scope(), Some("layout"));

    layout.warn("three columns capped", LogTarget::FileOnly);
    logger.error("plain line", LogTarget::FileOnly);

    let path = logger.log_path().expect("shared session file");
    assert_eq!(layout.log_path(), Some(path.clone()));
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("WARN  [layout] three columns capped"));
    assert!(contents.contains("ERROR plain line"));
}

#[test]
fn logger_skips_file_logging_when_disabled() {
    let logger = Logger::new();
    logger.set_log_dir(temp_log_dir("disabled"));
    logger.set_file_logging_enabled(false);

    logger.info("file should not exist", LogTarget::ConsoleAndFile);
    assert!(logger.log_path().is_none());

    logger.set_file_logging_enabled(true);
    logger.info("now write", LogTarget::FileOnly);
    assert!(logger.log_path().is_some());
}

#[test]
fn log_dir_is_fixed_once_file_opened() {
    let first = temp_log_dir("fixed-a");
    let logger = Logger::new();
    logger.set_log_dir(&first);
    logger.info("open", LogTarget::FileOnly);
    logger.set_log_dir(temp_log_dir("fixed-b"));
    let path = logger.log_path().unwrap();
    assert!(path.starts_with(&first));
}
