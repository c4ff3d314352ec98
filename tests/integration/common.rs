use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use weekgrid::config::Config;
use weekgrid::core::context::EngineContext;
use weekgrid::core::store::Store;
use weekgrid::layout::week::FixedClock;
use weekgrid::logging::Logger;

/// Wednesday; its week runs Oct 18 - Oct 24, 2026.
pub const TODAY: &str = "2026-10-21";

pub fn today() -> NaiveDate {
    NaiveDate::parse_from_str(TODAY, "%Y-%m-%d").unwrap()
}

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_weekgrid"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "weekgrid-{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn write_config(dir: &Path, json: &str) {
    fs::write(dir.join("config.json"), json).unwrap();
}

/// Runs the binary inside `dir` with a pinned date, feeding `input` on stdin.
pub fn run_with_input(dir: &Path, input: &str) -> Output {
    run_with_args(dir, &["--today", TODAY], input)
}

pub fn run_with_args(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = Command::new(binary_path())
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

fn strip_ansi_and_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1B' && matches!(chars.peek(), Some('[')) {
            let _ = chars.next();
            for nc in chars.by_ref() {
                if nc.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        if c.is_control() {
            continue;
        }
        out.push(c);
    }
    out
}

/// Output lines without styling or the leading `>` prompt, blank lines dropped.
pub fn normalized_lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(buf)
        .lines()
        .map(|l| {
            let stripped = strip_ansi_and_control(l);
            let trimmed = stripped.trim();
            match trimmed.strip_prefix('>') {
                Some(rest) => rest.trim().to_string(),
                None => trimmed.to_string(),
            }
        })
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let logs_dir = dir.join("logs");
    let mut entries = fs::read_dir(logs_dir).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}

/// A context over `store` with default settings and file logs under `dir`.
pub fn build_context<S: Store>(dir: &Path, store: S) -> EngineContext<S> {
    let config = Config::load_or_init(dir.join("config.json")).expect("config should load");
    let logger = Logger::new();
    logger.set_log_dir(dir.join("logs"));
    EngineContext::new(config, logger, store, Box::new(FixedClock(today())))
}
