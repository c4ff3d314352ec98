#[cfg(test)]
mod tests;

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Local;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so `{:<5}` aligns file columns.
        f.pad(match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        })
    }
}

trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, line: &str);
}

/// Info lines go to stdout, warnings and errors to stderr.
struct ConsoleSink;
impl LogSink for ConsoleSink {
    fn log(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Info => println!("{line}"),
            LogLevel::Warn | LogLevel::Error => eprintln!("{level}: {line}"),
        }
    }
}

struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    fn open_session(dir: &Path) -> std::io::Result<(Self, PathBuf)> {
        fs::create_dir_all(dir)?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("weekgrid-{stamp}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok((
            Self {
                file: Mutex::new(file),
            },
            path,
        ))
    }
}

impl LogSink for FileSink {
    fn log(&self, _level: LogLevel, line: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub enum LogTarget {
    ConsoleOnly,
    #[default]
    ConsoleAndFile,
    FileOnly,
}

#[derive(Default)]
struct FileState {
    sink: Option<Arc<dyn LogSink>>,
    log_path: Option<PathBuf>,
    attempted: bool,
    log_dir: Option<PathBuf>,
}

impl FileState {
    fn dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| PathBuf::from("logs"))
    }
}

/// Cheap-to-clone logging handle. Clones share the same session file.
#[derive(Clone)]
pub struct Logger {
    console: Arc<dyn LogSink>,
    file_state: Arc<Mutex<FileState>>,
    file_enabled: Arc<AtomicBool>,
    scope: Option<Arc<str>>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            console: Arc::new(ConsoleSink),
            file_state: Arc::new(Mutex::new(FileState::default())),
            file_enabled: Arc::new(AtomicBool::new(true)),
            scope: None,
        }
    }

    /// A handle whose file lines are tagged `[name]`.
    pub fn scoped(&self, name: &str) -> Self {
        let mut child = self.clone();
        child.scope = Some(Arc::from(name));
        child
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    // The session file is only created on the first file-targeted line.
    fn file_sink(&self) -> Option<Arc<dyn LogSink>> {
        let mut state = self.file_state.lock().ok()?;
        if state.attempted {
            return state.sink.clone();
        }
        state.attempted = true;

        match FileSink::open_session(&state.dir()) {
            Ok((sink, path)) => {
                let sink: Arc<dyn LogSink> = Arc::new(sink);
                state.log_path = Some(path);
                state.sink = Some(sink.clone());
                Some(sink)
            }
            Err(err) => {
                eprintln!("WARN: File logging unavailable; continuing without a log file. ({err})");
                None
            }
        }
    }

    fn log(&self, level: LogLevel, message: &str, target: LogTarget) {
        if matches!(target, LogTarget::ConsoleOnly | LogTarget::ConsoleAndFile) {
            self.console.log(level, message);
        }

        if matches!(target, LogTarget::ConsoleAndFile | LogTarget::FileOnly)
            && self.file_enabled.load(Ordering::SeqCst)
        {
            if let Some(sink) = self.file_sink() {
                let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
                let line = match &self.scope {
                    Some(scope) => format!("[{timestamp}] {level:<5} [{scope}] {message}"),
                    None => format!("[{timestamp}] {level:<5} {message}"),
                };
                sink.log(level, &line);
            }
        }
    }

    pub fn info(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Info, message.as_ref(), target);
    }

    pub fn warn(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Warn, message.as_ref(), target);
    }

    pub fn error(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Error, message.as_ref(), target);
    }

    pub fn set_file_logging_enabled(&self, enabled: bool) {
        self.file_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn file_logging_enabled(&self) -> bool {
        self.file_enabled.load(Ordering::SeqCst)
    }

    /// Only takes effect before the session file has been opened.
    pub fn set_log_dir(&self, dir: impl AsRef<Path>) {
        if let Ok(mut state) = self.file_state.lock() {
            if !state.attempted {
                state.log_dir = Some(dir.as_ref().to_path_buf());
            }
        }
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.file_state.lock().ok().and_then(|s| s.log_path.clone())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("scope", &self.scope)
            .field("log_path", &self.log_path())
            .finish()
    }
}
