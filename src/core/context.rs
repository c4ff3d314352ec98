use crate::config::{Config, ConfigKey};
use crate::core::cli::CliPaths;
use crate::core::loader::{LoadOutcome, ScheduleLoader};
use crate::core::models::{Course, ScheduleDraft, ScheduleEntry};
use crate::core::service::ScheduleService;
use crate::core::store::{JsonFileStore, Store};
use crate::core::types::{CourseColor, WeekStep};
use crate::errors::{Error, Result};
use crate::layout::colors::ColorAssigner;
use crate::layout::week::{Clock, FixedClock, SystemClock, WeekNavigator, WeekWindow};
use crate::layout::{LayoutEngine, WeekLayout};
use crate::logging::{LogLevel, LogTarget, Logger};
use chrono::NaiveDate;
use std::fmt;

/// A non-blocking message for the host to show, e.g. a failed background load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// Explicit owner of everything one calendar view needs. Created by the host and handed to the
/// renderer; there is no global instance.
pub struct EngineContext<S: Store> {
    pub config: Config,
    pub logger: Logger,
    store: S,
    navigator: WeekNavigator,
    loader: ScheduleLoader,
    engine: LayoutEngine,
    colors: ColorAssigner,
    alerts: Vec<Alert>,
}

impl EngineContext<JsonFileStore> {
    /// Wires config, logs and the JSON store from command-line paths. Missing config is created.
    pub fn open(paths: &CliPaths) -> Result<Self> {
        let config = Config::load_or_init(&paths.config_path)?;
        let logger = Logger::new();
        logger.set_log_dir(&paths.logs_dir);
        let store = JsonFileStore::open(&paths.store_path)?;
        let clock: Box<dyn Clock> = match paths.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        };
        Ok(Self::new(config, logger, store, clock))
    }
}

impl<S: Store> EngineContext<S> {
    pub fn new(config: Config, logger: Logger, store: S, clock: Box<dyn Clock>) -> Self {
        logger.set_file_logging_enabled(config.file_logging_enabled());
        let engine = LayoutEngine::from_config(&config).with_logger(&logger);
        let loader = ScheduleLoader::new(&logger);
        let mut ctx = Self {
            config,
            logger,
            store,
            navigator: WeekNavigator::new(clock),
            loader,
            engine,
            colors: ColorAssigner::default(),
            alerts: Vec::new(),
        };
        ctx.refresh();
        ctx
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct store access; call [`EngineContext::refresh`] afterwards to pick up changes.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn loader(&self) -> &ScheduleLoader {
        &self.loader
    }

    pub fn window(&self) -> WeekWindow {
        self.navigator.window()
    }

    pub fn current_date(&self) -> NaiveDate {
        self.navigator.current_date()
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        self.loader.entries()
    }

    /// Re-fetches schedules and colors. A failure keeps the last good data and queues an alert.
    pub fn refresh(&mut self) -> LoadOutcome {
        let outcome = self.loader.load(&self.store);
        if let LoadOutcome::Failed { message } = &outcome {
            self.alert(
                LogLevel::Warn,
                format!("Could not load schedules ({message}). Showing the last loaded calendar."),
            );
        }
        outcome
    }

    pub fn navigate(&mut self, step: WeekStep) -> WeekWindow {
        let window = self.navigator.navigate(step);
        self.after_navigation(window)
    }

    pub fn navigate_by(&mut self, direction: i32) -> Result<WeekWindow> {
        let step = WeekStep::from_direction(direction)?;
        Ok(self.navigate(step))
    }

    pub fn today(&mut self) -> WeekWindow {
        let window = self.navigator.today();
        self.after_navigation(window)
    }

    pub fn jump_to(&mut self, date: NaiveDate) -> WeekWindow {
        let window = self.navigator.jump_to(date);
        self.after_navigation(window)
    }

    fn after_navigation(&mut self, window: WeekWindow) -> WeekWindow {
        self.logger
            .info(format!("Showing week {window}"), LogTarget::FileOnly);
        self.refresh();
        window
    }

    /// Lays out the displayed week from the last good data.
    pub fn week_layout(&self) -> WeekLayout {
        let entries = self.loader.entries();
        let colors = self.colors.assign(entries, self.loader.color_overrides());
        self.engine.layout_week(
            self.navigator.window(),
            entries,
            colors,
            self.navigator.current_date(),
        )
    }

    // ===========
    // Mutations
    // ===========

    /// Replace-all save for one course, then reload. A partial save is also queued as an alert,
    /// and the reload shows what actually got stored.
    pub fn save_course_schedules(
        &mut self,
        course_id: i32,
        drafts: &[ScheduleDraft],
    ) -> Result<Vec<ScheduleEntry>> {
        let result = self.service().replace_course_schedules(course_id, drafts);
        match &result {
            Ok(_) => {
                self.refresh();
            }
            Err(err @ Error::PartialSave { .. }) => {
                let message = err.to_string();
                self.alert(LogLevel::Error, message);
                self.refresh();
            }
            Err(_) => {}
        }
        result
    }

    pub fn update_schedule(&mut self, id: i32, draft: &ScheduleDraft) -> Result<ScheduleEntry> {
        let entry = self.service().update_schedule(id, draft)?;
        self.refresh();
        Ok(entry)
    }

    pub fn delete_schedule(&mut self, id: i32) -> Result<bool> {
        let removed = self.service().delete_schedule(id)?;
        self.refresh();
        Ok(removed)
    }

    pub fn create_course(&mut self, title: &str, color: Option<&str>) -> Result<Course> {
        let course = self.service().create_course(title, color)?;
        self.refresh();
        Ok(course)
    }

    pub fn delete_course(&mut self, id: i32) -> Result<bool> {
        let removed = self.service().delete_course(id)?;
        self.refresh();
        Ok(removed)
    }

    pub fn set_course_color(&mut self, id: i32, color: Option<&str>) -> Result<Option<CourseColor>> {
        let color = self.service().set_course_color(id, color)?;
        self.refresh();
        Ok(color)
    }

    pub fn courses(&self) -> Result<Vec<Course>> {
        self.store.list_courses()
    }

    pub fn course_schedules(&mut self, course_id: i32) -> Result<Vec<ScheduleEntry>> {
        self.service().course_schedules(course_id)
    }

    /// Changes one config value and rebuilds the layout engine from the new settings.
    pub fn set_config(&mut self, key: &str, value: &str) -> Result<()> {
        self.config.set(key, value)?;
        self.after_config_change();
        Ok(())
    }

    /// Same as [`EngineContext::set_config`], addressing the key by its row in `config.rows()`.
    pub fn set_config_by_index(&mut self, index: usize, value: &str) -> Result<()> {
        self.config.set_by_index(index, value)?;
        self.after_config_change();
        Ok(())
    }

    fn after_config_change(&mut self) {
        let file_enabled = self.config.file_logging_enabled();
        if let Some((key, old, new)) = self.config.take_last_change() {
            // Turning file logging off still records the change itself.
            let toggled = key == ConfigKey::FileLoggingEnabled.to_string();
            self.logger.set_file_logging_enabled(file_enabled || toggled);
            self.logger.info(
                format!("Config {key} changed from {old} to {new}"),
                LogTarget::FileOnly,
            );
        }
        self.logger.set_file_logging_enabled(file_enabled);
        self.engine = LayoutEngine::from_config(&self.config).with_logger(&self.logger);
    }

    // ======
    // Alerts
    // ======

    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }

    fn alert(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Info => self.logger.info(&message, LogTarget::FileOnly),
            LogLevel::Warn => self.logger.warn(&message, LogTarget::FileOnly),
            LogLevel::Error => self.logger.error(&message, LogTarget::FileOnly),
        }
        self.alerts.push(Alert { level, message });
    }

    fn service(&mut self) -> ScheduleService<'_, S> {
        ScheduleService::new(&mut self.store, &self.logger)
    }
}
