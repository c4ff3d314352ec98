use std::io::Write;

use chrono::NaiveDate;

use crate::command::manual::ManualCatalog;
use crate::command::tokens::TokenStream;
use crate::core::context::EngineContext;
use crate::core::models::ScheduleDraft;
use crate::core::store::Store;
use crate::core::types::{DayOfWeek, WeekStep};
use crate::errors::{Error, Result};
use crate::ui::display_manager::DisplayManager;

/// Where command output goes, and how it is drawn.
pub struct Screen<'o> {
    pub display: &'o DisplayManager,
    pub out: &'o mut dyn Write,
}

impl<'o> Screen<'o> {
    pub fn new(display: &'o DisplayManager, out: &'o mut dyn Write) -> Self {
        Self { display, out }
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    pub fn week<S: Store>(&mut self, ctx: &EngineContext<S>) -> Result<()> {
        self.display.render_week(&ctx.week_layout(), &mut *self.out)?;
        Ok(())
    }
}

/// What the prompt should do once a command has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEffect {
    Continue,
    OpenConfigEditor,
}

pub trait Command<S: Store> {
    fn usage(&self) -> &'static str;
    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect>;
}

pub type CommandDyn<S> = Box<dyn Command<S>>;

pub const SHOW_USAGE: &str = "show";
pub const NEXT_USAGE: &str = "next";
pub const PREV_USAGE: &str = "prev";
pub const TODAY_USAGE: &str = "today";
pub const WEEK_USAGE: &str = "week <YYYY-MM-DD>";
pub const COURSES_USAGE: &str = "courses";
pub const COURSE_USAGE: &str =
    "course add \"<title>\" [#rrggbb] | course del <course_id> | course show <course_id>";
pub const COLOR_USAGE: &str = "color <course_id> <#rrggbb|default>";
pub const SCHED_USAGE: &str = "sched <course_id> [<day> <HH:MM-HH:MM>]...";
pub const UNSCHED_USAGE: &str = "unsched <schedule_id>";
pub const EDIT_USAGE: &str = "edit <schedule_id> <day> <HH:MM-HH:MM>";
pub const CONFIG_USAGE: &str = "config";
pub const SET_USAGE: &str = "set <KEY> <value>";
pub const HELP_USAGE: &str = "help [topic]";

/// `"mon", "09:00-10:15"` → draft. Times are checked later, with the whole batch.
pub fn parse_meeting(day: &str, range: &str, ts: &TokenStream) -> Result<ScheduleDraft> {
    let day = DayOfWeek::try_from(day)?;
    let (start, end) = range.split_once('-').ok_or_else(|| {
        ts.usage_error(format!(
            "Invalid time range: '{range}'. Expected HH:MM-HH:MM, e.g. 09:00-10:15."
        ))
    })?;
    Ok(ScheduleDraft::new(
        day.index() as i64,
        start.trim(),
        end.trim(),
    ))
}

// ==========
// Week view
// ==========

pub struct ShowCommand;

impl<S: Store> Command<S> for ShowCommand {
    fn usage(&self) -> &'static str {
        SHOW_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        ctx.refresh();
        screen.week(ctx)?;
        Ok(CommandEffect::Continue)
    }
}

pub struct NavigateCommand {
    pub step: WeekStep,
}

impl<S: Store> Command<S> for NavigateCommand {
    fn usage(&self) -> &'static str {
        match self.step {
            WeekStep::Forward => NEXT_USAGE,
            WeekStep::Back => PREV_USAGE,
        }
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        ctx.navigate(self.step);
        screen.week(ctx)?;
        Ok(CommandEffect::Continue)
    }
}

pub struct TodayCommand;

impl<S: Store> Command<S> for TodayCommand {
    fn usage(&self) -> &'static str {
        TODAY_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        ctx.today();
        screen.week(ctx)?;
        Ok(CommandEffect::Continue)
    }
}

pub struct WeekCommand {
    pub date: NaiveDate,
}

impl WeekCommand {
    pub fn parse(ts: &mut TokenStream) -> Result<Self> {
        let raw = ts.next("date")?;
        let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| ts.usage_error(format!("Invalid date: '{raw}'. Expected YYYY-MM-DD.")))?;
        ts.finish()?;
        Ok(Self { date })
    }
}

impl<S: Store> Command<S> for WeekCommand {
    fn usage(&self) -> &'static str {
        WEEK_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        ctx.jump_to(self.date);
        screen.week(ctx)?;
        Ok(CommandEffect::Continue)
    }
}

// =======
// Courses
// =======

pub struct CoursesCommand;

impl<S: Store> Command<S> for CoursesCommand {
    fn usage(&self) -> &'static str {
        COURSES_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        let courses = ctx.courses()?;
        let layout = ctx.week_layout();
        screen
            .display
            .render_courses(&courses, &layout.colors, &mut *screen.out)?;
        Ok(CommandEffect::Continue)
    }
}

pub struct CourseAddCommand {
    pub title: String,
    pub color: Option<String>,
}

impl CourseAddCommand {
    /// Title is every token up to an optional trailing `#color`.
    pub fn parse(ts: &mut TokenStream) -> Result<Self> {
        let mut words = Vec::new();
        let mut color = None;
        while !ts.eof() {
            let tok = ts.next("title")?;
            if tok.starts_with('#') && ts.eof() {
                color = Some(tok);
            } else {
                words.push(tok);
            }
        }
        let title = words.join(" ");
        if title.trim().is_empty() {
            return Err(ts.usage_error("Missing title.".to_string()));
        }
        Ok(Self { title, color })
    }
}

impl<S: Store> Command<S> for CourseAddCommand {
    fn usage(&self) -> &'static str {
        COURSE_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        let course = ctx.create_course(&self.title, self.color.as_deref())?;
        screen.line(&format!("Added course {}: {}", course.id, course.title))?;
        Ok(CommandEffect::Continue)
    }
}

pub struct CourseDeleteCommand {
    pub id: i32,
}

impl<S: Store> Command<S> for CourseDeleteCommand {
    fn usage(&self) -> &'static str {
        COURSE_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        let msg = if ctx.delete_course(self.id)? {
            format!("Deleted course {} and its schedules.", self.id)
        } else {
            format!("No course with id {}; nothing deleted.", self.id)
        };
        screen.line(&msg)?;
        Ok(CommandEffect::Continue)
    }
}

pub struct CourseShowCommand {
    pub id: i32,
}

impl<S: Store> Command<S> for CourseShowCommand {
    fn usage(&self) -> &'static str {
        COURSE_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        let entries = ctx.course_schedules(self.id)?;
        let course = ctx.store().get_course(self.id)?;
        screen
            .display
            .render_course_schedules(&course, &entries, &mut *screen.out)?;
        Ok(CommandEffect::Continue)
    }
}

pub struct ColorCommand {
    pub id: i32,
    /// `None` clears the override.
    pub color: Option<String>,
}

impl ColorCommand {
    pub fn parse(ts: &mut TokenStream) -> Result<Self> {
        let id = ts.next_id("course id")?;
        let raw = ts.next("color")?;
        ts.finish()?;
        let color = match raw.to_ascii_lowercase().as_str() {
            "default" | "none" | "reset" => None,
            _ => Some(raw),
        };
        Ok(Self { id, color })
    }
}

impl<S: Store> Command<S> for ColorCommand {
    fn usage(&self) -> &'static str {
        COLOR_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        let msg = match ctx.set_course_color(self.id, self.color.as_deref())? {
            Some(color) => format!("Course {} color set to {color}.", self.id),
            None => format!("Course {} color reset to the palette default.", self.id),
        };
        screen.line(&msg)?;
        Ok(CommandEffect::Continue)
    }
}

// =========
// Schedules
// =========

/// Replaces every meeting of one course. No pairs clears the course's schedule.
pub struct SchedCommand {
    pub course_id: i32,
    pub drafts: Vec<ScheduleDraft>,
}

impl SchedCommand {
    pub fn parse(ts: &mut TokenStream) -> Result<Self> {
        let course_id = ts.next_id("course id")?;
        if ts.remaining() % 2 != 0 {
            return Err(ts.usage_error(
                "Each meeting needs a day and a time range.".to_string(),
            ));
        }
        let mut drafts = Vec::new();
        while !ts.eof() {
            let day = ts.next("day")?;
            let range = ts.next("time range")?;
            drafts.push(parse_meeting(&day, &range, ts)?);
        }
        Ok(Self { course_id, drafts })
    }
}

impl<S: Store> Command<S> for SchedCommand {
    fn usage(&self) -> &'static str {
        SCHED_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        let saved = ctx.save_course_schedules(self.course_id, &self.drafts)?;
        screen.line(&format!(
            "Saved {} meeting(s) for course {}.",
            saved.len(),
            self.course_id
        ))?;
        Ok(CommandEffect::Continue)
    }
}

pub struct UnschedCommand {
    pub id: i32,
}

impl<S: Store> Command<S> for UnschedCommand {
    fn usage(&self) -> &'static str {
        UNSCHED_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        let msg = if ctx.delete_schedule(self.id)? {
            format!("Removed schedule {}.", self.id)
        } else {
            format!("No schedule with id {}; nothing removed.", self.id)
        };
        screen.line(&msg)?;
        Ok(CommandEffect::Continue)
    }
}

pub struct EditCommand {
    pub id: i32,
    pub draft: ScheduleDraft,
}

impl EditCommand {
    pub fn parse(ts: &mut TokenStream) -> Result<Self> {
        let id = ts.next_id("schedule id")?;
        let day = ts.next("day")?;
        let range = ts.next("time range")?;
        ts.finish()?;
        let draft = parse_meeting(&day, &range, ts)?;
        Ok(Self { id, draft })
    }
}

impl<S: Store> Command<S> for EditCommand {
    fn usage(&self) -> &'static str {
        EDIT_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        let entry = ctx.update_schedule(self.id, &self.draft)?;
        screen.line(&format!(
            "Updated schedule {}: {} {}",
            entry.id,
            entry.day_of_week,
            entry.span().display_label()
        ))?;
        Ok(CommandEffect::Continue)
    }
}

// ======
// Global
// ======

pub struct ConfigCommand;

impl<S: Store> Command<S> for ConfigCommand {
    fn usage(&self) -> &'static str {
        CONFIG_USAGE
    }

    fn perform(&self, _ctx: &mut EngineContext<S>, _screen: &mut Screen<'_>) -> Result<CommandEffect> {
        // The editor draws its own table.
        Ok(CommandEffect::OpenConfigEditor)
    }
}

pub struct SetCommand {
    pub key: String,
    pub value: String,
}

impl SetCommand {
    pub fn parse(ts: &mut TokenStream) -> Result<Self> {
        let key = ts.next("key")?;
        let value = ts.rest();
        if value.is_empty() {
            return Err(ts.usage_error("Missing value.".to_string()));
        }
        Ok(Self { key, value })
    }
}

impl<S: Store> Command<S> for SetCommand {
    fn usage(&self) -> &'static str {
        SET_USAGE
    }

    fn perform(&self, ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        ctx.set_config(&self.key, &self.value)?;
        screen.line(&format!(
            "Updated {} to {}.",
            self.key.to_ascii_uppercase(),
            self.value
        ))?;
        Ok(CommandEffect::Continue)
    }
}

pub struct HelpCommand {
    pub topic: Option<String>,
}

impl<S: Store> Command<S> for HelpCommand {
    fn usage(&self) -> &'static str {
        HELP_USAGE
    }

    fn perform(&self, _ctx: &mut EngineContext<S>, screen: &mut Screen<'_>) -> Result<CommandEffect> {
        let page = ManualCatalog::new().page_for(self.topic.as_deref())?;
        screen.line(&page.render())?;
        Ok(CommandEffect::Continue)
    }
}

/// Turns a leftover `Error` into the prompt's two messages: full text for the console, first
/// line only for the log file.
pub fn split_usage(err: &Error) -> (String, Option<String>) {
    let text = err.to_string();
    match text.split_once("\nUsage:") {
        Some((head, tail)) => (head.trim().to_string(), Some(format!("Usage:{tail}"))),
        None => (text, None),
    }
}
