use crate::config::Config;
use crate::core::context::Alert;
use crate::core::models::{Course, ScheduleEntry};
use crate::layout::WeekLayout;
use crate::layout::colors::CourseColorMap;
use crate::layout::position::HOURS_PER_DAY;
use crate::logging::LogLevel;
use crate::ui::ansi::{STYLE_BOLD, STYLE_RESET, paint_block};
use crate::ui::display_data::{
    CONFIG_HEADERS, COURSE_HEADERS, DAY_HEADERS, DisplayDataBuilder, SCHEDULE_HEADERS,
};
use crate::ui::table_printer::{TablePrinter, TableSpec};
use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

const FREE_HOUR: &str = "·";
const NO_CLASSES: &str = "No classes.";

/// Terminal renderer for the week and the supporting tables.
#[derive(Debug, Clone)]
pub struct DisplayManager {
    pub printer: TablePrinter,
    pub util: WidthUtil,
    pub data: DisplayDataBuilder,
    painted: bool,
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self {
            printer: TablePrinter::new(),
            util: WidthUtil,
            data: DisplayDataBuilder::new(),
            painted: true,
        }
    }
}

impl DisplayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// No ANSI styling anywhere; for logs and tests.
    pub fn plain() -> Self {
        Self {
            data: DisplayDataBuilder::plain(),
            painted: false,
            ..Self::default()
        }
    }

    pub fn render_week<W: Write + ?Sized>(&self, layout: &WeekLayout, out: &mut W) -> io::Result<()> {
        let day_tables: Vec<(String, Vec<Vec<String>>)> = layout
            .days
            .iter()
            .map(|d| (self.data.day_title(d), self.data.day_rows(d, layout)))
            .collect();
        let width = day_tables
            .iter()
            .map(|(title, rows)| {
                self.printer
                    .table_width(&DAY_HEADERS, rows)
                    .max(self.util.visible_width(title))
            })
            .max()
            .unwrap_or(0)
            .max(self.util.visible_width(NO_CLASSES));

        self.printer
            .render_banner(&format!("Week of {}", layout.window.label()), width, out)?;
        self.render_overview(layout, out)?;

        for (title, rows) in &day_tables {
            let spec = TableSpec::new(title, &DAY_HEADERS, rows)
                .empty_message(NO_CLASSES)
                .min_width(width);
            self.printer.render(&spec, out)?;
        }
        Ok(())
    }

    /// One row per day, one cell per hour, painted where a class starts in or covers that hour.
    fn render_overview<W: Write + ?Sized>(&self, layout: &WeekLayout, out: &mut W) -> io::Result<()> {
        let hour_px = layout.hour_height_px;
        let mut ruler = String::new();
        let mut hour = 0;
        while hour < HOURS_PER_DAY {
            if hour % 6 == 0 {
                let label = hour.to_string();
                hour += label.len() as u32;
                ruler.push_str(&label);
            } else {
                hour += 1;
                ruler.push(' ');
            }
        }
        writeln!(out, "        {ruler}")?;

        for day in &layout.days {
            let mut cells: Vec<String> = vec![FREE_HOUR.to_string(); HOURS_PER_DAY as usize];
            for record in &day.records {
                let first = (record.top_px / hour_px).floor() as usize;
                let last = ((record.top_px + record.height_px) / hour_px).ceil() as usize;
                for cell in cells
                    .iter_mut()
                    .take(last.min(HOURS_PER_DAY as usize))
                    .skip(first)
                {
                    *cell = match (self.painted, layout.color_for(record)) {
                        (true, Some(color)) => paint_block(" ", color),
                        _ => "#".to_string(),
                    };
                }
            }
            let marker = if day.is_today { "*" } else { " " };
            let label = if self.painted && day.is_today {
                format!("{STYLE_BOLD}{}{STYLE_RESET}", day.day)
            } else {
                day.day.to_string()
            };
            writeln!(out, "{marker}{label}    {}", cells.concat())?;
        }
        Ok(())
    }

    pub fn render_courses<W: Write + ?Sized>(
        &self,
        courses: &[Course],
        on_screen: &CourseColorMap,
        out: &mut W,
    ) -> io::Result<()> {
        let rows = self.data.course_rows(courses, on_screen);
        let spec = TableSpec::new("Courses", &COURSE_HEADERS, &rows)
            .empty_message("No courses yet. Add one with 'course add <title>'.");
        self.printer.render(&spec, out)
    }

    pub fn render_course_schedules<W: Write + ?Sized>(
        &self,
        course: &Course,
        entries: &[ScheduleEntry],
        out: &mut W,
    ) -> io::Result<()> {
        let rows = self.data.schedule_rows(entries);
        let title = format!("{} schedule", course.title);
        let spec = TableSpec::new(&title, &SCHEDULE_HEADERS, &rows)
            .empty_message("No meetings scheduled.");
        self.printer.render(&spec, out)
    }

    pub fn render_config<W: Write + ?Sized>(&self, config: &Config, out: &mut W) -> io::Result<()> {
        let rows = self.data.config_rows(config);
        let spec = TableSpec::new("Config", &CONFIG_HEADERS, &rows)
            .empty_message("No config items found.");
        self.printer.render(&spec, out)
    }

    pub fn render_alerts<W: Write + ?Sized>(&self, alerts: &[Alert], out: &mut W) -> io::Result<()> {
        for alert in alerts {
            let tag = match alert.level {
                LogLevel::Info => "note",
                LogLevel::Warn => "warning",
                LogLevel::Error => "error",
            };
            writeln!(out, "[{tag}] {}", alert.message)?;
        }
        Ok(())
    }
}
