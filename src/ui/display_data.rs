use crate::config::Config;
use crate::core::models::{Course, ScheduleEntry};
use crate::core::types::CourseColor;
use crate::layout::colors::CourseColorMap;
use crate::layout::{DayLayout, LayoutRecord, WeekLayout};
use crate::ui::ansi::{paint_block, paint_fg};
use crate::ui::width_util::WidthUtil;

pub const COURSE_HEADERS: [&str; 3] = ["ID", "TITLE", "COLOR"];
pub const SCHEDULE_HEADERS: [&str; 3] = ["ID", "DAY", "TIME"];
pub const DAY_HEADERS: [&str; 6] = ["ID", "TIME", "COURSE", "TOP/HEIGHT", "LEFT/WIDTH", "LAYER"];
pub const CONFIG_HEADERS: [&str; 4] = ["ID", "KEY", "DESCRIPTION", "VALUE"];
/// Course cells in the day tables are cut to this many columns.
pub const COURSE_CELL_WIDTH: usize = 28;

/// Turns domain values into table cells. Painting is optional so output can be compared as text.
#[derive(Debug, Clone)]
pub struct DisplayDataBuilder {
    painted: bool,
}

impl Default for DisplayDataBuilder {
    fn default() -> Self {
        Self { painted: true }
    }
}

impl DisplayDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain() -> Self {
        Self { painted: false }
    }

    fn block(&self, text: &str, color: Option<&CourseColor>) -> String {
        match color {
            Some(c) if self.painted => paint_block(&format!(" {text} "), c),
            _ => text.to_string(),
        }
    }

    fn tint(&self, text: &str, color: Option<&CourseColor>) -> String {
        match color {
            Some(c) if self.painted => paint_fg(text, c),
            _ => text.to_string(),
        }
    }

    /// Color column shows the explicit color, else the palette color currently on screen.
    pub fn course_rows(&self, courses: &[Course], on_screen: &CourseColorMap) -> Vec<Vec<String>> {
        courses
            .iter()
            .map(|c| {
                let (color, source) = match (&c.color, on_screen.get(c.id)) {
                    (Some(explicit), _) => (Some(explicit), "custom"),
                    (None, Some(palette)) => (Some(palette), "palette"),
                    (None, None) => (None, "unscheduled"),
                };
                let color_cell = match color {
                    Some(col) => format!("{} {source}", self.tint(col.as_str(), Some(col))),
                    None => format!("- {source}"),
                };
                vec![c.id.to_string(), self.tint(&c.title, color), color_cell]
            })
            .collect()
    }

    pub fn schedule_rows(&self, entries: &[ScheduleEntry]) -> Vec<Vec<String>> {
        let mut sorted: Vec<&ScheduleEntry> = entries.iter().collect();
        sorted.sort_by_key(|e| (e.day_of_week, e.start_minutes()));
        sorted
            .into_iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.day_of_week.to_string(),
                    e.span().display_label(),
                ]
            })
            .collect()
    }

    pub fn day_title(&self, day: &DayLayout) -> String {
        let base = format!("{} {}", day.day, day.date.format("%b %-d"));
        if day.is_today {
            format!("{base} (today)")
        } else {
            base
        }
    }

    pub fn day_rows(&self, day: &DayLayout, layout: &WeekLayout) -> Vec<Vec<String>> {
        day.records
            .iter()
            .map(|r| self.record_row(r, layout))
            .collect()
    }

    fn record_row(&self, r: &LayoutRecord, layout: &WeekLayout) -> Vec<String> {
        let color = layout.color_for(r);
        vec![
            r.entry.id.to_string(),
            r.entry.span().display_label(),
            self.block(
                &WidthUtil.truncate(&r.entry.course_title, COURSE_CELL_WIDTH),
                color,
            ),
            format!(
                "{:.0}px/{:.0}px",
                r.render_top_px(layout.stack_nudge_px),
                r.height_px
            ),
            format!("{:.2}%/{:.2}%", r.left_percent, r.width_percent),
            r.stack_level().to_string(),
        ]
    }

    pub fn config_rows(&self, config: &Config) -> Vec<Vec<String>> {
        config
            .rows()
            .iter()
            .enumerate()
            .map(|(i, (k, d, v))| vec![i.to_string(), k.clone(), d.clone(), v.clone()])
            .collect()
    }
}
