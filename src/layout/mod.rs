use crate::config::Config;
use crate::core::models::ScheduleEntry;
use crate::core::types::{CourseColor, DayOfWeek};
use crate::layout::colors::CourseColorMap;
use crate::layout::grouper::{ChainedOverlapGrouper, OverlapGrouper};
use crate::layout::packer::{ColumnPacker, ModuloColumnPacker};
use crate::layout::position::PositionMapper;
use crate::layout::week::WeekWindow;
use crate::logging::{LogTarget, Logger};
use chrono::NaiveDate;
use serde::Serialize;
use strum::IntoEnumIterator;

pub mod colors;
pub mod grouper;
pub mod packer;
pub mod position;
pub mod week;
#[cfg(test)]
mod tests;

/// Geometry for one entry. Hosts place blocks from these numbers and never recompute them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    pub entry: ScheduleEntry,
    pub top_px: f64,
    pub height_px: f64,
    pub width_percent: f64,
    pub left_percent: f64,
    pub column: usize,
    pub z_offset: usize,
}

impl LayoutRecord {
    /// Top edge after the stacking nudge for wrapped entries.
    pub fn render_top_px(&self, nudge_px: f64) -> f64 {
        self.top_px + self.z_offset as f64 * nudge_px
    }

    /// Paint order; wrapped entries sit above the ones they cover.
    pub fn stack_level(&self) -> usize {
        self.z_offset + 1
    }

    pub fn right_percent(&self) -> f64 {
        self.left_percent + self.width_percent
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub day: DayOfWeek,
    pub date: NaiveDate,
    pub is_today: bool,
    pub group_count: usize,
    /// Start-time order.
    pub records: Vec<LayoutRecord>,
}

/// Everything a host needs to draw one week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub window: WeekWindow,
    /// Sunday first; always seven days.
    pub days: Vec<DayLayout>,
    pub colors: CourseColorMap,
    pub stack_nudge_px: f64,
    pub hour_height_px: f64,
}

impl WeekLayout {
    pub fn day(&self, day: DayOfWeek) -> &DayLayout {
        &self.days[day.index()]
    }

    pub fn color_for(&self, record: &LayoutRecord) -> Option<&CourseColor> {
        self.colors.get(record.entry.course_id)
    }

    pub fn record_count(&self) -> usize {
        self.days.iter().map(|d| d.records.len()).sum()
    }
}

/// Observer for finished day layouts (e.g., for logging).
pub trait LayoutObserver {
    fn day_laid_out(&self, day: DayOfWeek, entries: usize, groups: usize, stacked: usize);
}

struct LoggerObserver {
    logger: Logger,
}

impl LayoutObserver for LoggerObserver {
    fn day_laid_out(&self, day: DayOfWeek, entries: usize, groups: usize, stacked: usize) {
        if entries == 0 {
            return;
        }
        self.logger.info(
            format!("{day}: {entries} entr(ies) in {groups} overlap group(s)"),
            LogTarget::FileOnly,
        );
        if stacked > 0 {
            self.logger.info(
                format!("{day}: {stacked} entr(ies) stacked past the column cap"),
                LogTarget::FileOnly,
            );
        }
    }
}

pub struct LayoutEngine {
    grouper: Box<dyn OverlapGrouper>,
    packer: Box<dyn ColumnPacker>,
    mapper: PositionMapper,
    stack_nudge_px: f64,
    observer: Option<Box<dyn LayoutObserver>>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            grouper: Box::new(ChainedOverlapGrouper),
            packer: Box::new(ModuloColumnPacker::default()),
            mapper: PositionMapper::default(),
            stack_nudge_px: 4.0,
            observer: None,
        }
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            packer: Box::new(ModuloColumnPacker::new(
                config.max_columns(),
                config.column_gap_percent(),
            )),
            mapper: PositionMapper::new(config.hour_height_px()),
            stack_nudge_px: config.stack_nudge_px(),
            ..Self::default()
        }
    }

    pub fn with_logger(mut self, logger: &Logger) -> Self {
        self.observer = Some(Box::new(LoggerObserver {
            logger: logger.scoped("layout"),
        }));
        self
    }

    pub fn with_packer(mut self, packer: Box<dyn ColumnPacker>) -> Self {
        self.packer = packer;
        self
    }

    pub fn mapper(&self) -> &PositionMapper {
        &self.mapper
    }

    /// Group → pack → map for one day's entries (already filtered to that day).
    pub fn layout_day(&self, day_entries: &[&ScheduleEntry]) -> Vec<LayoutRecord> {
        self.lay_out(day_entries).0
    }

    fn lay_out(&self, day_entries: &[&ScheduleEntry]) -> (Vec<LayoutRecord>, usize) {
        let groups = self.grouper.group(day_entries);
        let mut records = Vec::with_capacity(day_entries.len());

        for group in &groups {
            let slots = self.packer.pack(group);
            for (entry, slot) in group.members.iter().zip(slots) {
                let span = self.mapper.map(entry);
                records.push(LayoutRecord {
                    entry: (*entry).clone(),
                    top_px: span.top_px,
                    height_px: span.height_px,
                    width_percent: slot.width_percent,
                    left_percent: slot.left_percent,
                    column: slot.column,
                    z_offset: slot.z_offset,
                });
            }
        }

        if let (Some(obs), Some(day)) = (&self.observer, day_entries.first().map(|e| e.day_of_week)) {
            let stacked = records.iter().filter(|r| r.z_offset > 0).count();
            obs.day_laid_out(day, records.len(), groups.len(), stacked);
        }

        (records, groups.len())
    }

    /// Lay out all seven days of `window`. Entries are recurring, so every entry lands on its
    /// weekday regardless of which week is shown.
    pub fn layout_week(
        &self,
        window: WeekWindow,
        entries: &[ScheduleEntry],
        colors: CourseColorMap,
        today: NaiveDate,
    ) -> WeekLayout {
        let days = DayOfWeek::iter()
            .map(|day| {
                let day_entries: Vec<&ScheduleEntry> =
                    entries.iter().filter(|e| e.day_of_week == day).collect();
                let (records, group_count) = self.lay_out(&day_entries);
                DayLayout {
                    day,
                    date: window.date_of(day),
                    is_today: window.is_today(day, today),
                    group_count,
                    records,
                }
            })
            .collect();

        WeekLayout {
            window,
            days,
            colors,
            stack_nudge_px: self.stack_nudge_px,
            hour_height_px: self.mapper.hour_height_px(),
        }
    }
}
