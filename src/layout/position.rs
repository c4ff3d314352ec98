use crate::core::models::ScheduleEntry;
use crate::core::time::MINUTES_PER_HOUR;

pub const HOURS_PER_DAY: u32 = 24;

/// Vertical placement in pixels from the top of a midnight-anchored day track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalSpan {
    pub top_px: f64,
    pub height_px: f64,
}

/// Maps minutes to pixels at a fixed height per hour row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionMapper {
    hour_height_px: f64,
}

impl Default for PositionMapper {
    fn default() -> Self {
        Self {
            hour_height_px: 60.0,
        }
    }
}

impl PositionMapper {
    pub fn new(hour_height_px: f64) -> Self {
        Self { hour_height_px }
    }

    pub fn hour_height_px(&self) -> f64 {
        self.hour_height_px
    }

    pub fn track_height_px(&self) -> f64 {
        HOURS_PER_DAY as f64 * self.hour_height_px
    }

    pub fn minutes_to_px(&self, minutes: u32) -> f64 {
        minutes as f64 / MINUTES_PER_HOUR as f64 * self.hour_height_px
    }

    /// No clamping: entries end within the day because `start < end` holds on creation.
    pub fn map(&self, entry: &ScheduleEntry) -> VerticalSpan {
        let start = entry.start_minutes();
        let end = entry.end_minutes();
        VerticalSpan {
            top_px: self.minutes_to_px(start),
            height_px: self.minutes_to_px(end.saturating_sub(start)),
        }
    }
}
