use crate::core::models::ScheduleEntry;
use crate::core::types::CourseColor;
use std::collections::{BTreeSet, HashMap};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive};

/// Default palette, in assignment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIterDerive)]
#[strum(serialize_all = "lowercase")]
pub enum PaletteColor {
    Blue,
    Red,
    Emerald,
    Amber,
    Violet,
    Pink,
    Cyan,
    Orange,
    Lime,
    Indigo,
}

impl PaletteColor {
    pub fn hex(self) -> &'static str {
        match self {
            PaletteColor::Blue => "#3b82f6",
            PaletteColor::Red => "#ef4444",
            PaletteColor::Emerald => "#10b981",
            PaletteColor::Amber => "#f59e0b",
            PaletteColor::Violet => "#8b5cf6",
            PaletteColor::Pink => "#ec4899",
            PaletteColor::Cyan => "#06b6d4",
            PaletteColor::Orange => "#f97316",
            PaletteColor::Lime => "#84cc16",
            PaletteColor::Indigo => "#6366f1",
        }
    }

    pub fn color(self) -> CourseColor {
        CourseColor::from_normalized(self.hex())
    }
}

/// Resolved color per course id for one schedule set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseColorMap {
    by_course: HashMap<i32, CourseColor>,
}

impl CourseColorMap {
    pub fn get(&self, course_id: i32) -> Option<&CourseColor> {
        self.by_course.get(&course_id)
    }

    pub fn len(&self) -> usize {
        self.by_course.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_course.is_empty()
    }
}

/// Picks a course's color: the user override if one is set, otherwise the palette slot of the
/// course title's rank among the sorted unique titles on screen.
///
/// Ranks shift when unrelated courses come and go, so defaults are only stable for a fixed
/// course set.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    palette: Vec<CourseColor>,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self {
            palette: PaletteColor::iter().map(PaletteColor::color).collect(),
        }
    }
}

impl ColorAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palette(&self) -> &[CourseColor] {
        &self.palette
    }

    pub fn default_for_rank(&self, rank: usize) -> CourseColor {
        self.palette[rank % self.palette.len()].clone()
    }

    pub fn assign(
        &self,
        entries: &[ScheduleEntry],
        overrides: &HashMap<i32, CourseColor>,
    ) -> CourseColorMap {
        let titles: Vec<&str> = entries
            .iter()
            .map(|e| e.course_title.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut by_course = HashMap::new();
        for entry in entries {
            if by_course.contains_key(&entry.course_id) {
                continue;
            }
            let color = match overrides.get(&entry.course_id) {
                Some(explicit) => explicit.clone(),
                None => {
                    let rank = titles
                        .binary_search(&entry.course_title.as_str())
                        .unwrap_or_else(|insert_at| insert_at);
                    self.default_for_rank(rank)
                }
            };
            by_course.insert(entry.course_id, color);
        }

        CourseColorMap { by_course }
    }
}
