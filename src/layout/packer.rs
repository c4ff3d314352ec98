use crate::layout::grouper::OverlapGroup;

pub const FULL_WIDTH_PERCENT: f64 = 100.0;

/// Horizontal placement of one entry inside its day track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSlot {
    pub column: usize,
    /// Columns used by the entry's group.
    pub columns: usize,
    pub width_percent: f64,
    pub left_percent: f64,
    /// How many times the group wrapped past the column cap before this entry.
    pub z_offset: usize,
}

impl ColumnSlot {
    pub fn full_width() -> Self {
        Self {
            column: 0,
            columns: 1,
            width_percent: FULL_WIDTH_PERCENT,
            left_percent: 0.0,
            z_offset: 0,
        }
    }
}

pub trait ColumnPacker {
    /// One slot per group member, in member order.
    fn pack(&self, group: &OverlapGroup<'_>) -> Vec<ColumnSlot>;
}

/// Round-robin column assignment over the start-sorted group.
///
/// This is a plain `index % columns`, not a minimum interval-graph coloring. Members past the
/// cap stack on earlier columns with a growing `z_offset`.
#[derive(Debug, Clone, Copy)]
pub struct ModuloColumnPacker {
    max_columns: usize,
    gap_percent: f64,
}

impl Default for ModuloColumnPacker {
    fn default() -> Self {
        Self {
            max_columns: 3,
            gap_percent: 0.5,
        }
    }
}

impl ModuloColumnPacker {
    pub fn new(max_columns: usize, gap_percent: f64) -> Self {
        Self {
            max_columns: max_columns.max(1),
            gap_percent: gap_percent.clamp(0.0, FULL_WIDTH_PERCENT),
        }
    }

    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    pub fn columns_for(&self, group_size: usize) -> usize {
        group_size.min(self.max_columns).max(1)
    }
}

impl ColumnPacker for ModuloColumnPacker {
    fn pack(&self, group: &OverlapGroup<'_>) -> Vec<ColumnSlot> {
        if group.len() <= 1 {
            return group.members.iter().map(|_| ColumnSlot::full_width()).collect();
        }

        let columns = self.columns_for(group.len());
        let column_width = FULL_WIDTH_PERCENT / columns as f64;
        // The gap is shared out across the row so the last column still ends inside 100%.
        let width = (FULL_WIDTH_PERCENT - self.gap_percent) / columns as f64;

        (0..group.len())
            .map(|index| {
                let column = index % columns;
                ColumnSlot {
                    column,
                    columns,
                    width_percent: width,
                    left_percent: column as f64 * column_width,
                    z_offset: index / columns,
                }
            })
            .collect()
    }
}
