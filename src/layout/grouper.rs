use crate::core::models::ScheduleEntry;

/// A maximal run of same-day entries connected through chained overlaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapGroup<'a> {
    /// Members in start-time order.
    pub members: Vec<&'a ScheduleEntry>,
}

impl<'a> OverlapGroup<'a> {
    fn starting_with(entry: &'a ScheduleEntry) -> Self {
        Self {
            members: vec![entry],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn touches(&self, entry: &ScheduleEntry) -> bool {
        self.members.iter().any(|m| m.overlaps(entry))
    }

    pub fn ids(&self) -> Vec<i32> {
        self.members.iter().map(|m| m.id).collect()
    }
}

pub trait OverlapGrouper {
    /// Partition one day's entries. Input order only matters for equal start times.
    fn group<'a>(&self, day_entries: &[&'a ScheduleEntry]) -> Vec<OverlapGroup<'a>>;
}

/// Joins each entry to the first open group holding any member it overlaps.
///
/// Connectivity is transitive: A-B and B-C overlapping puts A, B and C in one group
/// even when A and C are disjoint, so a run of meetings reads as one corridor.
pub struct ChainedOverlapGrouper;

impl ChainedOverlapGrouper {
    /// Stable sort by start minute; ties keep the incoming (row) order.
    pub fn sort_by_start<'a>(day_entries: &[&'a ScheduleEntry]) -> Vec<&'a ScheduleEntry> {
        let mut sorted = day_entries.to_vec();
        sorted.sort_by_key(|e| e.start_minutes());
        sorted
    }
}

impl OverlapGrouper for ChainedOverlapGrouper {
    fn group<'a>(&self, day_entries: &[&'a ScheduleEntry]) -> Vec<OverlapGroup<'a>> {
        let mut groups: Vec<OverlapGroup<'a>> = Vec::new();

        for entry in Self::sort_by_start(day_entries) {
            match groups.iter_mut().find(|g| g.touches(entry)) {
                Some(group) => group.members.push(entry),
                None => groups.push(OverlapGroup::starting_with(entry)),
            }
        }

        groups
    }
}
