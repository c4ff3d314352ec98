use crate::core::models::ScheduleEntry;
use crate::core::store::Store;
use crate::core::types::CourseColor;
use crate::errors::Result;
use crate::logging::{LogTarget, Logger};
use std::collections::HashMap;

/// Everything one fetch brings back: the user's entries and any explicit course colors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleSnapshot {
    pub entries: Vec<ScheduleEntry>,
    pub color_overrides: HashMap<i32, CourseColor>,
}

impl ScheduleSnapshot {
    pub fn fetch<S: Store + ?Sized>(store: &S) -> Result<Self> {
        let entries = store.list_schedules_for_user()?;
        let color_overrides = store
            .list_courses()?
            .into_iter()
            .filter_map(|c| c.color.map(|color| (c.id, color)))
            .collect();
        Ok(Self {
            entries,
            color_overrides,
        })
    }
}

/// Issued by [`ScheduleLoader::begin`]; only the newest ticket may apply its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied { entries: usize },
    /// A newer load started after this one; the response was dropped.
    Stale { generation: u64, latest: u64 },
    /// The fetch failed; the previous data is still in place.
    Failed { message: String },
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied { .. })
    }
}

/// Holds the last good schedule data and decides which fetch responses may replace it.
#[derive(Debug)]
pub struct ScheduleLoader {
    generation: u64,
    current: ScheduleSnapshot,
    loaded: Option<u64>,
    logger: Logger,
}

impl ScheduleLoader {
    pub fn new(logger: &Logger) -> Self {
        Self {
            generation: 0,
            current: ScheduleSnapshot::default(),
            loaded: None,
            logger: logger.scoped("loader"),
        }
    }

    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn complete(&mut self, ticket: LoadTicket, response: Result<ScheduleSnapshot>) -> LoadOutcome {
        if !self.is_current(ticket) {
            self.logger.info(
                format!(
                    "Dropped stale load #{} (latest is #{})",
                    ticket.generation, self.generation
                ),
                LogTarget::FileOnly,
            );
            return LoadOutcome::Stale {
                generation: ticket.generation,
                latest: self.generation,
            };
        }

        match response {
            Ok(snapshot) => {
                let entries = snapshot.entries.len();
                self.current = snapshot;
                self.loaded = Some(ticket.generation);
                self.logger.info(
                    format!("Load #{} applied: {entries} schedule(s)", ticket.generation),
                    LogTarget::FileOnly,
                );
                LoadOutcome::Applied { entries }
            }
            Err(err) => {
                self.logger.warn(
                    format!("Load #{} failed: {err}", ticket.generation),
                    LogTarget::FileOnly,
                );
                LoadOutcome::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Begin and complete in one step against `store`.
    pub fn load<S: Store + ?Sized>(&mut self, store: &S) -> LoadOutcome {
        let ticket = self.begin();
        self.complete(ticket, ScheduleSnapshot::fetch(store))
    }

    pub fn snapshot(&self) -> &ScheduleSnapshot {
        &self.current
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.current.entries
    }

    pub fn color_overrides(&self) -> &HashMap<i32, CourseColor> {
        &self.current.color_overrides
    }

    /// Generation whose data is on screen, if any load has succeeded.
    pub fn loaded_generation(&self) -> Option<u64> {
        self.loaded
    }
}
