use crate::core::models::{Course, ScheduleEntry, ScheduleRow, ScheduleSlot};
use crate::core::repository::{RepoSnapshot, Repository, Sort};
use crate::core::types::{CourseColor, EntityKind};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persistence for recurring schedule rows, scoped to one user.
pub trait ScheduleStore {
    /// All entries in persisted row order.
    fn list_schedules_for_user(&self) -> Result<Vec<ScheduleEntry>>;
    fn list_schedules_for_course(&self, course_id: i32) -> Result<Vec<ScheduleEntry>>;
    /// The store assigns the id.
    fn create_schedule(&mut self, course_id: i32, slot: ScheduleSlot) -> Result<ScheduleEntry>;
    fn update_schedule(&mut self, id: i32, slot: ScheduleSlot) -> Result<ScheduleEntry>;
    /// Returns whether anything was deleted.
    fn delete_all_schedules_for_course(&mut self, course_id: i32) -> Result<bool>;
    fn delete_schedule(&mut self, id: i32) -> Result<bool>;
}

pub trait CourseStore {
    fn list_courses(&self) -> Result<Vec<Course>>;
    fn get_course(&self, id: i32) -> Result<Course>;
    fn create_course(&mut self, title: &str, color: Option<CourseColor>) -> Result<Course>;
    fn set_course_color(&mut self, id: i32, color: Option<CourseColor>) -> Result<()>;
    /// Removes the course row only; schedule cascade is the caller's job.
    fn delete_course(&mut self, id: i32) -> Result<bool>;
}

pub trait Store: ScheduleStore + CourseStore {}
impl<T: ScheduleStore + CourseStore> Store for T {}

// ===========
// MemoryStore
// ===========

#[derive(Debug, Clone)]
pub struct MemoryStore {
    courses: Repository<Course>,
    schedules: Repository<ScheduleRow>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            courses: Repository::new(EntityKind::Course),
            schedules: Repository::new(EntityKind::Schedule),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn title_of(&self, course_id: i32) -> String {
        self.courses
            .get(course_id)
            .map(|c| c.title.clone())
            .unwrap_or_default()
    }

    fn entry_for(&self, row: &ScheduleRow) -> ScheduleEntry {
        ScheduleEntry::from_row(row, self.title_of(row.course_id))
    }

    fn to_file(&self) -> StoreFile {
        StoreFile {
            courses: self.courses.snapshot(),
            schedules: self.schedules.snapshot(),
        }
    }

    fn from_file(file: StoreFile) -> Result<Self> {
        Ok(Self {
            courses: Repository::restore(EntityKind::Course, file.courses)?,
            schedules: Repository::restore(EntityKind::Schedule, file.schedules)?,
        })
    }
}

impl ScheduleStore for MemoryStore {
    fn list_schedules_for_user(&self) -> Result<Vec<ScheduleEntry>> {
        Ok(self
            .schedules
            .values(Sort::IdAsc)
            .into_iter()
            .map(|row| self.entry_for(row))
            .collect())
    }

    fn list_schedules_for_course(&self, course_id: i32) -> Result<Vec<ScheduleEntry>> {
        Ok(self
            .schedules
            .query()
            .r#where(|row| row.course_id == course_id)
            .order(Sort::IdAsc)
            .collect()
            .into_iter()
            .map(|row| self.entry_for(row))
            .collect())
    }

    fn create_schedule(&mut self, course_id: i32, slot: ScheduleSlot) -> Result<ScheduleEntry> {
        if !self.courses.contains(course_id) {
            return Err(Error::not_found(EntityKind::Course, course_id));
        }
        let row = self.schedules.insert(ScheduleRow::new(course_id, slot)).clone();
        Ok(self.entry_for(&row))
    }

    fn update_schedule(&mut self, id: i32, slot: ScheduleSlot) -> Result<ScheduleEntry> {
        let row = self.schedules.get_mut(id)?;
        row.slot = slot;
        let row = row.clone();
        Ok(self.entry_for(&row))
    }

    fn delete_all_schedules_for_course(&mut self, course_id: i32) -> Result<bool> {
        Ok(self.schedules.remove_where(|row| row.course_id == course_id) > 0)
    }

    fn delete_schedule(&mut self, id: i32) -> Result<bool> {
        Ok(self.schedules.remove(id).is_some())
    }
}

impl CourseStore for MemoryStore {
    fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.values(Sort::IdAsc).into_iter().cloned().collect())
    }

    fn get_course(&self, id: i32) -> Result<Course> {
        self.courses.get(id).cloned()
    }

    fn create_course(&mut self, title: &str, color: Option<CourseColor>) -> Result<Course> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::validation("Course title cannot be empty."));
        }
        Ok(self.courses.insert(Course::new(title, color)).clone())
    }

    fn set_course_color(&mut self, id: i32, color: Option<CourseColor>) -> Result<()> {
        self.courses.get_mut(id)?.color = color;
        Ok(())
    }

    fn delete_course(&mut self, id: i32) -> Result<bool> {
        Ok(self.courses.remove(id).is_some())
    }
}

// =============
// JsonFileStore
// =============

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct StoreFile {
    #[serde(default)]
    pub courses: RepoSnapshot<Course>,
    #[serde(default)]
    pub schedules: RepoSnapshot<ScheduleRow>,
}

/// A [`MemoryStore`] mirrored to one JSON file after every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Opens the file, or starts empty when it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(Self {
                path,
                inner: MemoryStore::new(),
            });
        }
        let text = fs::read_to_string(&path).map_err(|e| {
            Error::persistence(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file: StoreFile = serde_json::from_str(&text).map_err(|e| {
            Error::persistence(format!("Invalid store file '{}': {}", path.display(), e))
        })?;
        let inner = MemoryStore::from_file(file)?;
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Apply to a copy, write it, then adopt it, so a failed write leaves memory and disk agreeing.
    fn mutate<R>(&mut self, f: impl FnOnce(&mut MemoryStore) -> Result<R>) -> Result<R> {
        let mut next = self.inner.clone();
        let out = f(&mut next)?;
        self.write(&next)?;
        self.inner = next;
        Ok(out)
    }

    fn write(&self, store: &MemoryStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::persistence(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }
        let json = serde_json::to_string_pretty(&store.to_file())?;
        fs::write(&self.path, json).map_err(|e| {
            Error::persistence(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl ScheduleStore for JsonFileStore {
    fn list_schedules_for_user(&self) -> Result<Vec<ScheduleEntry>> {
        self.inner.list_schedules_for_user()
    }

    fn list_schedules_for_course(&self, course_id: i32) -> Result<Vec<ScheduleEntry>> {
        self.inner.list_schedules_for_course(course_id)
    }

    fn create_schedule(&mut self, course_id: i32, slot: ScheduleSlot) -> Result<ScheduleEntry> {
        self.mutate(|s| s.create_schedule(course_id, slot))
    }

    fn update_schedule(&mut self, id: i32, slot: ScheduleSlot) -> Result<ScheduleEntry> {
        self.mutate(|s| s.update_schedule(id, slot))
    }

    fn delete_all_schedules_for_course(&mut self, course_id: i32) -> Result<bool> {
        self.mutate(|s| s.delete_all_schedules_for_course(course_id))
    }

    fn delete_schedule(&mut self, id: i32) -> Result<bool> {
        self.mutate(|s| s.delete_schedule(id))
    }
}

impl CourseStore for JsonFileStore {
    fn list_courses(&self) -> Result<Vec<Course>> {
        self.inner.list_courses()
    }

    fn get_course(&self, id: i32) -> Result<Course> {
        self.inner.get_course(id)
    }

    fn create_course(&mut self, title: &str, color: Option<CourseColor>) -> Result<Course> {
        self.mutate(|s| s.create_course(title, color))
    }

    fn set_course_color(&mut self, id: i32, color: Option<CourseColor>) -> Result<()> {
        self.mutate(|s| s.set_course_color(id, color))
    }

    fn delete_course(&mut self, id: i32) -> Result<bool> {
        self.mutate(|s| s.delete_course(id))
    }
}
