use crate::core::models::{Course, ScheduleDraft, ScheduleEntry};
use crate::core::store::Store;
use crate::core::types::CourseColor;
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};

/// Write-side operations on courses and their weekly schedules.
///
/// Saves are replace-all per course: every draft is validated before anything is deleted, so a
/// bad submission has no side effects. A store failure after the delete is reported as
/// [`Error::PartialSave`] and never retried.
pub struct ScheduleService<'s, S: Store + ?Sized> {
    store: &'s mut S,
    logger: Logger,
}

impl<'s, S: Store + ?Sized> ScheduleService<'s, S> {
    pub fn new(store: &'s mut S, logger: &Logger) -> Self {
        Self {
            store,
            logger: logger.scoped("service"),
        }
    }

    pub fn replace_course_schedules(
        &mut self,
        course_id: i32,
        drafts: &[ScheduleDraft],
    ) -> Result<Vec<ScheduleEntry>> {
        let slots = ScheduleDraft::validate_all(drafts)?;
        self.store.get_course(course_id)?;

        self.store.delete_all_schedules_for_course(course_id)?;

        let mut saved = Vec::with_capacity(slots.len());
        for slot in slots {
            match self.store.create_schedule(course_id, slot) {
                Ok(entry) => saved.push(entry),
                Err(err) => {
                    let err = Error::PartialSave {
                        course_id,
                        saved: saved.len(),
                        intended: drafts.len(),
                        reason: err.to_string(),
                    };
                    self.logger.error(err.to_string(), LogTarget::FileOnly);
                    return Err(err);
                }
            }
        }

        self.logger.info(
            format!("Saved {} schedule(s) for course {course_id}", saved.len()),
            LogTarget::FileOnly,
        );
        Ok(saved)
    }

    pub fn update_schedule(&mut self, id: i32, draft: &ScheduleDraft) -> Result<ScheduleEntry> {
        let slot = draft.validate()?;
        let entry = self.store.update_schedule(id, slot)?;
        self.logger
            .info(format!("Updated {entry}"), LogTarget::FileOnly);
        Ok(entry)
    }

    /// Unknown ids are a successful no-op.
    pub fn delete_schedule(&mut self, id: i32) -> Result<bool> {
        let removed = self.store.delete_schedule(id)?;
        if removed {
            self.logger
                .info(format!("Deleted schedule {id}"), LogTarget::FileOnly);
        }
        Ok(removed)
    }

    /// Removes the course and every schedule that references it. Schedules go first so a
    /// failure never leaves rows pointing at a missing course.
    pub fn delete_course(&mut self, id: i32) -> Result<bool> {
        let had_schedules = self.store.delete_all_schedules_for_course(id)?;
        let removed = self.store.delete_course(id)?;
        if removed || had_schedules {
            self.logger.info(
                format!("Deleted course {id} and its schedules"),
                LogTarget::FileOnly,
            );
        }
        Ok(removed)
    }

    pub fn create_course(&mut self, title: &str, color: Option<&str>) -> Result<Course> {
        let color = color.map(CourseColor::parse).transpose()?;
        let course = self.store.create_course(title, color)?;
        self.logger
            .info(format!("Created {course}"), LogTarget::FileOnly);
        Ok(course)
    }

    /// `None` clears the override so the palette default applies again.
    pub fn set_course_color(&mut self, id: i32, color: Option<&str>) -> Result<Option<CourseColor>> {
        let color = color.map(CourseColor::parse).transpose()?;
        self.store.set_course_color(id, color.clone())?;
        self.logger.info(
            format!(
                "Course {id} color set to {}",
                color.as_ref().map(CourseColor::as_str).unwrap_or("default")
            ),
            LogTarget::FileOnly,
        );
        Ok(color)
    }

    pub fn course_schedules(&self, course_id: i32) -> Result<Vec<ScheduleEntry>> {
        self.store.get_course(course_id)?;
        self.store.list_schedules_for_course(course_id)
    }
}
