use std::sync::Arc;

use super::{
    derived,
    timeline::Timeline,
    CourseField,
    CourseRecord,
    PlannerError,
};

pub type CourseList = Arc<Vec<Arc<CourseRecord>>>;

/// Ordered course rows for one editing session.
///
/// Every mutation swaps in a fresh outer list so two snapshots can be compared
/// with `Arc::ptr_eq`. Records that a mutation does not touch keep their
/// `Arc`, so per-row change detection works the same way.
#[derive(Debug, Clone, Default)]
pub struct CourseStore {
    courses: CourseList,
    categories: Vec<String>,
}

impl CourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CourseList {
        Arc::clone(&self.courses)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CourseRecord> {
        self.courses.get(index).map(Arc::as_ref)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    pub fn set_all(&mut self, records: Vec<CourseRecord>) {
        self.courses = Arc::new(records.into_iter().map(Arc::new).collect());
    }

    pub fn set_field(&mut self, index: usize, field: CourseField) -> Result<(), PlannerError> {
        let current = self.courses.get(index).ok_or(PlannerError::IndexOutOfRange {
            index,
            len: self.courses.len(),
        })?;

        let updated = Arc::new(current.with_field(field));
        let mut next = self.courses.as_ref().clone();
        next[index] = updated;
        self.courses = Arc::new(next);
        Ok(())
    }

    /// Appends a blank row and returns its index.
    pub fn append(&mut self) -> usize {
        let mut next = self.courses.as_ref().clone();
        next.push(Arc::new(CourseRecord::default()));
        self.courses = Arc::new(next);
        self.courses.len() - 1
    }

    pub fn remove_at(&mut self, index: usize) -> Result<CourseRecord, PlannerError> {
        if index >= self.courses.len() {
            return Err(PlannerError::IndexOutOfRange { index, len: self.courses.len() });
        }

        let mut next = self.courses.as_ref().clone();
        let removed = next.remove(index);
        self.courses = Arc::new(next);
        Ok(Arc::unwrap_or_clone(removed))
    }

    /// Owned copy of every row, in order, for the bulk save.
    pub fn to_records(&self) -> Vec<CourseRecord> {
        self.courses.iter().map(|record| record.as_ref().clone()).collect()
    }

    pub fn unique_course_names(&self) -> Vec<String> {
        derived::unique_course_names(&self.courses)
    }

    pub fn selected_courses(&self) -> Vec<&CourseRecord> {
        derived::selected_courses(&self.courses)
    }

    pub fn total_selected_credits(&self) -> f64 {
        derived::total_selected_credits(&self.courses)
    }

    pub fn timeline(&self) -> Timeline {
        Timeline::from_records(&self.courses)
    }
}
