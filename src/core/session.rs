use tracing::{
    error,
    info,
    warn,
};

use super::{
    utils::{
        parse_optional_int,
        parse_optional_number,
    },
    CourseField,
    CourseRecord,
    CourseStore,
    PlannerError,
};
use crate::sync::InitialState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPhase {
    Loading,
    Ready,
    /// Terminal; the load is not retried.
    LoadError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    Failed(String),
}

/// Which numeric column a piece of typed text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    Credits,
    Year,
}

/// Editing state for the courses page: the store plus where the page is in
/// its load/save lifecycle.
#[derive(Debug)]
pub struct EditorSession {
    store: CourseStore,
    phase: EditorPhase,
    save_status: SaveStatus,
    last_saved_count: Option<usize>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            store: CourseStore::new(),
            phase: EditorPhase::Loading,
            save_status: SaveStatus::Idle,
            last_saved_count: None,
        }
    }

    pub fn store(&self) -> &CourseStore {
        &self.store
    }

    pub fn phase(&self) -> &EditorPhase {
        &self.phase
    }

    pub fn save_status(&self) -> &SaveStatus {
        &self.save_status
    }

    pub fn last_saved_count(&self) -> Option<usize> {
        self.last_saved_count
    }

    pub fn is_ready(&self) -> bool {
        self.phase == EditorPhase::Ready
    }

    pub fn is_saving(&self) -> bool {
        self.save_status == SaveStatus::Saving
    }

    pub fn finish_load(&mut self, result: Result<InitialState, PlannerError>) {
        if self.phase != EditorPhase::Loading {
            warn!("Ignoring initial state that arrived after the page settled");
            return;
        }

        match result {
            Ok(state) => {
                self.store.set_all(state.records);
                self.store.set_categories(state.categories);
                self.phase = EditorPhase::Ready;
            }
            Err(e) => {
                error!("Initial load failed: {}", e);
                self.phase = EditorPhase::LoadError(e.to_string());
            }
        }
    }

    /// Moves to `Saving` and hands back the rows to send, or `None` if the page
    /// is not ready or a save is already in flight.
    pub fn begin_save(&mut self) -> Option<Vec<CourseRecord>> {
        if !self.is_ready() || self.is_saving() {
            return None;
        }

        self.save_status = SaveStatus::Saving;
        Some(self.store.to_records())
    }

    pub fn finish_save(&mut self, result: Result<Option<usize>, PlannerError>) {
        match result {
            Ok(count) => {
                self.save_status = SaveStatus::Idle;
                self.last_saved_count = count.or(Some(self.store.len()));
            }
            Err(e) => {
                let detail = match e {
                    PlannerError::SaveFailed(body) => body,
                    other => other.to_string(),
                };
                self.save_status = SaveStatus::Failed(detail);
            }
        }
    }

    pub fn dismiss_save_error(&mut self) {
        if matches!(self.save_status, SaveStatus::Failed(_)) {
            self.save_status = SaveStatus::Idle;
        }
    }

    pub fn edit(&mut self, index: usize, field: CourseField) -> Result<(), PlannerError> {
        self.store.set_field(index, field)
    }

    pub fn toggle_selected(&mut self, index: usize) -> Result<(), PlannerError> {
        let selected = self
            .store
            .get(index)
            .map(|record| record.selected)
            .ok_or(PlannerError::IndexOutOfRange { index, len: self.store.len() })?;
        self.store.set_field(index, CourseField::Selected(!selected))
    }

    /// Applies text typed into a numeric cell. Returns `Ok(false)` when the text
    /// is not a number and the edit was dropped. A lone sign clears the value
    /// until the digits follow.
    pub fn edit_numeric(
        &mut self,
        index: usize,
        column: NumericColumn,
        text: &str,
    ) -> Result<bool, PlannerError> {
        let field = match column {
            NumericColumn::Credits => match parse_optional_number(text) {
                Ok(value) if value.map_or(true, f64::is_finite) => CourseField::Credits(value),
                _ => return Ok(false),
            },
            NumericColumn::Year => match parse_optional_int(text) {
                Ok(value) => CourseField::Year(value),
                Err(_) => return Ok(false),
            },
        };
        self.store.set_field(index, field)?;
        Ok(true)
    }

    pub fn add_course(&mut self) -> usize {
        let index = self.store.append();
        info!("Added course row {}", index);
        index
    }

    pub fn delete_course(&mut self, index: usize) -> Result<CourseRecord, PlannerError> {
        let removed = self.store.remove_at(index)?;
        info!("Deleted course row {} ({:?})", index, removed.name);
        Ok(removed)
    }
}
