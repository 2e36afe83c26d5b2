use crate::core::{
    CourseField,
    NumericColumn,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Courses,
    Status,
}

// Widgets queue what they want done; the app applies it once the frame's UI
// has been laid out, so drawing code only needs shared borrows.
#[derive(Debug, Clone)]
pub enum UiAction {
    // Course rows
    SetField { index: usize, field: CourseField },
    SetNumeric { index: usize, column: NumericColumn, text: String },
    AddCourse,
    DeleteCourse(usize),

    // Sync
    Save,
    DismissSaveError,
    RefreshStatus,

    // Navigation
    SwitchPage(Page),
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
