use crate::{
    core::{
        BackendStatus,
        PlannerError,
        Summary,
    },
    sync::InitialState,
};

pub type SaveResult = Result<Option<usize>, PlannerError>;

#[derive(Debug)]
pub enum TaskResult {
    InitialStateLoaded(Result<InitialState, PlannerError>),
    CoursesSaved(SaveResult),
    StatusLoaded(Result<BackendStatus, PlannerError>),
    SummaryLoaded(Result<Summary, PlannerError>),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::InitialStateLoaded(_) => "initial_state",
            TaskResult::CoursesSaved(_) => "courses_saved",
            TaskResult::StatusLoaded(_) => "status",
            TaskResult::SummaryLoaded(_) => "summary",
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            TaskResult::InitialStateLoaded(result) => result.is_ok(),
            TaskResult::CoursesSaved(result) => result.is_ok(),
            TaskResult::StatusLoaded(result) => result.is_ok(),
            TaskResult::SummaryLoaded(result) => result.is_ok(),
        }
    }
}
