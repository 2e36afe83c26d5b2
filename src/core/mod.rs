pub mod config;
pub mod derived;
pub mod errors;
pub mod models;
pub mod session;
pub mod store;
pub mod tasks;
pub mod timeline;
pub mod utils;

pub use config::AppConfig;
pub use errors::PlannerError;
pub use models::{
    BackendStatus,
    CourseField,
    CourseRecord,
    Settings,
    Summary,
    SummaryRow,
};
pub use session::{
    EditorPhase,
    EditorSession,
    NumericColumn,
    SaveStatus,
};
pub use store::CourseStore;
pub use timeline::{
    Timeline,
    TimelineBlock,
    TimelineRow,
};
