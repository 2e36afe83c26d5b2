pub mod core;
pub mod gui;
pub mod persistence;
pub mod sync;

pub use crate::core::{
    AppConfig,
    CourseField,
    CourseRecord,
    CourseStore,
    PlannerError,
};
pub use crate::sync::{
    InitialState,
    SyncGateway,
};
