mod actions;
pub mod app;
mod course_table;
mod message_overlay;
mod status_page;
mod theme;
mod top_bar;

pub use actions::{
    ActionQueue,
    Page,
    UiAction,
};
pub use app::CoursePlannerApp;
