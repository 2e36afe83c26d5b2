use eframe::egui;
use tracing::{
    info,
    warn,
};

use super::{
    actions::{
        ActionQueue,
        Page,
        UiAction,
    },
    course_table::course_page,
    message_overlay::MessageOverlay,
    status_page::StatusPage,
    theme::{
        set_theme,
        Theme,
    },
    top_bar::TopBar,
};
use crate::core::{
    tasks::{
        TaskManager,
        TaskResult,
    },
    AppConfig,
    EditorPhase,
    EditorSession,
    PlannerError,
};

pub struct CoursePlannerApp {
    // Editing state
    pub session: EditorSession,
    pub status_page: StatusPage,
    pub page: Page,

    // UI State
    pub theme: Theme,
    pub message_overlay: MessageOverlay,

    task_manager: TaskManager,
}

impl CoursePlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Result<Self, PlannerError> {
        let mut task_manager = TaskManager::new(config)?;
        task_manager.set_repaint_context(cc.egui_ctx.clone());
        task_manager.load_initial_state();

        let app = Self {
            session: EditorSession::new(),
            status_page: StatusPage::new(),
            page: Page::Courses,

            theme: Theme::campus(),
            message_overlay: MessageOverlay::new(),

            task_manager,
        };

        set_theme(&cc.egui_ctx, &app.theme);
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.1);

        Ok(app)
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::InitialStateLoaded(result) => {
                self.message_overlay.clear_message();
                self.session.finish_load(result);
            }
            TaskResult::CoursesSaved(result) => {
                if let Err(e) = &result {
                    warn!("Saving courses failed: {}", e);
                }
                self.session.finish_save(result);
            }
            TaskResult::StatusLoaded(result) => self.status_page.handle_status(result),
            TaskResult::SummaryLoaded(result) => self.status_page.handle_summary(result),
        }
    }

    fn execute_actions(&mut self, actions: &mut ActionQueue) {
        for action in actions.drain() {
            let outcome = match action {
                UiAction::SetField { index, field } => self.session.edit(index, field),
                UiAction::SetNumeric { index, column, text } => {
                    self.session.edit_numeric(index, column, &text).map(|_| ())
                }
                UiAction::AddCourse => {
                    self.session.add_course();
                    Ok(())
                }
                UiAction::DeleteCourse(index) => self.session.delete_course(index).map(|_| ()),
                UiAction::Save => {
                    match self.session.begin_save() {
                        Some(records) => {
                            info!("Saving {} courses", records.len());
                            self.task_manager.save_courses(records);
                        }
                        None => warn!("Save requested while the editor was busy"),
                    }
                    Ok(())
                }
                UiAction::DismissSaveError => {
                    self.session.dismiss_save_error();
                    Ok(())
                }
                UiAction::RefreshStatus => {
                    self.open_status_page();
                    Ok(())
                }
                UiAction::SwitchPage(page) => {
                    self.page = page;
                    if page == Page::Status {
                        self.open_status_page();
                    }
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                warn!("UI action failed: {}", e);
            }
        }
    }

    fn open_status_page(&mut self) {
        self.status_page.reset();
        self.task_manager.load_status();
    }
}

impl eframe::App for CoursePlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        let mut actions = ActionQueue::new();

        TopBar::show(ctx, self.page, &self.session, &self.theme, &mut actions);

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Courses => course_page(ui, &self.session, &self.theme, &mut actions),
            Page::Status => {
                let timeline = self.session.store().timeline();
                self.status_page.show(ui, &timeline, &self.theme, &mut actions)
            }
        });

        if self.page == Page::Courses && self.session.phase() == &EditorPhase::Loading {
            self.message_overlay.show(ctx, &self.theme);
        }

        let had_actions = !actions.is_empty();
        self.execute_actions(&mut actions);

        if had_actions {
            ctx.request_repaint();
        }
    }
}
