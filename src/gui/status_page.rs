use eframe::egui::{
    self,
    RichText,
};
use tracing::warn;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Theme,
};
use crate::core::{
    timeline::QUARTERS,
    utils::format_credits,
    BackendStatus,
    PlannerError,
    Summary,
    Timeline,
    TimelineBlock,
};

const QUARTER_CELL: egui::Vec2 = egui::vec2(48.0, 18.0);

/// A value fetched from the backend for display only.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Remote<T> {
    #[default]
    Pending,
    Ready(T),
    Failed,
}

impl<T> Remote<T> {
    fn from_result(result: Result<T, PlannerError>, what: &str) -> Self {
        match result {
            Ok(value) => Remote::Ready(value),
            Err(e) => {
                warn!("Could not load {}: {}", what, e);
                Remote::Failed
            }
        }
    }
}

/// Backend greeting and credit summary. Refetched every time the page is opened.
/// The timeline below them is drawn from the editor's current rows.
#[derive(Debug, Default)]
pub struct StatusPage {
    message: Remote<String>,
    summary: Remote<Summary>,
}

impl StatusPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.message = Remote::Pending;
        self.summary = Remote::Pending;
    }

    pub fn handle_status(&mut self, result: Result<BackendStatus, PlannerError>) {
        self.message = Remote::from_result(result.map(|status| status.message), "backend status");
    }

    pub fn handle_summary(&mut self, result: Result<Summary, PlannerError>) {
        self.summary = Remote::from_result(result, "summary");
    }

    pub fn message_text(&self) -> &str {
        match &self.message {
            Remote::Pending => "loading...",
            Remote::Ready(message) => message,
            Remote::Failed => "error",
        }
    }

    pub fn total_text(&self) -> String {
        match &self.summary {
            Remote::Ready(summary) => format_credits(summary.total_selected_ecs),
            Remote::Pending | Remote::Failed => "…".to_string(),
        }
    }

    pub fn show(&self, ui: &mut egui::Ui, timeline: &Timeline, theme: &Theme, actions: &mut ActionQueue) {
        ui.heading(theme.heading(ui.ctx(), "Course Planner"));
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Backend says:");
            ui.strong(self.message_text());
        });
        ui.horizontal(|ui| {
            ui.label("Total selected ECs:");
            ui.strong(self.total_text());
        });

        ui.add_space(6.0);
        let loading = self.message == Remote::Pending || self.summary == Remote::Pending;
        if ui.add_enabled(!loading, egui::Button::new("Refresh")).clicked() {
            actions.push(UiAction::RefreshStatus);
        }

        egui::ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            if let Remote::Ready(summary) = &self.summary {
                if !summary.rows.is_empty() {
                    ui.add_space(16.0);
                    ui_summary_rows(ui, summary, theme);
                }
            }

            ui.add_space(16.0);
            ui_timeline(ui, timeline, theme);
        });
    }
}

fn ui_timeline(ui: &mut egui::Ui, timeline: &Timeline, theme: &Theme) {
    ui.label(theme.heading(ui.ctx(), "Course Timeline by Quarter"));
    ui.add_space(4.0);

    if timeline.is_empty() {
        ui.label(RichText::new("No selected courses.").color(theme.muted(ui.ctx())));
        return;
    }

    for (title, block) in timeline.blocks() {
        if block.is_empty() {
            continue;
        }
        ui.add_space(8.0);
        ui.strong(title);
        ui_timeline_block(ui, title, block, theme);
    }
}

fn ui_timeline_block(ui: &mut egui::Ui, title: &str, block: &TimelineBlock, theme: &Theme) {
    egui::Grid::new(("timeline_grid", title)).striped(true).min_col_width(QUARTER_CELL.x).show(ui, |ui| {
        ui.strong("Course Name");
        for quarter in 1..=QUARTERS {
            ui.strong(format!("Q{quarter}"));
        }
        ui.end_row();

        for row in &block.rows {
            ui.label(&row.name);
            for runs in row.quarters {
                let (rect, _) = ui.allocate_exact_size(QUARTER_CELL, egui::Sense::hover());
                if runs {
                    ui.painter().rect_filled(rect, 2.0, theme.quarter_fill(ui.ctx(), row.is_elective()));
                }
            }
            ui.end_row();
        }
    });

    ui.horizontal(|ui| {
        ui.label("Semester 1 ECs:");
        ui.strong(format_credits(block.semester1_credits()));
        ui.add_space(12.0);
        ui.label("Semester 2 ECs:");
        ui.strong(format_credits(block.semester2_credits()));
    });
}

fn ui_summary_rows(ui: &mut egui::Ui, summary: &Summary, theme: &Theme) {
    ui.label(theme.heading(ui.ctx(), "EC Summary by Category"));
    ui.add_space(4.0);

    egui::Grid::new("summary_grid").striped(true).min_col_width(90.0).show(ui, |ui| {
        ui.strong("Category");
        ui.strong("Required ECs");
        ui.strong("Selected ECs");
        ui.strong("Remaining ECs");
        ui.end_row();

        for row in &summary.rows {
            let label = if row.category == summary.overflow_target {
                format!("{} (overflow)", row.category)
            } else {
                row.category.clone()
            };
            ui.label(label);
            ui.label(format_credits(row.required_ecs));
            ui.label(format_credits(row.selected_ecs));
            ui.label(
                RichText::new(format_credits(row.remaining_ecs))
                    .color(theme.remaining(ui.ctx(), row.remaining_ecs))
                    .strong(),
            );
            ui.end_row();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_before_and_after_fetch() {
        let mut page = StatusPage::new();
        assert_eq!(page.message_text(), "loading...");
        assert_eq!(page.total_text(), "…");

        page.handle_status(Ok(BackendStatus { message: "Hello, backend is working!".to_string() }));
        page.handle_summary(Ok(Summary { total_selected_ecs: 42.0, ..Default::default() }));

        assert_eq!(page.message_text(), "Hello, backend is working!");
        assert_eq!(page.total_text(), "42");
    }

    #[test]
    fn test_failed_reads() {
        let mut page = StatusPage::new();
        page.handle_status(Err(PlannerError::LoadFailed("refused".to_string())));
        page.handle_summary(Err(PlannerError::LoadFailed("refused".to_string())));

        assert_eq!(page.message_text(), "error");
        assert_eq!(page.total_text(), "…");

        page.reset();
        assert_eq!(page.message_text(), "loading...");
    }
}
