use eframe::egui;

use super::{
    actions::{
        ActionQueue,
        Page,
        UiAction,
    },
    theme::Theme,
};
use crate::core::{
    utils::format_credits,
    EditorSession,
    SaveStatus,
};

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        page: Page,
        session: &EditorSession,
        theme: &Theme,
        actions: &mut ActionQueue,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.separator();

                let mut selected_page = page;
                ui.selectable_value(&mut selected_page, Page::Courses, "Courses");
                ui.selectable_value(&mut selected_page, Page::Status, "Status");
                if selected_page != page {
                    actions.push(UiAction::SwitchPage(selected_page));
                }

                if page == Page::Courses && session.is_ready() {
                    ui.separator();
                    Self::show_editor_controls(ui, session, theme, actions);
                }
            });
            ui.add_space(4.0);
        });
    }

    fn show_editor_controls(
        ui: &mut egui::Ui,
        session: &EditorSession,
        theme: &Theme,
        actions: &mut ActionQueue,
    ) {
        let saving = session.is_saving();
        let save_label = if saving { "Saving…" } else { "Save Changes" };

        if ui.add_enabled(!saving, egui::Button::new(save_label)).clicked() {
            actions.push(UiAction::Save);
        }

        if ui.button("+ Add Course").clicked() {
            actions.push(UiAction::AddCourse);
        }

        ui.separator();

        let store = session.store();
        ui.label("Selected courses:");
        ui.strong(store.selected_courses().len().to_string());
        ui.add_space(8.0);
        ui.label("Total ECs selected:");
        ui.strong(format_credits(store.total_selected_credits()));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if saving {
                ui.spinner();
            } else if let (SaveStatus::Idle, Some(count)) =
                (session.save_status(), session.last_saved_count())
            {
                ui.small(
                    egui::RichText::new(format!("● Saved {count} courses"))
                        .color(theme.green(ui.ctx())),
                );
            }
        });
    }
}
