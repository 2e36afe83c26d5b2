use eframe::egui::{
    self,
    RichText,
    TextEdit,
};
use egui_extras::{
    Column,
    TableBuilder,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Theme,
};
use crate::core::{
    utils::{
        format_optional_int,
        format_optional_number,
    },
    CourseField,
    CourseRecord,
    EditorPhase,
    EditorSession,
    NumericColumn,
    SaveStatus,
};

const ROW_HEIGHT: f32 = 28.0;
const HEADERS: [&str; 9] =
    ["Selected", "Course Name", "Category", "ECs", "Quarter", "Year", "Notes", "Prerequisite", "Actions"];

pub fn course_page(ui: &mut egui::Ui, session: &EditorSession, theme: &Theme, actions: &mut ActionQueue) {
    match session.phase() {
        EditorPhase::Loading => {}
        EditorPhase::LoadError(detail) => ui_load_error(ui, detail, theme),
        EditorPhase::Ready => {
            ui.heading(theme.heading(ui.ctx(), "Courses (Editor)"));
            ui.add_space(6.0);

            if let SaveStatus::Failed(detail) = session.save_status() {
                ui_save_error_banner(ui, detail, theme, actions);
                ui.add_space(6.0);
            }

            if session.store().is_empty() {
                ui.label(
                    RichText::new("No courses yet. Use \"+ Add Course\" to start planning.")
                        .color(theme.muted(ui.ctx())),
                );
                return;
            }

            egui::ScrollArea::horizontal().show(ui, |ui| {
                course_table(ui, session, actions);
            });
        }
    }
}

fn ui_load_error(ui: &mut egui::Ui, detail: &str, theme: &Theme) {
    ui.vertical_centered(|ui| {
        ui.add_space(100.0);
        ui.label(RichText::new("Failed to load data").size(24.0).color(theme.red(ui.ctx())));
        ui.add_space(10.0);
        ui.collapsing("Technical Details", |ui| {
            let mut text = detail;
            ui.add(
                TextEdit::multiline(&mut text)
                    .desired_width(f32::INFINITY)
                    .desired_rows(3)
                    .code_editor(),
            );
        });
    });
}

fn ui_save_error_banner(ui: &mut egui::Ui, detail: &str, theme: &Theme, actions: &mut ActionQueue) {
    let red = theme.red(ui.ctx());
    egui::Frame::new()
        .fill(red.linear_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, red))
        .corner_radius(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("⚠ Save failed").color(red).strong());
                if !detail.is_empty() {
                    ui.label(RichText::new(detail).color(red));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Dismiss").clicked() {
                        actions.push(UiAction::DismissSaveError);
                    }
                });
            });
        });
}

fn course_table(ui: &mut egui::Ui, session: &EditorSession, actions: &mut ActionQueue) {
    let store = session.store();
    let courses = store.snapshot();
    let categories = store.categories();
    let course_names = store.unique_course_names();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(60.0))
        .column(Column::initial(220.0).at_least(120.0))
        .column(Column::initial(170.0).at_least(100.0))
        .column(Column::exact(60.0))
        .column(Column::initial(90.0))
        .column(Column::exact(50.0))
        .column(Column::initial(220.0).at_least(100.0))
        .column(Column::initial(150.0).at_least(80.0))
        .column(Column::auto())
        .header(25.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, courses.len(), |mut row| {
                let index = row.index();
                let course = courses[index].as_ref();

                row.col(|ui| ui_col_selected(ui, index, course, actions));
                row.col(|ui| ui_col_name(ui, index, course, &course_names, actions));
                row.col(|ui| ui_col_category(ui, index, course, categories, actions));
                row.col(|ui| {
                    let credits = format_optional_number(course.credits);
                    ui_col_numeric(ui, index, NumericColumn::Credits, credits, "", actions)
                });
                row.col(|ui| {
                    ui_col_text(
                        ui,
                        ("quarter", index),
                        &course.quarter,
                        "e.g. 1, 3",
                        actions,
                        CourseField::Quarter,
                    )
                });
                row.col(|ui| {
                    let year = format_optional_int(course.year);
                    ui_col_numeric(ui, index, NumericColumn::Year, year, "1/2", actions)
                });
                row.col(|ui| {
                    ui_col_text(ui, ("notes", index), &course.notes, "", actions, CourseField::Notes)
                });
                row.col(|ui| {
                    ui_col_text(
                        ui,
                        ("prerequisite", index),
                        &course.prerequisite,
                        "",
                        actions,
                        CourseField::Prerequisite,
                    )
                });
                row.col(|ui| {
                    if ui.button("Delete").clicked() {
                        actions.push(UiAction::DeleteCourse(index));
                    }
                });
            });
        });
}

fn ui_col_selected(ui: &mut egui::Ui, index: usize, course: &CourseRecord, actions: &mut ActionQueue) {
    let mut selected = course.selected;
    if ui.checkbox(&mut selected, "").changed() {
        actions.push(UiAction::SetField { index, field: CourseField::Selected(selected) });
    }
}

fn ui_col_name(
    ui: &mut egui::Ui,
    index: usize,
    course: &CourseRecord,
    course_names: &[String],
    actions: &mut ActionQueue,
) {
    let mut name = course.name.clone();
    let response = ui.add(
        TextEdit::singleline(&mut name).id_salt(("name", index)).desired_width(f32::INFINITY),
    );

    if response.changed() {
        actions.push(UiAction::SetField { index, field: CourseField::Name(name) });
    }

    // Right click offers names already in the plan, for duplicating a course
    // into another quarter or year.
    response.context_menu(|ui| {
        if course_names.is_empty() {
            ui.label("No named courses yet");
            return;
        }
        ui.label(RichText::new("Use existing name").small().weak());
        egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
            for existing in course_names {
                if ui.button(existing).clicked() {
                    actions.push(UiAction::SetField {
                        index,
                        field: CourseField::Name(existing.clone()),
                    });
                    ui.close();
                }
            }
        });
    });
}

fn ui_col_category(
    ui: &mut egui::Ui,
    index: usize,
    course: &CourseRecord,
    categories: &[String],
    actions: &mut ActionQueue,
) {
    let mut category = course.category.clone();
    egui::ComboBox::from_id_salt(("category", index))
        .selected_text(category.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut category, String::new(), "");
            for option in categories {
                ui.selectable_value(&mut category, option.clone(), option.as_str());
            }
        });

    if category != course.category {
        actions.push(UiAction::SetField { index, field: CourseField::Category(category) });
    }
}

// While the cell has focus it shows what was typed, so partial entries such as
// "-" or "7." stay visible until they parse.
fn ui_col_numeric(
    ui: &mut egui::Ui,
    index: usize,
    column: NumericColumn,
    stored: String,
    hint: &str,
    actions: &mut ActionQueue,
) {
    let id = ui.make_persistent_id((column_key(column), index));
    let draft_id = id.with("draft");
    let mut text = ui.data(|data| data.get_temp::<String>(draft_id)).unwrap_or(stored);

    let response = ui.add(TextEdit::singleline(&mut text).id(id).hint_text(hint).desired_width(f32::INFINITY));

    if response.changed() {
        ui.data_mut(|data| data.insert_temp(draft_id, text.clone()));
        actions.push(UiAction::SetNumeric { index, column, text });
    } else if !response.has_focus() {
        ui.data_mut(|data| data.remove::<String>(draft_id));
    }
}

fn ui_col_text(
    ui: &mut egui::Ui,
    id: (&str, usize),
    value: &str,
    hint: &str,
    actions: &mut ActionQueue,
    field: impl FnOnce(String) -> CourseField,
) {
    let mut text = value.to_string();
    let response = ui.add(
        TextEdit::singleline(&mut text).id_salt(id).hint_text(hint).desired_width(f32::INFINITY),
    );

    if response.changed() {
        actions.push(UiAction::SetField { index: id.1, field: field(text) });
    }
}

fn column_key(column: NumericColumn) -> &'static str {
    match column {
        NumericColumn::Credits => "credits",
        NumericColumn::Year => "year",
    }
}
