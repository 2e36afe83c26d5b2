use course_planner::{
    gui::CoursePlannerApp,
    AppConfig,
};
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_planner=info")),
        )
        .init();

    let config = AppConfig::load();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Course Planner")
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([720.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Course Planner",
        native_options,
        Box::new(
            move |cc: &eframe::CreationContext<'_>| -> Result<
                Box<dyn eframe::App>,
                Box<dyn std::error::Error + Send + Sync>,
            > {
                let app = CoursePlannerApp::new(cc, &config)?;
                Ok(Box::new(app))
            },
        ),
    )?;

    Ok(())
}
