use eframe::egui::{
    self,
    style::Selection,
    Color32,
    RichText,
    Stroke,
    Visuals,
};

#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::campus()
    }
}

impl Theme {
    pub fn campus() -> Self {
        Theme { dark: Palette::campus_night(), light: Palette::campus_day() }
    }

    fn palette(&self, ctx: &egui::Context) -> &Palette {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).accent).strong()
    }

    pub fn red(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).red
    }

    pub fn green(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).green
    }

    pub fn blue(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).blue
    }

    pub fn accent(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).accent
    }

    pub fn muted(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).muted
    }

    /// Colour for a "remaining credits" figure: over target, met, or short.
    pub fn remaining(&self, ctx: &egui::Context, remaining: f64) -> Color32 {
        if remaining < 0.0 {
            self.blue(ctx)
        } else if remaining == 0.0 {
            self.green(ctx)
        } else {
            self.red(ctx)
        }
    }

    /// Fill for a timeline quarter a course runs in. Electives get the lighter shade.
    pub fn quarter_fill(&self, ctx: &egui::Context, elective: bool) -> Color32 {
        let red = self.red(ctx);
        if elective {
            red.linear_multiply(0.45)
        } else {
            red
        }
    }
}

#[derive(Clone)]
struct Palette {
    background: Color32,
    panel: Color32,
    raised: Color32,
    foreground: Color32,
    selection: Color32,
    muted: Color32,
    accent: Color32,
    red: Color32,
    orange: Color32,
    green: Color32,
    blue: Color32,
}

impl Palette {
    fn campus_night() -> Self {
        Self {
            background: Color32::from_rgb(30, 33, 41),
            panel: Color32::from_rgb(36, 40, 50),
            raised: Color32::from_rgb(48, 53, 66),
            foreground: Color32::from_rgb(222, 226, 233),
            selection: Color32::from_rgb(62, 76, 102),
            muted: Color32::from_rgb(128, 138, 158),
            accent: Color32::from_rgb(129, 161, 193),
            red: Color32::from_rgb(219, 104, 104),
            orange: Color32::from_rgb(222, 160, 98),
            green: Color32::from_rgb(132, 190, 120),
            blue: Color32::from_rgb(110, 168, 230),
        }
    }

    fn campus_day() -> Self {
        Self {
            background: Color32::from_rgb(246, 247, 249),
            panel: Color32::from_rgb(238, 240, 244),
            raised: Color32::from_rgb(255, 255, 255),
            foreground: Color32::from_rgb(40, 44, 52),
            selection: Color32::from_rgb(198, 214, 238),
            muted: Color32::from_rgb(120, 128, 142),
            accent: Color32::from_rgb(56, 96, 150),
            red: Color32::from_rgb(186, 62, 62),
            orange: Color32::from_rgb(190, 120, 40),
            green: Color32::from_rgb(48, 140, 72),
            blue: Color32::from_rgb(40, 110, 190),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

fn set_theme_variant(ctx: &egui::Context, palette: &Palette, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    let mut visuals = Visuals {
        dark_mode: is_dark,
        selection: Selection {
            bg_fill: palette.selection,
            stroke: Stroke { color: palette.foreground, ..default.selection.stroke },
        },
        hyperlink_color: palette.accent,
        faint_bg_color: palette.panel,
        extreme_bg_color: palette.raised,
        error_fg_color: palette.red,
        warn_fg_color: palette.orange,
        window_fill: palette.background,
        panel_fill: palette.background,
        ..default
    };

    visuals.widgets.noninteractive.fg_stroke.color = palette.foreground;
    visuals.widgets.inactive.fg_stroke.color = palette.foreground;
    visuals.widgets.hovered.bg_stroke.color = palette.accent;
    visuals.widgets.active.bg_stroke.color = palette.accent;

    ctx.set_visuals_of(variant, visuals);
}
