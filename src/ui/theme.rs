use egui::{Color32, FontFamily, FontId, TextStyle, Visuals};

use crate::services::RowHighlight;

/// Fonts, spacing and light or dark visuals for the whole app
pub fn configure_style(ctx: &egui::Context, dark_mode: bool) {
    let mut style = (*ctx.style()).clone();

    // Typography
    style.text_styles = [
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
    ]
    .into();

    // Spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12.0);

    style.visuals = if dark_mode { dark_visuals() } else { light_visuals() };

    ctx.set_style(style);
}

fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    // Background
    visuals.panel_fill = Color32::from_rgb(30, 30, 35);
    visuals.window_fill = Color32::from_rgb(40, 40, 45);
    visuals.extreme_bg_color = Color32::from_rgb(20, 20, 25);

    // Widgets
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(45, 45, 50);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(50, 50, 55);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(60, 60, 70);
    visuals.widgets.active.bg_fill = Color32::from_rgb(70, 70, 85);

    // Accent
    visuals.selection.bg_fill = Color32::from_rgb(60, 100, 180);

    visuals
}

fn light_visuals() -> Visuals {
    let mut visuals = Visuals::light();

    visuals.panel_fill = Color32::from_rgb(248, 248, 250);
    visuals.window_fill = Color32::from_rgb(255, 255, 255);
    visuals.extreme_bg_color = Color32::from_rgb(240, 240, 242);

    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(235, 235, 240);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(230, 230, 235);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(220, 220, 230);
    visuals.widgets.active.bg_fill = Color32::from_rgb(200, 200, 220);

    visuals.selection.bg_fill = Color32::from_rgb(180, 210, 255);

    visuals
}

/// Colour palette
pub struct Colors;

impl Colors {
    // Status
    pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
    pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
    pub const INFO: Color32 = Color32::from_rgb(59, 130, 246);

    pub const TEXT_MUTED: Color32 = Color32::from_rgb(156, 163, 175);

    // Row highlights; text on them is always dark
    pub const PAST_DUE: Color32 = Color32::from_rgb(255, 255, 0);
    pub const DUE_TODAY: Color32 = Color32::from_rgb(0, 255, 0);
    pub const UNSCHEDULED: Color32 = Color32::from_rgb(200, 200, 200);
    pub const HIGHLIGHT_TEXT: Color32 = Color32::from_rgb(17, 24, 39);

    pub fn row_fill(highlight: RowHighlight) -> Option<Color32> {
        match highlight {
            RowHighlight::PastDue => Some(Self::PAST_DUE),
            RowHighlight::DueToday => Some(Self::DUE_TODAY),
            RowHighlight::Unscheduled => Some(Self::UNSCHEDULED),
            RowHighlight::Upcoming => None,
        }
    }
}

/// Icons (Unicode)
pub struct Icons;

impl Icons {
    pub const ADD: &'static str = "➕";
    pub const EDIT: &'static str = "✏";
    pub const DELETE: &'static str = "🗑";
    pub const SAVE: &'static str = "💾";
    pub const SEARCH: &'static str = "🔍";
    pub const CALENDAR: &'static str = "📅";
    pub const BELL: &'static str = "🔔";
    pub const WARNING: &'static str = "⚠";
    pub const QUIT: &'static str = "⏻";
}
