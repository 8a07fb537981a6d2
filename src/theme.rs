use eframe::egui::{self, Color32, Stroke};

// ---------------------------------------------------------------------------
// Theme mode
// ---------------------------------------------------------------------------

/// Light or dark palette. Session-only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Named colours every view draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub bg: Color32,
    pub panel: Color32,
    pub text: Color32,
    pub muted: Color32,
    pub accent: Color32,
    pub accent_hover: Color32,
    pub card: Color32,
    pub border: Color32,
    pub input: Color32,
}

const DARK: ThemePalette = ThemePalette {
    bg: Color32::from_rgb(0x12, 0x12, 0x12),
    panel: Color32::from_rgb(0x1E, 0x1E, 0x1E),
    text: Color32::from_rgb(0xFF, 0xFF, 0xFF),
    muted: Color32::from_rgb(0xB3, 0xB3, 0xB3),
    accent: Color32::from_rgb(0xE5, 0x09, 0x14),
    accent_hover: Color32::from_rgb(0xFF, 0x1A, 0x24),
    card: Color32::from_rgb(0x18, 0x18, 0x18),
    border: Color32::from_rgb(0x2A, 0x2A, 0x2A),
    input: Color32::from_rgb(0x2A, 0x2A, 0x2A),
};

const LIGHT: ThemePalette = ThemePalette {
    bg: Color32::from_rgb(0xF5, 0xF5, 0xF5),
    panel: Color32::from_rgb(0xFF, 0xFF, 0xFF),
    text: Color32::from_rgb(0x11, 0x11, 0x11),
    muted: Color32::from_rgb(0x33, 0x33, 0x33),
    accent: Color32::from_rgb(0x1F, 0x51, 0xFF),
    accent_hover: Color32::from_rgb(0x3B, 0x66, 0xFF),
    card: Color32::from_rgb(0xFF, 0xFF, 0xFF),
    border: Color32::from_rgb(0xE0, 0xE0, 0xE0),
    input: Color32::from_rgb(0xFF, 0xFF, 0xFF),
};

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Label for the toggle button: names the mode a click switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "☀ Light mode",
            ThemeMode::Light => "🌙 Dark mode",
        }
    }

    pub fn palette(self) -> ThemePalette {
        match self {
            ThemeMode::Dark => DARK,
            ThemeMode::Light => LIGHT,
        }
    }

    /// egui visuals derived from the palette.
    pub fn visuals(self) -> egui::Visuals {
        let p = self.palette();
        let mut visuals = match self {
            ThemeMode::Dark => egui::Visuals::dark(),
            ThemeMode::Light => egui::Visuals::light(),
        };

        visuals.panel_fill = p.bg;
        visuals.window_fill = p.panel;
        visuals.extreme_bg_color = p.input;
        visuals.faint_bg_color = p.card;
        visuals.override_text_color = Some(p.text);
        visuals.hyperlink_color = p.accent;

        visuals.selection.bg_fill = p.accent;
        visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, p.border);
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, p.border);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, p.accent_hover);
        visuals.widgets.active.weak_bg_fill = p.accent;
        visuals.widgets.active.bg_fill = p.accent;

        visuals
    }

    /// Install this mode's visuals on the context.
    pub fn apply(self, ctx: &egui::Context) {
        ctx.set_visuals(self.visuals());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_dark() {
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn toggle_round_trips() {
        let mode = ThemeMode::Dark;
        assert_eq!(mode.toggled(), ThemeMode::Light);
        assert_eq!(mode.toggled().toggled(), mode);
    }

    #[test]
    fn visuals_follow_the_palette() {
        for mode in [ThemeMode::Dark, ThemeMode::Light] {
            let visuals = mode.visuals();
            assert_eq!(visuals.dark_mode, mode == ThemeMode::Dark);
            assert_eq!(visuals.panel_fill, mode.palette().bg);
            assert_eq!(visuals.override_text_color, Some(mode.palette().text));
        }
        assert_ne!(ThemeMode::Dark.palette().accent, ThemeMode::Light.palette().accent);
    }
}
