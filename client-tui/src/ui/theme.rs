use crate::scene::Overlay;
use ratatui::style::Color;

/// All colors used by the TUI, grouped by purpose.
/// Swap between presets (Dark / Light) to adapt to the terminal background.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Board ──────────────────────────────────────────────────────
    pub light_square: Color,
    pub dark_square: Color,
    pub white_piece: Color,
    pub black_piece: Color,
    pub board_border: Color,
    pub board_label: Color,
    pub cursor: Color,

    // ── Overlays (light-square variant, dark-square variant) ──────
    pub overlay_selected: (Color, Color),
    pub overlay_candidate: (Color, Color),
    pub overlay_last_move: (Color, Color),

    // ── Panel chrome ──────────────────────────────────────────────
    pub panel_border: Color,

    // ── Semantic status ───────────────────────────────────────────
    pub positive: Color,
    pub warning: Color,
    pub negative: Color,
    pub info: Color,
    pub muted: Color,

    // ── Text ──────────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_secondary: Color,

    // ── Dialogs ───────────────────────────────────────────────────
    pub dialog_bg: Color,
    pub dialog_border: Color,

    dark: bool,
}

impl Theme {
    /// Designed for terminals with a dark background.
    pub fn dark() -> Self {
        Self {
            light_square: Color::Rgb(240, 217, 181),
            dark_square: Color::Rgb(181, 136, 99),
            // Explicit RGB: many terminals remap ANSI white/black.
            white_piece: Color::Rgb(255, 255, 255),
            black_piece: Color::Rgb(0, 0, 0),
            board_border: Color::Cyan,
            board_label: Color::Yellow,
            cursor: Color::Magenta,

            overlay_selected: (Color::LightYellow, Color::Yellow),
            overlay_candidate: (Color::LightBlue, Color::Blue),
            overlay_last_move: (Color::LightGreen, Color::Green),

            panel_border: Color::Cyan,

            positive: Color::Green,
            warning: Color::Yellow,
            negative: Color::Red,
            info: Color::Cyan,
            muted: Color::DarkGray,

            text_primary: Color::White,
            text_secondary: Color::Gray,

            dialog_bg: Color::Black,
            dialog_border: Color::Yellow,

            dark: true,
        }
    }

    /// Designed for terminals with a light background. Darker squares keep
    /// white pieces readable.
    pub fn light() -> Self {
        Self {
            light_square: Color::Rgb(222, 196, 156),
            dark_square: Color::Rgb(150, 105, 70),
            white_piece: Color::Rgb(255, 255, 255),
            black_piece: Color::Rgb(0, 0, 0),
            board_border: Color::Blue,
            board_label: Color::Rgb(120, 80, 0),
            cursor: Color::Rgb(160, 0, 160),

            overlay_selected: (Color::Rgb(246, 232, 120), Color::Rgb(205, 185, 50)),
            overlay_candidate: (Color::Rgb(150, 190, 240), Color::Rgb(80, 120, 200)),
            overlay_last_move: (Color::Rgb(170, 220, 150), Color::Rgb(100, 160, 80)),

            panel_border: Color::Blue,

            positive: Color::Rgb(0, 130, 0),
            warning: Color::Rgb(160, 110, 0),
            negative: Color::Rgb(190, 0, 0),
            info: Color::Blue,
            muted: Color::Gray,

            text_primary: Color::Black,
            text_secondary: Color::DarkGray,

            dialog_bg: Color::White,
            dialog_border: Color::Blue,

            dark: false,
        }
    }

    /// Pick a preset from `CHESSLINK_THEME` (`"light"` or anything else).
    pub fn detect() -> Self {
        Self::from_preference(std::env::var("CHESSLINK_THEME").ok().as_deref())
    }

    pub fn from_preference(preference: Option<&str>) -> Self {
        match preference {
            Some(value) if value.eq_ignore_ascii_case("light") => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn name(&self) -> &'static str {
        if self.dark {
            "Dark"
        } else {
            "Light"
        }
    }

    pub fn square(&self, is_light_square: bool) -> Color {
        if is_light_square {
            self.light_square
        } else {
            self.dark_square
        }
    }

    /// Background for a square carrying `overlay`.
    pub fn resolve_overlay(&self, overlay: Overlay, is_light_square: bool) -> Color {
        let (light, dark) = match overlay {
            Overlay::Selected => self.overlay_selected,
            Overlay::Candidate => self.overlay_candidate,
            Overlay::LastMove => self.overlay_last_move,
        };
        if is_light_square {
            light
        } else {
            dark
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
