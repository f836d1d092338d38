//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes (dark and light) plus custom color overrides from
//! the config file.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Rows
    pub row_bg: Color,
    pub row_alt_bg: Color,
    pub row_fg: Color,
    pub hover_bg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    /// Focus marker drawn at the left edge of selected rows.
    pub focus_fg: Color,
    /// Text color of the "edited" placeholder.
    pub edited_fg: Color,

    // Chrome
    pub border_fg: Color,
    pub scrollbar_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,

    // Semantic colors (not configurable, consistent across themes)
    pub error_fg: Color,
    pub error_bg: Color,
    pub success_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        row_bg: Color::Reset,
        row_alt_bg: Color::Rgb(24, 24, 37), // #181825 (mantle)
        row_fg: Color::Rgb(205, 214, 244),  // #cdd6f4 (text)
        hover_bg: Color::Rgb(49, 50, 68),   // #313244 (surface0)
        selected_bg: Color::Rgb(69, 71, 90), // #45475a (surface1)
        selected_fg: Color::Rgb(205, 214, 244),
        focus_fg: Color::Rgb(137, 180, 250), // #89b4fa (blue)
        edited_fg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)

        border_fg: Color::Rgb(88, 91, 112), // #585b70 (surface2)
        scrollbar_fg: Color::Rgb(108, 112, 134), // #6c7086 (overlay0)
        status_bg: Color::Rgb(30, 30, 46),  // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),

        error_fg: Color::Rgb(17, 17, 27),      // #11111b (crust)
        error_bg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        dim_fg: Color::Rgb(108, 112, 134),
    }
}

/// Light theme using Catppuccin Latte palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        row_bg: Color::Reset,
        row_alt_bg: Color::Rgb(230, 233, 239), // #e6e9ef (mantle)
        row_fg: Color::Rgb(76, 79, 105),       // #4c4f69 (text)
        hover_bg: Color::Rgb(220, 224, 232),   // #dce0e8 (crust)
        selected_bg: Color::Rgb(204, 208, 218), // #ccd0da (surface0)
        selected_fg: Color::Rgb(76, 79, 105),
        focus_fg: Color::Rgb(30, 102, 245), // #1e66f5 (blue)
        edited_fg: Color::Rgb(223, 142, 29), // #df8e1d (yellow)

        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)
        scrollbar_fg: Color::Rgb(156, 160, 176), // #9ca0b0 (overlay0)
        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),

        error_fg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        error_bg: Color::Rgb(210, 15, 57),  // #d20f39 (red)
        success_fg: Color::Rgb(64, 160, 43), // #40a02b (green)
        dim_fg: Color::Rgb(156, 160, 176),
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn override_color(slot: &mut Color, hex: Option<&String>) {
    if let Some(color) = hex.and_then(|h| parse_hex_color(h)) {
        *slot = color;
    }
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme_name() {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(),
    }
}

/// Apply custom hex color overrides on top of an existing theme.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    override_color(&mut theme.row_bg, custom.row_bg.as_ref());
    override_color(&mut theme.row_alt_bg, custom.row_alt_bg.as_ref());
    override_color(&mut theme.row_fg, custom.row_fg.as_ref());
    override_color(&mut theme.hover_bg, custom.hover_bg.as_ref());
    override_color(&mut theme.selected_bg, custom.selected_bg.as_ref());
    override_color(&mut theme.selected_fg, custom.selected_fg.as_ref());
    override_color(&mut theme.focus_fg, custom.focus_fg.as_ref());
    override_color(&mut theme.edited_fg, custom.edited_fg.as_ref());
    override_color(&mut theme.border_fg, custom.border_fg.as_ref());
    override_color(&mut theme.status_bg, custom.status_bg.as_ref());
    override_color(&mut theme.status_fg, custom.status_fg.as_ref());
}

// ── Tests ────────────────────────────────────────────────────────────────────
