//! Theme data model: built-in palettes and resolution from config.

use ratatui::style::Color;

use crate::config::ThemeConfig;

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Listing table
    pub table_fg: Color,
    pub table_header_fg: Color,
    pub table_selected_bg: Color,
    pub table_selected_fg: Color,
    pub table_dir_fg: Color,
    pub table_file_fg: Color,
    pub table_up_dir_fg: Color,

    // Filter chips
    pub chip_bg: Color,
    pub chip_fg: Color,
    pub chip_label_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Borders & chrome
    pub border_fg: Color,
    pub border_focused_fg: Color,

    // Dialogs
    pub dialog_bg: Color,
    pub dialog_border_fg: Color,

    // Semantic colors (consistent across themes)
    pub error_fg: Color,
    pub warning_fg: Color,
    pub success_fg: Color,
    pub info_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        table_fg: Color::Rgb(205, 214, 244),          // #cdd6f4 (text)
        table_header_fg: Color::Rgb(186, 194, 222),   // #bac2de (subtext1)
        table_selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        table_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        table_dir_fg: Color::Rgb(137, 180, 250),      // #89b4fa (blue)
        table_file_fg: Color::Rgb(108, 112, 134),     // #6c7086 (overlay0)
        table_up_dir_fg: Color::Rgb(148, 226, 213),   // #94e2d5 (teal)

        chip_bg: Color::Rgb(49, 50, 68),          // #313244 (surface0)
        chip_fg: Color::Rgb(205, 214, 244),       // #cdd6f4
        chip_label_fg: Color::Rgb(166, 173, 200), // #a6adc8 (subtext0)

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112), // #585b70 (surface2)
        border_focused_fg: Color::Rgb(137, 180, 250),

        dialog_bg: Color::Rgb(49, 50, 68),
        dialog_border_fg: Color::Rgb(137, 180, 250),

        error_fg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        warning_fg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        info_fg: Color::Rgb(137, 180, 250),    // #89b4fa (blue)
        accent_fg: Color::Rgb(203, 166, 247),  // #cba6f7 (mauve)
        dim_fg: Color::Rgb(108, 112, 134),     // #6c7086
    }
}

/// Light theme using Catppuccin Latte palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        table_fg: Color::Rgb(76, 79, 105),           // #4c4f69 (text)
        table_header_fg: Color::Rgb(92, 95, 119),    // #5c5f77 (subtext1)
        table_selected_bg: Color::Rgb(204, 208, 218), // #ccd0da (surface1)
        table_selected_fg: Color::Rgb(76, 79, 105),
        table_dir_fg: Color::Rgb(30, 102, 245),    // #1e66f5 (blue)
        table_file_fg: Color::Rgb(156, 160, 176),  // #9ca0b0 (overlay0)
        table_up_dir_fg: Color::Rgb(23, 146, 153), // #179299 (teal)

        chip_bg: Color::Rgb(230, 233, 239),     // #e6e9ef (surface0)
        chip_fg: Color::Rgb(76, 79, 105),
        chip_label_fg: Color::Rgb(108, 111, 133), // #6c6f85 (subtext0)

        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)
        border_focused_fg: Color::Rgb(30, 102, 245),

        dialog_bg: Color::Rgb(230, 233, 239),
        dialog_border_fg: Color::Rgb(30, 102, 245),

        error_fg: Color::Rgb(210, 15, 57),    // #d20f39 (red)
        warning_fg: Color::Rgb(223, 142, 29), // #df8e1d (yellow)
        success_fg: Color::Rgb(64, 160, 43),  // #40a02b (green)
        info_fg: Color::Rgb(30, 102, 245),
        accent_fg: Color::Rgb(136, 57, 239), // #8839ef (mauve)
        dim_fg: Color::Rgb(156, 160, 176),
    }
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config. Anything but `"light"` is dark.
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme.as_deref() {
        Some("light") => light_theme(),
        _ => dark_theme(),
    }
}
