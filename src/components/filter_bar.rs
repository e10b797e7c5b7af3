use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::listing::request::{FilterField, FilterState};
use crate::theme::ThemeColors;

/// Toolbar line: title on the left, one chip per filter.
///
/// Each chip shows its edit key, title and current value, e.g.
/// `[1] File Size Min: 200`.
pub struct FilterBarWidget<'a> {
    filters: &'a FilterState,
    theme: &'a ThemeColors,
    editing: Option<FilterField>,
}

impl<'a> FilterBarWidget<'a> {
    pub fn new(filters: &'a FilterState, theme: &'a ThemeColors) -> Self {
        Self {
            filters,
            theme,
            editing: None,
        }
    }

    /// Highlight the chip currently open in the edit dialog.
    pub fn editing(mut self, field: Option<FilterField>) -> Self {
        self.editing = field;
        self
    }

    fn chip_value(&self, field: FilterField) -> String {
        let value = self.filters.display(field);
        if value.is_empty() {
            "—".to_string()
        } else {
            value
        }
    }
}

impl<'a> Widget for FilterBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let title_style = Style::default()
            .fg(self.theme.accent_fg)
            .add_modifier(Modifier::BOLD);
        let mut spans = vec![Span::styled(" File Browser ", title_style), Span::raw(" ")];

        for (i, field) in FilterField::ALL.iter().enumerate() {
            let active = self.editing == Some(*field);
            let chip_style = if active {
                Style::default()
                    .bg(self.theme.border_focused_fg)
                    .fg(self.theme.chip_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().bg(self.theme.chip_bg).fg(self.theme.chip_fg)
            };
            let label_style = if active {
                chip_style
            } else {
                Style::default()
                    .bg(self.theme.chip_bg)
                    .fg(self.theme.chip_label_fg)
            };

            spans.push(Span::styled(format!(" [{}] {}: ", i + 1, field.title()), label_style));
            spans.push(Span::styled(format!("{} ", self.chip_value(*field)), chip_style));
            spans.push(Span::raw(" "));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
