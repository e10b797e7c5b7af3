use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use crate::app::{AppMode, DialogState};
use crate::theme::ThemeColors;

/// Centered modal for editing one filter value.
pub struct FilterDialogWidget<'a> {
    mode: &'a AppMode,
    dialog_state: &'a DialogState,
    theme: &'a ThemeColors,
}

impl<'a> FilterDialogWidget<'a> {
    pub fn new(mode: &'a AppMode, dialog_state: &'a DialogState, theme: &'a ThemeColors) -> Self {
        Self {
            mode,
            dialog_state,
            theme,
        }
    }

    /// Calculate a centered rectangle within the given area.
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let w = width.min(area.width);
        let h = height.min(area.height);
        Rect::new(x, y, w, h)
    }
}

impl<'a> Widget for FilterDialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let field = match self.mode {
            AppMode::EditFilter(field) => *field,
            _ => return,
        };

        let dialog_width = 50.min(area.width.saturating_sub(4));
        let dialog_height = 5;
        let rect = Self::centered_rect(dialog_width, dialog_height, area);

        Clear.render(rect, buf);

        let block = Block::default()
            .title(format!(" {} ", field.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.dialog_border_fg))
            .style(Style::default().bg(self.theme.dialog_bg))
            .padding(Padding::horizontal(1));

        let inner = block.inner(rect);
        block.render(rect, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let input = &self.dialog_state.input;
        let cursor_pos = self.dialog_state.cursor_position.min(input.len());
        let max_width = inner.width as usize;

        let (before, cursor_char, after) = match input[cursor_pos..].chars().next() {
            Some(ch) => {
                let end = cursor_pos + ch.len_utf8();
                (&input[..cursor_pos], &input[cursor_pos..end], &input[end..])
            }
            None => (input.as_str(), " ", ""),
        };

        // Keep the cursor in view by dropping characters from the left.
        let overflow = (before.chars().count() + 1 + after.chars().count())
            .saturating_sub(max_width);
        let before_display: String = before.chars().skip(overflow).collect();

        let input_style = Style::default().fg(self.theme.table_fg);
        let cursor_style = Style::default()
            .bg(self.theme.table_fg)
            .fg(self.theme.dialog_bg)
            .add_modifier(Modifier::BOLD);

        let line = Line::from(vec![
            Span::styled(before_display, input_style),
            Span::styled(cursor_char, cursor_style),
            Span::styled(after, input_style),
        ]);
        buf.set_line(inner.x, inner.y + inner.height / 2, &line, inner.width);

        let hint = if field.is_numeric() {
            "[Enter] Apply  [Esc] Cancel  (non-numbers count as 0)"
        } else {
            "[Enter] Apply  [Esc] Cancel"
        };
        let hint_line = Line::from(Span::styled(
            hint,
            Style::default()
                .fg(self.theme.dim_fg)
                .add_modifier(Modifier::DIM),
        ));
        if inner.height > 1 {
            buf.set_line(inner.x, inner.y + inner.height - 1, &hint_line, inner.width);
        }
    }
}
