use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::listing::paging;
use crate::listing::request::page_index_from_number;
use crate::theme::ThemeColors;

/// Right-aligned pagination footer: `1–25 of 52   ‹ [p]  page 1/3  [n] ›`.
pub struct PaginatorWidget<'a> {
    page_index: usize,
    rows_per_page: usize,
    row_count: u64,
    loading: bool,
    theme: &'a ThemeColors,
}

impl<'a> PaginatorWidget<'a> {
    /// `page_number` is one-based, as held in `PageState`.
    pub fn new(
        page_number: u32,
        rows_per_page: usize,
        row_count: u64,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            page_index: page_index_from_number(page_number),
            rows_per_page,
            row_count,
            loading: false,
            theme,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn text_parts(&self) -> (String, String) {
        let (from, to) = paging::displayed_range(self.page_index, self.rows_per_page, self.row_count);
        let range = format!("{}–{} of {}", from, to, self.row_count);
        let pages = format!(
            "page {}/{}",
            self.page_index + 1,
            paging::page_total(self.row_count, self.rows_per_page)
        );
        (range, pages)
    }
}

impl<'a> Widget for PaginatorWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let (range, pages) = self.text_parts();
        let enabled = Style::default().fg(self.theme.info_fg).add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(self.theme.dim_fg).add_modifier(Modifier::DIM);
        let prev_style = if paging::has_previous_page(self.page_index) {
            enabled
        } else {
            disabled
        };
        let next_style =
            if paging::has_next_page(self.page_index, self.rows_per_page, self.row_count) {
                enabled
            } else {
                disabled
            };
        let text_style = Style::default().fg(self.theme.status_fg);

        let mut spans = Vec::new();
        if self.loading {
            spans.push(Span::styled(
                "⟳ loading  ",
                Style::default().fg(self.theme.warning_fg),
            ));
        }
        spans.push(Span::styled(range, text_style));
        spans.push(Span::raw("   "));
        spans.push(Span::styled("‹ [p]", prev_style));
        spans.push(Span::styled(format!("  {}  ", pages), text_style));
        spans.push(Span::styled("[n] ›", next_style));
        spans.push(Span::raw(" "));

        let used: usize = spans.iter().map(|s| s.width()).sum();
        let x = area.x + (area.width as usize).saturating_sub(used) as u16;
        let line = Line::from(spans);
        buf.set_line(x, area.y, &line, area.width.saturating_sub(x - area.x));
    }
}
