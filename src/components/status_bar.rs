use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::listing::history::NavState;
use crate::theme::ThemeColors;

/// Bottom line: current path and depth, or a transient status message.
///
/// A failed query keeps a `✗` indicator on the line until the next
/// successful fetch.
pub struct StatusBarWidget<'a> {
    path_str: &'a str,
    nav: NavState,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
    query_error: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(path_str: &'a str, nav: NavState, theme: &'a ThemeColors) -> Self {
        Self {
            path_str,
            nav,
            theme,
            status_message: None,
            is_error: false,
            query_error: None,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    pub fn query_error(mut self, message: Option<&'a str>) -> Self {
        self.query_error = message;
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_bg)
            } else {
                Style::default().fg(self.theme.success_fg)
            };
            let display: String = msg.chars().take(width).collect();
            let line = Line::from(Span::styled(format!("{:<width$}", display), style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let key_hints = " ⏎:open  ⌫:up  n/p:page  1-4:filter  ?:help ";
        let depth_str = match self.nav {
            NavState::AtRoot => " root ".to_string(),
            NavState::InSubdirectory(depth) => format!(" depth {} ", depth),
        };

        let mut spans = vec![
            Span::styled(
                self.path_str.to_string(),
                Style::default()
                    .fg(self.theme.status_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(depth_str, Style::default().fg(self.theme.info_fg)),
        ];
        if let Some(message) = self.query_error {
            spans.push(Span::styled(
                format!(" ✗ {} ", message),
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_bg)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let used: usize = spans.iter().map(|s| s.width()).sum();
        let hints_width = Span::raw(key_hints).width();
        let pad = width.saturating_sub(used).saturating_sub(hints_width);
        if pad > 0 {
            spans.push(Span::raw(" ".repeat(pad)));
        }
        spans.push(Span::styled(
            key_hints,
            Style::default()
                .fg(self.theme.dim_fg)
                .add_modifier(Modifier::DIM),
        ));

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
