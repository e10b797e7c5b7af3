use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::listing::rows::{DisplayRow, EntryKind};
use crate::theme::ThemeColors;

const NAME_WIDTH: usize = 24;
const TYPE_WIDTH: usize = 10;
const SIZE_WIDTH: usize = 10;

/// Table of display rows: Path | Name | Type | Size.
pub struct ListingTableWidget<'a> {
    rows: &'a [DisplayRow],
    theme: &'a ThemeColors,
    selected: usize,
    scroll_offset: usize,
    placeholder: Option<&'a str>,
    block: Option<Block<'a>>,
}

impl<'a> ListingTableWidget<'a> {
    pub fn new(rows: &'a [DisplayRow], theme: &'a ThemeColors) -> Self {
        Self {
            rows,
            theme,
            selected: 0,
            scroll_offset: 0,
            placeholder: None,
            block: None,
        }
    }

    pub fn selected(mut self, selected: usize, scroll_offset: usize) -> Self {
        self.selected = selected;
        self.scroll_offset = scroll_offset;
        self
    }

    /// Text shown in place of an empty body ("Loading…", an error, ...).
    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = Some(text);
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// The part of `inner` below the header line.
    pub fn body_area(inner: Rect) -> Rect {
        Rect::new(
            inner.x,
            inner.y.saturating_add(1),
            inner.width,
            inner.height.saturating_sub(1),
        )
    }

    /// Split the row into the four column texts.
    fn cells(row: &DisplayRow) -> [String; 4] {
        match row {
            DisplayRow::UpDir { .. } => [
                "↰ ..".to_string(),
                "_".to_string(),
                "_".to_string(),
                "_".to_string(),
            ],
            DisplayRow::Entry(entry) => {
                let marker = match entry.kind {
                    EntryKind::Directory => "▸ ",
                    EntryKind::File => "  ",
                };
                [
                    format!("{}{}", marker, entry.path),
                    entry.name.clone(),
                    entry.kind.label().to_string(),
                    format_size(entry.size),
                ]
            }
        }
    }

    fn format_line(cells: &[String; 4], width: usize) -> String {
        let fixed = NAME_WIDTH + TYPE_WIDTH + SIZE_WIDTH + 3;
        let path_width = width.saturating_sub(fixed).max(8);
        format!(
            "{:<pw$} {:>nw$} {:>tw$} {:>sw$}",
            truncate(&cells[0], path_width),
            truncate(&cells[1], NAME_WIDTH),
            cells[2],
            cells[3],
            pw = path_width,
            nw = NAME_WIDTH,
            tw = TYPE_WIDTH,
            sw = SIZE_WIDTH,
        )
    }
}

/// Human-readable byte count.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

impl<'a> Widget for ListingTableWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let width = inner.width as usize;
        let header = [
            "Path".to_string(),
            "Name".to_string(),
            "Type".to_string(),
            "Size".to_string(),
        ];
        let header_line = Line::from(Span::styled(
            Self::format_line(&header, width),
            Style::default()
                .fg(self.theme.table_header_fg)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ));
        buf.set_line(inner.x, inner.y, &header_line, inner.width);

        let body = Self::body_area(inner);
        if body.height == 0 {
            return;
        }

        if self.rows.is_empty() {
            if let Some(text) = self.placeholder {
                let line = Line::from(Span::styled(
                    text,
                    Style::default()
                        .fg(self.theme.dim_fg)
                        .add_modifier(Modifier::ITALIC),
                ));
                buf.set_line(body.x, body.y, &line, body.width);
            }
            return;
        }

        let visible = self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(body.height as usize);

        for (i, (idx, row)) in visible.enumerate() {
            let y = body.y + i as u16;

            let style = if idx == self.selected {
                Style::default()
                    .bg(self.theme.table_selected_bg)
                    .fg(self.theme.table_selected_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                match row {
                    DisplayRow::UpDir { .. } => Style::default().fg(self.theme.table_up_dir_fg),
                    DisplayRow::Entry(e) if e.kind == EntryKind::Directory => Style::default()
                        .fg(self.theme.table_dir_fg)
                        .add_modifier(Modifier::BOLD),
                    // Files are not navigable, so they render dimmed.
                    DisplayRow::Entry(_) => Style::default().fg(self.theme.table_file_fg),
                }
            };

            let text = Self::format_line(&Self::cells(row), width);
            let line = Line::from(Span::styled(format!("{:<width$}", text), style));
            buf.set_line(body.x, y, &line, body.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::rows::Entry;
    use crate::theme;

    fn buffer_to_string(buf: &Buffer, area: Rect) -> String {
        let mut s = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                s.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            s.push('\n');
        }
        s
    }

    fn rows() -> Vec<DisplayRow> {
        vec![
            DisplayRow::UpDir {
                id: "/".into(),
                path: "/".into(),
            },
            DisplayRow::Entry(Entry {
                id: "/a/logs".into(),
                path: "/a/logs".into(),
                name: "logs".into(),
                size: 0,
                kind: EntryKind::Directory,
            }),
            DisplayRow::Entry(Entry {
                id: "/a/app.log".into(),
                path: "/a/app.log".into(),
                name: "app.log".into(),
                size: 2048,
                kind: EntryKind::File,
            }),
        ]
    }

    #[test]
    fn renders_header_and_rows() {
        let tc = theme::dark_theme();
        let rows = rows();
        let area = Rect::new(0, 0, 100, 6);
        let mut buf = Buffer::empty(area);
        ListingTableWidget::new(&rows, &tc).render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("Path"));
        assert!(content.contains("Size"));
        assert!(content.contains(".."));
        assert!(content.contains("/a/logs"));
        assert!(content.contains("Directory"));
        assert!(content.contains("app.log"));
        assert!(content.contains("2.0 KB"));
    }

    #[test]
    fn up_row_is_first_body_line() {
        let tc = theme::dark_theme();
        let rows = rows();
        let area = Rect::new(0, 0, 100, 6);
        let mut buf = Buffer::empty(area);
        ListingTableWidget::new(&rows, &tc).render(area, &mut buf);

        let line: String = (0..100)
            .map(|x| buf.cell((x, 1)).unwrap().symbol().to_string())
            .collect();
        assert!(line.contains(".."));
        assert!(line.contains('_'));
    }

    #[test]
    fn selected_row_uses_selection_colors() {
        let tc = theme::dark_theme();
        let rows = rows();
        let area = Rect::new(0, 0, 100, 6);
        let mut buf = Buffer::empty(area);
        ListingTableWidget::new(&rows, &tc)
            .selected(2, 0)
            .render(area, &mut buf);
        assert_eq!(buf.cell((0, 3)).unwrap().bg, tc.table_selected_bg);
    }

    #[test]
    fn placeholder_when_empty() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 60, 4);
        let mut buf = Buffer::empty(area);
        ListingTableWidget::new(&[], &tc)
            .placeholder("Loading…")
            .render(area, &mut buf);
        assert!(buffer_to_string(&buf, area).contains("Loading"));
    }

    #[test]
    fn zero_area_does_not_panic() {
        let tc = theme::dark_theme();
        let rows = rows();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        ListingTableWidget::new(&rows, &tc).render(area, &mut buf);
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn truncate_long_text() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
