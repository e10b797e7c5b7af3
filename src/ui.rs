use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, AppMode};
use crate::components::dialog::FilterDialogWidget;
use crate::components::filter_bar::FilterBarWidget;
use crate::components::help::HelpOverlay;
use crate::components::listing_table::ListingTableWidget;
use crate::components::paginator::PaginatorWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::theme::ThemeColors;

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame, theme: &ThemeColors) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let editing = match app.mode {
        AppMode::EditFilter(field) => Some(field),
        _ => None,
    };
    frame.render_widget(
        FilterBarWidget::new(&app.filters, theme).editing(editing),
        chunks[0],
    );

    let block = Block::default()
        .title(format!(" {} ", app.history.current().path))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.mode == AppMode::Normal {
            theme.border_focused_fg
        } else {
            theme.border_fg
        }));

    // Record the body area for mouse hit-testing and keep the selection visible.
    let body = ListingTableWidget::body_area(block.inner(chunks[1]));
    app.table_body = body;
    app.update_scroll(body.height as usize);

    let rows = app.rows();
    let placeholder = if app.loading() {
        "Loading…"
    } else if app.error() {
        app.query.error_message().unwrap_or("Failed to load listing")
    } else {
        "No entries"
    };
    frame.render_widget(
        ListingTableWidget::new(&rows, theme)
            .selected(app.selected_index, app.scroll_offset)
            .placeholder(placeholder)
            .block(block),
        chunks[1],
    );

    frame.render_widget(
        PaginatorWidget::new(
            app.page_number(),
            app.rows_per_page,
            app.row_count(),
            theme,
        )
        .loading(app.loading()),
        chunks[2],
    );

    let current = app.history.current();
    let mut status = StatusBarWidget::new(&current.path, app.history.state(), theme)
        .query_error(app.query.error_message());
    if let Some((msg, _)) = &app.status_message {
        status = status.status_message(msg, msg.starts_with('✗'));
    }
    frame.render_widget(status, chunks[3]);

    match app.mode {
        AppMode::EditFilter(_) => {
            frame.render_widget(
                FilterDialogWidget::new(&app.mode, &app.dialog_state, theme),
                area,
            );
        }
        AppMode::Help => {
            frame.render_widget(HelpOverlay::new(theme, app.help_scroll), area);
        }
        AppMode::Normal => {}
    }
}
