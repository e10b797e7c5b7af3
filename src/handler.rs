use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, AppMode};
use crate::components::help::HelpOverlay;
use crate::listing::request::FilterField;

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.mode {
        AppMode::Normal => handle_normal_mode(app, key),
        AppMode::EditFilter(_) => handle_dialog_mode(app, key),
        AppMode::Help => handle_help_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.activate_selected(),
        KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => app.ascend(),
        KeyCode::Char('n') | KeyCode::Char(']') | KeyCode::PageDown => app.next_page(),
        KeyCode::Char('p') | KeyCode::Char('[') | KeyCode::PageUp => app.previous_page(),
        KeyCode::Char('t') => app.cycle_kind_filter(),
        KeyCode::Char('r') => {
            app.refresh();
            app.set_status_message("Refreshing…".to_string());
        }
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char(c) => {
            if let Some(field) = edit_field_for(c) {
                app.open_filter_dialog(field);
            } else if let Some(field) = clear_field_for(c) {
                app.on_filter_clear(field);
                app.set_status_message(format!("Cleared {}", field.title()));
            }
        }
        _ => {}
    }
}

fn handle_dialog_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.confirm_filter_dialog(),
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Backspace => app.dialog_delete_char(),
        KeyCode::Left => app.dialog_move_cursor_left(),
        KeyCode::Right => app.dialog_move_cursor_right(),
        KeyCode::Home => app.dialog_cursor_home(),
        KeyCode::End => app.dialog_cursor_end(),
        KeyCode::Char(c) => app.dialog_input_char(c),
        _ => {}
    }
}

fn handle_help_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => app.toggle_help(),
        KeyCode::Char('j') | KeyCode::Down => {
            if app.help_scroll + 1 < HelpOverlay::total_lines() {
                app.help_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
        _ => {}
    }
}

/// `1`..`4` edit the filter chips left to right.
fn edit_field_for(c: char) -> Option<FilterField> {
    match c {
        '1' => Some(FilterField::SizeGreaterThan),
        '2' => Some(FilterField::SizeLessThan),
        '3' => Some(FilterField::NameContains),
        '4' => Some(FilterField::KindEquals),
        _ => None,
    }
}

/// Shifted `1`..`4` (US layout) clear the matching chip.
fn clear_field_for(c: char) -> Option<FilterField> {
    match c {
        '!' => Some(FilterField::SizeGreaterThan),
        '@' => Some(FilterField::SizeLessThan),
        '#' => Some(FilterField::NameContains),
        '$' => Some(FilterField::KindEquals),
        _ => None,
    }
}

/// Handle a mouse event. `table_body` is the screen area of the table rows.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, table_body: Rect) {
    if app.mode != AppMode::Normal {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let inside = mouse.column >= table_body.x
                && mouse.column < table_body.x + table_body.width
                && mouse.row >= table_body.y
                && mouse.row < table_body.y + table_body.height;
            if inside {
                let index = app.scroll_offset + (mouse.row - table_body.y) as usize;
                app.activate_row_at(index);
            }
        }
        MouseEventKind::ScrollDown => app.select_next(),
        MouseEventKind::ScrollUp => app.select_previous(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::request::FilterState;
    use crate::listing::rows::{Entry, EntryKind, ListingPage, Pagination};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_dir() -> App {
        let mut app = App::new(FilterState::default(), 25);
        let ticket = app.poll_request().unwrap();
        app.handle_listing_loaded(
            ticket.generation,
            Ok(ListingPage {
                entries: vec![Entry {
                    id: "/docs".into(),
                    path: "/docs".into(),
                    name: "docs".into(),
                    size: 0,
                    kind: EntryKind::Directory,
                }],
                pagination: Pagination {
                    page_count: 1,
                    total_rows: 1,
                },
            }),
        );
        app
    }

    #[test]
    fn q_quits() {
        let mut app = App::new(FilterState::default(), 25);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_even_in_dialog() {
        let mut app = App::new(FilterState::default(), 25);
        app.open_filter_dialog(FilterField::NameContains);
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn enter_descends_and_backspace_ascends() {
        let mut app = app_with_dir();
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.history.current().path, "/docs");
        handle_key_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.history.current().path, "/");
    }

    #[test]
    fn digit_opens_filter_dialog_and_typing_edits() {
        let mut app = App::new(FilterState::default(), 25);
        handle_key_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.mode, AppMode::EditFilter(FilterField::NameContains));
        for c in "log".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.filters.name_contains, "log");
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn shifted_digit_clears_filter() {
        let mut app = App::new(FilterState::default(), 25);
        handle_key_event(&mut app, key(KeyCode::Char('!')));
        assert_eq!(app.filters.size_greater_than, 0);
    }

    #[test]
    fn mouse_click_activates_row() {
        let mut app = app_with_dir();
        let body = Rect::new(1, 5, 60, 10);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, click, body);
        assert_eq!(app.history.current().path, "/docs");
    }

    #[test]
    fn mouse_click_outside_table_is_ignored() {
        let mut app = app_with_dir();
        let body = Rect::new(1, 5, 60, 10);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, click, body);
        assert_eq!(app.history.current().path, "/");
    }

    #[test]
    fn help_scroll_stops_at_last_line() {
        let mut app = App::new(FilterState::default(), 25);
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        for _ in 0..500 {
            handle_key_event(&mut app, key(KeyCode::Char('j')));
        }
        assert_eq!(app.help_scroll, HelpOverlay::total_lines() - 1);
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Normal);
    }
}
