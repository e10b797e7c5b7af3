use std::time::Instant;

use ratatui::layout::Rect;
use tracing::info;

use crate::listing::history::NavigationHistory;
use crate::listing::paging;
use crate::listing::query::{FetchTicket, ListingQuery};
use crate::listing::request::{self, FilterField, FilterState, PageState, QueryVariables};
use crate::listing::rows::{self, DisplayRow, ListingPage, RowAction};

/// Application mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Normal,
    /// Editing one filter chip in the input dialog.
    EditFilter(FilterField),
    Help,
}

/// State for the filter dialog's text input.
#[derive(Debug, Default)]
pub struct DialogState {
    pub input: String,
    pub cursor_position: usize,
}

/// Main application state.
pub struct App {
    pub history: NavigationHistory,
    pub filters: FilterState,
    pub page: PageState,
    pub query: ListingQuery,
    pub rows_per_page: usize,
    pub selected_index: usize,
    pub scroll_offset: usize,
    /// Screen area of the table body from the last render (mouse hit-testing).
    pub table_body: Rect,
    pub mode: AppMode,
    pub dialog_state: DialogState,
    pub help_scroll: usize,
    pub status_message: Option<(String, Instant)>,
    pub should_quit: bool,
}

impl App {
    /// Create a session at the root with the given starting filters.
    pub fn new(filters: FilterState, rows_per_page: usize) -> Self {
        Self {
            history: NavigationHistory::new(),
            filters,
            page: PageState::default(),
            query: ListingQuery::new(),
            rows_per_page,
            selected_index: 0,
            scroll_offset: 0,
            table_body: Rect::default(),
            mode: AppMode::Normal,
            dialog_state: DialogState::default(),
            help_scroll: 0,
            status_message: None,
            should_quit: false,
        }
    }

    // ── Presentation reads ──────────────────────────────────────────────────

    /// Rows for the table: up marker first when below root, then the page.
    pub fn rows(&self) -> Vec<DisplayRow> {
        rows::project_rows(&self.history, self.query.data())
    }

    /// Row count reported to the paginator.
    pub fn row_count(&self) -> u64 {
        rows::row_count(self.history.current(), self.query.data())
    }

    pub fn page_number(&self) -> u32 {
        self.page.number()
    }

    pub fn loading(&self) -> bool {
        self.query.loading()
    }

    pub fn error(&self) -> bool {
        self.query.error()
    }

    // ── Query plumbing ──────────────────────────────────────────────────────

    /// Variables for the current location, page and filters.
    pub fn current_request(&self) -> QueryVariables {
        request::build(self.history.current(), &self.page, &self.filters)
    }

    /// Fetch to start, if the derived request changed since the last one.
    pub fn poll_request(&mut self) -> Option<FetchTicket> {
        let variables = self.current_request();
        self.query.sync(variables)
    }

    /// Apply a finished fetch. Stale responses are ignored.
    pub fn handle_listing_loaded(
        &mut self,
        generation: u64,
        result: std::result::Result<ListingPage, String>,
    ) {
        let failure = result.as_ref().err().cloned();
        if !self.query.resolve(generation, result) {
            return;
        }
        if let Some(message) = failure {
            self.set_status_message(format!("✗ {}", message));
        }
        self.clamp_selection();
    }

    /// Re-issue the current request on the next poll.
    pub fn refresh(&mut self) {
        self.query.invalidate();
    }

    // ── Core events ─────────────────────────────────────────────────────────

    /// Activate a row: up marker ascends, directories descend, files do nothing.
    pub fn on_row_activate(&mut self, row: &DisplayRow) {
        match row.action() {
            RowAction::Ascend => self.ascend(),
            RowAction::Descend(path) => self.descend(&path),
            RowAction::Disabled => {}
        }
    }

    /// Move to a page given the paginator's zero-based index.
    pub fn on_page_change(&mut self, zero_based_index: usize) {
        self.page.set_from_index(zero_based_index);
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn on_filter_change(&mut self, field: FilterField, value: &str) {
        self.filters.set(field, value);
    }

    pub fn on_filter_clear(&mut self, field: FilterField) {
        self.filters.clear(field);
    }

    /// Enter `path`. The page number is left as is.
    pub fn descend(&mut self, path: &str) {
        if path.is_empty() {
            return;
        }
        self.history.descend(path);
        info!(path, depth = self.history.depth(), "descend");
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Step back to the parent and restart pagination. No-op at root.
    pub fn ascend(&mut self) {
        if self.history.ascend() {
            self.page.reset();
            info!(path = %self.history.current().path, "ascend");
            self.selected_index = 0;
            self.scroll_offset = 0;
        }
    }

    // ── Keyboard conveniences ───────────────────────────────────────────────

    pub fn activate_selected(&mut self) {
        if let Some(row) = self.rows().get(self.selected_index).cloned() {
            self.on_row_activate(&row);
        }
    }

    /// Select and activate the row at `index` (mouse click).
    pub fn activate_row_at(&mut self, index: usize) {
        if index < self.rows().len() {
            self.selected_index = index;
            self.activate_selected();
        }
    }

    pub fn next_page(&mut self) {
        let index = self.page.index();
        if paging::has_next_page(index, self.rows_per_page, self.row_count()) {
            self.on_page_change(index + 1);
        }
    }

    pub fn previous_page(&mut self) {
        let index = self.page.index();
        if paging::has_previous_page(index) {
            self.on_page_change(index - 1);
        }
    }

    /// Cycle the kind filter Any → File → Directory.
    pub fn cycle_kind_filter(&mut self) {
        self.filters.kind_equals = self.filters.kind_equals.next();
    }

    /// Move selection down by one row.
    pub fn select_next(&mut self) {
        let len = self.rows().len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up by one row.
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        let len = self.rows().len();
        if len > 0 {
            self.selected_index = len - 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// Adjust the scroll offset so the selected row stays visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index + 1 - visible_height;
        }
    }

    // ── Filter dialog ───────────────────────────────────────────────────────

    /// Open the input dialog for `field`, prefilled with its current value.
    pub fn open_filter_dialog(&mut self, field: FilterField) {
        let current = self.filters.display(field);
        self.dialog_state = DialogState {
            cursor_position: current.len(),
            input: current,
        };
        self.mode = AppMode::EditFilter(field);
    }

    /// Apply the dialog input to its filter and close the dialog.
    pub fn confirm_filter_dialog(&mut self) {
        if let AppMode::EditFilter(field) = self.mode {
            let value = std::mem::take(&mut self.dialog_state.input);
            self.on_filter_change(field, &value);
        }
        self.close_dialog();
    }

    /// Close the current dialog and return to normal mode.
    pub fn close_dialog(&mut self) {
        self.mode = AppMode::Normal;
        self.dialog_state = DialogState::default();
    }

    /// Insert a character at the current cursor position.
    pub fn dialog_input_char(&mut self, c: char) {
        self.dialog_state
            .input
            .insert(self.dialog_state.cursor_position, c);
        self.dialog_state.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn dialog_delete_char(&mut self) {
        let pos = self.dialog_state.cursor_position;
        if let Some(prev) = self.dialog_state.input[..pos].chars().next_back() {
            self.dialog_state.cursor_position -= prev.len_utf8();
            self.dialog_state
                .input
                .remove(self.dialog_state.cursor_position);
        }
    }

    pub fn dialog_move_cursor_left(&mut self) {
        let pos = self.dialog_state.cursor_position;
        if let Some(prev) = self.dialog_state.input[..pos].chars().next_back() {
            self.dialog_state.cursor_position -= prev.len_utf8();
        }
    }

    pub fn dialog_move_cursor_right(&mut self) {
        let pos = self.dialog_state.cursor_position;
        if let Some(next) = self.dialog_state.input[pos..].chars().next() {
            self.dialog_state.cursor_position += next.len_utf8();
        }
    }

    pub fn dialog_cursor_home(&mut self) {
        self.dialog_state.cursor_position = 0;
    }

    pub fn dialog_cursor_end(&mut self) {
        self.dialog_state.cursor_position = self.dialog_state.input.len();
    }

    // ── Misc ────────────────────────────────────────────────────────────────

    pub fn toggle_help(&mut self) {
        self.mode = if self.mode == AppMode::Help {
            AppMode::Normal
        } else {
            self.help_scroll = 0;
            AppMode::Help
        };
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::history::Location;
    use crate::listing::rows::{Entry, EntryKind, Pagination};

    fn entry(path: &str, kind: EntryKind) -> Entry {
        Entry {
            id: path.to_string(),
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap_or("").to_string(),
            size: 1024,
            kind,
        }
    }

    fn page(entries: Vec<Entry>, page_count: u64, total_rows: u64) -> ListingPage {
        ListingPage {
            entries,
            pagination: Pagination {
                page_count,
                total_rows,
            },
        }
    }

    fn setup_app() -> App {
        App::new(FilterState::default(), 25)
    }

    /// Issue the pending request and answer it with `data`.
    fn serve(app: &mut App, data: ListingPage) {
        let ticket = app.poll_request().expect("request should be pending");
        app.handle_listing_loaded(ticket.generation, Ok(data));
    }

    #[test]
    fn descend_then_ascend_scenario() {
        let mut app = setup_app();
        app.on_page_change(2);
        app.descend("/a");
        assert_eq!(app.history.len(), 2);
        assert_eq!(app.history.parent(), Some(&Location::root()));
        assert_eq!(app.history.current().path, "/a");
        assert_eq!(app.page_number(), 3);

        app.ascend();
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history.current(), &Location::root());
        assert_eq!(app.page_number(), 1);
    }

    #[test]
    fn ascend_at_root_leaves_everything() {
        let mut app = setup_app();
        app.on_page_change(4);
        app.ascend();
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.page_number(), 5);
    }

    #[test]
    fn subdirectory_row_count_adds_page_count() {
        let mut app = setup_app();
        app.descend("/a");
        app.on_page_change(2);
        serve(&mut app, page(vec![entry("/a/x", EntryKind::File)], 2, 50));
        assert_eq!(app.row_count(), 52);
        let rows = app.rows();
        assert_eq!(
            rows[0],
            DisplayRow::UpDir {
                id: "/".into(),
                path: "/".into()
            }
        );
    }

    #[test]
    fn root_row_count_is_server_total() {
        let mut app = setup_app();
        serve(&mut app, page(vec![entry("/x", EntryKind::File)], 1, 10));
        assert_eq!(app.row_count(), 10);
        assert!(app.rows().iter().all(|r| !matches!(r, DisplayRow::UpDir { .. })));
    }

    #[test]
    fn activating_file_row_changes_nothing() {
        let mut app = setup_app();
        app.descend("/a");
        app.on_page_change(1);
        let file = DisplayRow::Entry(entry("/a/f.txt", EntryKind::File));
        let before = app.history.clone();
        app.on_row_activate(&file);
        assert_eq!(app.history, before);
        assert_eq!(app.page_number(), 2);
    }

    #[test]
    fn activating_directory_and_up_rows() {
        let mut app = setup_app();
        serve(&mut app, page(vec![entry("/docs", EntryKind::Directory)], 1, 1));
        app.activate_selected();
        assert_eq!(app.history.current().path, "/docs");

        serve(&mut app, page(vec![], 0, 0));
        assert!(matches!(app.rows()[0], DisplayRow::UpDir { .. }));
        app.activate_selected();
        assert_eq!(app.history.current().path, "/");
    }

    #[test]
    fn filter_edit_changes_request_only() {
        let mut app = setup_app();
        app.descend("/a");
        let before = app.current_request();
        let history = app.history.clone();
        let page = app.page;
        app.on_filter_change(FilterField::NameContains, "log");
        let after = app.current_request();
        assert_ne!(before, after);
        assert_eq!(after.filter.name_contains, "log");
        assert_eq!(app.history, history);
        assert_eq!(app.page, page);
    }

    #[test]
    fn poll_request_is_memoized() {
        let mut app = setup_app();
        assert!(app.poll_request().is_some());
        assert!(app.poll_request().is_none());
        app.on_filter_clear(FilterField::SizeLessThan);
        let ticket = app.poll_request().expect("filter change re-issues");
        assert_eq!(ticket.variables.filter.size_lt, 0);
        assert!(app.loading());
    }

    #[test]
    fn refresh_reissues_request() {
        let mut app = setup_app();
        serve(&mut app, page(vec![], 1, 0));
        app.refresh();
        assert!(app.poll_request().is_some());
    }

    #[test]
    fn stale_response_does_not_overwrite() {
        let mut app = setup_app();
        let old = app.poll_request().unwrap();
        app.descend("/a");
        let new = app.poll_request().unwrap();
        app.handle_listing_loaded(new.generation, Ok(page(vec![], 1, 3)));
        app.handle_listing_loaded(old.generation, Ok(page(vec![], 9, 900)));
        assert_eq!(app.row_count(), 4);
    }

    #[test]
    fn failure_sets_error_and_status() {
        let mut app = setup_app();
        let ticket = app.poll_request().unwrap();
        app.handle_listing_loaded(ticket.generation, Err("connection refused".into()));
        assert!(app.error());
        assert!(!app.loading());
        assert!(app.rows().is_empty());
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn next_page_respects_row_count() {
        let mut app = setup_app();
        serve(&mut app, page(vec![], 2, 30));
        app.next_page();
        assert_eq!(app.page_number(), 2);
        app.next_page();
        assert_eq!(app.page_number(), 2);
        app.previous_page();
        app.previous_page();
        assert_eq!(app.page_number(), 1);
    }

    #[test]
    fn selection_clamps_after_smaller_page() {
        let mut app = setup_app();
        serve(
            &mut app,
            page(
                vec![
                    entry("/a", EntryKind::File),
                    entry("/b", EntryKind::File),
                    entry("/c", EntryKind::File),
                ],
                1,
                3,
            ),
        );
        app.select_last();
        assert_eq!(app.selected_index, 2);
        app.refresh();
        serve(&mut app, page(vec![entry("/a", EntryKind::File)], 1, 1));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn select_next_and_previous_clamp() {
        let mut app = setup_app();
        serve(
            &mut app,
            page(
                vec![entry("/a", EntryKind::File), entry("/b", EntryKind::File)],
                1,
                2,
            ),
        );
        app.select_previous();
        assert_eq!(app.selected_index, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_index, 1);
        app.select_first();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn filter_dialog_round_trip() {
        let mut app = setup_app();
        app.open_filter_dialog(FilterField::SizeGreaterThan);
        assert_eq!(app.mode, AppMode::EditFilter(FilterField::SizeGreaterThan));
        assert_eq!(app.dialog_state.input, "200");
        assert_eq!(app.dialog_state.cursor_position, 3);
        app.dialog_delete_char();
        app.dialog_delete_char();
        app.dialog_delete_char();
        app.dialog_input_char('x');
        app.confirm_filter_dialog();
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.filters.size_greater_than, 0);
    }

    #[test]
    fn dialog_cursor_movement() {
        let mut app = setup_app();
        app.open_filter_dialog(FilterField::NameContains);
        app.dialog_input_char('a');
        app.dialog_input_char('b');
        app.dialog_move_cursor_left();
        assert_eq!(app.dialog_state.cursor_position, 1);
        app.dialog_move_cursor_right();
        app.dialog_move_cursor_right();
        assert_eq!(app.dialog_state.cursor_position, 2);
        app.dialog_cursor_home();
        app.dialog_delete_char();
        assert_eq!(app.dialog_state.input, "ab");
        app.dialog_cursor_end();
        assert_eq!(app.dialog_state.cursor_position, 2);
    }

    #[test]
    fn cancel_dialog_keeps_filter() {
        let mut app = setup_app();
        app.open_filter_dialog(FilterField::NameContains);
        app.dialog_input_char('z');
        app.close_dialog();
        assert!(app.filters.name_contains.is_empty());
    }

    #[test]
    fn toggle_help_switches_mode() {
        let mut app = setup_app();
        app.toggle_help();
        assert_eq!(app.mode, AppMode::Help);
        app.toggle_help();
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn clear_expired_status_removes_old() {
        let mut app = setup_app();
        app.status_message = Some((
            "old".to_string(),
            Instant::now() - std::time::Duration::from_secs(5),
        ));
        app.clear_expired_status();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn update_scroll_follows_selection() {
        let mut app = setup_app();
        app.selected_index = 12;
        app.update_scroll(5);
        assert_eq!(app.scroll_offset, 8);
        app.selected_index = 2;
        app.update_scroll(5);
        assert_eq!(app.scroll_offset, 2);
    }
}
