//! Paginator arithmetic over the reported row count.
//!
//! Page indices here are zero-based, as in the paginator control.

/// Number of pages needed for `row_count` rows (at least 1).
pub fn page_total(row_count: u64, rows_per_page: usize) -> u64 {
    let per = rows_per_page.max(1) as u64;
    row_count.div_ceil(per).max(1)
}

/// Inclusive one-based row range shown for `page_index`, e.g. `(26, 50)`.
/// `(0, 0)` when there is nothing to show.
pub fn displayed_range(page_index: usize, rows_per_page: usize, row_count: u64) -> (u64, u64) {
    if row_count == 0 {
        return (0, 0);
    }
    let per = rows_per_page.max(1) as u64;
    let from = page_index as u64 * per + 1;
    let to = ((page_index as u64 + 1) * per).min(row_count);
    (from, to)
}

pub fn has_next_page(page_index: usize, rows_per_page: usize, row_count: u64) -> bool {
    (page_index as u64 + 1) * (rows_per_page.max(1) as u64) < row_count
}

pub fn has_previous_page(page_index: usize) -> bool {
    page_index > 0
}
