pub mod dialog;
pub mod filter_bar;
pub mod help;
pub mod listing_table;
pub mod paginator;
pub mod status_bar;
