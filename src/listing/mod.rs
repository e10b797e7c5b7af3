//! Navigation and pagination core: history stack, request derivation,
//! row projection and the outstanding-query tracker.

pub mod history;
pub mod paging;
pub mod query;
pub mod request;
pub mod rows;
