//! Domain services - pure read-side logic

mod list_query;

pub use list_query::ListQuery;
