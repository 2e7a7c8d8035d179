pub mod api;
pub mod content_table;
pub mod hooks;
pub mod summary_view;
