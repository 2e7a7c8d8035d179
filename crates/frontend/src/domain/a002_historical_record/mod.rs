pub mod api;
pub mod history_list;
pub mod hooks;
