pub mod api;
pub mod hooks;
