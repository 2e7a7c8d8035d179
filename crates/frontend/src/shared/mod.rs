pub mod api_utils;
pub mod app_context;
pub mod config;
pub mod date_utils;
pub mod http;
pub mod list_utils;
pub mod loader;
pub mod lookup_cache;
pub mod mutation;
pub mod number_format;
pub mod request_state;
pub mod runtime;
pub mod table_state;

#[cfg(test)]
pub mod test_support;
