pub mod api_utils;
pub mod config;
pub mod debounce;
pub mod error_notifier;
pub mod http;
pub mod request_client;

#[cfg(test)]
pub mod testing;
