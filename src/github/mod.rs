pub mod api;
pub mod client;
pub mod fetch;
pub mod types;
