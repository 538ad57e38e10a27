pub mod app;
pub mod error;
pub mod store_handler;
