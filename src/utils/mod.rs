// Utility functions

pub mod http;
pub mod logger;

pub use http::build_client;
pub use logger::*;
