// Middleware shared by every route: CORS, request tracing, body limit

pub mod layers;

pub use layers::*;
