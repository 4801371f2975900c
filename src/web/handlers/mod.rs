// Axum request handlers, one module per API route.

pub mod validate;
