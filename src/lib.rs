// HTTP server modules
pub mod dispatch;
pub mod handlers;
pub mod models;
pub mod routes;

// Agent runtime
pub mod runtime;

// Process configuration and shared state
pub mod settings;
pub mod state;
