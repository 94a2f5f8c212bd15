/// Basic application code
pub mod app;
/// Application authorization
pub mod auth;
/// REST clients for outside services
pub mod client;
/// Controllers for REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Record types stored and served by the API
pub mod model;
/// Notification emails for contact submissions
pub mod notify;
/// Repositories
pub mod repo;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
