/// Basic application code
pub mod app;
/// Principal attribution for writes (authentication is stubbed)
pub mod auth;
/// Controllers for REST endpoints
pub mod controller;
/// PII encryption capability
pub mod crypto;
/// Parsed domain input types
pub mod domain;
/// Error enums
pub mod error;
/// Entity definitions
pub mod model;
/// Repositories
pub mod repo;
/// Business-rule services
pub mod service;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
