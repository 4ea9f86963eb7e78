pub mod cache;
pub mod config;
pub mod library;
pub mod models;
pub mod pipeline;
pub mod presets;
pub mod providers;
pub mod rate_limit;
pub mod renderers;
pub mod routes;
pub mod settings;
pub mod spec_builder;
pub mod store;
pub mod variants;
pub mod vision;
