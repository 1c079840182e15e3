// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod dataset;
pub mod game;
pub mod picker;
pub mod runtime;
