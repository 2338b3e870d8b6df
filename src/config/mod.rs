//! Application configuration management.
//!
//! The shell configuration is a plain typed struct owned by the lifecycle
//! controller. Preferences that belong to the download engine (such as
//! "run in background") are queried from the engine instead.

pub mod app;

pub use app::ShellConfig;
