//! Project-level configuration loaded from `.signum.toml`.

pub mod settings;

pub use settings::Settings;
