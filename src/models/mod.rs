pub mod config;

pub use config::{RenderConfig, CONFIG_FILE_ENV};
