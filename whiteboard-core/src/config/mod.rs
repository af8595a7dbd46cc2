//! Machine configuration
//!
//! Board-agnostic configuration structures and the parser for the
//! `whiteboard.toml` subset embedded in the firmware image.

pub mod toml;
pub mod types;

pub use self::toml::parse_config;
pub use types::*;
