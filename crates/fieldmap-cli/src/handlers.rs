//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

pub mod completions;
pub mod config;
pub mod map;
pub mod preview;
pub mod utils;
pub mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use map::handle_map;
pub use preview::handle_preview;
pub use validate::handle_validate;
