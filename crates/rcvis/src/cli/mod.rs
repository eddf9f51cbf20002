//! Command-line interface module.

mod commands;
mod narrate;
mod render;

pub use commands::{Cli, Commands};
pub use narrate::{load_summary, narrate, show_config};
pub use render::render;
