mod loader;
mod types;

pub use loader::{CONFIG_FILE, flake8_excludes, load};
pub use types::{Config, Jobs, ToolCommand};
