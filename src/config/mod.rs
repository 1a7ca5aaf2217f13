pub mod env;
pub mod loader;
pub mod types;

pub use env::{expand_env_vars, expand_options};
pub use loader::{discover_config_file, load_options, read_options};
pub use types::ContextOptions;
