mod defaults;
mod io;
mod presets;
mod schema;
mod validate;

pub use io::{load_config, load_config_or_default};
pub use schema::{Config, RuntimeConfig};
pub use validate::ConfigError;

#[cfg(test)]
mod tests;
