// Library root — exposes internals for the binary and integration tests.

mod bootstrap;
mod core;

pub mod generate;
pub mod llm;
pub mod server;

pub use self::bootstrap::logger;
pub use self::core::{config, error};
