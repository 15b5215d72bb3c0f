//! Command implementations.

pub mod config;
pub mod import;
pub mod properties;
pub mod search;

pub use self::config::execute_config;
pub use self::import::execute_import;
pub use self::properties::execute_properties;
pub use self::search::execute_search;
