pub mod app_state;
pub mod assets;
pub mod catalog;
pub mod commands;
pub mod driver;
pub mod error;
pub mod logging;
pub mod repl;
pub mod selector;
pub mod sequence;
pub mod session;
pub mod surface;
pub mod tabular;
pub mod turn_order;

pub use error::{ConfigError, EncounterError};
pub use repl::readline;
