//! RT1 Model

#[macro_use]
extern crate log;

mod config;
mod rt1;
mod sweep;

// Re-export.
pub use config::*;
pub use rt1::*;
pub use sweep::*;
