//! Surface BRDFs

mod henyey_greenstein;
mod isotropic;

// Re-export
pub use henyey_greenstein::*;
pub use isotropic::*;
