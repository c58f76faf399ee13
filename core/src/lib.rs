//! Core

#[macro_use]
extern crate log;

// Re-export.
pub mod common;
pub mod error;
pub mod expr;
pub mod geometry;
pub mod interaction;
pub mod legendre;
pub mod paramset;
pub mod polynomial;
pub mod special;
pub mod surface;
pub mod volume;
