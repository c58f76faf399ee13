//! Volume Phase Functions

#[macro_use]
extern crate log;

/// Implements `Volume` and `PhaseFunction` for a type holding its albedo,
/// optical depth and closed form description in a `data: VolumeData` field.
macro_rules! impl_phase_function {
    ($t: ty) => {
        impl rt1_core::volume::Volume for $t {
            fn omega(&self) -> rt1_core::common::Float {
                self.data.omega
            }

            fn tau(&self) -> rt1_core::common::Float {
                self.data.tau
            }

            fn expression(&self) -> &rt1_core::expr::Expr {
                &self.data.sf.expression
            }

            fn ncoefs(&self) -> usize {
                self.data.sf.ncoefs
            }

            fn legexpansion(
                &self,
                geometry: &rt1_core::geometry::Geometry,
                mode: rt1_core::legendre::GeometryMode,
            ) -> rt1_core::error::Result<rt1_core::legendre::Expansion> {
                self.data.legexpansion(geometry, mode)
            }
        }

        impl rt1_core::volume::PhaseFunction for $t {
            fn scattering_function(&self) -> &rt1_core::volume::ScatteringFunction {
                &self.data.sf
            }
        }
    };
}

mod common;
mod custom;
mod henyey_greenstein;
mod hg_rayleigh;
mod lin_comb;
mod rayleigh;

// Re-export
pub use common::*;
pub use custom::*;
pub use henyey_greenstein::*;
pub use hg_rayleigh::*;
pub use lin_comb::*;
pub use rayleigh::*;
