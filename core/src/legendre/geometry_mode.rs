//! Evaluation Geometries

use crate::common::*;
use crate::error::*;
use crate::expr::*;
use crate::geometry::*;
use std::fmt;
use std::str::FromStr;

/// Whether an angle enters an expansion as a number or as a placeholder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AngleMode {
    Fixed,
    Variable,
}

/// Selects which of `(θ0, θex, φ0, φex)` are fixed numbers and which stay
/// symbolic in a Legendre expansion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryMode {
    /// Independent choice for `θ0`, `θex`, `φ0` and `φex`, in that order.
    Bistatic([AngleMode; 4]),

    /// Backscatter geometry: `θex = θ0` with `θ0` symbolic, `φ0` fixed and
    /// `φex = φ0 + π`.
    ///
    /// NOTE: The exit angles of the supplied geometry are silently ignored
    /// in this mode; passing any value for them gives the same expansion.
    Monostatic,
}

impl GeometryMode {
    /// All four angles fixed.
    pub const FIXED: GeometryMode = GeometryMode::Bistatic([AngleMode::Fixed; 4]);

    /// All four angles symbolic.
    pub const VARIABLE: GeometryMode = GeometryMode::Bistatic([AngleMode::Variable; 4]);

    /// Returns the expressions used for `(θ0, θex, φ0, φex)`.
    ///
    /// * `geometry` - Values used for fixed slots.
    pub fn slots(&self, geometry: &Geometry) -> [Expr; 4] {
        match self {
            GeometryMode::Monostatic => [
                Expr::symbol(Symbol::Theta0),
                Expr::symbol(Symbol::Theta0),
                Expr::constant(geometry.phi_0),
                Expr::constant(geometry.phi_0 + PI),
            ],
            GeometryMode::Bistatic(modes) => {
                let values = [
                    (Symbol::Theta0, geometry.theta_0),
                    (Symbol::ThetaEx, geometry.theta_ex),
                    (Symbol::Phi0, geometry.phi_0),
                    (Symbol::PhiEx, geometry.phi_ex),
                ];
                let slot = |i: usize| match modes[i] {
                    AngleMode::Fixed => Expr::constant(values[i].1),
                    AngleMode::Variable => Expr::symbol(values[i].0),
                };
                [slot(0), slot(1), slot(2), slot(3)]
            }
        }
    }
}

impl FromStr for GeometryMode {
    type Err = Rt1Error;

    /// Parses `"mono"` or four characters of `f` (fixed) / `v` (variable)
    /// for `θ0`, `θex`, `φ0`, `φex`, e.g. `"vvff"`.
    ///
    /// * `s` - The geometry string.
    fn from_str(s: &str) -> Result<Self> {
        if s == "mono" {
            return Ok(GeometryMode::Monostatic);
        }

        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 {
            return Err(Rt1Error::InvalidParameter(format!(
                "geometry '{s}' must be 'mono' or 4 characters of 'f'/'v'"
            )));
        }

        let mut modes = [AngleMode::Fixed; 4];
        for (mode, c) in modes.iter_mut().zip(chars) {
            *mode = match c {
                'f' => AngleMode::Fixed,
                'v' => AngleMode::Variable,
                _ => {
                    return Err(Rt1Error::InvalidParameter(format!(
                        "wrong choice '{c}' in geometry '{s}'"
                    )))
                }
            };
        }
        Ok(GeometryMode::Bistatic(modes))
    }
}

impl fmt::Display for GeometryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryMode::Monostatic => write!(f, "mono"),
            GeometryMode::Bistatic(modes) => {
                for m in modes {
                    match m {
                        AngleMode::Fixed => write!(f, "f")?,
                        AngleMode::Variable => write!(f, "v")?,
                    }
                }
                Ok(())
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
