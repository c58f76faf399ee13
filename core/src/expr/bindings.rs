//! Symbol Bindings

use super::Symbol;
use crate::common::*;
use crate::error::*;

/// Numeric values for some or all of the angle placeholders.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    values: [Option<Float>; 6],
}

impl Bindings {
    /// Returns an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `symbol` bound to `value`.
    ///
    /// * `symbol` - The angle.
    /// * `value`  - Angle in radians.
    pub fn with(mut self, symbol: Symbol, value: Float) -> Self {
        self.set(symbol, value);
        self
    }

    /// Binds `symbol` to `value`.
    ///
    /// * `symbol` - The angle.
    /// * `value`  - Angle in radians.
    pub fn set(&mut self, symbol: Symbol, value: Float) {
        self.values[symbol as usize] = Some(value);
    }

    /// Returns the value bound to `symbol`.
    ///
    /// * `symbol` - The angle.
    pub fn get(&self, symbol: Symbol) -> Result<Float> {
        self.values[symbol as usize]
            .ok_or_else(|| Rt1Error::MissingParameter(format!("no value bound to '{symbol}'")))
    }
}
