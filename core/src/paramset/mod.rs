//! Parameter Sets

use crate::common::*;
use crate::error::*;
use std::collections::HashMap;
use std::fmt;

mod paramset_item;

// Re-export
pub use paramset_item::*;

/// Default signed integer to 64-bit.
pub type Int = i64;

/// A hashmap of parameter sets stored by name.
pub type ParamSetMap<T> = HashMap<String, ParamSetItem<T>>;

/// Stores named parameters used to construct scattering models, the keyword
/// arguments of a model description.
#[derive(Clone, Default)]
pub struct ParamSet {
    pub ints: ParamSetMap<Int>,
    pub floats: ParamSetMap<Float>,
}

/// Define a macro that can be used to generate a function for adding/replacing
/// parameter set item.
macro_rules! paramset_add {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&mut self, name: &str, values: &[$t]) -> &mut Self {
            self.$paramset
                .insert(String::from(name), ParamSetItem::new(values.to_vec()));
            self
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a single item.
macro_rules! paramset_find_one {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&self, name: &str) -> Option<$t> {
            match self.$paramset.get(name) {
                Some(param) if param.values.len() == 1 => Some(param.values[0]),
                _ => None,
            }
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a list.
macro_rules! paramset_find {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&self, name: &str) -> Option<Vec<$t>> {
            self.$paramset.get(name).map(|param| param.values.clone())
        }
    };
}

impl ParamSet {
    /// Returns a new `ParamSet`.
    pub fn new() -> Self {
        Self::default()
    }

    paramset_find_one!(find_one_int, Int, ints);
    paramset_find!(find_int, Int, ints);
    paramset_add!(add_int, Int, ints);

    paramset_find_one!(find_one_float, Float, floats);
    paramset_find!(find_float, Float, floats);
    paramset_add!(add_float, Float, floats);

    /// Returns a single float parameter or `MissingParameter`.
    ///
    /// * `name` - Parameter name.
    pub fn require_one_float(&self, name: &str) -> Result<Float> {
        self.find_one_float(name)
            .ok_or_else(|| Rt1Error::MissingParameter(format!("'{name}' needs to be provided")))
    }

    /// Returns a single float parameter or the given default.
    ///
    /// * `name`    - Parameter name.
    /// * `default` - Value used when the parameter is absent.
    pub fn find_one_float_or(&self, name: &str, default: Float) -> Float {
        self.find_one_float(name).unwrap_or(default)
    }

    /// Returns the number of Legendre coefficients stored under `name`.
    /// Absent values yield `MissingParameter` and non-positive values yield
    /// `InvalidParameter`.
    ///
    /// * `name` - Parameter name.
    pub fn require_ncoefs(&self, name: &str) -> Result<usize> {
        let n = self.find_one_int(name).ok_or_else(|| {
            Rt1Error::MissingParameter(format!(
                "number of coefficients '{name}' needs to be specified"
            ))
        })?;
        if n <= 0 {
            return Err(Rt1Error::InvalidParameter(format!(
                "'{name}' must be positive, got {n}"
            )));
        }
        Ok(n as usize)
    }
}

impl fmt::Display for ParamSet {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.ints.keys().chain(self.floats.keys()).collect();
        names.sort();
        write!(f, "[ParamSet")?;
        for name in names {
            if let Some(item) = self.ints.get(name) {
                write!(f, " \"integer {name}\" {item}")?;
            } else if let Some(item) = self.floats.get(name) {
                write!(f, " \"float {name}\" {item}")?;
            }
        }
        write!(f, "]")
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_one_float_requires_single_value() {
        let mut ps = ParamSet::new();
        ps.add_float("t", &[0.3]).add_float("a", &[-1.0, 1.0, 1.0]);
        assert_eq!(ps.find_one_float("t"), Some(0.3));
        assert_eq!(ps.find_one_float("a"), None);
        assert_eq!(ps.find_float("a"), Some(vec![-1.0, 1.0, 1.0]));
    }

    #[test]
    fn require_one_float_reports_missing_parameter() {
        let ps = ParamSet::new();
        assert!(matches!(
            ps.require_one_float("t"),
            Err(Rt1Error::MissingParameter(_))
        ));
    }

    #[test]
    fn require_ncoefs_validates_sign() {
        let mut ps = ParamSet::new();
        assert!(matches!(ps.require_ncoefs("ncoefs"), Err(Rt1Error::MissingParameter(_))));

        ps.add_int("ncoefs", &[0]);
        assert!(matches!(ps.require_ncoefs("ncoefs"), Err(Rt1Error::InvalidParameter(_))));

        ps.add_int("ncoefs", &[12]);
        assert_eq!(ps.require_ncoefs("ncoefs"), Ok(12));
    }

    #[test]
    fn display_lists_parameters_in_name_order() {
        let mut ps = ParamSet::new();
        ps.add_int("ncoefs", &[3]).add_float("t", &[0.5]);
        assert_eq!(format!("{ps}"), "[ParamSet \"integer ncoefs\" [3] \"float t\" [0.5]]");
    }
}
