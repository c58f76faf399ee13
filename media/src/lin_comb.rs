//! Linear Combination of Phase Functions

use itertools::Itertools;
use rt1_core::common::*;
use rt1_core::error::*;
use rt1_core::expr::*;
use rt1_core::geometry::*;
use rt1_core::legendre::*;
use rt1_core::volume::*;
use std::sync::Arc;

/// Tolerance on the sum of the weights.
const NORMALIZATION_TOLERANCE: Float = 1e-8;

/// Weighted sum of phase functions. Members sharing the same generalized
/// angle parameters are merged into a single closed form description; the
/// Legendre expansion is the sum of one series per parameter class.
///
/// NOTE: Members are combined with the albedo and optical depth of the
/// combination; their own `omega` and `tau` are ignored.
#[derive(Clone, Debug)]
pub struct LinCombV {
    /// Single scattering albedo `ω` of the combination.
    omega: Float,

    /// Optical depth `τ` of the combination.
    tau: Float,

    /// Weighted sum of all member expressions.
    expression: Expr,

    /// One merged description per distinct set of angle parameters.
    classes: Vec<ScatteringFunction>,
}

impl LinCombV {
    /// Create a new `LinCombV`.
    ///
    /// * `omega`   - Single scattering albedo of the combination.
    /// * `tau`     - Optical depth of the combination.
    /// * `choices` - Pairs of weight and phase function. Weights must sum
    ///               to 1.
    pub fn new(omega: Float, tau: Float, choices: Vec<(Float, ArcPhaseFunction)>) -> Result<Self> {
        validate_medium(omega, tau)?;
        if choices.is_empty() {
            return Err(Rt1Error::MissingParameter(
                "linear combination needs at least one phase function".into(),
            ));
        }

        let total: Float = choices.iter().map(|(w, _)| w).sum();
        if !almost_equal(total, 1.0, NORMALIZATION_TOLERANCE) {
            return Err(Rt1Error::Normalization(format!(
                "weights of the linear combination sum to {total}, not 1"
            )));
        }

        let keys: Vec<_> = choices.iter().map(|(_, p)| p.angle_params().key()).unique().collect();
        let classes = keys
            .iter()
            .map(|key| {
                let members: Vec<(Float, ArcPhaseFunction)> = choices
                    .iter()
                    .filter(|(_, p)| p.angle_params().key() == *key)
                    .cloned()
                    .collect();
                combine_class(members)
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "combined {} phase functions into {} angle parameter classes",
            choices.len(),
            classes.len()
        );

        Ok(Self {
            omega,
            tau,
            expression: weighted_expression(&choices),
            classes,
        })
    }

    /// The merged description of each angle parameter class, in order of
    /// first appearance.
    pub fn classes(&self) -> &[ScatteringFunction] {
        &self.classes
    }
}

impl Volume for LinCombV {
    fn omega(&self) -> Float {
        self.omega
    }

    fn tau(&self) -> Float {
        self.tau
    }

    fn expression(&self) -> &Expr {
        &self.expression
    }

    /// Largest number of Legendre terms among the classes.
    fn ncoefs(&self) -> usize {
        self.classes.iter().map(|c| c.ncoefs).max().unwrap_or(0)
    }

    fn legexpansion(&self, geometry: &Geometry, mode: GeometryMode) -> Result<Expansion> {
        self.classes.iter().try_fold(Expansion::default(), |acc, c| {
            let series = volume_expansion(&*c.legcoefs, c.ncoefs, &c.a, geometry, mode)?;
            Ok(acc + Expansion::from(series))
        })
    }
}

/// Merges phase functions with identical angle parameters. Coefficients of
/// a member above its own `ncoefs` count as zero.
///
/// * `members` - Non-empty list of weights and phase functions.
fn combine_class(members: Vec<(Float, ArcPhaseFunction)>) -> Result<ScatteringFunction> {
    let a = members
        .first()
        .map(|(_, p)| p.angle_params())
        .ok_or_else(|| Rt1Error::MissingParameter("empty phase function class".into()))?;
    let ncoefs = members.iter().map(|(_, p)| p.ncoefs()).max().unwrap_or(0);
    let expression = weighted_expression(&members);
    let legcoefs: LegendreCoefficients = Arc::new(move |n| {
        members
            .iter()
            .filter(|(_, p)| n < p.ncoefs())
            .map(|(w, p)| w * p.legcoef(n))
            .sum()
    });
    ScatteringFunction::new(expression, legcoefs, ncoefs, a)
}

/// Returns `Σ w_i p_i` over the expressions.
///
/// * `members` - Weights and phase functions.
fn weighted_expression(members: &[(Float, ArcPhaseFunction)]) -> Expr {
    members
        .iter()
        .map(|(w, p)| *w * p.expression().clone())
        .reduce(|acc, e| acc + e)
        .unwrap_or(Expr::Const(0.0))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;
    use float_cmp::*;

    fn rayleigh() -> ArcPhaseFunction {
        Arc::new(Rayleigh::new(0.1, 0.1).unwrap())
    }

    fn hg(t: Float, ncoefs: usize, a: AngleParams) -> ArcPhaseFunction {
        Arc::new(HenyeyGreenstein::new(0.9, 2.0, t, ncoefs, a).unwrap())
    }

    #[test]
    fn weights_must_sum_to_one() {
        let r = LinCombV::new(
            0.3,
            0.7,
            vec![(0.5, rayleigh()), (0.6, hg(0.0, 1, AngleParams::VOLUME))],
        );
        assert!(matches!(r, Err(Rt1Error::Normalization(_))));

        let r = LinCombV::new(
            0.3,
            0.7,
            vec![(0.4, rayleigh()), (0.6, hg(0.0, 1, AngleParams::VOLUME))],
        );
        assert!(r.is_ok());
    }

    #[test]
    fn empty_combination_is_rejected() {
        assert!(matches!(
            LinCombV::new(0.3, 0.7, vec![]),
            Err(Rt1Error::MissingParameter(_))
        ));
    }

    #[test]
    fn combination_uses_its_own_medium() {
        let v = LinCombV::new(0.3, 0.7, vec![(1.0, rayleigh())]).unwrap();
        assert_eq!(v.omega(), 0.3);
        assert_eq!(v.tau(), 0.7);
        assert!(matches!(
            LinCombV::new(2.0, 0.7, vec![(1.0, rayleigh())]),
            Err(Rt1Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn same_angle_parameters_share_one_class() {
        let v = LinCombV::new(
            0.3,
            0.7,
            vec![(0.4, rayleigh()), (0.6, hg(0.3, 10, AngleParams::VOLUME))],
        )
        .unwrap();
        assert_eq!(v.classes().len(), 1);
        assert_eq!(v.ncoefs(), 10);

        // Rayleigh contributes only below its own three terms
        let c = &v.classes()[0];
        let expected = |n: usize| {
            let r = if n < 3 { 0.4 * rayleigh_legcoef(n) } else { 0.0 };
            r + 0.6 * hg_legcoef(0.3, n)
        };
        for n in 0..10 {
            assert!(approx_eq!(f64, c.legcoef(n), expected(n), epsilon = 1e-15));
        }

        let g = Geometry::new(0.2, 0.9, 0.0, 1.0);
        let e = v.legexpansion(&g, GeometryMode::FIXED).unwrap();
        assert_eq!(e.terms().len(), 1);
    }

    #[test]
    fn distinct_angle_parameters_keep_separate_series() {
        let a = AngleParams([-0.7, 1.0, 1.0]);
        let v = LinCombV::new(
            0.3,
            0.7,
            vec![
                (0.2, hg(0.2, 8, AngleParams::VOLUME)),
                (0.5, hg(0.4, 12, a)),
                (0.3, rayleigh()),
            ],
        )
        .unwrap();
        assert_eq!(v.classes().len(), 2);
        assert_eq!(v.classes()[0].a, AngleParams::VOLUME);
        assert_eq!(v.classes()[0].ncoefs, 8);
        assert_eq!(v.classes()[1].a, a);
        assert_eq!(v.ncoefs(), 12);

        let g = Geometry::new(0.3, 0.6, 0.2, 2.2);
        let e = v.legexpansion(&g, GeometryMode::FIXED).unwrap();
        assert_eq!(e.terms().len(), 2);

        // the sum of series equals the weighted sum of member expansions
        let b = Bindings::new().with(Symbol::ThetaS, 0.8).with(Symbol::PhiS, 0.1);
        let eval = |p: ArcPhaseFunction| {
            p.legexpansion(&g, GeometryMode::FIXED)
                .unwrap()
                .eval(&b)
                .unwrap()
        };
        let expected = 0.2 * eval(hg(0.2, 8, AngleParams::VOLUME))
            + 0.5 * eval(hg(0.4, 12, a))
            + 0.3 * eval(rayleigh());
        assert!(approx_eq!(f64, e.eval(&b).unwrap(), expected, epsilon = 1e-14));
    }

    #[test]
    fn expression_is_weighted_sum() {
        let v = LinCombV::new(
            0.3,
            0.7,
            vec![(0.25, rayleigh()), (0.75, hg(0.5, 4, AngleParams::VOLUME))],
        )
        .unwrap();
        let g = Geometry::new(0.5, 0.4, 0.3, 1.0);
        let expected = 0.25 * rayleigh().p(&g).unwrap()
            + 0.75 * hg(0.5, 4, AngleParams::VOLUME).p(&g).unwrap();
        assert!(approx_eq!(f64, v.p(&g).unwrap(), expected, epsilon = 1e-15));
    }
}
