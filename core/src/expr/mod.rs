//! Symbolic Expressions
//!
//! A small expression tree over the six angles of the RT1 geometry. The same
//! builder functions (see `geometry::scat_angle`) run over plain `Float`
//! values and over `Expr`, so an expansion can keep some angles symbolic and
//! bind them later without being rebuilt.

use crate::common::*;
use crate::error::*;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

mod bindings;
mod scalar;

// Re-export
pub use bindings::*;
pub use scalar::*;

/// The angle placeholders an expression may refer to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// Incident zenith angle θ0.
    Theta0,
    /// Exit zenith angle θex.
    ThetaEx,
    /// Incident azimuth angle φ0.
    Phi0,
    /// Exit azimuth angle φex.
    PhiEx,
    /// Zenith angle of the intermediate scattering direction θs.
    ThetaS,
    /// Azimuth angle of the intermediate scattering direction φs.
    PhiS,
}

impl Symbol {
    /// All symbols in slot order.
    pub const ALL: [Symbol; 6] = [
        Symbol::Theta0,
        Symbol::ThetaEx,
        Symbol::Phi0,
        Symbol::PhiEx,
        Symbol::ThetaS,
        Symbol::PhiS,
    ];

    /// Returns the symbol name.
    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Theta0 => "theta_0",
            Symbol::ThetaEx => "theta_ex",
            Symbol::Phi0 => "phi_0",
            Symbol::PhiEx => "phi_ex",
            Symbol::ThetaS => "theta_s",
            Symbol::PhiS => "phi_s",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Expression tree node.
///
/// Constructors fold constants eagerly, so an expression built from fixed
/// angles collapses to `Const`.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Const(Float),
    Symbol(Symbol),
    Add(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Pow(Box<Expr>, Float),
    Cos(Box<Expr>),
    Sin(Box<Expr>),
}

impl Expr {
    /// Returns a placeholder expression for `symbol`.
    ///
    /// * `symbol` - The angle.
    pub fn symbol(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }

    /// Returns a constant expression.
    ///
    /// * `v` - The value.
    pub fn constant(v: Float) -> Self {
        Self::Const(v)
    }

    /// Raises the expression to a real power.
    ///
    /// * `p` - The exponent.
    pub fn powf(self, p: Float) -> Self {
        match self {
            Self::Const(v) => Self::Const(v.powf(p)),
            e if p == 1.0 => e,
            _ if p == 0.0 => Self::Const(1.0),
            e => Self::Pow(Box::new(e), p),
        }
    }

    /// Returns the cosine of the expression.
    pub fn cos(self) -> Self {
        match self {
            Self::Const(v) => Self::Const(v.cos()),
            e => Self::Cos(Box::new(e)),
        }
    }

    /// Returns the sine of the expression.
    pub fn sin(self) -> Self {
        match self {
            Self::Const(v) => Self::Const(v.sin()),
            e => Self::Sin(Box::new(e)),
        }
    }

    /// Returns `true` if `symbol` occurs anywhere in the expression.
    ///
    /// * `symbol` - The angle to look for.
    pub fn depends_on(&self, symbol: Symbol) -> bool {
        match self {
            Self::Const(_) => false,
            Self::Symbol(s) => *s == symbol,
            Self::Add(a, b) | Self::Mul(a, b) | Self::Div(a, b) => {
                a.depends_on(symbol) || b.depends_on(symbol)
            }
            Self::Neg(a) | Self::Pow(a, _) | Self::Cos(a) | Self::Sin(a) => a.depends_on(symbol),
        }
    }

    /// Returns the distinct symbols used by the expression in slot order.
    pub fn free_symbols(&self) -> Vec<Symbol> {
        Symbol::ALL
            .iter()
            .copied()
            .filter(|s| self.depends_on(*s))
            .collect()
    }

    /// Evaluates the expression numerically. Every symbol the expression uses
    /// must be bound, otherwise this fails with `MissingParameter`. NaN from
    /// out-of-range arguments propagates unchanged.
    ///
    /// * `bindings` - Angle values.
    pub fn eval(&self, bindings: &Bindings) -> Result<Float> {
        Ok(match self {
            Self::Const(v) => *v,
            Self::Symbol(s) => bindings.get(*s)?,
            Self::Add(a, b) => a.eval(bindings)? + b.eval(bindings)?,
            Self::Mul(a, b) => a.eval(bindings)? * b.eval(bindings)?,
            Self::Div(a, b) => a.eval(bindings)? / b.eval(bindings)?,
            Self::Neg(a) => -a.eval(bindings)?,
            Self::Pow(a, p) => a.eval(bindings)?.powf(*p),
            Self::Cos(a) => a.eval(bindings)?.cos(),
            Self::Sin(a) => a.eval(bindings)?.sin(),
        })
    }

    /// Replaces bound symbols by their values and folds constants. Symbols
    /// without a binding stay symbolic.
    ///
    /// * `bindings` - Angle values.
    pub fn substitute(&self, bindings: &Bindings) -> Self {
        match self {
            Self::Const(v) => Self::Const(*v),
            Self::Symbol(s) => match bindings.get(*s) {
                Ok(v) => Self::Const(v),
                Err(_) => Self::Symbol(*s),
            },
            Self::Add(a, b) => a.substitute(bindings) + b.substitute(bindings),
            Self::Mul(a, b) => a.substitute(bindings) * b.substitute(bindings),
            Self::Div(a, b) => a.substitute(bindings) / b.substitute(bindings),
            Self::Neg(a) => -a.substitute(bindings),
            Self::Pow(a, p) => a.substitute(bindings).powf(*p),
            Self::Cos(a) => a.substitute(bindings).cos(),
            Self::Sin(a) => a.substitute(bindings).sin(),
        }
    }
}

impl From<Float> for Expr {
    fn from(v: Float) -> Self {
        Self::Const(v)
    }
}

impl From<Symbol> for Expr {
    fn from(s: Symbol) -> Self {
        Self::Symbol(s)
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
            (Expr::Const(z), e) | (e, Expr::Const(z)) if z == 0.0 => e,
            (a, b) => Expr::Add(Box::new(a), Box::new(b)),
        }
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        self + (-rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
            (Expr::Const(z), _) | (_, Expr::Const(z)) if z == 0.0 => Expr::Const(0.0),
            (Expr::Const(o), e) | (e, Expr::Const(o)) if o == 1.0 => e,
            (a, b) => Expr::Mul(Box::new(a), Box::new(b)),
        }
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a / b),
            (e, Expr::Const(o)) if o == 1.0 => e,
            (a, b) => Expr::Div(Box::new(a), Box::new(b)),
        }
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        match self {
            Expr::Const(v) => Expr::Const(-v),
            Expr::Neg(e) => *e,
            e => Expr::Neg(Box::new(e)),
        }
    }
}

impl Add<Float> for Expr {
    type Output = Expr;

    fn add(self, rhs: Float) -> Expr {
        self + Expr::Const(rhs)
    }
}

impl Sub<Float> for Expr {
    type Output = Expr;

    fn sub(self, rhs: Float) -> Expr {
        self + Expr::Const(-rhs)
    }
}

impl Mul<Float> for Expr {
    type Output = Expr;

    fn mul(self, rhs: Float) -> Expr {
        self * Expr::Const(rhs)
    }
}

impl Mul<Expr> for Float {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::Const(self) * rhs
    }
}

impl Add<Expr> for Float {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::Const(self) + rhs
    }
}

impl Sub<Expr> for Float {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::Const(self) - rhs
    }
}

impl Div<Expr> for Float {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::Const(self) / rhs
    }
}

impl fmt::Display for Expr {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(v) => write!(f, "{v}"),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Add(a, b) => write!(f, "({a} + {b})"),
            Self::Mul(a, b) => write!(f, "{a}*{b}"),
            Self::Div(a, b) => write!(f, "{a}/({b})"),
            Self::Neg(a) => write!(f, "-{a}"),
            Self::Pow(a, p) => write!(f, "({a})**{p}"),
            Self::Cos(a) => write!(f, "cos({a})"),
            Self::Sin(a) => write!(f, "sin({a})"),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
