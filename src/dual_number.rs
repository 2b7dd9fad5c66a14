//! Dual numbers.

use crate::error::{AlgebraError, Result};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A dual number `r + dε` with `ε² = 0`.
///
/// The norm of a dual quaternion is a dual number, which is where this type
/// is used in the crate.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct DualNumber {
    real: f64,
    dual: f64,
}

impl DualNumber {
    #[inline]
    pub const fn new(real: f64, dual: f64) -> Self {
        Self { real, dual }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    #[inline]
    pub const fn real(&self) -> f64 {
        self.real
    }

    #[inline]
    pub const fn dual(&self) -> f64 {
        self.dual
    }

    /// Returns the non-negative square root `√r + d/(2√r) ε`.
    ///
    /// # Errors
    /// Returns [`AlgebraError::NoRealSquareRoot`] if the real part is
    /// negative, or if it is zero while the dual part is not.
    pub fn sqrt(&self) -> Result<Self> {
        if self.real == 0.0 && self.dual == 0.0 {
            return Ok(Self::zero());
        }
        if self.real > 0.0 {
            let root = self.real.sqrt();
            Ok(Self::new(root, self.dual / (2.0 * root)))
        } else {
            Err(AlgebraError::NoRealSquareRoot { value: *self })
        }
    }

    /// Divides both parts by the given scalar.
    ///
    /// # Errors
    /// Returns [`AlgebraError::DivisionByZero`] if the divisor is zero.
    pub fn checked_div_scalar(&self, divisor: f64) -> Result<Self> {
        if divisor == 0.0 {
            return Err(AlgebraError::DivisionByZero {
                operation: "dual number scalar division",
            });
        }
        Ok(Self::new(self.real / divisor, self.dual / divisor))
    }

    /// Computes `self / divisor` using `(a + bε)/(c + dε) = a/c + (bc - ad)/c² ε`.
    ///
    /// # Errors
    /// Returns [`AlgebraError::DivisionByZero`] if the real part of the
    /// divisor is zero.
    pub fn checked_div(&self, divisor: &Self) -> Result<Self> {
        if divisor.real == 0.0 {
            return Err(AlgebraError::DivisionByZero {
                operation: "dual number division",
            });
        }
        let denominator = divisor.real * divisor.real;
        Ok(Self::new(
            (self.real * divisor.real) / denominator,
            (divisor.real * self.dual - divisor.dual * self.real) / denominator,
        ))
    }
}

impl fmt::Display for DualNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r: {}, d: {}", self.real, self.dual)
    }
}

impl_binop!(Add, add, DualNumber, DualNumber, DualNumber, |a, b| {
    DualNumber::new(a.real + b.real, a.dual + b.dual)
});

impl_binop!(Sub, sub, DualNumber, DualNumber, DualNumber, |a, b| {
    DualNumber::new(a.real - b.real, a.dual - b.dual)
});

impl_binop!(Mul, mul, DualNumber, DualNumber, DualNumber, |a, b| {
    DualNumber::new(a.real * b.real, a.real * b.dual + a.dual * b.real)
});

impl_scalar_mul!(DualNumber, |a, s| {
    DualNumber::new(a.real * s, a.dual * s)
});

impl_unary_op!(Neg, neg, DualNumber, DualNumber, |a| {
    DualNumber::new(-a.real, -a.dual)
});

impl_abs_diff_eq!(DualNumber, |a, b, epsilon| {
    a.real.abs_diff_eq(&b.real, epsilon) && a.dual.abs_diff_eq(&b.dual, epsilon)
});

impl_relative_eq!(DualNumber, |a, b, epsilon, max_relative| {
    a.real.relative_eq(&b.real, epsilon, max_relative)
        && a.dual.relative_eq(&b.dual, epsilon, max_relative)
});
