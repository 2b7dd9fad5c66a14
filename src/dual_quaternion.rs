//! Dual quaternions.

use crate::{
    Vector3,
    dual_number::DualNumber,
    error::{AlgebraError, Result},
    quaternion::Quaternion,
};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A dual quaternion `A + εB` with real part `A` and dual part `B`.
///
/// A unit dual quaternion (`A` is a unit quaternion orthogonal to `B`)
/// represents the rigid transform that rotates by `A` and then translates by
/// `t`, where `B = ½ t A` with `t` taken as a pure quaternion. Other dual
/// quaternions are valid algebraic values (sums, scalar multiples) but are
/// rejected by the operations that interpret them as transforms.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct DualQuaternion {
    real: Quaternion,
    dual: Quaternion,
}

impl DualQuaternion {
    #[inline]
    pub fn new(real: impl Into<Quaternion>, dual: impl Into<Quaternion>) -> Self {
        Self {
            real: real.into(),
            dual: dual.into(),
        }
    }

    /// The identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::new(Quaternion::identity(), Quaternion::zero())
    }

    /// Creates the dual quaternion for rotating by `rotation` and then
    /// translating by `translation`, i.e. `rotation + ε ½ translation rotation`.
    ///
    /// The translation may be given as a pure quaternion or as anything that
    /// converts into one, such as a [`Vector3`] or `[f64; 3]`.
    ///
    /// # Errors
    /// Returns [`AlgebraError::NonPureQuaternion`] if the translation has a
    /// nonzero scalar part and [`AlgebraError::NonUnitQuaternion`] if the
    /// rotation is not a unit quaternion.
    pub fn from_trans(translation: impl Into<Quaternion>, rotation: Quaternion) -> Result<Self> {
        let translation = translation.into();
        if !translation.is_pure() {
            return Err(AlgebraError::NonPureQuaternion {
                quaternion: translation,
            });
        }
        rotation.require_unit()?;
        Ok(Self::from_pure_translation_and_rotation(
            &translation,
            rotation,
        ))
    }

    pub(crate) fn from_translation_and_rotation(translation: &Vector3, rotation: Quaternion) -> Self {
        Self::from_pure_translation_and_rotation(&Quaternion::from_imag(*translation), rotation)
    }

    fn from_pure_translation_and_rotation(translation: &Quaternion, rotation: Quaternion) -> Self {
        Self::new(rotation, 0.5 * translation * rotation)
    }

    #[inline]
    pub fn real(&self) -> Quaternion {
        self.real
    }

    #[inline]
    pub fn dual(&self) -> Quaternion {
        self.dual
    }

    /// Decomposes this unit dual quaternion into its translation vector and
    /// rotation quaternion.
    ///
    /// # Errors
    /// Returns [`AlgebraError::NonUnitDualQuaternion`] if this is not a unit
    /// dual quaternion.
    pub fn as_trans(&self) -> Result<(Vector3, Quaternion)> {
        self.require_unit()?;
        let translation = (2.0 * self.dual * self.real.conjugate()).imag();
        Ok((translation, self.real))
    }

    /// Applies the rigid transform to the given point.
    ///
    /// # Errors
    /// Returns [`AlgebraError::NonUnitDualQuaternion`] if this is not a unit
    /// dual quaternion.
    pub fn transform_point(&self, point: &Vector3) -> Result<Vector3> {
        let (translation, rotation) = self.as_trans()?;
        Ok(rotation.rot_apply(point)? + translation)
    }

    /// `A + εB -> A* + εB*`
    #[inline]
    pub fn quaternion_conjugate(&self) -> Self {
        Self::new(self.real.conjugate(), self.dual.conjugate())
    }

    /// `A + εB -> A - εB`
    #[inline]
    pub fn dual_number_conjugate(&self) -> Self {
        Self::new(self.real, -self.dual)
    }

    /// `A + εB -> A* - εB*`
    #[inline]
    pub fn total_conjugate(&self) -> Self {
        self.quaternion_conjugate().dual_number_conjugate()
    }

    /// Returns `A* - ε A* B A*`, the inverse of a unit dual quaternion.
    #[inline]
    pub fn inverse(&self) -> Self {
        let real_conjugate = self.real.conjugate();
        Self::new(
            real_conjugate,
            -(real_conjugate * self.dual * real_conjugate),
        )
    }

    #[inline]
    pub fn negated(&self) -> Self {
        Self::new(-self.real, -self.dual)
    }

    /// Computes the dual-number norm as the square root of the scalar parts
    /// of `q q*`.
    ///
    /// # Errors
    /// Returns [`AlgebraError::NoRealSquareRoot`] if the squared norm has no
    /// real square root.
    pub fn norm(&self) -> Result<DualNumber> {
        let squared = self * self.quaternion_conjugate();
        DualNumber::new(squared.real.w(), squared.dual.w()).sqrt()
    }

    #[inline]
    pub fn is_unit(&self) -> bool {
        self.real.is_unit() && self.real.is_orth(&self.dual)
    }

    pub(crate) fn require_unit(&self) -> Result<()> {
        if self.is_unit() {
            Ok(())
        } else {
            Err(AlgebraError::NonUnitDualQuaternion {
                dual_quaternion: *self,
            })
        }
    }
}

impl Default for DualQuaternion {
    fn default() -> Self {
        Self::new(Quaternion::identity(), Quaternion::identity())
    }
}

impl fmt::Display for DualQuaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r: ({}); d: ({})", self.real, self.dual)
    }
}

impl_binop!(
    Add,
    add,
    DualQuaternion,
    DualQuaternion,
    DualQuaternion,
    |a, b| { DualQuaternion::new(a.real + b.real, a.dual + b.dual) }
);

impl_binop!(
    Sub,
    sub,
    DualQuaternion,
    DualQuaternion,
    DualQuaternion,
    |a, b| { DualQuaternion::new(a.real - b.real, a.dual - b.dual) }
);

impl_binop!(
    Mul,
    mul,
    DualQuaternion,
    DualQuaternion,
    DualQuaternion,
    |a, b| { DualQuaternion::new(a.real * b.real, a.real * b.dual + a.dual * b.real) }
);

impl_scalar_mul!(DualQuaternion, |a, s| {
    DualQuaternion::new(s * a.real, s * a.dual)
});

impl_binop!(Div, div, DualQuaternion, f64, DualQuaternion, |a, s| {
    DualQuaternion::new(a.real / *s, a.dual / *s)
});

impl_unary_op!(Neg, neg, DualQuaternion, DualQuaternion, |a| {
    a.negated()
});

impl_abs_diff_eq!(DualQuaternion, |a, b, epsilon| {
    a.real.abs_diff_eq(&b.real, epsilon) && a.dual.abs_diff_eq(&b.dual, epsilon)
});

impl_relative_eq!(DualQuaternion, |a, b, epsilon, max_relative| {
    a.real.relative_eq(&b.real, epsilon, max_relative)
        && a.dual.relative_eq(&b.dual, epsilon, max_relative)
});
