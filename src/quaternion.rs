//! Quaternions.

use crate::{
    Vector3,
    consts::{ORTHOGONALITY_TOLERANCE, UNIT_TOLERANCE},
    error::{AlgebraError, Result},
};
use bytemuck::{Pod, Zeroable};
use std::{f64::consts::TAU, fmt};

/// A quaternion `w + xi + yj + zk`, stored scalar first.
///
/// Unit quaternions represent rotations, pure quaternions (`w = 0`) represent
/// vectors. Multiplication is the non-commutative Hamilton product.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct Quaternion {
    inner: nalgebra::Quaternion<f64>,
}

impl Quaternion {
    #[inline]
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            inner: nalgebra::Quaternion::new(w, x, y, z),
        }
    }

    #[inline]
    pub fn from_parts(real: f64, imag: Vector3) -> Self {
        Self {
            inner: nalgebra::Quaternion::from_parts(real, imag),
        }
    }

    /// Creates the pure quaternion `(0, imag)`.
    #[inline]
    pub fn from_imag(imag: Vector3) -> Self {
        Self::from_parts(0.0, imag)
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            inner: nalgebra::Quaternion::identity(),
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Creates the unit quaternion `(cos(θ/2), u sin(θ/2))` rotating by
    /// `theta` radians about `axis`.
    ///
    /// The axis is normalized here, so it only has to point in the right
    /// direction.
    ///
    /// # Errors
    /// Returns [`AlgebraError::DivisionByZero`] if the axis is the zero
    /// vector.
    pub fn from_axis(theta: f64, axis: &Vector3) -> Result<Self> {
        let axis_norm = axis.norm();
        if axis_norm == 0.0 {
            return Err(AlgebraError::DivisionByZero {
                operation: "normalization of rotation axis",
            });
        }
        let half_angle = 0.5 * theta;
        Ok(Self::from_parts(
            half_angle.cos(),
            axis * (half_angle.sin() / axis_norm),
        ))
    }

    #[inline]
    pub fn w(&self) -> f64 {
        self.inner.w
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.inner.i
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.inner.j
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.inner.k
    }

    #[inline]
    pub fn real(&self) -> f64 {
        self.inner.w
    }

    #[inline]
    pub fn imag(&self) -> Vector3 {
        self.inner.imag()
    }

    /// Returns the components in scalar-first order `[w, x, y, z]`.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.w(), self.x(), self.y(), self.z()]
    }

    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            inner: self.inner.conjugate(),
        }
    }

    #[inline]
    pub fn negated(&self) -> Self {
        Self { inner: -self.inner }
    }

    /// The Euclidean norm of the four components.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.inner.norm()
    }

    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.inner.norm_squared()
    }

    /// The 4-D Euclidean dot product of the components of the two
    /// quaternions.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.inner.dot(&other.inner)
    }

    /// Returns this quaternion divided by its norm.
    ///
    /// # Errors
    /// Returns [`AlgebraError::DivisionByZero`] for the zero quaternion.
    pub fn normalized(&self) -> Result<Self> {
        let norm = self.norm();
        if norm == 0.0 {
            return Err(AlgebraError::DivisionByZero {
                operation: "quaternion normalization",
            });
        }
        Ok(self / norm)
    }

    /// Returns the multiplicative inverse `q̄ / |q|²`, which reduces to the
    /// conjugate for unit quaternions.
    ///
    /// # Errors
    /// Returns [`AlgebraError::DivisionByZero`] for the zero quaternion.
    pub fn inverse(&self) -> Result<Self> {
        let norm_squared = self.norm_squared();
        if norm_squared == 0.0 {
            return Err(AlgebraError::DivisionByZero {
                operation: "quaternion inversion",
            });
        }
        Ok(self.conjugate() / norm_squared)
    }

    #[inline]
    pub fn is_pure(&self) -> bool {
        self.w() == 0.0
    }

    #[inline]
    pub fn is_unit(&self) -> bool {
        (self.norm() - 1.0).abs() <= UNIT_TOLERANCE
    }

    #[inline]
    pub fn is_orth(&self, other: &Self) -> bool {
        self.dot(other).abs() <= ORTHOGONALITY_TOLERANCE
    }

    /// Rotates the given vector by this quaternion, computing the vector part
    /// of `q (0, v) q̄`.
    ///
    /// # Errors
    /// Returns [`AlgebraError::NonUnitQuaternion`] if this is not a unit
    /// quaternion.
    pub fn rot_apply(&self, vector: &Vector3) -> Result<Vector3> {
        self.require_unit()?;
        Ok((self * Self::from_imag(*vector) * self.conjugate()).imag())
    }

    /// Decomposes this unit quaternion into a rotation angle in `[0, 2π]` and
    /// a unit rotation axis.
    ///
    /// Rotations by `0` or `2π` have no defined axis and yield the zero
    /// vector as axis.
    ///
    /// # Errors
    /// Returns [`AlgebraError::NonUnitQuaternion`] if this is not a unit
    /// quaternion.
    pub fn as_axis(&self) -> Result<(f64, Vector3)> {
        self.require_unit()?;

        if (self.w().abs() - 1.0).abs() <= UNIT_TOLERANCE {
            let angle = if self.w() > 0.0 { 0.0 } else { TAU };
            return Ok((angle, Vector3::zeros()));
        }

        let half_angle = self.w().clamp(-1.0, 1.0).acos();
        let axis = self.imag() / half_angle.sin();

        Ok((2.0 * half_angle, axis))
    }

    pub(crate) fn require_unit(&self) -> Result<()> {
        if self.is_unit() {
            Ok(())
        } else {
            Err(AlgebraError::NonUnitQuaternion { quaternion: *self })
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from([w, x, y, z]: [f64; 4]) -> Self {
        Self::new(w, x, y, z)
    }
}

impl From<[f64; 3]> for Quaternion {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(0.0, x, y, z)
    }
}

impl From<Vector3> for Quaternion {
    fn from(imag: Vector3) -> Self {
        Self::from_imag(imag)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "w: {}, x: {}, y: {}, z: {}",
            self.w(),
            self.x(),
            self.y(),
            self.z()
        )
    }
}

impl_binop!(Add, add, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion {
        inner: a.inner + b.inner,
    }
});

impl_binop!(Sub, sub, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion {
        inner: a.inner - b.inner,
    }
});

impl_binop!(Mul, mul, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion {
        inner: a.inner * b.inner,
    }
});

impl_scalar_mul!(Quaternion, |a, s| {
    Quaternion {
        inner: a.inner * s,
    }
});

impl_binop!(Div, div, Quaternion, f64, Quaternion, |a, s| {
    Quaternion {
        inner: a.inner / *s,
    }
});

impl_unary_op!(Neg, neg, Quaternion, Quaternion, |a| { a.negated() });

impl_abs_diff_eq!(Quaternion, |a, b, epsilon| {
    a.inner.abs_diff_eq(&b.inner, epsilon)
});

impl_relative_eq!(Quaternion, |a, b, epsilon, max_relative| {
    a.inner.relative_eq(&b.inner, epsilon, max_relative)
});

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use crate::error::ErrorKind;
    use approx::{abs_diff_eq, assert_abs_diff_eq};
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const EPSILON: f64 = 1e-12;

    prop_compose! {
        fn unit_quaternion_strategy()(
            angle in 0.0..PI,
            phi in 0.0..(2.0 * PI),
            theta in 0.0..PI,
        ) -> Quaternion {
            let axis = Vector3::new(phi.cos() * theta.sin(), phi.sin() * theta.sin(), theta.cos());
            Quaternion::from_axis(angle, &axis).unwrap()
        }
    }

    prop_compose! {
        fn quaternion_strategy(max_component: f64)(
            w in -max_component..max_component,
            x in -max_component..max_component,
            y in -max_component..max_component,
            z in -max_component..max_component,
        ) -> Quaternion {
            Quaternion::new(w, x, y, z)
        }
    }

    prop_compose! {
        fn vector_strategy(max_component: f64)(
            x in -max_component..max_component,
            y in -max_component..max_component,
            z in -max_component..max_component,
        ) -> Vector3 {
            Vector3::new(x, y, z)
        }
    }

    #[test]
    fn quaternion_from_parts_works() {
        let quat = Quaternion::from_parts(1.0, Vector3::new(2.0, 3.0, 4.0));

        assert_eq!(quat.w(), 1.0);
        assert_eq!(quat.x(), 2.0);
        assert_eq!(quat.y(), 3.0);
        assert_eq!(quat.z(), 4.0);
        assert_eq!(quat.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn quaternion_from_array_is_scalar_first() {
        let quat = Quaternion::from([0.5, -0.5, 0.25, 0.125]);
        assert_eq!(quat, Quaternion::new(0.5, -0.5, 0.25, 0.125));
    }

    #[test]
    fn vectors_lift_to_pure_quaternions() {
        let quat = Quaternion::from([1.0, 2.0, 3.0]);
        assert!(quat.is_pure());
        assert_eq!(quat.imag(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(Quaternion::from(Vector3::new(1.0, 2.0, 3.0)), quat);
    }

    #[test]
    fn default_quaternion_is_identity() {
        assert_eq!(Quaternion::default(), Quaternion::identity());
    }

    #[test]
    fn hamilton_product_follows_scalar_first_sign_convention() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let p = Quaternion::new(5.0, 6.0, 7.0, 8.0);

        let expected = Quaternion::new(
            1.0 * 5.0 - 2.0 * 6.0 - 3.0 * 7.0 - 4.0 * 8.0,
            1.0 * 6.0 + 2.0 * 5.0 + 3.0 * 8.0 - 4.0 * 7.0,
            1.0 * 7.0 - 2.0 * 8.0 + 3.0 * 5.0 + 4.0 * 6.0,
            1.0 * 8.0 + 2.0 * 7.0 - 3.0 * 6.0 + 4.0 * 5.0,
        );
        assert_eq!(q * p, expected);
    }

    #[test]
    fn basis_units_multiply_as_hamilton_quaternions() {
        let i = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 0.0, 1.0);
        let minus_one = Quaternion::new(-1.0, 0.0, 0.0, 0.0);

        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert_eq!(i * i, minus_one);
        assert_eq!(i * j * k, minus_one);
    }

    #[test]
    fn addition_and_subtraction_are_componentwise() {
        let q1 = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let q2 = Quaternion::new(2.0, 1.0, 1.0, 1.0);

        assert_eq!(&q1 + &q2, Quaternion::new(3.0, 3.0, 4.0, 5.0));
        assert_eq!(q1 - q2, Quaternion::new(-1.0, 1.0, 2.0, 3.0));
    }

    #[test]
    fn scalar_multiplication_commutes() {
        let q = Quaternion::new(1.0, -2.0, 3.0, -4.0);

        assert_eq!(2.0 * q, q * 2.0);
        assert_eq!(2.0 * &q, Quaternion::new(2.0, -4.0, 6.0, -8.0));
        assert_eq!(q / 2.0, Quaternion::new(0.5, -1.0, 1.5, -2.0));
    }

    #[test]
    fn conjugate_negates_vector_part() {
        let q = Quaternion::new(1.0, 2.0, -3.0, 4.0);
        assert_eq!(q.conjugate(), Quaternion::new(1.0, -2.0, 3.0, -4.0));
    }

    #[test]
    fn norm_is_euclidean() {
        let q = Quaternion::new(1.0, 2.0, 2.0, 4.0);
        assert_abs_diff_eq!(q.norm(), 5.0, epsilon = EPSILON);
        assert_abs_diff_eq!(q.norm_squared(), 25.0, epsilon = EPSILON);
    }

    #[test]
    fn normalized_quaternion_is_unit() {
        let q = Quaternion::new(0.0, 0.0, 0.0, -3.0).normalized().unwrap();
        assert!(q.is_unit());
        assert_abs_diff_eq!(q, Quaternion::new(0.0, 0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn normalizing_zero_quaternion_fails() {
        let error = Quaternion::zero().normalized().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Singularity);
    }

    #[test]
    fn inverse_of_non_unit_quaternion_is_true_inverse() {
        let q = Quaternion::new(2.0, -1.0, 0.5, 3.0);
        let inverse = q.inverse().unwrap();

        assert_abs_diff_eq!(q * inverse, Quaternion::identity(), epsilon = EPSILON);
        assert_abs_diff_eq!(inverse * q, Quaternion::identity(), epsilon = EPSILON);
    }

    #[test]
    fn inverse_of_unit_quaternion_is_conjugate() {
        let q = Quaternion::from_axis(1.2, &Vector3::new(1.0, 2.0, -1.0)).unwrap();
        assert_abs_diff_eq!(q.inverse().unwrap(), q.conjugate(), epsilon = EPSILON);
    }

    #[test]
    fn inverting_zero_quaternion_fails() {
        assert!(Quaternion::zero().inverse().is_err());
    }

    #[test]
    fn predicates_work() {
        assert!(Quaternion::new(0.0, 1.0, 2.0, 3.0).is_pure());
        assert!(!Quaternion::identity().is_pure());
        assert!(Quaternion::identity().is_unit());
        assert!(!Quaternion::new(1.0, 1.0, 0.0, 0.0).is_unit());
        assert!(Quaternion::identity().is_orth(&Quaternion::new(0.0, 1.0, 0.0, 0.0)));
        assert!(!Quaternion::identity().is_orth(&Quaternion::new(-0.5, 1.0, 0.0, 0.0)));
    }

    #[test]
    fn rotating_x_axis_quarter_turn_about_z_gives_y_axis() {
        let q = Quaternion::from_axis(FRAC_PI_2, &Vector3::z()).unwrap();
        let rotated = q.rot_apply(&Vector3::x()).unwrap();
        assert_abs_diff_eq!(rotated, Vector3::y(), epsilon = EPSILON);
    }

    #[test]
    fn rotating_with_non_unit_quaternion_fails() {
        let error = Quaternion::new(2.0, 0.0, 0.0, 0.0)
            .rot_apply(&Vector3::x())
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Domain);
    }

    #[test]
    fn from_axis_of_quarter_turn_about_z_works() {
        let q = Quaternion::from_axis(FRAC_PI_2, &Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_abs_diff_eq!(
            q,
            Quaternion::new(FRAC_PI_4.cos(), 0.0, 0.0, FRAC_PI_4.sin()),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(q.w(), 0.7071067811865476, epsilon = EPSILON);
    }

    #[test]
    fn from_axis_normalizes_axis() {
        let q1 = Quaternion::from_axis(0.7, &Vector3::new(0.0, 3.0, 4.0)).unwrap();
        let q2 = Quaternion::from_axis(0.7, &Vector3::new(0.0, 0.6, 0.8)).unwrap();
        assert_abs_diff_eq!(q1, q2, epsilon = EPSILON);
    }

    #[test]
    fn from_axis_with_zero_axis_fails() {
        assert!(Quaternion::from_axis(1.0, &Vector3::zeros()).is_err());
    }

    #[test]
    fn as_axis_of_quarter_turn_about_z_works() {
        let q = Quaternion::new(FRAC_PI_4.cos(), 0.0, 0.0, FRAC_PI_4.sin());
        let (theta, axis) = q.as_axis().unwrap();
        assert_abs_diff_eq!(theta, FRAC_PI_2, epsilon = EPSILON);
        assert_abs_diff_eq!(axis, Vector3::z(), epsilon = EPSILON);
    }

    #[test]
    fn as_axis_of_identity_is_zero_angle_and_zero_axis() {
        let q0 = Quaternion::new(1.0, 0.0, 0.0, 0.0).normalized().unwrap();
        let (theta, axis) = q0.as_axis().unwrap();
        assert_eq!(theta, 0.0);
        assert_eq!(axis, Vector3::zeros());
    }

    #[test]
    fn as_axis_of_full_turn_is_full_angle_and_zero_axis() {
        let (theta, axis) = Quaternion::new(-1.0, 0.0, 0.0, 0.0).as_axis().unwrap();
        assert_abs_diff_eq!(theta, 2.0 * PI, epsilon = EPSILON);
        assert_eq!(axis, Vector3::zeros());
    }

    #[test]
    fn as_axis_of_half_turn_works() {
        let q1 = Quaternion::new(0.0, 0.0, 0.0, -1.0).normalized().unwrap();
        let (theta, axis) = q1.as_axis().unwrap();
        assert_abs_diff_eq!(theta, PI, epsilon = EPSILON);
        assert_abs_diff_eq!(axis, -Vector3::z(), epsilon = EPSILON);
    }

    #[test]
    fn as_axis_of_non_unit_quaternion_fails() {
        assert!(Quaternion::new(1.0, 1.0, 1.0, 1.0).as_axis().is_err());
    }

    #[test]
    fn display_lists_components() {
        assert_eq!(
            Quaternion::new(1.0, 2.0, 3.5, -4.0).to_string(),
            "w: 1, x: 2, y: 3.5, z: -4"
        );
    }

    proptest! {
        #[test]
        fn identity_is_neutral_for_multiplication(q in quaternion_strategy(1e2)) {
            prop_assert_eq!(q * Quaternion::identity(), q);
            prop_assert_eq!(Quaternion::identity() * q, q);
        }
    }

    proptest! {
        #[test]
        fn unit_quaternion_times_conjugate_is_identity(q in unit_quaternion_strategy()) {
            prop_assert!(abs_diff_eq!(q * q.conjugate(), Quaternion::identity(), epsilon = 1e-12));
        }
    }

    proptest! {
        #[test]
        fn rotation_preserves_length(
            q in unit_quaternion_strategy(),
            v in vector_strategy(1e2),
        ) {
            let rotated = q.rot_apply(&v).unwrap();
            prop_assert!(abs_diff_eq!(rotated.norm(), v.norm(), epsilon = 1e-9));
        }
    }

    proptest! {
        #[test]
        fn rotation_matches_nalgebra(
            q in unit_quaternion_strategy(),
            v in vector_strategy(1e2),
        ) {
            let reference = nalgebra::UnitQuaternion::new_normalize(q.inner).transform_vector(&v);
            prop_assert!(abs_diff_eq!(q.rot_apply(&v).unwrap(), reference, epsilon = 1e-9));
        }
    }

    proptest! {
        #[test]
        fn axis_angle_round_trip_recovers_quaternion(q in unit_quaternion_strategy()) {
            prop_assume!((q.w().abs() - 1.0).abs() > 1e-6);
            let (theta, axis) = q.as_axis().unwrap();
            let recovered = Quaternion::from_axis(theta, &axis).unwrap();
            prop_assert!(
                abs_diff_eq!(recovered, q, epsilon = 1e-9)
                    || abs_diff_eq!(recovered, -q, epsilon = 1e-9)
            );
        }
    }

    proptest! {
        #[test]
        fn product_of_unit_quaternions_is_unit(
            q in unit_quaternion_strategy(),
            p in unit_quaternion_strategy(),
        ) {
            prop_assert!((q * p).is_unit());
        }
    }
}
