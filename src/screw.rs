//! Screw motion parameterization of rigid transforms.

use crate::{
    Vector3,
    consts::SCREW_SINGULARITY_TOLERANCE,
    dual_quaternion::DualQuaternion,
    error::{AlgebraError, Result},
    quaternion::Quaternion,
};

/// A rigid transform expressed as a rotation by `angle` about a line,
/// combined with a translation by `displacement` along the same line.
///
/// The line is given in Plücker form by its unit direction `axis` and its
/// moment `p × axis` for any point `p` on the line.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrewParameters {
    pub axis: Vector3,
    pub moment: Vector3,
    pub angle: f64,
    pub displacement: f64,
}

/// A unit dual quaternion split into the parts its powers are computed from.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ScrewMotion {
    Screw(ScrewParameters),
    /// The rotation is within tolerance of ±identity, where the screw axis
    /// is undefined.
    Translation {
        translation: Vector3,
        rotation: Quaternion,
    },
}

impl ScrewParameters {
    pub fn new(axis: Vector3, moment: Vector3, angle: f64, displacement: f64) -> Self {
        Self {
            axis,
            moment,
            angle,
            displacement,
        }
    }

    /// Returns the screw about the same line with the angle and the
    /// displacement multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            angle: self.angle * factor,
            displacement: self.displacement * factor,
            ..*self
        }
    }
}

impl_abs_diff_eq!(ScrewParameters, |a, b, epsilon| {
    a.axis.abs_diff_eq(&b.axis, epsilon)
        && a.moment.abs_diff_eq(&b.moment, epsilon)
        && a.angle.abs_diff_eq(&b.angle, epsilon)
        && a.displacement.abs_diff_eq(&b.displacement, epsilon)
});

impl DualQuaternion {
    /// Creates the dual quaternion for the screw motion with the given unit
    /// axis, moment, angle and displacement:
    ///
    /// `(cos(θ/2), u sin(θ/2)) + ε(-d/2 sin(θ/2), d/2 u cos(θ/2) + m sin(θ/2))`
    pub fn from_screw(axis: &Vector3, moment: &Vector3, angle: f64, displacement: f64) -> Self {
        let (sin_half_angle, cos_half_angle) = (0.5 * angle).sin_cos();
        let half_displacement = 0.5 * displacement;
        Self::new(
            Quaternion::from_parts(cos_half_angle, axis * sin_half_angle),
            Quaternion::from_parts(
                -half_displacement * sin_half_angle,
                axis * (half_displacement * cos_half_angle) + moment * sin_half_angle,
            ),
        )
    }

    pub fn from_screw_parameters(screw: &ScrewParameters) -> Self {
        Self::from_screw(
            &screw.axis,
            &screw.moment,
            screw.angle,
            screw.displacement,
        )
    }

    /// Decomposes this unit dual quaternion into screw parameters.
    ///
    /// # Errors
    /// Returns [`AlgebraError::NonUnitDualQuaternion`] if this is not a unit
    /// dual quaternion, and [`AlgebraError::ScrewSingularity`] if the rotation
    /// angle is zero (a pure translation) or a half turn, where the moment is
    /// not uniquely determined.
    pub fn as_screw(&self) -> Result<ScrewParameters> {
        self.require_unit()?;

        let real = self.real();
        let imag = real.imag();
        let sin_half_angle = imag.norm();
        let cos_half_angle = real.w();
        let angle = 2.0 * sin_half_angle.atan2(cos_half_angle);

        if sin_half_angle <= SCREW_SINGULARITY_TOLERANCE
            || cos_half_angle.abs() <= SCREW_SINGULARITY_TOLERANCE
        {
            return Err(AlgebraError::ScrewSingularity { angle });
        }
        let axis = imag / sin_half_angle;
        let cotan = cos_half_angle / sin_half_angle;

        let (translation, _) = self.as_trans()?;
        let displacement = translation.dot(&axis);

        // m = ½ (t × u + cot(θ/2) (t - d u))
        let moment =
            0.5 * (translation.cross(&axis) + (translation - axis * displacement) * cotan);

        Ok(ScrewParameters::new(axis, moment, angle, displacement))
    }

    /// Raises this unit dual quaternion to the given real power by scaling
    /// the angle and displacement of its screw motion.
    ///
    /// A dual quaternion whose rotation is within tolerance of ±identity is
    /// treated as a pure translation, whose power scales the translation.
    ///
    /// # Errors
    /// Returns [`AlgebraError::NonUnitDualQuaternion`] if this is not a unit
    /// dual quaternion and [`AlgebraError::ScrewSingularity`] if the rotation
    /// is a half turn.
    pub fn powf(&self, exponent: f64) -> Result<Self> {
        ScrewMotion::decompose(self).map(|motion| motion.power(exponent))
    }
}

impl ScrewMotion {
    pub(crate) fn decompose(dual_quaternion: &DualQuaternion) -> Result<Self> {
        dual_quaternion.require_unit()?;

        let real = dual_quaternion.real();
        if real.imag().norm() <= SCREW_SINGULARITY_TOLERANCE {
            let dual_quaternion = if real.w() < 0.0 {
                dual_quaternion.negated()
            } else {
                *dual_quaternion
            };
            log::debug!("Treating {dual_quaternion} as a pure translation");

            let (translation, rotation) = dual_quaternion.as_trans()?;
            return Ok(Self::Translation {
                translation,
                rotation,
            });
        }

        dual_quaternion.as_screw().map(Self::Screw)
    }

    pub(crate) fn power(&self, exponent: f64) -> DualQuaternion {
        match self {
            Self::Screw(screw) => DualQuaternion::from_screw_parameters(&screw.scaled(exponent)),
            Self::Translation {
                translation,
                rotation,
            } => DualQuaternion::from_translation_and_rotation(
                &(translation * exponent),
                rotation_power(rotation, exponent),
            ),
        }
    }
}

fn rotation_power(rotation: &Quaternion, exponent: f64) -> Quaternion {
    let imag = rotation.imag();
    let imag_norm = imag.norm();
    if imag_norm == 0.0 {
        return Quaternion::identity();
    }
    let half_angle = exponent * imag_norm.atan2(rotation.w());
    Quaternion::from_parts(half_angle.cos(), imag * (half_angle.sin() / imag_norm))
}
