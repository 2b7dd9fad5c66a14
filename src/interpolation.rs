//! Screw linear interpolation (SCLERP) between rigid transforms.

use crate::{
    dual_quaternion::DualQuaternion,
    error::{AlgebraError, Result},
    screw::ScrewMotion,
};
use std::iter::FusedIterator;

/// Interpolates at constant speed along the screw motion connecting two unit
/// dual quaternions.
///
/// The relative screw motion is decomposed once on construction, so sampling
/// is cheap and cannot fail for parameters in `[0, 1]`.
#[derive(Clone, Copy, Debug)]
pub struct ScrewInterpolator {
    start: DualQuaternion,
    relative_motion: ScrewMotion,
}

/// Iterator over evenly spaced interior samples of a [`ScrewInterpolator`],
/// created by [`DualQuaternion::sclerp_iter`].
#[derive(Clone, Debug)]
pub struct ScrewSamples {
    interpolator: ScrewInterpolator,
    step: f64,
    next_index: usize,
    sample_count: usize,
}

impl ScrewInterpolator {
    /// Prepares interpolation from `start` to `stop`.
    ///
    /// If the rotations of the two transforms are more than a quarter turn
    /// apart in the 4-D sense (negative dot product), `start` is replaced by
    /// its negation, which represents the same transform, so that the
    /// interpolation takes the short way around.
    ///
    /// # Errors
    /// Returns [`AlgebraError::NonUnitDualQuaternion`] if either endpoint is
    /// not a unit dual quaternion, and [`AlgebraError::ScrewSingularity`] if
    /// the relative rotation is a half turn.
    pub fn new(start: &DualQuaternion, stop: &DualQuaternion) -> Result<Self> {
        start.require_unit()?;
        stop.require_unit()?;

        let start = if start.real().dot(&stop.real()) < 0.0 {
            log::trace!("Negating start transform for shortest-path interpolation");
            start.negated()
        } else {
            *start
        };

        let relative_motion = ScrewMotion::decompose(&(start.inverse() * stop)).inspect_err(
            |error| log::debug!("Cannot interpolate from {start} to {stop}: {error}"),
        )?;

        Ok(Self {
            start,
            relative_motion,
        })
    }

    /// Returns the transform a fraction `tau` of the way from the start to
    /// the stop transform.
    ///
    /// # Errors
    /// Returns [`AlgebraError::InterpolationParameterOutOfRange`] if `tau` is
    /// not in `[0, 1]`.
    pub fn sample(&self, tau: f64) -> Result<DualQuaternion> {
        if !(0.0..=1.0).contains(&tau) {
            return Err(AlgebraError::InterpolationParameterOutOfRange { tau });
        }
        Ok(self.sample_unchecked(tau))
    }

    fn sample_unchecked(&self, tau: f64) -> DualQuaternion {
        self.start * self.relative_motion.power(tau)
    }
}

impl ScrewSamples {
    fn new(interpolator: ScrewInterpolator, sample_count: usize) -> Self {
        Self {
            interpolator,
            step: 1.0 / (sample_count as f64 + 1.0),
            next_index: 1,
            sample_count,
        }
    }
}

impl Iterator for ScrewSamples {
    type Item = DualQuaternion;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index > self.sample_count {
            return None;
        }
        let tau = self.step * self.next_index as f64;
        self.next_index += 1;
        Some(self.interpolator.sample_unchecked(tau))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.sample_count + 1).saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScrewSamples {}

impl FusedIterator for ScrewSamples {}

impl DualQuaternion {
    /// Computes `self (self⁻¹ stop)^tau`, the transform a fraction `tau` of
    /// the way along the screw motion from `self` to `stop`.
    ///
    /// # Errors
    /// Returns [`AlgebraError::NonUnitDualQuaternion`] if either endpoint is
    /// not a unit dual quaternion,
    /// [`AlgebraError::InterpolationParameterOutOfRange`] if `tau` is not in
    /// `[0, 1]` and [`AlgebraError::ScrewSingularity`] if the relative
    /// rotation is a half turn.
    pub fn sclerp(&self, stop: &Self, tau: f64) -> Result<Self> {
        ScrewInterpolator::new(self, stop)?.sample(tau)
    }

    /// Returns `sample_count` transforms evenly spaced along the screw motion
    /// from `self` to `stop`, at `tau = k / (sample_count + 1)` for
    /// `k = 1..=sample_count`. Neither endpoint is included.
    ///
    /// # Errors
    /// Returns [`AlgebraError::EmptyTrajectory`] if `sample_count` is zero,
    /// and otherwise fails under the same conditions as
    /// [`sclerp`](Self::sclerp).
    pub fn sclerp_n(&self, stop: &Self, sample_count: usize) -> Result<Vec<Self>> {
        with_trace_logging!("Screw interpolation of {} samples", sample_count; {
            Ok(self.sclerp_iter(stop, sample_count)?.collect())
        })
    }

    /// Lazy version of [`sclerp_n`](Self::sclerp_n). All preconditions are
    /// checked here, so the returned iterator yields every sample.
    ///
    /// # Errors
    /// See [`sclerp_n`](Self::sclerp_n).
    pub fn sclerp_iter(&self, stop: &Self, sample_count: usize) -> Result<ScrewSamples> {
        if sample_count == 0 {
            return Err(AlgebraError::EmptyTrajectory);
        }
        let interpolator = ScrewInterpolator::new(self, stop)?;
        Ok(ScrewSamples::new(interpolator, sample_count))
    }
}
