//! Errors for violated algebraic preconditions.

use crate::{dual_number::DualNumber, dual_quaternion::DualQuaternion, quaternion::Quaternion};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AlgebraError>;

/// The broad class an [`AlgebraError`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A mathematical precondition of the operation was violated.
    Domain,
    /// No real-valued result exists for the given input.
    ArithmeticDomain,
    /// The operation hit a division by zero or an undefined degenerate case.
    Singularity,
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum AlgebraError {
    #[error("Only unit quaternions represent rotations, got {quaternion}")]
    NonUnitQuaternion { quaternion: Quaternion },

    #[error("Translation {quaternion} must be a pure quaternion")]
    NonPureQuaternion { quaternion: Quaternion },

    #[error("Only unit dual quaternions represent rigid transforms, got {dual_quaternion}")]
    NonUnitDualQuaternion { dual_quaternion: DualQuaternion },

    #[error("Interpolation parameter {tau} is outside [0, 1]")]
    InterpolationParameterOutOfRange { tau: f64 },

    #[error("Dual number square root does not exist for {value}")]
    NoRealSquareRoot { value: DualNumber },

    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    #[error("Screw moment is undefined for rotation angle {angle}")]
    ScrewSingularity { angle: f64 },

    #[error("Trajectory must contain at least one sample")]
    EmptyTrajectory,
}

impl AlgebraError {
    /// Returns the class of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NonUnitQuaternion { .. }
            | Self::NonPureQuaternion { .. }
            | Self::NonUnitDualQuaternion { .. }
            | Self::InterpolationParameterOutOfRange { .. } => ErrorKind::Domain,
            Self::NoRealSquareRoot { .. } => ErrorKind::ArithmeticDomain,
            Self::DivisionByZero { .. } | Self::ScrewSingularity { .. } | Self::EmptyTrajectory => {
                ErrorKind::Singularity
            }
        }
    }
}
