//! Quaternion and dual quaternion algebra for rigid transforms, with screw
//! linear interpolation (SCLERP) between poses.

#[macro_use]
mod macros;

pub mod consts;
pub mod dual_number;
pub mod dual_quaternion;
pub mod error;
pub mod interpolation;
pub mod quaternion;
pub mod screw;

pub use dual_number::DualNumber;
pub use dual_quaternion::DualQuaternion;
pub use error::{AlgebraError, ErrorKind, Result};
pub use interpolation::{ScrewInterpolator, ScrewSamples};
pub use quaternion::Quaternion;
pub use screw::ScrewParameters;

/// Three-component vector used for axes, moments, translations and points.
pub type Vector3 = nalgebra::Vector3<f64>;
