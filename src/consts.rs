//! Numerical tolerances.

/// Maximum deviation of a quaternion's norm from one for it to count as a
/// unit quaternion.
pub const UNIT_TOLERANCE: f64 = 1e-9;

/// Maximum magnitude of the 4-D dot product between two quaternions for them
/// to count as orthogonal.
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-9;

/// Minimum magnitude of `sin(θ/2)` and `cos(θ/2)` for a rotation angle `θ`
/// to admit a unique screw moment.
pub const SCREW_SINGULARITY_TOLERANCE: f64 = 1e-9;
