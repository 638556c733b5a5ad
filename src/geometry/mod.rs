//! Stateless numeric kernel
//!
//! Pure functions over point sequences: normalization, resampling,
//! distance metrics, circle fitting and closure/self-intersection tests.
//! Every function here is independently testable and performs no I/O.

pub mod circle;
pub mod frechet;
pub mod path;
pub mod predicates;

pub use circle::{
    fit_circle, point_angle_on_circle, point_deviation_from_circle, rms_deviation,
    standard_deviation, CircleFit,
};
pub use frechet::discrete_frechet_distance;
pub use path::{nearest_point_index, normalize_to_unit_space, path_length, resample};
pub use predicates::{is_closed, self_intersects, signed_area, DEFAULT_CLOSURE_RATIO};
