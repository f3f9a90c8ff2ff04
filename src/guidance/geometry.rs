//! Figure-eight pattern geometry
//!
//! Pure functions computing the pattern's anchor points and mapping
//! positions between the local tangent-plane frame and the pattern's
//! normalized frame.

use libm::sqrtf;
use nalgebra::{Rotation2, Vector2};

use super::types::{FigureEightPatternParameters, FigureEightPatternPoints};

/// Major-axis half-length in the normalized frame
pub const NORMALIZED_MAJOR_RADIUS: f32 = 1.0;

/// Compute the six anchor points of the figure-eight pattern
///
/// Points are expressed in the normalized frame (major-axis half-length
/// scaled to 1.0, axis along x). The entry/exit points are where the
/// crossing lines are tangent to the loiter circles; the transition angle
/// satisfies `cos(theta) = minor / (major - minor)`.
///
/// Caller guarantees `minor_radius > 0` and
/// `major_radius >= 2 * minor_radius` (see the sanitizer in
/// [`super::FigureEight`]).
pub fn pattern_points(parameters: &FigureEightPatternParameters) -> FigureEightPatternPoints {
    let normalized_minor_radius =
        parameters.minor_radius / parameters.major_radius * NORMALIZED_MAJOR_RADIUS;
    let cos_transition_angle =
        parameters.minor_radius / (parameters.major_radius - parameters.minor_radius);
    // The ratio clamp may land exactly on major == 2 * minor, where the
    // transition angle collapses to zero and the crossing lines have zero
    // width. Guard the radicand so that boundary stays finite.
    let sin_transition_angle =
        sqrtf((1.0 - cos_transition_angle * cos_transition_angle).max(0.0));

    let circle_x = NORMALIZED_MAJOR_RADIUS - normalized_minor_radius;
    let tangent_x =
        NORMALIZED_MAJOR_RADIUS - normalized_minor_radius * (1.0 + cos_transition_angle);
    let tangent_y = normalized_minor_radius * sin_transition_angle;

    FigureEightPatternPoints {
        north_circle_offset: Vector2::new(circle_x, 0.0),
        north_entry_offset: Vector2::new(tangent_x, -tangent_y),
        north_exit_offset: Vector2::new(tangent_x, tangent_y),
        south_circle_offset: Vector2::new(-circle_x, 0.0),
        south_entry_offset: Vector2::new(-tangent_x, -tangent_y),
        south_exit_offset: Vector2::new(-tangent_x, tangent_y),
    }
}

/// Rotation angle from the pattern frame to the local frame
///
/// The pattern is axis-symmetric, so reversing the traversal direction is
/// the same as rotating the whole pattern by 180 degrees.
pub fn rotation_angle(parameters: &FigureEightPatternParameters) -> f32 {
    let mut yaw_rotation = parameters.orientation;

    if parameters.direction_counter_clockwise {
        yaw_rotation += core::f32::consts::PI;
    }

    yaw_rotation
}

/// Map a local-frame position into the pattern's normalized, rotated frame
///
/// Subtracts the pattern center, scales by the major radius and rotates
/// into the pattern frame, so all segment tests are independent of pattern
/// placement, size, orientation, and direction.
pub fn normalized_rotated_offset(
    current_position: Vector2<f32>,
    parameters: &FigureEightPatternParameters,
) -> Vector2<f32> {
    let offset = (current_position - parameters.center)
        * (NORMALIZED_MAJOR_RADIUS / parameters.major_radius);
    Rotation2::new(-rotation_angle(parameters)) * offset
}

/// Map a normalized-frame offset back into the local frame
pub fn world_frame_point(
    normalized_offset: Vector2<f32>,
    parameters: &FigureEightPatternParameters,
) -> Vector2<f32> {
    let offset = normalized_offset * (parameters.major_radius / NORMALIZED_MAJOR_RADIUS);
    parameters.center + Rotation2::new(rotation_angle(parameters)) * offset
}
