//! Figure-eight pattern type definitions
//!
//! This module contains the value types used by the figure-eight engine:
//! - `FigureEightPatternParameters`: pattern shape and placement
//! - `FigureEightPatternPoints`: derived anchor points in the normalized frame
//! - `FigureEightSegment`: the discrete segment the vehicle is following

use libm::fabsf;
use nalgebra::Vector2;

/// Segment of the figure-eight pattern currently being flown
///
/// Exactly one segment is active at a time. `Undefined` means the pattern
/// has not been initialized (or was reset) and no guidance output is
/// produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FigureEightSegment {
    /// Pattern not initialized, no guidance output
    #[default]
    Undefined,
    /// Loiter arc around the north circle
    CircleNorth,
    /// Crossing line from the north-circle exit to the south-circle entry
    NortheastToSouthwest,
    /// Loiter arc around the south circle
    CircleSouth,
    /// Crossing line from the south-circle exit to the north-circle entry
    SoutheastToNorthwest,
}

/// Figure-eight pattern shape and placement parameters
///
/// The major axis runs through both circle centers; `major_radius` is the
/// half-length of that axis and `minor_radius` is the radius of each
/// loiter circle. A feasible pattern requires
/// `major_radius >= 2 * minor_radius`; the engine clamps the major radius
/// up to that floor before use.
#[derive(Clone, Copy, Debug, Default)]
pub struct FigureEightPatternParameters {
    /// Pattern center in the local tangent-plane frame (meters)
    pub center: Vector2<f32>,
    /// Half-length of the pattern's major axis (meters)
    pub major_radius: f32,
    /// Radius of each loiter circle (meters)
    pub minor_radius: f32,
    /// Yaw angle of the major axis relative to the local frame (radians)
    pub orientation: f32,
    /// Overall pattern traversal handedness
    pub direction_counter_clockwise: bool,
}

impl FigureEightPatternParameters {
    /// Check whether any field differs from `other` beyond floating-point
    /// tolerance
    ///
    /// Used to detect setpoint changes that require re-initializing the
    /// active segment.
    pub fn differs_from(&self, other: &Self) -> bool {
        fabsf(self.center.x - other.center.x) > f32::EPSILON
            || fabsf(self.center.y - other.center.y) > f32::EPSILON
            || fabsf(self.major_radius - other.major_radius) > f32::EPSILON
            || fabsf(self.minor_radius - other.minor_radius) > f32::EPSILON
            || fabsf(self.orientation - other.orientation) > f32::EPSILON
            || self.direction_counter_clockwise != other.direction_counter_clockwise
    }
}

/// Anchor points of the figure-eight pattern in the normalized frame
///
/// The normalized frame scales the major-axis half-length to 1.0 and runs
/// the axis along local x. Entry points sit below the axis (negative y),
/// exit points above, on both circles.
#[derive(Clone, Copy, Debug)]
pub struct FigureEightPatternPoints {
    /// Center of the north loiter circle
    pub north_circle_offset: Vector2<f32>,
    /// Tangent point where the northbound crossing line meets the north circle
    pub north_entry_offset: Vector2<f32>,
    /// Tangent point where the north circle meets the southbound crossing line
    pub north_exit_offset: Vector2<f32>,
    /// Center of the south loiter circle
    pub south_circle_offset: Vector2<f32>,
    /// Tangent point where the southbound crossing line meets the south circle
    pub south_entry_offset: Vector2<f32>,
    /// Tangent point where the south circle meets the northbound crossing line
    pub south_exit_offset: Vector2<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FigureEightPatternParameters {
        FigureEightPatternParameters {
            center: Vector2::new(10.0, -20.0),
            major_radius: 500.0,
            minor_radius: 100.0,
            orientation: 0.5,
            direction_counter_clockwise: false,
        }
    }

    #[test]
    fn test_segment_default_is_undefined() {
        assert_eq!(FigureEightSegment::default(), FigureEightSegment::Undefined);
    }

    #[test]
    fn test_parameters_identical_within_tolerance() {
        let a = params();
        let b = a;
        assert!(!a.differs_from(&b));
    }

    #[test]
    fn test_parameters_center_change_detected() {
        let a = params();
        let mut b = a;
        b.center.x += 1.0;
        assert!(a.differs_from(&b));
    }

    #[test]
    fn test_parameters_radius_change_detected() {
        let a = params();
        let mut b = a;
        b.minor_radius += 0.5;
        assert!(a.differs_from(&b));

        let mut c = a;
        c.major_radius -= 2.0;
        assert!(a.differs_from(&c));
    }

    #[test]
    fn test_parameters_direction_change_detected() {
        let a = params();
        let mut b = a;
        b.direction_counter_clockwise = true;
        assert!(a.differs_from(&b));
    }
}
