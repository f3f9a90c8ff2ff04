//! Figure-eight segment state machine
//!
//! Tracks which geometric segment of the pattern the vehicle is currently
//! following and decides when to hand over to the next one. Segment exit
//! uses the guidance law's acceptance radius plus topological failsafe
//! conditions so the pattern always progresses even under poor tracking.

use nalgebra::{Rotation2, Vector2};

use super::geometry::{
    normalized_rotated_offset, pattern_points, rotation_angle, NORMALIZED_MAJOR_RADIUS,
};
use super::types::{
    FigureEightPatternParameters, FigureEightPatternPoints, FigureEightSegment,
};

/// Runtime state of the figure-eight pattern
///
/// Created `Undefined`; (re-)initialized whenever the caller supplies
/// materially different parameters or after [`PatternState::reset`].
/// Mutated exactly once per tick by [`PatternState::update`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PatternState {
    current_segment: FigureEightSegment,
    active_parameters: FigureEightPatternParameters,
    /// True once the vehicle has crossed the active circle's center along
    /// the major axis. Prevents a circle segment from exiting on transient
    /// position noise near the entry point.
    passed_circle_center_along_major_axis: bool,
}

impl PatternState {
    /// Create a new state with no active segment
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active segment
    pub fn segment(&self) -> FigureEightSegment {
        self.current_segment
    }

    /// Hysteresis flag, exposed for telemetry
    pub fn passed_circle_center_along_major_axis(&self) -> bool {
        self.passed_circle_center_along_major_axis
    }

    /// Initialize the active segment from the vehicle's position and heading
    ///
    /// Runs only if no segment is active yet or the parameters changed
    /// beyond tolerance; otherwise it is a no-op that preserves the current
    /// segment and hysteresis flag. The entry point into the pattern is not
    /// known a priori, so classification uses both the normalized position
    /// and the direction of travel along the major axis.
    pub fn initialize(
        &mut self,
        current_position: Vector2<f32>,
        ground_speed: Vector2<f32>,
        parameters: &FigureEightPatternParameters,
    ) {
        if self.current_segment != FigureEightSegment::Undefined
            && !self.active_parameters.differs_from(parameters)
        {
            return;
        }

        let rel_pos_to_center = normalized_rotated_offset(current_position, parameters);
        let ground_speed_rotated = Rotation2::new(-rotation_angle(parameters)) * ground_speed;
        let points = pattern_points(parameters);

        self.current_segment = if rel_pos_to_center.x > NORMALIZED_MAJOR_RADIUS {
            // Far away north, snap to the nearest circle
            FigureEightSegment::CircleNorth
        } else if rel_pos_to_center.x < -NORMALIZED_MAJOR_RADIUS {
            // Far away south
            FigureEightSegment::CircleSouth
        } else if ground_speed_rotated.x > 0.0 {
            // Flying northbound
            if rel_pos_to_center.x > points.north_circle_offset.x {
                FigureEightSegment::CircleNorth
            } else {
                FigureEightSegment::SoutheastToNorthwest
            }
        } else if rel_pos_to_center.x < points.south_circle_offset.x {
            // Flying southbound (or stationary), already at the south circle
            FigureEightSegment::CircleSouth
        } else {
            FigureEightSegment::NortheastToSouthwest
        };

        self.active_parameters = *parameters;
        self.passed_circle_center_along_major_axis = false;
    }

    /// Invalidate the active segment
    ///
    /// Used when the pattern is abandoned; the next [`PatternState::initialize`]
    /// re-classifies from scratch.
    pub fn reset(&mut self) {
        self.current_segment = FigureEightSegment::Undefined;
        self.passed_circle_center_along_major_axis = false;
    }

    /// Evaluate the segment exit conditions for this tick
    ///
    /// `switch_distance_normalized` is the guidance law's acceptance radius
    /// scaled into the normalized frame. Circle segments additionally
    /// require the hysteresis flag before they may exit; line segments
    /// carry an extra `|x| > 1` escape in case the vehicle overshoots the
    /// whole pattern. Boundary convention: y-sign tests are strict
    /// comparisons against zero.
    pub fn update(
        &mut self,
        current_position: Vector2<f32>,
        parameters: &FigureEightPatternParameters,
        switch_distance_normalized: f32,
        points: &FigureEightPatternPoints,
    ) {
        let rel_pos_to_center = normalized_rotated_offset(current_position, parameters);

        match self.current_segment {
            FigureEightSegment::CircleNorth => {
                if rel_pos_to_center.x > points.north_circle_offset.x {
                    self.passed_circle_center_along_major_axis = true;
                }

                let to_exit = points.north_exit_offset - rel_pos_to_center;

                // Failsafe: if tracking never brought us inside the
                // acceptance radius, the vehicle ending up west of and
                // above the exit point still forces progression.
                if self.passed_circle_center_along_major_axis
                    && (to_exit.norm() < switch_distance_normalized
                        || (rel_pos_to_center.x < points.north_exit_offset.x
                            && rel_pos_to_center.y > 0.0))
                {
                    self.current_segment = FigureEightSegment::NortheastToSouthwest;
                }
            }

            FigureEightSegment::NortheastToSouthwest => {
                self.passed_circle_center_along_major_axis = false;
                let to_exit = points.south_entry_offset - rel_pos_to_center;

                if to_exit.norm() < switch_distance_normalized
                    || (rel_pos_to_center.x < points.south_entry_offset.x
                        && rel_pos_to_center.y < 0.0)
                    || rel_pos_to_center.x < -NORMALIZED_MAJOR_RADIUS
                {
                    self.current_segment = FigureEightSegment::CircleSouth;
                }
            }

            FigureEightSegment::CircleSouth => {
                if rel_pos_to_center.x < points.south_circle_offset.x {
                    self.passed_circle_center_along_major_axis = true;
                }

                let to_exit = points.south_exit_offset - rel_pos_to_center;

                if self.passed_circle_center_along_major_axis
                    && (to_exit.norm() < switch_distance_normalized
                        || (rel_pos_to_center.x > points.south_exit_offset.x
                            && rel_pos_to_center.y > 0.0))
                {
                    self.current_segment = FigureEightSegment::SoutheastToNorthwest;
                }
            }

            FigureEightSegment::SoutheastToNorthwest => {
                self.passed_circle_center_along_major_axis = false;
                let to_exit = points.north_entry_offset - rel_pos_to_center;

                if to_exit.norm() < switch_distance_normalized
                    || (rel_pos_to_center.x > points.north_entry_offset.x
                        && rel_pos_to_center.y < 0.0)
                    || rel_pos_to_center.x > NORMALIZED_MAJOR_RADIUS
                {
                    self.current_segment = FigureEightSegment::CircleNorth;
                }
            }

            FigureEightSegment::Undefined => {}
        }
    }
}
