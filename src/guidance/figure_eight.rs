//! Figure-eight guidance engine
//!
//! Facade over the segment state machine: sanitizes the pattern
//! parameters, converts the active segment's reference geometry into the
//! local frame, and delegates path following to the injected
//! [`GuidanceLaw`].

use libm::fabsf;
use nalgebra::Vector2;

use super::geometry::{pattern_points, world_frame_point, NORMALIZED_MAJOR_RADIUS};
use super::segment::PatternState;
use super::traits::GuidanceLaw;
use super::types::{FigureEightPatternParameters, FigureEightSegment};
use crate::parameters::GuidanceParams;

/// Handedness of the north circle in the canonical (unrotated) frame.
/// Direction reversal of the whole pattern is folded into the rotation
/// angle, so these never change.
const NORTH_CIRCLE_IS_COUNTER_CLOCKWISE: bool = false;
const SOUTH_CIRCLE_IS_COUNTER_CLOCKWISE: bool = true;

/// Major radius substituted when the commanded one is not finite
const DEFAULT_MAJOR_TO_MINOR_AXIS_RATIO: f32 = 2.5;

/// Smallest ratio for which the crossing lines remain geometrically
/// defined (tangency requires major >= 2 * minor)
const MINIMAL_FEASIBLE_MAJOR_TO_MINOR_AXIS_RATIO: f32 = 2.0;

/// Per-tick ambient air data consumed by wind-aware guidance laws
#[derive(Clone, Copy, Debug)]
pub struct AirDataInputs {
    /// Wind velocity estimate in the local frame (m/s)
    pub wind_velocity: Vector2<f32>,
    /// Conversion factor from equivalent to true airspeed
    pub eas_to_tas: f32,
}

impl Default for AirDataInputs {
    fn default() -> Self {
        Self {
            wind_velocity: Vector2::zeros(),
            eas_to_tas: 1.0,
        }
    }
}

/// Figure-eight pattern guidance engine
///
/// Owns the pattern runtime state and the last computed setpoints. One
/// instance per vehicle; all calls happen from the control-loop thread.
pub struct FigureEight {
    state: PatternState,
    config: GuidanceParams,
    roll_setpoint: f32,
    indicated_airspeed_setpoint: f32,
}

impl FigureEight {
    /// Create a new engine with no active segment
    pub fn new(config: GuidanceParams) -> Self {
        Self {
            state: PatternState::new(),
            config,
            roll_setpoint: 0.0,
            indicated_airspeed_setpoint: 0.0,
        }
    }

    /// Currently active pattern segment
    pub fn current_segment(&self) -> FigureEightSegment {
        self.state.segment()
    }

    /// Roll setpoint from the last update (radians)
    pub fn roll_setpoint(&self) -> f32 {
        self.roll_setpoint
    }

    /// Indicated airspeed setpoint from the last update
    pub fn indicated_airspeed_setpoint(&self) -> f32 {
        self.indicated_airspeed_setpoint
    }

    /// Initialize the active segment if the pattern is new or its
    /// parameters changed
    ///
    /// Call once per tick before [`FigureEight::update_setpoint`]. A no-op
    /// while the same pattern stays active.
    pub fn initialize_pattern(
        &mut self,
        current_position: Vector2<f32>,
        ground_speed: Vector2<f32>,
        parameters: &FigureEightPatternParameters,
    ) {
        let valid_parameters = self.sanitize_parameters(parameters);
        self.state
            .initialize(current_position, ground_speed, &valid_parameters);
    }

    /// Abandon the pattern
    ///
    /// The segment becomes `Undefined` and subsequent updates leave the
    /// setpoints untouched until the pattern is initialized again.
    pub fn reset_pattern(&mut self) {
        self.state.reset();
    }

    /// Run one guidance tick
    ///
    /// Evaluates segment transitions, converts the active segment's
    /// reference geometry to the local frame and invokes the guidance law.
    /// With an `Undefined` segment no guidance call is made and the
    /// previous setpoints are retained.
    pub fn update_setpoint(
        &mut self,
        current_position: Vector2<f32>,
        ground_speed: Vector2<f32>,
        parameters: &FigureEightPatternParameters,
        target_airspeed: f32,
        law: &mut dyn GuidanceLaw,
        air: &AirDataInputs,
    ) {
        let valid_parameters = self.sanitize_parameters(parameters);

        let points = pattern_points(&valid_parameters);

        let switch_distance_normalized = law.switch_distance(f32::MAX) * NORMALIZED_MAJOR_RADIUS
            / valid_parameters.major_radius;

        self.state.update(
            current_position,
            &valid_parameters,
            switch_distance_normalized,
            &points,
        );

        match self.state.segment() {
            FigureEightSegment::CircleNorth => self.apply_circle(
                NORTH_CIRCLE_IS_COUNTER_CLOCKWISE,
                points.north_circle_offset,
                current_position,
                ground_speed,
                &valid_parameters,
                target_airspeed,
                law,
                air,
            ),
            FigureEightSegment::NortheastToSouthwest => self.apply_line(
                points.north_exit_offset,
                points.south_entry_offset,
                current_position,
                ground_speed,
                &valid_parameters,
                target_airspeed,
                law,
                air,
            ),
            FigureEightSegment::CircleSouth => self.apply_circle(
                SOUTH_CIRCLE_IS_COUNTER_CLOCKWISE,
                points.south_circle_offset,
                current_position,
                ground_speed,
                &valid_parameters,
                target_airspeed,
                law,
                air,
            ),
            FigureEightSegment::SoutheastToNorthwest => self.apply_line(
                points.south_exit_offset,
                points.north_entry_offset,
                current_position,
                ground_speed,
                &valid_parameters,
                target_airspeed,
                law,
                air,
            ),
            FigureEightSegment::Undefined => {}
        }
    }

    /// Replace degenerate inputs instead of rejecting them
    ///
    /// Non-finite minor radius falls back to the magnitude of the default
    /// loiter radius parameter; a non-finite major radius is rebuilt from
    /// the minor one, taking the traversal direction from the parameter's
    /// sign. The major radius is then clamped up to the minimum feasible
    /// ratio so the transition-angle cosine stays inside the unit domain.
    fn sanitize_parameters(
        &self,
        parameters: &FigureEightPatternParameters,
    ) -> FigureEightPatternParameters {
        let mut valid_parameters = *parameters;

        if !parameters.minor_radius.is_finite() {
            valid_parameters.minor_radius = fabsf(self.config.nav_loiter_rad);
        }

        if !parameters.major_radius.is_finite() {
            valid_parameters.major_radius =
                DEFAULT_MAJOR_TO_MINOR_AXIS_RATIO * valid_parameters.minor_radius;
            valid_parameters.direction_counter_clockwise = self.config.nav_loiter_rad < 0.0;
        }

        valid_parameters.major_radius = valid_parameters.major_radius.max(
            MINIMAL_FEASIBLE_MAJOR_TO_MINOR_AXIS_RATIO * valid_parameters.minor_radius,
        );

        valid_parameters
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_circle(
        &mut self,
        counter_clockwise: bool,
        normalized_circle_offset: Vector2<f32>,
        current_position: Vector2<f32>,
        ground_speed: Vector2<f32>,
        parameters: &FigureEightPatternParameters,
        target_airspeed: f32,
        law: &mut dyn GuidanceLaw,
        air: &AirDataInputs,
    ) {
        let circle_center = world_frame_point(normalized_circle_offset, parameters);

        law.set_airspeed_nominal(target_airspeed * air.eas_to_tas);
        law.set_airspeed_max(self.config.airspeed_max * air.eas_to_tas);
        law.navigate_loiter(
            circle_center,
            current_position,
            parameters.minor_radius,
            counter_clockwise,
            ground_speed,
            air.wind_velocity,
        );

        self.read_back_setpoints(law, target_airspeed, air);
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_line(
        &mut self,
        normalized_line_start_offset: Vector2<f32>,
        normalized_line_end_offset: Vector2<f32>,
        current_position: Vector2<f32>,
        ground_speed: Vector2<f32>,
        parameters: &FigureEightPatternParameters,
        target_airspeed: f32,
        law: &mut dyn GuidanceLaw,
        air: &AirDataInputs,
    ) {
        let line_start = world_frame_point(normalized_line_start_offset, parameters);
        let line_end = world_frame_point(normalized_line_end_offset, parameters);

        law.set_airspeed_nominal(target_airspeed * air.eas_to_tas);
        law.set_airspeed_max(self.config.airspeed_max * air.eas_to_tas);
        law.navigate_waypoints(
            line_start,
            line_end,
            current_position,
            ground_speed,
            air.wind_velocity,
        );

        self.read_back_setpoints(law, target_airspeed, air);
    }

    fn read_back_setpoints(
        &mut self,
        law: &dyn GuidanceLaw,
        target_airspeed: f32,
        air: &AirDataInputs,
    ) {
        self.roll_setpoint = law.roll_setpoint();
        self.indicated_airspeed_setpoint = match law.airspeed_reference() {
            Some(true_airspeed) => true_airspeed / air.eas_to_tas,
            None => target_airspeed,
        };
    }
}
