//! Guidance-law trait definition
//!
//! Platform-agnostic interface to the underlying line/loiter path-following
//! laws. The figure-eight engine computes target geometry and delegates the
//! actual bank-angle computation through this trait, so NPFG-style and
//! classic L1-style implementations plug in interchangeably.

use nalgebra::Vector2;

/// Path-following guidance law
///
/// Implementations retain their own filter state across ticks; the engine
/// invokes exactly one navigate call per tick, then reads the setpoints
/// back through the accessors.
///
/// The airspeed operations only apply to wind-aware laws (NPFG-style);
/// the default implementations make them no-ops so a classic L1-style law
/// only implements the common surface.
pub trait GuidanceLaw {
    /// Characteristic acceptance radius for line/circle transitions,
    /// bounded by `max_value`
    fn switch_distance(&self, max_value: f32) -> f32;

    /// Follow a circular loiter around `circle_center`
    fn navigate_loiter(
        &mut self,
        circle_center: Vector2<f32>,
        current_position: Vector2<f32>,
        radius: f32,
        counter_clockwise: bool,
        ground_speed: Vector2<f32>,
        wind_velocity: Vector2<f32>,
    );

    /// Follow the line from `start` to `end`
    fn navigate_waypoints(
        &mut self,
        start: Vector2<f32>,
        end: Vector2<f32>,
        current_position: Vector2<f32>,
        ground_speed: Vector2<f32>,
        wind_velocity: Vector2<f32>,
    );

    /// Roll setpoint from the last navigate call (radians)
    fn roll_setpoint(&self) -> f32;

    /// Set the nominal (commanded) true airspeed before a navigate call
    fn set_airspeed_nominal(&mut self, _airspeed: f32) {}

    /// Set the maximum allowed true airspeed before a navigate call
    fn set_airspeed_max(&mut self, _airspeed: f32) {}

    /// True-airspeed reference from the last navigate call
    ///
    /// `None` means the law does not shape airspeed and the caller's
    /// commanded airspeed passes through unchanged.
    fn airspeed_reference(&self) -> Option<f32> {
        None
    }
}
