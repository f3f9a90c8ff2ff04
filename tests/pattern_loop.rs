//! Full-pattern traversal test
//!
//! Walks an ideal vehicle along the figure-eight path for two laps through
//! the public engine API and checks that the segment state machine cycles
//! through all four segments in order and that every tick produces exactly
//! one guidance call of the kind matching the active segment.

use nalgebra::{Rotation2, Vector2};

use fig8_guidance::guidance::{
    pattern_points, world_frame_point, AirDataInputs, FigureEight, FigureEightPatternParameters,
    FigureEightSegment, GuidanceLaw,
};
use fig8_guidance::parameters::GuidanceParams;

struct RecordingLaw {
    loiter_calls: u32,
    waypoint_calls: u32,
}

impl RecordingLaw {
    fn new() -> Self {
        Self {
            loiter_calls: 0,
            waypoint_calls: 0,
        }
    }
}

impl GuidanceLaw for RecordingLaw {
    fn switch_distance(&self, max_value: f32) -> f32 {
        25.0_f32.min(max_value)
    }

    fn navigate_loiter(
        &mut self,
        _circle_center: Vector2<f32>,
        _current_position: Vector2<f32>,
        _radius: f32,
        _counter_clockwise: bool,
        _ground_speed: Vector2<f32>,
        _wind_velocity: Vector2<f32>,
    ) {
        self.loiter_calls += 1;
    }

    fn navigate_waypoints(
        &mut self,
        _start: Vector2<f32>,
        _end: Vector2<f32>,
        _current_position: Vector2<f32>,
        _ground_speed: Vector2<f32>,
        _wind_velocity: Vector2<f32>,
    ) {
        self.waypoint_calls += 1;
    }

    fn roll_setpoint(&self) -> f32 {
        0.2
    }
}

fn is_circle(segment: FigureEightSegment) -> bool {
    matches!(
        segment,
        FigureEightSegment::CircleNorth | FigureEightSegment::CircleSouth
    )
}

#[test]
fn test_two_laps_cycle_all_segments_in_order() {
    let parameters = FigureEightPatternParameters {
        center: Vector2::new(200.0, -100.0),
        major_radius: 500.0,
        minor_radius: 100.0,
        orientation: 0.4,
        direction_counter_clockwise: false,
    };
    let points = pattern_points(&parameters);

    // Normalized waypoints along one ideal lap, starting on the north
    // circle: around the circle (crossing its center along the major
    // axis), out the exit, down the crossing line, around the south
    // circle, and back up.
    let lap: Vec<Vector2<f32>> = vec![
        Vector2::new(1.0, 0.0),
        points.north_exit_offset,
        Vector2::new(0.0, 0.0),
        points.south_entry_offset,
        Vector2::new(-1.0, 0.0),
        points.south_exit_offset,
        Vector2::new(0.0, 0.0),
        points.north_entry_offset,
    ];
    let expected: Vec<FigureEightSegment> = vec![
        FigureEightSegment::CircleNorth,
        FigureEightSegment::NortheastToSouthwest,
        FigureEightSegment::NortheastToSouthwest,
        FigureEightSegment::CircleSouth,
        FigureEightSegment::CircleSouth,
        FigureEightSegment::SoutheastToNorthwest,
        FigureEightSegment::SoutheastToNorthwest,
        FigureEightSegment::CircleNorth,
    ];

    let mut engine = FigureEight::new(GuidanceParams::default());
    let mut law = RecordingLaw::new();
    let air = AirDataInputs::default();

    // Ground speed along the pattern's major axis (used only to classify
    // the joining segment)
    let ground_speed = Rotation2::new(parameters.orientation) * Vector2::new(15.0, 0.0);

    let start = world_frame_point(Vector2::new(0.9, -0.1), &parameters);
    engine.initialize_pattern(start, ground_speed, &parameters);
    assert_eq!(engine.current_segment(), FigureEightSegment::CircleNorth);

    let mut ticks = 0;
    for _ in 0..2 {
        for (normalized, want) in lap.iter().zip(expected.iter()) {
            let position = world_frame_point(*normalized, &parameters);
            engine.initialize_pattern(position, ground_speed, &parameters);
            engine.update_setpoint(position, ground_speed, &parameters, 15.0, &mut law, &air);
            ticks += 1;

            assert_eq!(engine.current_segment(), *want);
            assert_eq!(law.loiter_calls + law.waypoint_calls, ticks);
            if is_circle(*want) {
                assert!(law.loiter_calls > 0);
            }
            assert!((engine.roll_setpoint() - 0.2).abs() < 1e-6);
            assert!((engine.indicated_airspeed_setpoint() - 15.0).abs() < 1e-6);
        }
    }

    // One guidance call per tick, both kinds exercised
    assert_eq!(law.loiter_calls + law.waypoint_calls, ticks);
    assert!(law.loiter_calls >= 8);
    assert!(law.waypoint_calls >= 8);
}

#[test]
fn test_reinitialize_on_moved_pattern() {
    let mut parameters = FigureEightPatternParameters {
        center: Vector2::zeros(),
        major_radius: 500.0,
        minor_radius: 100.0,
        orientation: 0.0,
        direction_counter_clockwise: false,
    };

    let mut engine = FigureEight::new(GuidanceParams::default());
    let ground_speed = Vector2::new(15.0, 0.0);

    engine.initialize_pattern(Vector2::zeros(), ground_speed, &parameters);
    assert_eq!(
        engine.current_segment(),
        FigureEightSegment::SoutheastToNorthwest
    );

    // Moving the pattern center re-derives the segment from the new
    // relative position
    parameters.center = Vector2::new(-600.0, 0.0);
    engine.initialize_pattern(Vector2::zeros(), ground_speed, &parameters);
    assert_eq!(engine.current_segment(), FigureEightSegment::CircleNorth);
}
