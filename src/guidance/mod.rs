//! Figure-eight guidance subsystem
//!
//! Computes bank-angle and airspeed setpoints for a figure-eight loiter
//! pattern: two tangent loiter circles connected by two straight crossing
//! segments, flown continuously.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Position controller tick                    │
//! │   initialize_pattern() + update_setpoint() at loop rate      │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │ FigureEight                                                  │
//! │   sanitize params → pattern points → segment state machine   │
//! │   → world-frame target geometry                              │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │ navigate_loiter / navigate_waypoints
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              GuidanceLaw (trait)                             │
//! │     NPFG-style or L1-style path following (external)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut engine = FigureEight::new(GuidanceParams::default());
//!
//! // In control loop:
//! engine.initialize_pattern(position, ground_speed, &pattern);
//! engine.update_setpoint(position, ground_speed, &pattern,
//!                        target_airspeed, &mut law, &air_data);
//! attitude.set_roll(engine.roll_setpoint());
//! ```

mod figure_eight;
mod geometry;
mod segment;
mod traits;
mod types;

pub use figure_eight::{AirDataInputs, FigureEight};
pub use geometry::{pattern_points, world_frame_point};
pub use segment::PatternState;
pub use traits::GuidanceLaw;
pub use types::{FigureEightPatternParameters, FigureEightPatternPoints, FigureEightSegment};
