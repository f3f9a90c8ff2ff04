//! Guidance Parameter Definitions
//!
//! Defines the guidance parameters consumed by the figure-eight engine,
//! following PX4 naming conventions.
//!
//! # Parameters
//!
//! - `NAV_LOITER_RAD` - Default loiter radius in meters; the sign selects
//!   the fallback traversal direction (**visible in GCS**)
//! - `FW_AIRSPD_MAX` - Maximum airspeed in m/s (**visible in GCS**)

use libm::fabsf;

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

/// Default loiter radius in meters (positive = clockwise fallback)
const DEFAULT_NAV_LOITER_RAD: f32 = 80.0;

/// Default maximum airspeed in m/s
const DEFAULT_AIRSPD_MAX: f32 = 20.0;

/// Minimum loiter radius magnitude in meters
const MIN_LOITER_RAD: f32 = 25.0;

/// Maximum loiter radius magnitude in meters
const MAX_LOITER_RAD: f32 = 1000.0;

/// Minimum maximum-airspeed bound in m/s
const MIN_AIRSPD_MAX: f32 = 0.5;

/// Maximum maximum-airspeed bound in m/s
const MAX_AIRSPD_MAX: f32 = 40.0;

/// Guidance parameters loaded from the parameter store
#[derive(Debug, Clone, Copy)]
pub struct GuidanceParams {
    /// Fallback loiter radius in meters; magnitude replaces a non-finite
    /// commanded minor radius, sign selects the fallback direction
    /// (negative = counter-clockwise)
    pub nav_loiter_rad: f32,
    /// Maximum airspeed bound passed to wind-aware guidance laws (m/s)
    pub airspeed_max: f32,
}

impl Default for GuidanceParams {
    fn default() -> Self {
        Self {
            nav_loiter_rad: DEFAULT_NAV_LOITER_RAD,
            airspeed_max: DEFAULT_AIRSPD_MAX,
        }
    }
}

impl GuidanceParams {
    /// Register guidance parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "NAV_LOITER_RAD",
            ParamValue::Float(DEFAULT_NAV_LOITER_RAD),
            ParamFlags::empty(),
        )?;

        store.register(
            "FW_AIRSPD_MAX",
            ParamValue::Float(DEFAULT_AIRSPD_MAX),
            ParamFlags::empty(),
        )?;

        Ok(())
    }

    /// Load guidance parameters from the parameter store
    ///
    /// Out-of-range values are clamped; the loiter radius keeps its sign
    /// while its magnitude is clamped.
    pub fn from_store(store: &ParameterStore) -> Self {
        let nav_loiter_rad = match store.get("NAV_LOITER_RAD") {
            Some(ParamValue::Float(v)) => clamp_signed_radius(*v),
            Some(ParamValue::Int(v)) => clamp_signed_radius(*v as f32),
            _ => DEFAULT_NAV_LOITER_RAD,
        };

        let airspeed_max = match store.get("FW_AIRSPD_MAX") {
            Some(ParamValue::Float(v)) => v.clamp(MIN_AIRSPD_MAX, MAX_AIRSPD_MAX),
            Some(ParamValue::Int(v)) => (*v as f32).clamp(MIN_AIRSPD_MAX, MAX_AIRSPD_MAX),
            _ => DEFAULT_AIRSPD_MAX,
        };

        Self {
            nav_loiter_rad,
            airspeed_max,
        }
    }

    /// Validate guidance parameters
    pub fn is_valid(&self) -> bool {
        let magnitude = fabsf(self.nav_loiter_rad);
        if !(MIN_LOITER_RAD..=MAX_LOITER_RAD).contains(&magnitude) {
            return false;
        }

        if !(MIN_AIRSPD_MAX..=MAX_AIRSPD_MAX).contains(&self.airspeed_max) {
            return false;
        }

        true
    }
}

/// Clamp the loiter radius magnitude into range, preserving its sign
fn clamp_signed_radius(value: f32) -> f32 {
    let magnitude = fabsf(value).clamp(MIN_LOITER_RAD, MAX_LOITER_RAD);
    if value < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guidance_params_defaults() {
        let params = GuidanceParams::default();

        assert!((params.nav_loiter_rad - 80.0).abs() < 0.001);
        assert!((params.airspeed_max - 20.0).abs() < 0.001);
        assert!(params.is_valid());
    }

    #[test]
    fn test_guidance_params_from_store() {
        let mut store = ParameterStore::new();
        GuidanceParams::register_defaults(&mut store).unwrap();

        let params = GuidanceParams::from_store(&store);
        assert!((params.nav_loiter_rad - 80.0).abs() < 0.001);
        assert!((params.airspeed_max - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_guidance_params_from_store_custom() {
        let mut store = ParameterStore::new();
        GuidanceParams::register_defaults(&mut store).unwrap();

        store
            .set("NAV_LOITER_RAD", ParamValue::Float(-150.0))
            .unwrap();
        store.set("FW_AIRSPD_MAX", ParamValue::Float(25.0)).unwrap();

        let params = GuidanceParams::from_store(&store);
        assert!((params.nav_loiter_rad + 150.0).abs() < 0.001);
        assert!((params.airspeed_max - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_guidance_params_clamp_radius_magnitude() {
        let mut store = ParameterStore::new();
        GuidanceParams::register_defaults(&mut store).unwrap();

        // Magnitude too small, sign preserved
        store
            .set("NAV_LOITER_RAD", ParamValue::Float(-10.0))
            .unwrap();
        let params = GuidanceParams::from_store(&store);
        assert!((params.nav_loiter_rad + MIN_LOITER_RAD).abs() < 0.001);

        // Magnitude too large
        store
            .set("NAV_LOITER_RAD", ParamValue::Float(5000.0))
            .unwrap();
        let params = GuidanceParams::from_store(&store);
        assert!((params.nav_loiter_rad - MAX_LOITER_RAD).abs() < 0.001);
    }

    #[test]
    fn test_guidance_params_clamp_airspeed() {
        let mut store = ParameterStore::new();
        GuidanceParams::register_defaults(&mut store).unwrap();

        store.set("FW_AIRSPD_MAX", ParamValue::Float(500.0)).unwrap();
        let params = GuidanceParams::from_store(&store);
        assert!((params.airspeed_max - MAX_AIRSPD_MAX).abs() < 0.001);
    }

    #[test]
    fn test_guidance_params_validation() {
        let params = GuidanceParams {
            nav_loiter_rad: -80.0,
            airspeed_max: 20.0,
        };
        assert!(params.is_valid());

        let params = GuidanceParams {
            nav_loiter_rad: 5.0,
            airspeed_max: 20.0,
        };
        assert!(!params.is_valid());

        let params = GuidanceParams {
            nav_loiter_rad: 80.0,
            airspeed_max: 100.0,
        };
        assert!(!params.is_valid());
    }
}
