//! Parameter management types and utilities
//!
//! This module provides the parameter store used for runtime configuration
//! and the typed guidance parameter block. Persistence and the GCS surface
//! are left to the integrating firmware.

pub mod error;
pub mod guidance;
pub mod storage;

pub use error::ParameterError;
pub use guidance::GuidanceParams;
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, PARAM_NAME_LEN};
