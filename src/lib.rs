#![cfg_attr(not(test), no_std)]

//! fig8_guidance - Figure-eight loiter guidance for fixed-wing vehicles
//!
//! This crate contains the platform-agnostic segment state machine and
//! pattern geometry engine for flying a closed figure-eight loiter pattern:
//! two tangent loiter circles joined by two straight crossing segments.
//! It is invoked once per control-loop tick and produces bank-angle and
//! airspeed setpoints by delegating to an externally provided
//! line/loiter guidance law.
//!
//! # Design Principles
//!
//! - **Pure no_std**: no platform dependencies, host-testable
//! - **Trait abstractions**: the path-following law is injected via the
//!   [`guidance::GuidanceLaw`] trait
//! - **Value-typed geometry**: pattern parameters and anchor points are
//!   immutable value structs, recomputed on demand
//!
//! # Modules
//!
//! - [`guidance`]: pattern geometry, segment state machine, and the
//!   setpoint dispatcher
//! - [`parameters`]: parameter store and the guidance parameter block

pub mod guidance;
pub mod parameters;
